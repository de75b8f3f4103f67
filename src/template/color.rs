use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

/// `frameColor` as authored: any CSS color string (`#fff`, `#8B4513`, `gold`, `rgb(...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef(Rgba8);

impl ColorDef {
    pub const fn new(color: Rgba8) -> Self {
        Self(color)
    }

    /// Parse a CSS color string.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty color".to_owned());
        }
        let c = vello_cpu::peniko::color::parse_color(&s.to_ascii_lowercase())
            .map_err(|e| format!("invalid color \"{s}\": {e}"))?
            .to_alpha_color::<vello_cpu::peniko::color::Srgb>()
            .to_rgba8();
        Ok(Self(Rgba8::new(c.r, c.g, c.b, c.a)))
    }

    pub fn to_rgba8(self) -> Rgba8 {
        self.0
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let Rgba8 { r, g, b, a } = self.0;
        let hex = if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        };
        serializer.serialize_str(&hex)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
