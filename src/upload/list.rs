use crate::template::resolve::TemplateKind;
use crate::upload::decode::UploadedImage;

/// Ordered uploads for one preview session.
///
/// Single-image templates keep only the latest upload. Collages append, and list index `k`
/// feeds grid cell `k` (row-major).
#[derive(Clone, Debug, Default)]
pub struct ImageList {
    items: Vec<UploadedImage>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert according to the template's upload policy. Returns the index the image landed at.
    pub fn insert(&mut self, kind: TemplateKind, image: UploadedImage) -> usize {
        if kind.is_multi_image() {
            self.items.push(image);
            self.items.len() - 1
        } else {
            self.items.clear();
            self.items.push(image);
            0
        }
    }

    pub fn get(&self, index: usize) -> Option<&UploadedImage> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[UploadedImage] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadedImage> {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/upload/list.rs"]
mod tests;
