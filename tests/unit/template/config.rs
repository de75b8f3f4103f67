use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::template::resolve::Template;

#[test]
fn parses_seeded_frame_record() {
    let cfg = TemplateConfig::from_json_value(json!({
        "category": "frame",
        "frameColor": "#8B4513",
        "innerPadding": 60,
        "borderWidth": 40,
        "printArea": { "width": 280, "height": 350, "x": 60, "y": 75 }
    }))
    .unwrap();

    assert_eq!(cfg.kind, Some(TemplateKind::Frame));
    assert_eq!(cfg.border_width, Some(40.0));
    assert_eq!(cfg.print_area, Some(PrintArea::new(60.0, 75.0, 280.0, 350.0)));
    assert_eq!(
        cfg.frame_color.map(|c| c.to_rgba8()),
        Some(crate::foundation::core::Rgba8::opaque(0x8b, 0x45, 0x13))
    );
    assert_eq!(cfg.grid_layout, None);
}

#[test]
fn parses_collage_grid_and_kind_alias() {
    let cfg = TemplateConfig::from_json_str(
        r#"{"kind":"Collage","gridLayout":{"rows":2,"cols":3}}"#,
    )
    .unwrap();
    assert_eq!(cfg.kind, Some(TemplateKind::Collage));
    assert_eq!(cfg.grid_layout, Some(GridLayout { rows: 2, cols: 3 }));
    assert_eq!(cfg.grid_layout.unwrap().cell_count(), 6);
}

#[test]
fn malformed_fields_are_dropped_not_fatal() {
    let cfg = TemplateConfig::from_json_value(json!({
        "category": 7,
        "frameColor": "not-a-color",
        "borderWidth": "wide",
        "printArea": { "x": 1, "y": 2 },
        "gridLayout": { "rows": -1, "cols": 2 }
    }))
    .unwrap();
    assert_eq!(cfg, TemplateConfig::default());
}

#[test]
fn empty_and_unknown_kind_tags() {
    let cfg = TemplateConfig::from_json_value(json!({ "category": "" })).unwrap();
    assert_eq!(cfg.kind, None);

    let cfg = TemplateConfig::from_json_value(json!({ "category": "poster" })).unwrap();
    assert_eq!(cfg.kind, Some(TemplateKind::Frame));

    let cfg = TemplateConfig::from_json_value(json!({ "category": null })).unwrap();
    assert_eq!(cfg.kind, None);
}

#[test]
fn non_object_config_is_a_serde_error() {
    let err = TemplateConfig::from_json_str("[1,2,3]").unwrap_err();
    assert!(matches!(err, PrintfitError::Serde(_)));
    assert!(TemplateConfig::from_json_str("{").is_err());
}

#[test]
fn print_area_to_rect() {
    let r = PrintArea::new(60.0, 75.0, 280.0, 350.0).to_rect();
    assert_eq!(r, Rect::new(60.0, 75.0, 340.0, 425.0));
    assert_eq!(r.center(), crate::foundation::core::Point::new(200.0, 250.0));
}

#[test]
fn product_record_accepts_populated_category() {
    let rec = ProductRecord::from_json_str(
        r#"{
            "title": "Magic Color Mug",
            "category": { "_id": "abc", "title": "Mugs" },
            "customizationConfig": { "category": "mug", "printArea": { "width": 180, "height": 140, "x": 110, "y": 130 } }
        }"#,
    )
    .unwrap();
    let ctx = rec.context();
    assert_eq!(ctx.title, "Magic Color Mug");
    assert_eq!(ctx.category.as_deref(), Some("Mugs"));
    let cfg = rec.customization_config.unwrap();
    assert_eq!(cfg.kind, Some(TemplateKind::Mug));
}

#[test]
fn product_record_tolerates_missing_and_broken_config() {
    let rec = ProductRecord::from_json_str(r#"{"title":"Plain","category":"Frames"}"#).unwrap();
    assert_eq!(rec.customization_config, None);
    assert_eq!(rec.context().category.as_deref(), Some("Frames"));

    let rec = ProductRecord::from_json_str(r#"{"title":"X","customizationConfig":"oops"}"#).unwrap();
    assert_eq!(rec.customization_config, None);
    assert_eq!(rec.category, None);
}

#[test]
fn positional_config_is_not_read_as_fields() {
    let err = TemplateConfig::from_json_value(json!(["mug", null, 5])).unwrap_err();
    assert!(matches!(err, PrintfitError::Serde(_)));

    let rec = ProductRecord::from_json_str(
        r#"{"title":"t","customizationConfig":["mug",null,5]}"#,
    )
    .unwrap();
    assert_eq!(rec.customization_config, None);

    let t = Template::resolve(rec.customization_config.as_ref(), &rec.context());
    assert_eq!(t.kind, TemplateKind::Frame);
    assert_eq!(t.border_width, 40.0);
}

#[test]
fn config_serializes_kind_under_category() {
    let cfg = TemplateConfig {
        kind: Some(TemplateKind::Mug),
        ..TemplateConfig::default()
    };
    let v = serde_json::to_value(&cfg).unwrap();
    assert_eq!(v, json!({ "category": "mug" }));
}
