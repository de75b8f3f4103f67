use pretty_assertions::assert_eq;

use super::*;

fn product(title: &str, category: Option<&str>) -> ProductContext {
    ProductContext::new(title, category)
}

#[test]
fn explicit_kind_beats_category() {
    let cfg = TemplateConfig {
        kind: Some(TemplateKind::Mug),
        ..TemplateConfig::default()
    };
    let t = Template::resolve(Some(&cfg), &product("Oak", Some("Frames")));
    assert_eq!(t.kind, TemplateKind::Mug);
}

#[test]
fn mugs_category_infers_mug() {
    let t = Template::resolve(Some(&TemplateConfig::default()), &product("Cup", Some("Mugs")));
    assert_eq!(t.kind, TemplateKind::Mug);
    let t = Template::resolve(None, &product("Cup", Some("Mugs")));
    assert_eq!(t.kind, TemplateKind::Mug);
}

#[test]
fn everything_else_defaults_to_frame() {
    assert_eq!(TemplateKind::resolve(None, None), TemplateKind::Frame);
    assert_eq!(
        TemplateKind::resolve(None, Some("Collages")),
        TemplateKind::Frame
    );
    assert_eq!(TemplateKind::resolve(None, Some("mugs")), TemplateKind::Frame);
}

#[test]
fn kind_defaults_for_geometry() {
    let frame = Template::resolve(None, &product("", None));
    assert_eq!(frame.print_area, Rect::new(60.0, 75.0, 340.0, 425.0));
    assert_eq!(frame.fit_area, Rect::new(50.0, 50.0, 350.0, 450.0));
    assert_eq!(frame.border_width, 40.0);
    assert_eq!(frame.frame_color, Rgba8::BLACK);

    let mug = Template::resolve(None, &product("", Some("Mugs")));
    assert_eq!(mug.print_area, Rect::new(100.0, 125.0, 300.0, 275.0));

    let cfg = TemplateConfig {
        kind: Some(TemplateKind::Collage),
        ..TemplateConfig::default()
    };
    let collage = Template::resolve(Some(&cfg), &product("", None));
    assert_eq!(collage.grid, GridLayout { rows: 2, cols: 2 });
    assert_eq!(collage.print_area, Rect::new(10.0, 10.0, 390.0, 490.0));
}

#[test]
fn zero_border_uses_default_and_configured_area_drives_fit() {
    let cfg = TemplateConfig {
        border_width: Some(0.0),
        print_area: Some(PrintArea::new(40.0, 50.0, 320.0, 400.0)),
        ..TemplateConfig::default()
    };
    let t = Template::resolve(Some(&cfg), &product("", None));
    assert_eq!(t.border_width, DEFAULT_BORDER_WIDTH);
    assert_eq!(t.print_area, t.fit_area);
}

#[test]
fn mug_style_sniffs_title() {
    assert_eq!(MugStyle::from_title("Magic Color Mug"), MugStyle::Dark);
    assert_eq!(MugStyle::from_title("BLACK coffee"), MugStyle::Dark);
    assert_eq!(MugStyle::from_title("Classic White Mug"), MugStyle::Light);
    assert_eq!(MugStyle::Dark.handle_color(), Rgba8::opaque(0x22, 0x22, 0x22));
}

#[test]
fn customizable_categories() {
    assert!(is_customizable_category("Frames"));
    assert!(is_customizable_category("Collages"));
    assert!(!is_customizable_category("Posters"));
    assert!(TemplateKind::Collage.is_multi_image());
    assert!(!TemplateKind::Mug.is_multi_image());
}

#[test]
fn oversized_grid_falls_back_to_default() {
    let cfg = TemplateConfig {
        kind: Some(TemplateKind::Collage),
        grid_layout: Some(GridLayout {
            rows: 100_000,
            cols: 100_000,
        }),
        ..TemplateConfig::default()
    };
    let t = Template::resolve(Some(&cfg), &product("", None));
    assert_eq!(t.grid, GridLayout { rows: 2, cols: 2 });

    let cfg = TemplateConfig {
        grid_layout: Some(GridLayout { rows: 16, cols: 16 }),
        ..cfg
    };
    let t = Template::resolve(Some(&cfg), &product("", None));
    assert_eq!(t.grid, GridLayout { rows: 16, cols: 16 });
}
