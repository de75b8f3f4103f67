//! Pointer interaction: display-space to canvas-space mapping and drag repositioning.

use crate::foundation::core::{Canvas, Point, Size, Vec2};
use crate::transform::ImageTransform;

/// Relationship between the surface's internal resolution and the size it is displayed at.
///
/// Hosts may lay the preview out at any size; pointer positions arrive in display units and are
/// scaled by `internal / displayed` per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
    pub internal: Size,
    pub displayed: Size,
}

impl DisplayMapping {
    pub fn new(canvas: Canvas, displayed: Size) -> Self {
        Self {
            internal: canvas.size(),
            displayed,
        }
    }

    /// Displayed at native resolution.
    pub fn identity(canvas: Canvas) -> Self {
        Self::new(canvas, canvas.size())
    }

    /// Convert a display-space pointer position (relative to the surface's top-left corner).
    ///
    /// A degenerate displayed size (zero, negative or non-finite) maps 1:1 on that axis.
    pub fn to_canvas(self, display_pos: Point) -> Point {
        fn ratio(internal: f64, displayed: f64) -> f64 {
            if displayed.is_finite() && displayed > 0.0 {
                internal / displayed
            } else {
                1.0
            }
        }

        Point::new(
            display_pos.x * ratio(self.internal.width, self.displayed.width),
            display_pos.y * ratio(self.internal.height, self.displayed.height),
        )
    }
}

/// Anchor captured when a drag begins: pointer position minus the offset at that moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub start: Vec2,
}

pub fn begin_drag(display_pos: Point, transform: ImageTransform, map: DisplayMapping) -> DragState {
    let p = map.to_canvas(display_pos);
    DragState {
        start: p.to_vec2() - transform.offset(),
    }
}

/// Reposition absolutely: the new offset is the pointer minus the drag anchor.
pub fn continue_drag(
    display_pos: Point,
    drag: DragState,
    transform: ImageTransform,
    map: DisplayMapping,
) -> ImageTransform {
    let p = map.to_canvas(display_pos);
    transform.with_offset(p.to_vec2() - drag.start)
}

/// Finish a drag. The transform is left as the last move put it.
pub fn end_drag(drag: &mut Option<DragState>) {
    *drag = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::default()
    }

    #[test]
    fn display_mapping_scales_per_axis() {
        let map = DisplayMapping::new(canvas(), Size::new(200.0, 250.0));
        assert_eq!(map.to_canvas(Point::new(100.0, 50.0)), Point::new(200.0, 100.0));

        let map = DisplayMapping::identity(canvas());
        assert_eq!(map.to_canvas(Point::new(7.0, 9.0)), Point::new(7.0, 9.0));

        let map = DisplayMapping::new(canvas(), Size::new(0.0, f64::NAN));
        assert_eq!(map.to_canvas(Point::new(7.0, 9.0)), Point::new(7.0, 9.0));
    }

    #[test]
    fn drag_without_motion_keeps_offset() {
        let map = DisplayMapping::new(canvas(), Size::new(320.0, 400.0));
        let t = ImageTransform {
            scale: 0.7,
            offset_x: 12.5,
            offset_y: -40.0,
            rotation_deg: -90.0,
        };
        let pos = Point::new(111.0, 222.0);
        let drag = begin_drag(pos, t, map);
        let moved = continue_drag(pos, drag, t, map);
        assert!((moved.offset_x - t.offset_x).abs() < 1e-9);
        assert!((moved.offset_y - t.offset_y).abs() < 1e-9);
        assert_eq!(moved.scale, t.scale);
        assert_eq!(moved.rotation_deg, t.rotation_deg);
    }

    #[test]
    fn drag_is_absolute_in_canvas_units() {
        let map = DisplayMapping::new(canvas(), Size::new(200.0, 250.0));
        let t = ImageTransform::default();
        let drag = begin_drag(Point::new(10.0, 10.0), t, map);
        let a = continue_drag(Point::new(20.0, 15.0), drag, t, map);
        assert_eq!(a.offset(), Vec2::new(20.0, 10.0));
        // A second move is measured from the same anchor, not from the previous move.
        let b = continue_drag(Point::new(30.0, 10.0), drag, a, map);
        assert_eq!(b.offset(), Vec2::new(40.0, 0.0));
    }

    #[test]
    fn end_drag_clears_state() {
        let mut drag = Some(DragState { start: Vec2::ZERO });
        end_drag(&mut drag);
        assert!(drag.is_none());
    }
}
