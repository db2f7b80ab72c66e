use serde::Serialize;

use crate::config::ShapeProfile;
use crate::ir::{Point, Team, ViewMode};

use super::Rect;

/// Corner cut of the complicated-subsystem octagon as a fraction of its width
/// (20 units on a 120 unit box).
pub const OCTAGON_CORNER_RATIO: f32 = 0.167;

/// Diagonal rays fall on the vertical edges. The band absorbs f32 rounding in
/// `sin_cos(angle + PI)` so opposite rays always classify alike.
const AXIS_TIE_BAND: f32 = 1e-5;

/// Midpoint of the box edge a ray from the center at `angle` (radians, from +x,
/// y pointing down) mostly points at. Connectors snap to edge midpoints rather
/// than the exact ray intersection.
pub fn edge_point(center_x: f32, center_y: f32, width: f32, height: f32, angle: f32) -> Point {
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let (sin, cos) = angle.sin_cos();

    if cos.abs() - sin.abs() > AXIS_TIE_BAND {
        if cos > 0.0 {
            Point::new(center_x + half_width, center_y)
        } else {
            Point::new(center_x - half_width, center_y)
        }
    } else if sin > 0.0 {
        Point::new(center_x, center_y + half_height)
    } else {
        Point::new(center_x, center_y - half_height)
    }
}

/// Whether `(px, py)` lies in the octagon made by cutting a right triangle of
/// leg `OCTAGON_CORNER_RATIO * width` off each corner of the box.
pub fn point_in_octagon(px: f32, py: f32, x: f32, y: f32, width: f32, height: f32) -> bool {
    if px < x || px > x + width || py < y || py > y + height {
        return false;
    }
    let corner = width * OCTAGON_CORNER_RATIO;
    let right = x + width;
    let bottom = y + height;

    let near_left = px < x + corner;
    let near_right = px > right - corner;
    let near_top = py < y + corner;
    let near_bottom = py > bottom - corner;

    let cut = |rel_x: f32, rel_y: f32| rel_x + rel_y < corner;

    if near_left && near_top && cut(px - x, py - y) {
        return false;
    }
    if near_right && near_top && cut(right - px, py - y) {
        return false;
    }
    if near_right && near_bottom && cut(right - px, bottom - py) {
        return false;
    }
    if near_left && near_bottom && cut(px - x, bottom - py) {
        return false;
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub start: Point,
    pub end: Point,
    /// Direction from source center to target center, radians.
    pub angle: f32,
}

/// Endpoints of an interaction line between two teams at their stored
/// positions. In the design view a wide source leaves from its top or bottom
/// edge so lines follow the flow of change; the target always uses the
/// nearest edge midpoint.
pub fn connector(from: &Team, to: &Team, view: ViewMode, shapes: &ShapeProfile) -> Connector {
    let from_rect = shapes.footprint(from, view);
    let to_rect = shapes.footprint(to, view);
    let from_center = from_rect.center();
    let to_center = to_rect.center();
    let angle = (to_center.y - from_center.y).atan2(to_center.x - from_center.x);

    let start = if view == ViewMode::Design && from.category.is_wide() {
        if to_center.y > from_center.y {
            Point::new(from_center.x, from_rect.bottom())
        } else {
            Point::new(from_center.x, from_rect.y)
        }
    } else {
        edge_point(
            from_center.x,
            from_center.y,
            from_rect.width,
            from_rect.height,
            angle,
        )
    };
    let end = edge_point(
        to_center.x,
        to_center.y,
        to_rect.width,
        to_rect.height,
        angle + std::f32::consts::PI,
    );

    Connector { start, end, angle }
}

/// Connector between two arbitrary rectangles, e.g. footprints placed by a
/// perspective that does not use stored positions.
pub fn connector_between_rects(from: &Rect, to: &Rect) -> Connector {
    let a = from.center();
    let b = to.center();
    let angle = (b.y - a.y).atan2(b.x - a.x);
    Connector {
        start: edge_point(a.x, a.y, from.width, from.height, angle),
        end: edge_point(b.x, b.y, to.width, to.height, angle + std::f32::consts::PI),
        angle,
    }
}
