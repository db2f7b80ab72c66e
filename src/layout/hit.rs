use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{ShapeProfile, ViewportConfig};
use crate::ir::{Point, Team, ViewMode};

use super::geometry::point_in_octagon;
use super::{Rect, Shape};

/// Pan and zoom of the drawing surface: `screen = plane * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn new(offset_x: f32, offset_y: f32, scale: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            scale,
        }
    }

    fn is_invertible(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    /// Inverse mapping. `None` when the scale cannot be inverted.
    pub fn to_plane(&self, screen: Point) -> Option<Point> {
        if !self.is_invertible() {
            return None;
        }
        Some(Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        ))
    }

    pub fn to_screen(&self, plane: Point) -> Point {
        Point::new(
            plane.x * self.scale + self.offset_x,
            plane.y * self.scale + self.offset_y,
        )
    }

    /// Zooms by `factor` around `anchor` (screen coordinates) so the plane point
    /// under the anchor stays put. Scale is clamped to the configured range.
    pub fn zoomed(&self, factor: f32, anchor: Point, limits: &ViewportConfig) -> Self {
        let scale = (self.scale * factor).clamp(limits.min_zoom, limits.max_zoom);
        let Some(plane) = self.to_plane(anchor) else {
            return Self::new(self.offset_x, self.offset_y, scale);
        };
        Self::new(anchor.x - plane.x * scale, anchor.y - plane.y * scale, scale)
    }
}

fn hits(rect: &Rect, shape: Shape, point: Point) -> bool {
    match shape {
        Shape::Octagon => {
            point_in_octagon(point.x, point.y, rect.x, rect.y, rect.width, rect.height)
        }
        Shape::Rect | Shape::RoundedRect | Shape::DashedRect => rect.contains(point),
    }
}

/// Team under the pointer (screen coordinates), first match wins.
///
/// With `custom_footprints` the stored positions are ignored: rectangles are
/// tried in map order and matched back to teams by name. Teams missing from
/// the map cannot be hit.
pub fn team_at<'t>(
    teams: &'t [Team],
    pointer: Point,
    transform: &ViewTransform,
    view: ViewMode,
    shapes: &ShapeProfile,
    custom_footprints: Option<&IndexMap<String, Rect>>,
) -> Option<&'t Team> {
    let point = transform.to_plane(pointer)?;

    if let Some(footprints) = custom_footprints {
        return footprints.iter().find_map(|(name, rect)| {
            let team = teams.iter().find(|team| &team.name == name)?;
            hits(rect, shapes.shape(team.category, view), point).then_some(team)
        });
    }

    teams.iter().find(|team| {
        let rect = shapes.footprint(team, view);
        hits(&rect, shapes.shape(team.category, view), point)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Category;

    fn shapes() -> ShapeProfile {
        ShapeProfile::default()
    }

    fn name_at<'t>(
        teams: &'t [Team],
        x: f32,
        y: f32,
        view: ViewMode,
        footprints: Option<&IndexMap<String, Rect>>,
    ) -> Option<&'t str> {
        let t = ViewTransform::IDENTITY;
        team_at(teams, Point::new(x, y), &t, view, &shapes(), footprints)
            .map(|team| team.name.as_str())
    }

    #[test]
    fn transform_round_trips() {
        let t = ViewTransform::new(40.0, -20.0, 2.0);
        let plane = Point::new(15.0, 30.0);
        let screen = t.to_screen(plane);
        assert_eq!(screen, Point::new(70.0, 40.0));
        assert_eq!(t.to_plane(screen), Some(plane));
    }

    #[test]
    fn degenerate_scale_never_hits() {
        let teams = vec![Team::new("A", Category::Platform)];
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let t = ViewTransform::new(0.0, 0.0, scale);
            let hit = team_at(&teams, Point::new(1.0, 1.0), &t, ViewMode::Design, &shapes(), None);
            assert!(hit.is_none(), "scale {scale}");
        }
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let limits = ViewportConfig::default();
        let t = ViewTransform::new(10.0, 10.0, 1.0);
        let anchor = Point::new(200.0, 100.0);
        let z = t.zoomed(2.0, anchor, &limits);
        assert_eq!(z.scale, 2.0);
        assert_eq!(z.to_plane(anchor), t.to_plane(anchor));
        assert_eq!(t.zoomed(100.0, anchor, &limits).scale, 3.0);
        assert_eq!(t.zoomed(0.001, anchor, &limits).scale, 0.1);
    }

    #[test]
    fn first_match_wins_and_transform_applies() {
        let teams = vec![
            Team::new("Back", Category::Platform).at(0.0, 0.0),
            Team::new("Front", Category::Enabling).at(10.0, 10.0),
        ];
        let t = ViewTransform::new(100.0, 100.0, 2.0);
        let view = ViewMode::Design;
        // plane (20, 20) is inside both; the earlier team wins
        let hit = team_at(&teams, Point::new(140.0, 140.0), &t, view, &shapes(), None);
        assert_eq!(hit.map(|team| team.name.as_str()), Some("Back"));
        let miss = team_at(&teams, Point::new(90.0, 90.0), &t, view, &shapes(), None);
        assert!(miss.is_none());
    }

    #[test]
    fn octagon_corners_are_not_hit_in_design_view() {
        let teams = vec![Team::new("CS", Category::ComplicatedSubsystem).at(0.0, 0.0)];
        assert_eq!(name_at(&teams, 2.0, 2.0, ViewMode::Design, None), None);
        assert_eq!(name_at(&teams, 50.0, 50.0, ViewMode::Design, None), Some("CS"));
        // baseline view draws a plain rectangle
        assert_eq!(name_at(&teams, 2.0, 2.0, ViewMode::Baseline, None), Some("CS"));
    }

    #[test]
    fn rectangle_edges_are_inclusive() {
        let teams = vec![Team::new("E", Category::Enabling).at(0.0, 0.0)];
        assert_eq!(name_at(&teams, 60.0, 140.0, ViewMode::Design, None), Some("E"));
        assert_eq!(name_at(&teams, 60.5, 140.0, ViewMode::Design, None), None);
    }

    #[test]
    fn custom_footprints_replace_positions() {
        let teams = vec![
            Team::new("A", Category::StreamAligned).at(0.0, 0.0),
            Team::new("B", Category::Enabling).at(0.0, 0.0),
        ];
        let mut footprints = IndexMap::new();
        footprints.insert("B".to_string(), Rect::new(500.0, 500.0, 50.0, 50.0));
        footprints.insert("Ghost".to_string(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let view = ViewMode::Design;

        assert_eq!(name_at(&teams, 510.0, 510.0, view, Some(&footprints)), Some("B"));
        // A has no custom footprint, and the unknown entry maps to no team
        assert_eq!(name_at(&teams, 5.0, 5.0, view, Some(&footprints)), None);
    }

    #[test]
    fn overlapping_custom_footprints_follow_insertion_order() {
        // team order is the reverse of the footprint order
        let teams = vec![
            Team::new("Later", Category::Platform),
            Team::new("Earlier", Category::Platform),
        ];
        let view = ViewMode::Design;

        let mut footprints = IndexMap::new();
        footprints.insert("Earlier".to_string(), Rect::new(0.0, 0.0, 200.0, 200.0));
        footprints.insert("Later".to_string(), Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(name_at(&teams, 150.0, 150.0, view, Some(&footprints)), Some("Earlier"));
        assert_eq!(name_at(&teams, 250.0, 250.0, view, Some(&footprints)), Some("Later"));

        footprints.swap_remove("Earlier");
        footprints.insert("Earlier".to_string(), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(name_at(&teams, 150.0, 150.0, view, Some(&footprints)), Some("Later"));
    }

    #[test]
    fn empty_teams_never_hit() {
        assert_eq!(name_at(&[], 0.0, 0.0, ViewMode::Design, None), None);
    }
}
