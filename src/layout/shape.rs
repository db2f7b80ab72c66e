use crate::config::ShapeProfile;
use crate::ir::{Category, Team, ViewMode};

use super::{Rect, Shape, Size};

impl ShapeProfile {
    /// Width and height of a team box of `category` in `view`. Every size in
    /// the crate comes through here.
    pub fn dimensions(&self, category: Category, view: ViewMode) -> Size {
        match view {
            ViewMode::Baseline => self.baseline,
            ViewMode::Design => match category {
                Category::StreamAligned => self.design_stream_aligned,
                Category::Platform => self.design_platform,
                Category::Enabling => self.design_enabling,
                Category::ComplicatedSubsystem => self.design_complicated_subsystem,
                Category::Undefined => self.design_undefined,
            },
        }
    }

    pub fn shape(&self, category: Category, view: ViewMode) -> Shape {
        match view {
            ViewMode::Baseline => Shape::Rect,
            ViewMode::Design => match category {
                Category::StreamAligned | Category::Platform => Shape::RoundedRect,
                Category::Enabling => Shape::Rect,
                Category::ComplicatedSubsystem => Shape::Octagon,
                Category::Undefined => Shape::DashedRect,
            },
        }
    }

    /// Rectangle a team covers at its current position.
    pub fn footprint(&self, team: &Team, view: ViewMode) -> Rect {
        Rect::from_origin(team.position, self.dimensions(team.category, view))
    }

    /// Widest wide-category box; alignment offsets for centered and
    /// right-aligned regions are measured against it.
    pub fn wide_width(&self, view: ViewMode) -> f32 {
        let stream = self.dimensions(Category::StreamAligned, view).width;
        let platform = self.dimensions(Category::Platform, view).width;
        stream.max(platform)
    }
}
