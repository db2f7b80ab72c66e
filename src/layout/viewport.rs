use crate::config::{ShapeProfile, ViewportConfig};
use crate::ir::{Team, ViewMode};

use super::Rect;
use super::hit::ViewTransform;

/// Union of every team footprint and any extra rectangles (region bounds,
/// footprints from another perspective). `None` when there is nothing to show.
pub fn content_extent<'a, I>(
    teams: &[Team],
    view: ViewMode,
    shapes: &ShapeProfile,
    extra_rects: I,
) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    teams
        .iter()
        .map(|team| shapes.footprint(team, view))
        .chain(extra_rects.into_iter().copied())
        .reduce(|acc, rect| acc.union(&rect))
}

/// Transform that shows all of `extent` inside a viewport of the given size,
/// never magnifying past `config.max_fit_scale`.
pub fn fit_to_view(
    extent: &Rect,
    viewport_width: f32,
    viewport_height: f32,
    config: &ViewportConfig,
) -> ViewTransform {
    let target_width = viewport_width - config.margin_left - config.margin_right;
    let target_height = viewport_height - 2.0 * config.margin_y;

    let mut scale = config.max_fit_scale;
    if extent.width > 0.0 && target_width > 0.0 {
        scale = scale.min(target_width / extent.width);
    }
    if extent.height > 0.0 && target_height > 0.0 {
        scale = scale.min(target_height / extent.height);
    }

    ViewTransform::new(
        config.margin_left - extent.x * scale,
        config.margin_y - extent.y * scale,
        scale,
    )
}
