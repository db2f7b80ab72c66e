mod align;
mod geometry;
mod grouping;
mod hit;
mod shape;
pub(crate) mod types;
mod viewport;
pub use types::*;

pub use align::{AlignmentPlan, RegionFrame, SlotColumn, SlotRow, align, plan_alignment};
pub use geometry::{
    Connector, OCTAGON_CORNER_RATIO, connector, connector_between_rects, edge_point,
    point_in_octagon,
};
pub use grouping::{
    UNGROUPED, all_inner_groupings, bounding_box, filter_by_group, group_by_key, group_names,
    groupings, inner_groupings,
};
pub use hit::{ViewTransform, team_at};
pub use viewport::{content_extent, fit_to_view};

use crate::config::LayoutConfig;
use crate::ir::{Dimension, Team, ViewMode};

/// Everything a renderer needs for one frame: the drawable regions of both
/// dimensions plus their nested groupings, computed from current positions.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Layout {
    pub view: ViewMode,
    pub value_streams: Vec<Region>,
    pub platform_groupings: Vec<Region>,
    pub inner_regions: Vec<InnerRegion>,
    pub extent: Option<Rect>,
}

/// Collects the regions to draw. The `(Ungrouped)` value-stream bucket is
/// dropped since its members are drawn free-standing.
pub fn compute_layout(teams: &[Team], view: ViewMode, config: &LayoutConfig) -> Layout {
    let value_streams: Vec<Region> = groupings(teams, Dimension::ValueStream, view, config)
        .into_iter()
        .filter(|region| !region.is_ungrouped())
        .collect();
    let platform_groupings = groupings(teams, Dimension::PlatformGrouping, view, config);
    let inner_regions = all_inner_groupings(teams, view, config);

    let region_bounds = value_streams
        .iter()
        .chain(platform_groupings.iter())
        .map(|region| &region.bounds)
        .chain(inner_regions.iter().map(|inner| &inner.bounds));
    let extent = content_extent(teams, view, &config.shapes, region_bounds);

    Layout {
        view,
        value_streams,
        platform_groupings,
        inner_regions,
        extent,
    }
}
