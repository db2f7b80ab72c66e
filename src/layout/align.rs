//! Auto-alignment for the design view.
//!
//! Regions are bucketed into six slots (top/bottom row, left/center/right
//! column) from their members' hints and laid out in wrapping rows; members
//! inside a region stack wide teams first and grid narrow teams below them.
//! Ungrouped teams fill a column on the left of the plane.
//!
//! Planning never touches the teams. [`align`] computes the full plan first
//! and only then writes positions that moved by more than the configured
//! tolerance, so a pass is all-or-nothing and a second pass is a no-op.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::ir::{Category, Dimension, HintX, HintY, Point, Team, ViewMode};

use super::grouping::groupings;
use super::{Rect, Region};

/// Alignment always measures teams the way the design view draws them.
const ALIGN_VIEW: ViewMode = ViewMode::Design;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRow {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotColumn {
    Left,
    Center,
    Right,
}

impl SlotColumn {
    const ALL: [SlotColumn; 3] = [SlotColumn::Left, SlotColumn::Center, SlotColumn::Right];

    fn index(self) -> usize {
        match self {
            SlotColumn::Left => 0,
            SlotColumn::Center => 1,
            SlotColumn::Right => 2,
        }
    }
}

/// Where a region ended up and how much room its members took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFrame {
    pub name: String,
    pub dimension: Dimension,
    pub row: SlotRow,
    pub column: SlotColumn,
    /// Column-wide frame: `width` is the configured region width, `height` the
    /// laid-out content height including padding.
    pub frame: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentPlan {
    /// Target top-left per team index in placement order. A team that sits in
    /// two regions appears twice; the later entry wins.
    pub placements: Vec<(usize, Point)>,
    pub frames: Vec<RegionFrame>,
    /// Lowest y reached by any region row.
    pub regions_bottom: f32,
}

impl AlignmentPlan {
    /// Final target per team, first-placement order, one entry per team.
    pub fn targets(&self) -> IndexMap<usize, Point> {
        let mut latest = IndexMap::with_capacity(self.placements.len());
        for &(idx, point) in &self.placements {
            latest.insert(idx, point);
        }
        latest
    }
}

/// Repositions `teams` in place and returns the indices of teams that moved,
/// in placement order. Positions within `config.align.tolerance` of their
/// target are left untouched and not reported.
pub fn align(teams: &mut [Team], config: &LayoutConfig) -> Vec<usize> {
    if teams.is_empty() {
        return Vec::new();
    }
    let plan = plan_alignment(teams, config);
    let tolerance = config.align.tolerance;

    let mut changed = Vec::new();
    for (idx, target) in plan.targets() {
        let team = &mut teams[idx];
        let unplaced = !team.position.x.is_finite() || !team.position.y.is_finite();
        let dx = (team.position.x - target.x).abs();
        let dy = (team.position.y - target.y).abs();
        if unplaced || dx > tolerance || dy > tolerance {
            team.position = target;
            changed.push(idx);
        }
    }
    crate::log::debug!(
        teams = teams.len(),
        changed = changed.len(),
        "auto-alignment applied"
    );
    changed
}

/// Computes target positions for every team without mutating anything.
pub fn plan_alignment(teams: &[Team], config: &LayoutConfig) -> AlignmentPlan {
    if teams.is_empty() {
        return AlignmentPlan::default();
    }

    let value_streams: Vec<Region> = groupings(teams, Dimension::ValueStream, ALIGN_VIEW, config)
        .into_iter()
        .filter(|region| !region.is_ungrouped())
        .collect();
    let platforms = groupings(teams, Dimension::PlatformGrouping, ALIGN_VIEW, config);

    let mut grouped = vec![false; teams.len()];
    for region in value_streams.iter().chain(platforms.iter()) {
        for &idx in &region.members {
            grouped[idx] = true;
        }
    }

    // Slot every region before placing any, so a platform grouping hinted to
    // the top joins the top row.
    let mut top: [Vec<(&Region, Dimension)>; 3] = Default::default();
    let mut bottom: [Vec<(&Region, Dimension)>; 3] = Default::default();
    let tagged = value_streams
        .iter()
        .map(|r| (r, Dimension::ValueStream))
        .chain(platforms.iter().map(|r| (r, Dimension::PlatformGrouping)));
    for (region, dimension) in tagged {
        let (row, column) = region_slot(teams, region, dimension);
        let bucket = match row {
            SlotRow::Top => &mut top[column.index()],
            SlotRow::Bottom => &mut bottom[column.index()],
        };
        bucket.push((region, dimension));
    }

    crate::log::debug!(
        value_streams = value_streams.len(),
        platform_groupings = platforms.len(),
        ungrouped = grouped.iter().filter(|g| !**g).count(),
        "planning auto-alignment"
    );

    let mut planner = Planner {
        teams,
        config,
        plan: AlignmentPlan::default(),
    };

    let top_start = config.align.start_y;
    let top_end = planner.place_row(SlotRow::Top, &top, top_start);
    let bottom_end = planner.place_row(SlotRow::Bottom, &bottom, top_end);
    planner.plan.regions_bottom = bottom_end;

    let ungrouped: Vec<usize> = (0..teams.len()).filter(|&idx| !grouped[idx]).collect();
    planner.place_ungrouped(&ungrouped, bottom_end);

    planner.plan
}

fn region_slot(teams: &[Team], region: &Region, dimension: Dimension) -> (SlotRow, SlotColumn) {
    let hint_x = region.members.iter().find_map(|&idx| teams[idx].hint_x);
    let hint_y = region.members.iter().find_map(|&idx| teams[idx].hint_y);

    // Value streams (consumer flow) default to the top row, platform
    // groupings (foundations) to the bottom.
    let row = match (dimension, hint_y) {
        (_, Some(HintY::Top)) => SlotRow::Top,
        (_, Some(HintY::Bottom)) => SlotRow::Bottom,
        (Dimension::ValueStream, None) => SlotRow::Top,
        (Dimension::PlatformGrouping, None) => SlotRow::Bottom,
    };
    let column = match hint_x {
        Some(HintX::Left) => SlotColumn::Left,
        Some(HintX::Right) => SlotColumn::Right,
        Some(HintX::Center) | None => SlotColumn::Center,
    };
    (row, column)
}

fn inner_order(a: &Team, b: &Team) -> Ordering {
    match (a.any_inner(), b.any_inner()) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

struct Planner<'a> {
    teams: &'a [Team],
    config: &'a LayoutConfig,
    plan: AlignmentPlan,
}

impl Planner<'_> {
    fn height(&self, idx: usize) -> f32 {
        self.config
            .shapes
            .dimensions(self.teams[idx].category, ALIGN_VIEW)
            .height
    }

    fn place(&mut self, idx: usize, x: f32, y: f32) {
        self.plan.placements.push((idx, Point::new(x, y)));
    }

    /// Lays out the three slots of one row from `start_y`; returns where the
    /// next row starts.
    fn place_row(
        &mut self,
        row: SlotRow,
        slots: &[Vec<(&Region, Dimension)>; 3],
        start_y: f32,
    ) -> f32 {
        let cfg = &self.config.align;
        let (origin_x, spacing_x) = (cfg.regions_start_x, cfg.region_spacing_x);
        let mut row_end = start_y;
        for column in SlotColumn::ALL {
            let regions = &slots[column.index()];
            if regions.is_empty() {
                continue;
            }
            let start_x = origin_x + spacing_x * column.index() as f32;
            let end = self.place_slot(row, column, regions, start_x, start_y);
            row_end = row_end.max(end);
        }
        row_end
    }

    /// Places regions left to right from `start_x`, wrapping after
    /// `regions_per_row`. Returns the y below the last wrapped row.
    fn place_slot(
        &mut self,
        row: SlotRow,
        column: SlotColumn,
        regions: &[(&Region, Dimension)],
        start_x: f32,
        start_y: f32,
    ) -> f32 {
        let config = self.config;
        let per_row = config.align.regions_per_row.max(1);
        let spacing_x = config.align.region_spacing_x;
        let spacing_y = config.align.region_spacing_y;

        let mut x = start_x;
        let mut y = start_y;
        let mut in_row = 0usize;
        let mut row_height = 0.0f32;

        for &(region, dimension) in regions {
            let height = self.place_members(region, x, y);
            self.plan.frames.push(RegionFrame {
                name: region.name.clone(),
                dimension,
                row,
                column,
                frame: Rect::new(x, y, config.align.region_width, height),
            });
            row_height = row_height.max(height);
            in_row += 1;

            if in_row >= per_row {
                x = start_x;
                y += row_height + spacing_y;
                in_row = 0;
                row_height = 0.0;
            } else {
                x += spacing_x;
            }
        }

        if in_row > 0 {
            y + row_height + spacing_y
        } else {
            y
        }
    }

    /// Positions one region's members with the region's top-left at
    /// `(origin_x, origin_y)`; returns the region's content height.
    fn place_members(&mut self, region: &Region, origin_x: f32, origin_y: f32) -> f32 {
        let config = self.config;
        let cfg = &config.align;
        let padding = config.grouping.padding;
        let label_height = config.grouping.label_height;
        let teams = self.teams;

        let mut members = region.members.clone();
        members.sort_by(|&a, &b| inner_order(&teams[a], &teams[b]));
        let (wide, narrow): (Vec<usize>, Vec<usize>) = members
            .into_iter()
            .partition(|&idx| teams[idx].category.is_wide());

        let group_x = self.anchor_x(region, origin_x);
        let mut cursor = origin_y + padding + label_height;

        for &idx in &wide {
            self.place(idx, group_x, cursor);
            cursor += self.height(idx) + cfg.wide_gap;
        }
        if !wide.is_empty() {
            cursor -= cfg.wide_gap;
        }

        if !narrow.is_empty() {
            if !wide.is_empty() {
                cursor += cfg.wide_to_narrow_gap;
            }
            let per_row = cfg.narrow_per_row.max(1);
            let column_step = cfg.narrow_column_width + cfg.narrow_column_gap;
            let row_gap = cfg.narrow_row_gap;
            for row in narrow.chunks(per_row) {
                let row_height = row
                    .iter()
                    .map(|&idx| self.height(idx))
                    .fold(0.0f32, f32::max);
                for (col, &idx) in row.iter().enumerate() {
                    self.place(idx, group_x + col as f32 * column_step, cursor);
                }
                cursor += row_height + row_gap;
            }
            cursor -= row_gap;
        }

        cursor - origin_y + cfg.bottom_spacing + padding
    }

    /// Shared x for a region's members, from the first member's horizontal
    /// hint or, without one, its team type.
    fn anchor_x(&self, region: &Region, origin_x: f32) -> f32 {
        let padding = self.config.grouping.padding;
        let content_width = self.config.align.region_width - 2.0 * padding;
        let wide_width = self.config.shapes.wide_width(ALIGN_VIEW);
        let left = origin_x + padding;
        let centered = left + (content_width - wide_width) / 2.0;
        let right = left + content_width - wide_width;

        let Some(&first) = region.members.first() else {
            return left;
        };
        let first = &self.teams[first];
        match first.hint_x {
            Some(HintX::Left) => left,
            Some(HintX::Center) => centered,
            Some(HintX::Right) => right,
            None if first.category == Category::Platform => centered,
            None => left,
        }
    }

    /// Stacks ungrouped teams in the left column: top-hinted (the default)
    /// from the start y, bottom-hinted below every region.
    fn place_ungrouped(&mut self, ungrouped: &[usize], regions_bottom: f32) {
        if ungrouped.is_empty() {
            return;
        }
        let config = self.config;
        let cfg = &config.align;
        let gap = cfg.ungrouped_gap;
        let teams = self.teams;
        let (bottom, top): (Vec<usize>, Vec<usize>) = ungrouped
            .iter()
            .copied()
            .partition(|&idx| teams[idx].hint_y == Some(HintY::Bottom));

        let mut cursor = cfg.start_y;
        for idx in top {
            let x = self.ungrouped_x(&teams[idx]);
            self.place(idx, x, cursor);
            cursor += self.height(idx) + gap;
        }

        let mut cursor = regions_bottom.max(cfg.ungrouped_bottom_min_y);
        for idx in bottom {
            let x = self.ungrouped_x(&teams[idx]);
            self.place(idx, x, cursor);
            cursor += self.height(idx) + gap;
        }
    }

    fn ungrouped_x(&self, team: &Team) -> f32 {
        let cfg = &self.config.align;
        let start = cfg.ungrouped_start_x;
        match team.hint_x {
            Some(HintX::Left) => start,
            Some(HintX::Center) => start + cfg.ungrouped_center_offset,
            Some(HintX::Right) => start + cfg.ungrouped_right_offset,
            // customer-facing teams sit furthest right, foundations left
            None if team.category == Category::StreamAligned => start + cfg.ungrouped_right_offset,
            None => start,
        }
    }
}
