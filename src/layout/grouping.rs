use indexmap::IndexMap;

use crate::config::{LayoutConfig, ShapeProfile};
use crate::ir::{Dimension, Team, ViewMode};

use super::{InnerRegion, Rect, Region};

/// Bucket for teams without a key. Never drawn as a region.
pub const UNGROUPED: &str = "(Ungrouped)";

/// Partitions `teams` by `key` (missing keys land in [`UNGROUPED`]) and
/// computes each region's bounds. Regions come out in order of first
/// appearance.
pub fn group_by_key<'t, F>(
    teams: &'t [Team],
    key: F,
    view: ViewMode,
    config: &LayoutConfig,
) -> Vec<Region>
where
    F: Fn(&'t Team) -> Option<&'t str>,
{
    let mut buckets: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, team) in teams.iter().enumerate() {
        let name = key(team).unwrap_or(UNGROUPED);
        buckets.entry(name).or_default().push(idx);
    }

    buckets
        .into_iter()
        .map(|(name, members)| {
            let bounds = bounding_box(
                members.iter().map(|&idx| &teams[idx]),
                view,
                config.grouping.padding,
                config.grouping.label_height,
                &config.shapes,
            );
            Region {
                name: name.to_string(),
                members,
                bounds,
            }
        })
        .collect()
}

/// Regions along one grouping dimension. Value streams keep the
/// [`UNGROUPED`] bucket; platform groupings only cover teams that name one.
pub fn groupings(
    teams: &[Team],
    dimension: Dimension,
    view: ViewMode,
    config: &LayoutConfig,
) -> Vec<Region> {
    let mut regions = group_by_key(teams, |team| dimension.key(team), view, config);
    if dimension == Dimension::PlatformGrouping {
        regions.retain(|region| !region.is_ungrouped());
    }
    regions
}

/// Nested regions keyed by (outer grouping, inner grouping). The outer key is
/// resolved on `dimension` first and then on the other dimension, so an inner
/// grouping can sit inside either kind of outer region. Teams without an
/// inner key are left out.
pub fn inner_groupings(
    teams: &[Team],
    dimension: Dimension,
    view: ViewMode,
    config: &LayoutConfig,
) -> Vec<InnerRegion> {
    let mut buckets: IndexMap<(&str, &str), Vec<usize>> = IndexMap::new();
    for (idx, team) in teams.iter().enumerate() {
        let Some(inner) = dimension.inner_key(team) else {
            continue;
        };
        let Some(outer) = dimension.outer_key(team) else {
            continue;
        };
        buckets.entry((outer, inner)).or_default().push(idx);
    }

    buckets
        .into_iter()
        .map(|((parent, name), members)| {
            let bounds = bounding_box(
                members.iter().map(|&idx| &teams[idx]),
                view,
                config.grouping.inner_padding,
                config.grouping.inner_label_height,
                &config.shapes,
            );
            InnerRegion {
                name: name.to_string(),
                parent: parent.to_string(),
                members,
                bounds,
            }
        })
        .collect()
}

/// Value stream inner regions followed by platform inner regions.
pub fn all_inner_groupings(
    teams: &[Team],
    view: ViewMode,
    config: &LayoutConfig,
) -> Vec<InnerRegion> {
    let mut regions = inner_groupings(teams, Dimension::ValueStream, view, config);
    regions.extend(inner_groupings(
        teams,
        Dimension::PlatformGrouping,
        view,
        config,
    ));
    regions
}

/// Box around the members' actual footprints, grown by `padding` on every side
/// and by `label_height` above. No members gives [`Rect::ZERO`].
pub fn bounding_box<'a, I>(
    members: I,
    view: ViewMode,
    padding: f32,
    label_height: f32,
    shapes: &ShapeProfile,
) -> Rect
where
    I: IntoIterator<Item = &'a Team>,
{
    let mut extent: Option<Rect> = None;
    for team in members {
        let footprint = shapes.footprint(team, view);
        extent = Some(match extent {
            Some(acc) => acc.union(&footprint),
            None => footprint,
        });
    }
    let Some(extent) = extent else {
        return Rect::ZERO;
    };
    Rect::new(
        extent.x - padding,
        extent.y - padding - label_height,
        extent.width + padding * 2.0,
        extent.height + padding * 2.0 + label_height,
    )
}

/// Sorted distinct names along `dimension`, ignoring teams without one.
pub fn group_names(teams: &[Team], dimension: Dimension) -> Vec<String> {
    let mut names: Vec<String> = teams
        .iter()
        .filter_map(|team| dimension.key(team))
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Teams in the selected group. `None` or `"all"` selects everything.
pub fn filter_by_group<'t>(
    teams: &'t [Team],
    dimension: Dimension,
    selection: Option<&str>,
) -> Vec<&'t Team> {
    match selection {
        None | Some("all") | Some("") => teams.iter().collect(),
        Some(selected) => teams
            .iter()
            .filter(|team| dimension.key(team) == Some(selected))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Category;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn empty_input_gives_no_regions() {
        let cfg = config();
        assert!(groupings(&[], Dimension::ValueStream, ViewMode::Design, &cfg).is_empty());
        assert!(groupings(&[], Dimension::PlatformGrouping, ViewMode::Design, &cfg).is_empty());
        assert!(all_inner_groupings(&[], ViewMode::Design, &cfg).is_empty());
    }

    #[test]
    fn regions_follow_discovery_order_with_ungrouped_bucket() {
        let teams = vec![
            Team::new("A", Category::StreamAligned).with_value_stream("Sales"),
            Team::new("B", Category::Enabling),
            Team::new("C", Category::Platform).with_value_stream("Billing"),
            Team::new("D", Category::StreamAligned).with_value_stream("Sales"),
        ];
        let regions = groupings(&teams, Dimension::ValueStream, ViewMode::Design, &config());
        let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", UNGROUPED, "Billing"]);
        assert_eq!(regions[0].members, vec![0, 3]);
        assert!(regions[1].is_ungrouped());
    }

    #[test]
    fn platform_groupings_skip_teams_without_key() {
        let teams = vec![
            Team::new("P1", Category::Platform).with_platform_grouping("Data"),
            Team::new("S1", Category::StreamAligned),
        ];
        let regions = groupings(&teams, Dimension::PlatformGrouping, ViewMode::Design, &config());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Data");
        assert_eq!(regions[0].members, vec![0]);
    }

    #[test]
    fn bounds_cover_actual_footprints() {
        let teams = vec![
            Team::new("Wide", Category::StreamAligned)
                .with_value_stream("Sales")
                .at(100.0, 100.0),
            Team::new("Tall", Category::Enabling)
                .with_value_stream("Sales")
                .at(200.0, 200.0),
        ];
        let regions = groupings(&teams, Dimension::ValueStream, ViewMode::Design, &config());
        let bounds = regions[0].bounds;
        // x: 100..660, y: 100..340 (enabling is 140 tall)
        assert_eq!(bounds, Rect::new(70.0, 35.0, 620.0, 335.0));
        for &idx in &regions[0].members {
            let fp = config().shapes.footprint(&teams[idx], ViewMode::Design);
            assert!(bounds.contains_rect(&fp));
        }
    }

    #[test]
    fn stale_positions_still_produce_bounds() {
        let teams = vec![
            Team::new("A", Category::Platform)
                .with_platform_grouping("Data")
                .at(-5000.0, 9000.0),
            Team::new("B", Category::Platform)
                .with_platform_grouping("Data")
                .at(4000.0, -300.0),
        ];
        let regions = groupings(&teams, Dimension::PlatformGrouping, ViewMode::Design, &config());
        let b = regions[0].bounds;
        assert_eq!(b.x, -5030.0);
        assert_eq!(b.width, 9000.0 + 560.0 + 60.0);
    }

    #[test]
    fn empty_member_list_gives_zero_bounds() {
        let shapes = ShapeProfile::default();
        let rect = bounding_box(std::iter::empty(), ViewMode::Design, 30.0, 35.0, &shapes);
        assert_eq!(rect, Rect::ZERO);
    }

    #[test]
    fn inner_groupings_nest_in_either_dimension() {
        let teams = vec![
            Team::new("A", Category::StreamAligned)
                .with_value_stream("Sales")
                .with_value_stream_inner("Checkout")
                .at(0.0, 0.0),
            Team::new("B", Category::Platform)
                .with_platform_grouping("Data")
                .with_value_stream_inner("Ingest")
                .at(0.0, 200.0),
            Team::new("C", Category::Platform)
                .with_platform_grouping("Data")
                .with_platform_grouping_inner("Storage")
                .at(0.0, 400.0),
            Team::new("D", Category::StreamAligned).with_value_stream("Sales"),
        ];
        let cfg = config();
        let vs = inner_groupings(&teams, Dimension::ValueStream, ViewMode::Design, &cfg);
        assert_eq!(vs.len(), 2);
        assert_eq!((vs[0].parent.as_str(), vs[0].name.as_str()), ("Sales", "Checkout"));
        assert_eq!((vs[1].parent.as_str(), vs[1].name.as_str()), ("Data", "Ingest"));
        assert_eq!(vs[0].bounds, Rect::new(-15.0, -25.0, 590.0, 104.0));

        let all = all_inner_groupings(&teams, ViewMode::Design, &cfg);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].name, "Storage");
        assert_eq!(all[2].members, vec![2]);
    }

    #[test]
    fn same_inner_name_under_different_parents_stays_separate() {
        let teams = vec![
            Team::new("A", Category::Enabling)
                .with_value_stream("Sales")
                .with_value_stream_inner("Core"),
            Team::new("B", Category::Enabling)
                .with_value_stream("Billing")
                .with_value_stream_inner("Core"),
        ];
        let inner = inner_groupings(&teams, Dimension::ValueStream, ViewMode::Design, &config());
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn names_are_sorted_and_distinct() {
        let teams = vec![
            Team::new("A", Category::Platform).with_value_stream("b"),
            Team::new("B", Category::Platform).with_value_stream("a"),
            Team::new("C", Category::Platform).with_value_stream("b"),
            Team::new("D", Category::Platform),
        ];
        assert_eq!(group_names(&teams, Dimension::ValueStream), vec!["a", "b"]);
        assert_eq!(filter_by_group(&teams, Dimension::ValueStream, Some("b")).len(), 2);
        assert_eq!(filter_by_group(&teams, Dimension::ValueStream, Some("all")).len(), 4);
        assert_eq!(filter_by_group(&teams, Dimension::ValueStream, None).len(), 4);
    }
}
