use crate::config::ShapeProfile;
use crate::ir::{Category, Dimension, Team, ViewMode};
use crate::layout::{Layout, Rect, Shape};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub view: ViewMode,
    pub teams: Vec<TeamDump>,
    pub regions: Vec<RegionDump>,
    pub inner_regions: Vec<InnerRegionDump>,
    pub changed: Vec<String>,
    pub extent: Option<Rect>,
}

#[derive(Debug, Serialize)]
pub struct TeamDump {
    pub name: String,
    pub category: Category,
    pub shape: Shape,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct RegionDump {
    pub name: String,
    pub dimension: Dimension,
    pub members: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct InnerRegionDump {
    pub name: String,
    pub parent: String,
    pub members: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn names(teams: &[Team], members: &[usize]) -> Vec<String> {
    members.iter().map(|&idx| teams[idx].name.clone()).collect()
}

impl LayoutDump {
    /// `changed` holds indices into `teams` as returned by alignment.
    pub fn from_layout(
        layout: &Layout,
        teams: &[Team],
        changed: &[usize],
        shapes: &ShapeProfile,
    ) -> Self {
        let view = layout.view;
        let team_dumps = teams
            .iter()
            .map(|team| {
                let size = shapes.dimensions(team.category, view);
                TeamDump {
                    name: team.name.clone(),
                    category: team.category,
                    shape: shapes.shape(team.category, view),
                    x: team.position.x,
                    y: team.position.y,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();

        let tagged = layout
            .value_streams
            .iter()
            .map(|region| (Dimension::ValueStream, region))
            .chain(
                layout
                    .platform_groupings
                    .iter()
                    .map(|region| (Dimension::PlatformGrouping, region)),
            );
        let regions = tagged
            .map(|(dimension, region)| RegionDump {
                name: region.name.clone(),
                dimension,
                members: names(teams, &region.members),
                x: region.bounds.x,
                y: region.bounds.y,
                width: region.bounds.width,
                height: region.bounds.height,
            })
            .collect();

        let inner_regions = layout
            .inner_regions
            .iter()
            .map(|inner| InnerRegionDump {
                name: inner.name.clone(),
                parent: inner.parent.clone(),
                members: names(teams, &inner.members),
                x: inner.bounds.x,
                y: inner.bounds.y,
                width: inner.bounds.width,
                height: inner.bounds.height,
            })
            .collect();

        LayoutDump {
            view,
            teams: team_dumps,
            regions,
            inner_regions,
            changed: names(teams, changed),
            extent: layout.extent,
        }
    }
}

pub fn write_layout_dump(path: Option<&Path>, dump: &LayoutDump) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
