use crate::layout::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] json5::Error),
}

/// Footprint table per team type. `design_*` sizes apply to the design view;
/// the baseline view draws every team as `baseline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeProfile {
    pub baseline: Size,
    pub design_stream_aligned: Size,
    pub design_platform: Size,
    pub design_enabling: Size,
    pub design_complicated_subsystem: Size,
    pub design_undefined: Size,
}

impl Default for ShapeProfile {
    fn default() -> Self {
        Self {
            baseline: Size::new(144.0, 80.0),
            design_stream_aligned: Size::new(560.0, 64.0),
            design_platform: Size::new(560.0, 80.0),
            design_enabling: Size::new(60.0, 140.0),
            design_complicated_subsystem: Size::new(100.0, 100.0),
            design_undefined: Size::new(144.0, 80.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub padding: f32,
    pub label_height: f32,
    pub inner_padding: f32,
    pub inner_label_height: f32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            padding: 30.0,
            label_height: 35.0,
            inner_padding: 15.0,
            inner_label_height: 10.0,
        }
    }
}

/// Spacing constants for auto-alignment. Tuned for appearance; the only
/// invariant they carry is that regions do not overlap their own members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    pub ungrouped_start_x: f32,
    pub regions_start_x: f32,
    pub start_y: f32,
    pub region_width: f32,
    pub region_spacing_x: f32,
    pub region_spacing_y: f32,
    pub regions_per_row: usize,
    pub wide_gap: f32,
    pub wide_to_narrow_gap: f32,
    pub narrow_per_row: usize,
    pub narrow_column_width: f32,
    pub narrow_column_gap: f32,
    pub narrow_row_gap: f32,
    pub bottom_spacing: f32,
    pub ungrouped_gap: f32,
    pub ungrouped_center_offset: f32,
    pub ungrouped_right_offset: f32,
    pub ungrouped_bottom_min_y: f32,
    pub tolerance: f32,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            ungrouped_start_x: 100.0,
            regions_start_x: 400.0,
            start_y: 100.0,
            region_width: 800.0,
            region_spacing_x: 650.0,
            region_spacing_y: 50.0,
            regions_per_row: 2,
            wide_gap: 60.0,
            wide_to_narrow_gap: 20.0,
            narrow_per_row: 3,
            narrow_column_width: 200.0,
            narrow_column_gap: 40.0,
            narrow_row_gap: 40.0,
            bottom_spacing: 40.0,
            ungrouped_gap: 40.0,
            ungrouped_center_offset: 200.0,
            ungrouped_right_offset: 400.0,
            ungrouped_bottom_min_y: 600.0,
            tolerance: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_y: f32,
    pub max_fit_scale: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin_left: 10.0,
            margin_right: 30.0,
            margin_y: 10.0,
            max_fit_scale: 1.5,
            min_zoom: 0.1,
            max_zoom: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub shapes: ShapeProfile,
    pub grouping: GroupingConfig,
    pub align: AlignConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Deserialize)]
struct SizeFile {
    width: Option<f32>,
    height: Option<f32>,
}

impl SizeFile {
    fn apply(self, target: &mut Size) {
        if let Some(v) = self.width {
            target.width = v;
        }
        if let Some(v) = self.height {
            target.height = v;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapesFile {
    baseline: Option<SizeFile>,
    stream_aligned: Option<SizeFile>,
    platform: Option<SizeFile>,
    enabling: Option<SizeFile>,
    complicated_subsystem: Option<SizeFile>,
    undefined: Option<SizeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupingFile {
    padding: Option<f32>,
    label_height: Option<f32>,
    inner_padding: Option<f32>,
    inner_label_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlignFile {
    ungrouped_start_x: Option<f32>,
    regions_start_x: Option<f32>,
    start_y: Option<f32>,
    region_width: Option<f32>,
    region_spacing_x: Option<f32>,
    region_spacing_y: Option<f32>,
    regions_per_row: Option<usize>,
    wide_gap: Option<f32>,
    wide_to_narrow_gap: Option<f32>,
    narrow_per_row: Option<usize>,
    narrow_column_width: Option<f32>,
    narrow_column_gap: Option<f32>,
    narrow_row_gap: Option<f32>,
    bottom_spacing: Option<f32>,
    ungrouped_gap: Option<f32>,
    ungrouped_center_offset: Option<f32>,
    ungrouped_right_offset: Option<f32>,
    ungrouped_bottom_min_y: Option<f32>,
    tolerance: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportFile {
    margin_left: Option<f32>,
    margin_right: Option<f32>,
    margin_y: Option<f32>,
    max_fit_scale: Option<f32>,
    min_zoom: Option<f32>,
    max_zoom: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    shapes: Option<ShapesFile>,
    grouping: Option<GroupingFile>,
    align: Option<AlignFile>,
    viewport: Option<ViewportFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON or JSON5 config document. Missing keys keep their defaults.
pub fn parse_config(contents: &str) -> Result<LayoutConfig, ConfigError> {
    let mut config = LayoutConfig::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(shapes) = parsed.shapes {
        let target = &mut config.shapes;
        if let Some(v) = shapes.baseline {
            v.apply(&mut target.baseline);
        }
        if let Some(v) = shapes.stream_aligned {
            v.apply(&mut target.design_stream_aligned);
        }
        if let Some(v) = shapes.platform {
            v.apply(&mut target.design_platform);
        }
        if let Some(v) = shapes.enabling {
            v.apply(&mut target.design_enabling);
        }
        if let Some(v) = shapes.complicated_subsystem {
            v.apply(&mut target.design_complicated_subsystem);
        }
        if let Some(v) = shapes.undefined {
            v.apply(&mut target.design_undefined);
        }
    }

    if let Some(grouping) = parsed.grouping {
        if let Some(v) = grouping.padding {
            config.grouping.padding = v;
        }
        if let Some(v) = grouping.label_height {
            config.grouping.label_height = v;
        }
        if let Some(v) = grouping.inner_padding {
            config.grouping.inner_padding = v;
        }
        if let Some(v) = grouping.inner_label_height {
            config.grouping.inner_label_height = v;
        }
    }

    if let Some(align) = parsed.align {
        let target = &mut config.align;
        if let Some(v) = align.ungrouped_start_x {
            target.ungrouped_start_x = v;
        }
        if let Some(v) = align.regions_start_x {
            target.regions_start_x = v;
        }
        if let Some(v) = align.start_y {
            target.start_y = v;
        }
        if let Some(v) = align.region_width {
            target.region_width = v;
        }
        if let Some(v) = align.region_spacing_x {
            target.region_spacing_x = v;
        }
        if let Some(v) = align.region_spacing_y {
            target.region_spacing_y = v;
        }
        if let Some(v) = align.regions_per_row {
            target.regions_per_row = v.max(1);
        }
        if let Some(v) = align.wide_gap {
            target.wide_gap = v;
        }
        if let Some(v) = align.wide_to_narrow_gap {
            target.wide_to_narrow_gap = v;
        }
        if let Some(v) = align.narrow_per_row {
            target.narrow_per_row = v.max(1);
        }
        if let Some(v) = align.narrow_column_width {
            target.narrow_column_width = v;
        }
        if let Some(v) = align.narrow_column_gap {
            target.narrow_column_gap = v;
        }
        if let Some(v) = align.narrow_row_gap {
            target.narrow_row_gap = v;
        }
        if let Some(v) = align.bottom_spacing {
            target.bottom_spacing = v;
        }
        if let Some(v) = align.ungrouped_gap {
            target.ungrouped_gap = v;
        }
        if let Some(v) = align.ungrouped_center_offset {
            target.ungrouped_center_offset = v;
        }
        if let Some(v) = align.ungrouped_right_offset {
            target.ungrouped_right_offset = v;
        }
        if let Some(v) = align.ungrouped_bottom_min_y {
            target.ungrouped_bottom_min_y = v;
        }
        if let Some(v) = align.tolerance {
            target.tolerance = v.max(0.0);
        }
    }

    if let Some(viewport) = parsed.viewport {
        let target = &mut config.viewport;
        if let Some(v) = viewport.margin_left {
            target.margin_left = v;
        }
        if let Some(v) = viewport.margin_right {
            target.margin_right = v;
        }
        if let Some(v) = viewport.margin_y {
            target.margin_y = v;
        }
        if let Some(v) = viewport.max_fit_scale {
            target.max_fit_scale = v;
        }
        if let Some(v) = viewport.min_zoom {
            target.min_zoom = v;
        }
        if let Some(v) = viewport.max_zoom {
            target.max_zoom = v;
        }
    }

    Ok(config)
}
