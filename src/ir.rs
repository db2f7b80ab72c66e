use serde::{Deserialize, Serialize};

/// Team type. Drives the shape and footprint of a team box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    StreamAligned,
    Platform,
    Enabling,
    ComplicatedSubsystem,
    #[default]
    Undefined,
}

impl Category {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "stream-aligned" => Some(Self::StreamAligned),
            "platform" => Some(Self::Platform),
            "enabling" => Some(Self::Enabling),
            "complicated-subsystem" => Some(Self::ComplicatedSubsystem),
            "undefined" => Some(Self::Undefined),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::StreamAligned => "stream-aligned",
            Self::Platform => "platform",
            Self::Enabling => "enabling",
            Self::ComplicatedSubsystem => "complicated-subsystem",
            Self::Undefined => "undefined",
        }
    }

    /// Wide teams span the flow of change and stack vertically inside a region.
    pub fn is_wide(self) -> bool {
        matches!(self, Self::StreamAligned | Self::Platform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Compact boxes, one size for every team type.
    #[default]
    Baseline,
    /// Team-type specific shapes (wide, narrow, octagon).
    Design,
}

impl ViewMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "baseline" | "current" => Some(Self::Baseline),
            "design" | "tt" => Some(Self::Design),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintX {
    Left,
    Center,
    Right,
}

impl HintX {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintY {
    Top,
    Bottom,
}

impl HintY {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Canonical team record. Every optional string here is either absent or
/// non-empty; the loader is the only place that deals with legacy field
/// spellings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub name: String,
    pub category: Category,
    pub value_stream: Option<String>,
    pub platform_grouping: Option<String>,
    pub value_stream_inner: Option<String>,
    pub platform_grouping_inner: Option<String>,
    pub hint_x: Option<HintX>,
    pub hint_y: Option<HintY>,
    /// Top-left corner in plane units.
    pub position: Point,
}

impl Team {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    pub fn with_value_stream(mut self, value_stream: impl Into<String>) -> Self {
        self.value_stream = Some(value_stream.into());
        self
    }

    pub fn with_platform_grouping(mut self, grouping: impl Into<String>) -> Self {
        self.platform_grouping = Some(grouping.into());
        self
    }

    pub fn with_value_stream_inner(mut self, inner: impl Into<String>) -> Self {
        self.value_stream_inner = Some(inner.into());
        self
    }

    pub fn with_platform_grouping_inner(mut self, inner: impl Into<String>) -> Self {
        self.platform_grouping_inner = Some(inner.into());
        self
    }

    pub fn with_hints(mut self, hint_x: Option<HintX>, hint_y: Option<HintY>) -> Self {
        self.hint_x = hint_x;
        self.hint_y = hint_y;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn value_stream(&self) -> Option<&str> {
        non_empty(self.value_stream.as_deref())
    }

    pub fn platform_grouping(&self) -> Option<&str> {
        non_empty(self.platform_grouping.as_deref())
    }

    pub fn value_stream_inner(&self) -> Option<&str> {
        non_empty(self.value_stream_inner.as_deref())
    }

    pub fn platform_grouping_inner(&self) -> Option<&str> {
        non_empty(self.platform_grouping_inner.as_deref())
    }

    /// Inner grouping used to cluster members inside a region, value stream
    /// first.
    pub fn any_inner(&self) -> Option<&str> {
        self.value_stream_inner()
            .or_else(|| self.platform_grouping_inner())
    }
}

/// One of the two independent outer grouping axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    ValueStream,
    PlatformGrouping,
}

impl Dimension {
    pub fn key(self, team: &Team) -> Option<&str> {
        match self {
            Self::ValueStream => team.value_stream(),
            Self::PlatformGrouping => team.platform_grouping(),
        }
    }

    pub fn inner_key(self, team: &Team) -> Option<&str> {
        match self {
            Self::ValueStream => team.value_stream_inner(),
            Self::PlatformGrouping => team.platform_grouping_inner(),
        }
    }

    /// Outer region an inner grouping of this dimension nests in: this
    /// dimension's key first, then the other one.
    pub fn outer_key(self, team: &Team) -> Option<&str> {
        self.key(team).or_else(|| self.other().key(team))
    }

    pub fn other(self) -> Self {
        match self {
            Self::ValueStream => Self::PlatformGrouping,
            Self::PlatformGrouping => Self::ValueStream,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
