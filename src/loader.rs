//! Reads team collections from JSON.
//!
//! Team files come from several generations of tooling: grouping keys and
//! alignment hints may sit at the top level or inside a `metadata` block.
//! Top-level values win; blank strings count as absent.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::ir::{Category, HintX, HintY, Point, Team};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read team file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid team data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate team name: {0}")]
    DuplicateName(String),
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawPosition {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    pub value_stream: Option<String>,
    pub platform_grouping: Option<String>,
    pub value_stream_inner: Option<String>,
    pub platform_grouping_inner: Option<String>,
    pub align_hint_x: Option<String>,
    pub align_hint_y: Option<String>,
}

/// A team as stored on disk. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub name: String,
    #[serde(default)]
    pub team_type: Option<String>,
    #[serde(default)]
    pub value_stream: Option<String>,
    #[serde(default)]
    pub platform_grouping: Option<String>,
    #[serde(default)]
    pub value_stream_inner: Option<String>,
    #[serde(default)]
    pub platform_grouping_inner: Option<String>,
    #[serde(default)]
    pub align_hint_x: Option<String>,
    #[serde(default)]
    pub align_hint_y: Option<String>,
    #[serde(default)]
    pub position: Option<RawPosition>,
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamDocument {
    List(Vec<RawTeam>),
    Wrapped { teams: Vec<RawTeam> },
}

fn pick(top: Option<String>, fallback: Option<String>) -> Option<String> {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    if present(&top) {
        top
    } else if present(&fallback) {
        fallback
    } else {
        None
    }
}

impl RawTeam {
    pub fn into_team(self) -> Team {
        let meta = self.metadata.unwrap_or_default();

        let category = match self.team_type.as_deref() {
            None => Category::Undefined,
            Some(token) => Category::from_token(token).unwrap_or_else(|| {
                crate::log::warn!(team = %self.name, team_type = token, "unknown team type");
                Category::Undefined
            }),
        };

        let hint_x = pick(self.align_hint_x, meta.align_hint_x).and_then(|token| {
            let hint = HintX::from_token(&token);
            if hint.is_none() {
                crate::log::warn!(team = %self.name, hint = %token, "ignoring horizontal hint");
            }
            hint
        });
        let hint_y = pick(self.align_hint_y, meta.align_hint_y).and_then(|token| {
            let hint = HintY::from_token(&token);
            if hint.is_none() {
                crate::log::warn!(team = %self.name, hint = %token, "ignoring vertical hint");
            }
            hint
        });

        let position = self.position.unwrap_or_default();
        Team {
            name: self.name,
            category,
            value_stream: pick(self.value_stream, meta.value_stream),
            platform_grouping: pick(self.platform_grouping, meta.platform_grouping),
            value_stream_inner: pick(self.value_stream_inner, meta.value_stream_inner),
            platform_grouping_inner: pick(
                self.platform_grouping_inner,
                meta.platform_grouping_inner,
            ),
            hint_x,
            hint_y,
            position: Point::new(position.x, position.y),
        }
    }
}

/// Parses a JSON array of teams, or an object with a `teams` array.
pub fn parse_teams(input: &str) -> Result<Vec<Team>, LoadError> {
    let raw = match serde_json::from_str::<TeamDocument>(input)? {
        TeamDocument::List(teams) | TeamDocument::Wrapped { teams } => teams,
    };

    let mut seen = HashSet::new();
    let mut teams = Vec::with_capacity(raw.len());
    for team in raw {
        if !seen.insert(team.name.clone()) {
            return Err(LoadError::DuplicateName(team.name));
        }
        teams.push(team.into_team());
    }
    crate::log::debug!(teams = teams.len(), "loaded teams");
    Ok(teams)
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    parse_teams(&contents)
}
