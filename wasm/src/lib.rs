use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use team_topology_layout::config::{LayoutConfig, parse_config};
use team_topology_layout::ir::{Point, Team, ViewMode};
use team_topology_layout::loader::RawTeam;
use team_topology_layout::layout::{Rect, ViewTransform, align, compute_layout, team_at};
use team_topology_layout::layout_dump::LayoutDump;
use team_topology_layout::parse_teams;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    view: Option<String>,
    config: Option<String>,
    no_align: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitRequest {
    teams: Vec<RawTeam>,
    pointer: Point,
    #[serde(default)]
    transform: ViewTransform,
    view: Option<String>,
    config: Option<String>,
    custom_footprints: Option<IndexMap<String, Rect>>,
}

#[derive(Debug, Serialize)]
struct AlignResult {
    teams: Vec<Team>,
    layout: LayoutDump,
}

fn to_js<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn view_from(token: Option<&str>) -> Result<ViewMode, JsValue> {
    match token {
        None => Ok(ViewMode::Design),
        Some(token) => ViewMode::from_token(token)
            .ok_or_else(|| JsValue::from_str(&format!("unknown view: {token}"))),
    }
}

fn build_config(raw: Option<&str>) -> Result<LayoutConfig, JsValue> {
    match raw {
        Some(raw) => parse_config(raw).map_err(to_js),
        None => Ok(LayoutConfig::default()),
    }
}

fn align_impl(teams_json: &str, options: LayoutOptions) -> Result<AlignResult, JsValue> {
    let config = build_config(options.config.as_deref())?;
    let view = view_from(options.view.as_deref())?;
    let mut teams = parse_teams(teams_json).map_err(to_js)?;
    let changed = if options.no_align.unwrap_or(false) {
        Vec::new()
    } else {
        align(&mut teams, &config)
    };
    let layout = compute_layout(&teams, view, &config);
    let dump = LayoutDump::from_layout(&layout, &teams, &changed, &config.shapes);
    Ok(AlignResult {
        teams,
        layout: dump,
    })
}

/// Aligns a team file and returns the repositioned teams plus region geometry.
#[wasm_bindgen]
pub fn align_teams(teams_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<LayoutOptions>(&raw).map_err(to_js)?,
        None => LayoutOptions::default(),
    };
    let result = align_impl(teams_json, options)?;
    serde_json::to_string(&result).map_err(to_js)
}

fn hit_impl(request: HitRequest) -> Result<Option<String>, JsValue> {
    let config = build_config(request.config.as_deref())?;
    let view = view_from(request.view.as_deref())?;
    let teams: Vec<Team> = request.teams.into_iter().map(RawTeam::into_team).collect();
    let hit = team_at(
        &teams,
        request.pointer,
        &request.transform,
        view,
        &config.shapes,
        request.custom_footprints.as_ref(),
    );
    Ok(hit.map(|team| team.name.clone()))
}

/// Name of the team under the pointer, if any. Teams use the same record
/// format as `align_teams`.
#[wasm_bindgen]
pub fn hit_test(request_json: &str) -> Result<Option<String>, JsValue> {
    let request: HitRequest = serde_json::from_str(request_json).map_err(to_js)?;
    hit_impl(request)
}
