#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod loader;
mod log;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config};
pub use ir::{Category, Dimension, HintX, HintY, Point, Team, ViewMode};
pub use layout::{align, compute_layout, groupings, inner_groupings, team_at};
pub use loader::{LoadError, load_teams, parse_teams};
