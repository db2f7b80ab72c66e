use crate::config::load_config;
use crate::ir::ViewMode;
use crate::layout::{align, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::loader::parse_teams;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "ttlayout",
    version,
    about = "Auto-align team topology layouts and dump region geometry"
)]
pub struct Args {
    /// Team file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (JSON). Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file overriding sizes and spacing
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// View whose shapes are used for regions and the dump
    #[arg(long = "view", value_enum, default_value = "design")]
    pub view: ViewArg,

    /// Keep stored positions instead of auto-aligning
    #[arg(long = "no-align")]
    pub no_align: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ViewArg {
    Baseline,
    Design,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Baseline => ViewMode::Baseline,
            ViewArg::Design => ViewMode::Design,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;

    let input = read_input(args.input.as_deref())?;
    let mut teams = parse_teams(&input)?;

    let changed = if args.no_align {
        Vec::new()
    } else {
        align(&mut teams, &config)
    };
    tracing::info!(teams = teams.len(), changed = changed.len(), "layout ready");

    let layout = compute_layout(&teams, args.view.into(), &config);
    let dump = LayoutDump::from_layout(&layout, &teams, &changed, &config.shapes);
    write_layout_dump(args.output.as_deref(), &dump)?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
