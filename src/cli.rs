use crate::canvas::seed_graph;
use crate::config::{Config, load_config};
use crate::layout::{Direction, LayoutAlgorithm, compute_layout};
use crate::model::Snapshot;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flowcanvas", version, about = "Lay out node-link diagrams stored as JSON")]
pub struct Args {
    /// Input graph JSON ({"nodes": [...], "edges": [...]}) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "seed")]
    pub input: Option<PathBuf>,

    /// Start from the built-in example graph instead of reading input
    #[arg(long = "seed")]
    pub seed: bool,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout algorithm
    #[arg(short = 'l', long = "layout", value_enum, default_value = "layered")]
    pub layout: LayoutKind,

    /// Rank direction for the layered layout (TB, BT, LR, RL)
    #[arg(short = 'd', long = "direction", default_value = "TB")]
    pub direction: Direction,

    /// Column count for the grid layout. Defaults to the config value.
    #[arg(long = "columns")]
    pub columns: Option<usize>,

    /// Step every edge style this many times before writing
    #[arg(long = "toggle-styles", default_value_t = 0)]
    pub toggle_styles: usize,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Layered,
    Circular,
    Grid,
    /// Keep positions as they are
    None,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let graph = if args.seed {
        seed_graph()
    } else {
        let input = read_input(args.input.as_deref())?;
        Snapshot::from_json(&input).context("input is not a graph document")?
    };

    let output = process(graph, &args, &config)?;
    write_output(&output.to_json_pretty()?, args.output.as_deref())
}

fn process(mut graph: Snapshot, args: &Args, config: &Config) -> Result<Snapshot> {
    for _ in 0..args.toggle_styles {
        graph.toggle_edge_styles();
    }
    let algorithm = match args.layout {
        LayoutKind::Layered => LayoutAlgorithm::Layered,
        LayoutKind::Circular => LayoutAlgorithm::Circular,
        LayoutKind::Grid => LayoutAlgorithm::Grid {
            columns: args.columns.unwrap_or(config.layout.grid.columns),
        },
        LayoutKind::None => return Ok(graph),
    };
    Ok(compute_layout(&graph, algorithm, args.direction, &config.layout)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
