use crate::model::{EdgeStyle, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the layered layout does with edges whose endpoints are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DanglingEdgePolicy {
    #[default]
    Reject,
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub node_spacing: f32,
    pub rank_spacing: f32,
    pub margin: f32,
    pub dangling_edges: DanglingEdgePolicy,
    pub circular: CircularLayoutConfig,
    pub grid: GridLayoutConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 172.0,
            node_height: 36.0,
            node_spacing: 50.0,
            rank_spacing: 50.0,
            margin: 0.0,
            dangling_edges: DanglingEdgePolicy::default(),
            circular: CircularLayoutConfig::default(),
            grid: GridLayoutConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn half_width(&self) -> f32 {
        self.node_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.node_height / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircularLayoutConfig {
    pub center: Position,
    pub radius: f32,
}

impl Default for CircularLayoutConfig {
    fn default() -> Self {
        Self {
            center: Position::new(300.0, 300.0),
            radius: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridLayoutConfig {
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub start: Position,
    pub columns: usize,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            spacing_x: 200.0,
            spacing_y: 100.0,
            start: Position::new(50.0, 50.0),
            columns: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// New nodes land uniformly inside `[0, viewport_width) x [0, viewport_height)`.
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub default_edge_style: EdgeStyle,
    pub animate_new_edges: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            viewport_height: 400.0,
            default_edge_style: EdgeStyle::Curved,
            animate_new_edges: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub canvas: CanvasConfig,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(contents)?;
    log::debug!(
        "loaded config: footprint {}x{}, dangling edges {:?}",
        config.layout.node_width,
        config.layout.node_height,
        config.layout.dangling_edges
    );
    Ok(config)
}
