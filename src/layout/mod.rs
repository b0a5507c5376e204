//! Node placement: layered (dagre), circular and grid layouts.
//!
//! Every entry point is pure. Inputs are borrowed, positions are returned on
//! fresh copies of the nodes, and the edge list is passed through untouched.

mod circular;
mod error;
mod grid;
mod layered;

pub use circular::compute_circular_layout;
pub use error::LayoutError;
pub use grid::compute_grid_layout;
pub use layered::{
    DagrePlacer, PlacementRequest, RankPlacer, compute_layered_layout,
    compute_layered_layout_with,
};

use crate::config::LayoutConfig;
use crate::model::{Side, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopBottom,
        Direction::BottomTop,
        Direction::LeftRight,
        Direction::RightLeft,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Some(Self::TopBottom),
            "BT" => Some(Self::BottomTop),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// `(target side, source side)` for edges laid out in this direction.
    pub fn anchor_sides(self) -> (Side, Side) {
        if self.is_horizontal() {
            (Side::Left, Side::Right)
        } else {
            (Side::Top, Side::Bottom)
        }
    }

    fn rankdir(self) -> &'static str {
        match self {
            Direction::TopBottom => "tb",
            Direction::BottomTop => "bt",
            Direction::LeftRight => "lr",
            Direction::RightLeft => "rl",
        }
    }
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| LayoutError::invalid_argument(format!("unsupported direction `{s}`")))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutAlgorithm {
    Layered,
    Circular,
    Grid { columns: usize },
}

impl LayoutAlgorithm {
    pub fn from_token(token: &str, columns: usize) -> Result<Self, LayoutError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "layered" | "dagre" | "hierarchical" => Ok(Self::Layered),
            "circular" | "circle" => Ok(Self::Circular),
            "grid" => Ok(Self::Grid { columns }),
            other => Err(LayoutError::invalid_argument(format!(
                "unsupported layout algorithm `{other}`"
            ))),
        }
    }
}

/// Runs `algorithm` over a whole snapshot and returns the re-positioned copy.
pub fn compute_layout(
    graph: &Snapshot,
    algorithm: LayoutAlgorithm,
    direction: Direction,
    config: &LayoutConfig,
) -> Result<Snapshot, LayoutError> {
    let nodes = match algorithm {
        LayoutAlgorithm::Layered => {
            let (nodes, _) = compute_layered_layout(&graph.nodes, &graph.edges, direction, config)?;
            nodes
        }
        LayoutAlgorithm::Circular => compute_circular_layout(&graph.nodes, config),
        LayoutAlgorithm::Grid { columns } => compute_grid_layout(&graph.nodes, columns, config)?,
    };
    log::debug!(
        "{:?} layout placed {} nodes ({})",
        algorithm,
        nodes.len(),
        direction
    );
    Ok(Snapshot::new(nodes, graph.edges.clone()))
}
