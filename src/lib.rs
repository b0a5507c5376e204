pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod history;
pub mod layout;
pub mod model;

pub use canvas::{CanvasController, CanvasStats, EdgeChange, NodeChange, seed_graph};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CanvasConfig, Config, LayoutConfig, load_config};
pub use history::History;
pub use layout::{
    Direction, LayoutAlgorithm, LayoutError, compute_circular_layout, compute_grid_layout,
    compute_layered_layout, compute_layout,
};
pub use model::{Edge, EdgeStyle, Node, Position, Side, Snapshot};
