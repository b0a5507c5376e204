use crate::config::LayoutConfig;
use crate::model::{Node, Position};

use super::LayoutError;

/// Row-major grid: node `i` goes to cell `(i % columns, i / columns)`.
pub fn compute_grid_layout(
    nodes: &[Node],
    columns: usize,
    config: &LayoutConfig,
) -> Result<Vec<Node>, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::invalid_argument(
            "grid layout needs at least one column",
        ));
    }
    let grid = &config.grid;
    Ok(nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let (col, row) = grid_cell(idx, columns);
            let mut node = node.clone();
            node.position = Position::new(
                grid.start.x + col as f32 * grid.spacing_x,
                grid.start.y + row as f32 * grid.spacing_y,
            );
            node
        })
        .collect())
}

fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
    (index % columns, index / columns)
}
