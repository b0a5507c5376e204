use std::f32::consts::TAU;

use crate::config::LayoutConfig;
use crate::model::{Node, Position};

/// Spreads nodes evenly around the configured circle, index 0 at angle 0.
pub fn compute_circular_layout(nodes: &[Node], config: &LayoutConfig) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }
    let circle = &config.circular;
    let angle_step = TAU / nodes.len() as f32;
    nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let angle = idx as f32 * angle_step;
            let mut node = node.clone();
            node.position = Position::new(
                circle.center.x + circle.radius * angle.cos() - config.half_width(),
                circle.center.y + circle.radius * angle.sin() - config.half_height(),
            );
            node
        })
        .collect()
}
