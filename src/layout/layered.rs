use std::collections::{HashMap, HashSet};

use dagre_rust::{
    GraphConfig as DagreConfig, GraphEdge as DagreEdge, GraphNode as DagreNode,
    layout as dagre_layout,
};
use graphlib_rust::{Graph as DagreGraph, GraphOption};

use crate::config::{DanglingEdgePolicy, LayoutConfig};
use crate::model::{Edge, Node, Position};

use super::{Direction, LayoutError};

/// Input handed to a [`RankPlacer`]: node ids with the fixed footprint from
/// `config`, and validated `(source, target)` pairs.
#[derive(Debug, Clone)]
pub struct PlacementRequest<'a> {
    pub node_ids: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub direction: Direction,
    pub config: &'a LayoutConfig,
}

/// Rank assignment and coordinate placement for a layered graph.
///
/// Returns the centre point of every node it placed. Implementations must be
/// deterministic for identical requests.
pub trait RankPlacer {
    fn place(&self, request: &PlacementRequest<'_>) -> HashMap<String, (f32, f32)>;
}

/// [`RankPlacer`] backed by `dagre_rust`. A new layout graph is built for
/// every call, so nothing leaks between invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagrePlacer;

impl RankPlacer for DagrePlacer {
    fn place(&self, request: &PlacementRequest<'_>) -> HashMap<String, (f32, f32)> {
        let config = request.config;
        let mut dagre_graph: DagreGraph<DagreConfig, DagreNode, DagreEdge> =
            DagreGraph::new(Some(GraphOption {
                directed: Some(true),
                multigraph: Some(false),
                compound: Some(false),
            }));

        let mut graph_config = DagreConfig::default();
        graph_config.rankdir = Some(request.direction.rankdir().to_string());
        graph_config.nodesep = Some(config.node_spacing);
        graph_config.ranksep = Some(config.rank_spacing);
        graph_config.marginx = Some(config.margin);
        graph_config.marginy = Some(config.margin);
        dagre_graph.set_graph(graph_config);

        for node_id in &request.node_ids {
            let mut node = DagreNode::default();
            node.width = config.node_width;
            node.height = config.node_height;
            dagre_graph.set_node(node_id.clone(), Some(node));
        }

        // Parallel edges add nothing to ranking; the layout graph is not a multigraph.
        let mut edge_set: HashSet<(&String, &String)> = HashSet::new();
        for (from, to) in &request.edges {
            if !edge_set.insert((from, to)) {
                continue;
            }
            let edge_label = DagreEdge::default();
            let _ = dagre_graph.set_edge(from, to, Some(edge_label), None);
        }

        dagre_layout::run_layout(&mut dagre_graph);

        let mut placed = HashMap::with_capacity(request.node_ids.len());
        for node_id in &request.node_ids {
            let Some(dagre_node) = dagre_graph.node(node_id) else {
                continue;
            };
            placed.insert(node_id.clone(), (dagre_node.x, dagre_node.y));
        }
        placed
    }
}

pub fn compute_layered_layout(
    nodes: &[Node],
    edges: &[Edge],
    direction: Direction,
    config: &LayoutConfig,
) -> Result<(Vec<Node>, Vec<Edge>), LayoutError> {
    compute_layered_layout_with(&DagrePlacer, nodes, edges, direction, config)
}

/// Layered layout with an explicit placer.
///
/// Fails without producing output when an edge points at an unknown node and
/// the config rejects dangling edges, or when the placer skips a node.
pub fn compute_layered_layout_with<P: RankPlacer + ?Sized>(
    placer: &P,
    nodes: &[Node],
    edges: &[Edge],
    direction: Direction,
    config: &LayoutConfig,
) -> Result<(Vec<Node>, Vec<Edge>), LayoutError> {
    if nodes.is_empty() {
        return Ok((Vec::new(), edges.to_vec()));
    }

    let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut layout_edges = Vec::with_capacity(edges.len());
    for edge in edges {
        let missing = [&edge.source, &edge.target]
            .into_iter()
            .find(|id| !known.contains(id.as_str()));
        match (missing, config.dangling_edges) {
            (None, _) => layout_edges.push((edge.source.clone(), edge.target.clone())),
            (Some(node), DanglingEdgePolicy::Reject) => {
                return Err(LayoutError::InvalidReference {
                    edge: edge.id.clone(),
                    node: node.clone(),
                });
            }
            (Some(node), DanglingEdgePolicy::Ignore) => {
                log::warn!("skipping edge {} in layout: unknown node {}", edge.id, node);
            }
        }
    }

    let request = PlacementRequest {
        node_ids: nodes.iter().map(|node| node.id.clone()).collect(),
        edges: layout_edges,
        direction,
        config,
    };
    let placed = placer.place(&request);

    let (target_side, source_side) = direction.anchor_sides();
    let mut laid_out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let Some(&(x, y)) = placed.get(&node.id) else {
            return Err(LayoutError::Unplaced {
                node: node.id.clone(),
            });
        };
        let mut node = node.clone();
        node.position = Position::new(x - config.half_width(), y - config.half_height());
        node.target_position = Some(target_side);
        node.source_position = Some(source_side);
        laid_out.push(node);
    }

    log::debug!(
        "layered layout ({}) placed {} nodes over {} edges",
        direction,
        laid_out.len(),
        request.edges.len()
    );
    Ok((laid_out, edges.to_vec()))
}
