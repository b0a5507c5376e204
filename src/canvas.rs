//! Editing session: live graph state, selection, and the glue between user
//! intents, the layout engine and the undo history.
//!
//! Every operation that changes the graph commits a snapshot, except position
//! updates reported mid-drag, which only commit once the drag ends.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::history::History;
use crate::layout::{Direction, LayoutAlgorithm, LayoutError, compute_layout};
use crate::model::{Edge, EdgeStyle, Node, Position, Snapshot};

static SEED_GRAPH: Lazy<Snapshot> = Lazy::new(|| {
    let nodes = vec![
        Node::new("1", "Start Node", Position::new(250.0, 25.0)),
        Node::new("2", "Process A", Position::new(100.0, 125.0)),
        Node::new("3", "Process B", Position::new(400.0, 125.0)),
        Node::new("4", "End Node", Position::new(250.0, 250.0)),
    ];
    let edges = [("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]
        .into_iter()
        .map(|(source, target)| Edge::connect(source, target, EdgeStyle::Curved, true))
        .collect();
    Snapshot::new(nodes, edges)
});

/// The diagram a fresh editor opens with.
pub fn seed_graph() -> Snapshot {
    SEED_GRAPH.clone()
}

/// Incremental node change reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeChange {
    Position {
        id: String,
        position: Position,
        #[serde(default)]
        dragging: bool,
    },
    Remove {
        id: String,
    },
    Select {
        id: String,
        selected: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeChange {
    Remove { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasStats {
    pub nodes: usize,
    pub edges: usize,
    pub selected: usize,
}

pub struct CanvasController {
    config: Config,
    seed: Snapshot,
    graph: Snapshot,
    selection: Vec<String>,
    direction: Direction,
    edge_style: EdgeStyle,
    next_id: u64,
    history: History<Snapshot>,
    rng: StdRng,
}

impl CanvasController {
    /// Session over the built-in seed graph with an entropy-seeded RNG.
    pub fn new(config: Config) -> Self {
        Self::with_seed(config, seed_graph(), StdRng::from_entropy())
    }

    pub fn with_seed(config: Config, seed: Snapshot, rng: StdRng) -> Self {
        let next_id = first_free_numeric_id(&seed);
        let edge_style = config.canvas.default_edge_style;
        Self {
            config,
            graph: seed.clone(),
            history: History::new(seed.clone()),
            seed,
            selection: Vec::new(),
            direction: Direction::default(),
            edge_style,
            next_id,
            rng,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn graph(&self) -> &Snapshot {
        &self.graph
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> CanvasStats {
        CanvasStats {
            nodes: self.graph.nodes.len(),
            edges: self.graph.edges.len(),
            selected: self.selection.len(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn default_edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn set_default_edge_style(&mut self, style: EdgeStyle) {
        self.edge_style = style;
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    /// Adds a node at a random spot inside the viewport and returns its id.
    pub fn add_node(&mut self) -> String {
        let id = self.allocate_id();
        let canvas = &self.config.canvas;
        let position = Position::new(
            random_coordinate(&mut self.rng, canvas.viewport_width),
            random_coordinate(&mut self.rng, canvas.viewport_height),
        );
        let label = format!("Node {id}");
        self.graph.nodes.push(Node::new(id.clone(), label, position));
        log::debug!("added node {} at ({}, {})", id, position.x, position.y);
        self.commit();
        id
    }

    /// Appends an edge in the current default style and returns its id.
    /// Repeated pairs produce parallel edges.
    pub fn on_connect(&mut self, source: &str, target: &str) -> String {
        if !self.has_node(source) || !self.has_node(target) {
            log::warn!("connecting {source} -> {target} with a missing endpoint");
        }
        let edge = Edge::connect(
            source,
            target,
            self.edge_style,
            self.config.canvas.animate_new_edges,
        );
        let id = edge.id.clone();
        self.graph.edges.push(edge);
        self.commit();
        id
    }

    pub fn on_selection_change(&mut self, ids: &[String]) {
        self.selection.clear();
        for id in ids {
            self.select(id, true);
        }
    }

    /// Removes selected nodes and every edge touching them. Returns how many
    /// nodes went away.
    pub fn delete_selected(&mut self) -> usize {
        let doomed: HashSet<String> = self.selection.drain(..).collect();
        let removed = self.remove_nodes(&doomed);
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Puts the seed graph back. History is kept; the reset is one more step.
    pub fn reset(&mut self) {
        self.graph = self.seed.clone();
        self.selection.clear();
        self.commit();
    }

    /// Steps every edge to the next style in the cycle.
    pub fn toggle_edge_styles(&mut self) {
        if self.graph.toggle_edge_styles() {
            self.commit();
        }
    }

    /// Re-positions every node. On error nothing changes.
    pub fn apply_layout(&mut self, algorithm: LayoutAlgorithm) -> Result<(), LayoutError> {
        let laid_out = compute_layout(&self.graph, algorithm, self.direction, &self.config.layout)?;
        self.graph = laid_out;
        self.commit();
        Ok(())
    }

    pub fn on_nodes_change(&mut self, changes: &[NodeChange]) {
        let mut dirty = false;
        for change in changes {
            match change {
                NodeChange::Position {
                    id,
                    position,
                    dragging,
                } => {
                    let Some(node) = self.graph.nodes.iter_mut().find(|n| &n.id == id) else {
                        log::warn!("position change for unknown node {id}");
                        continue;
                    };
                    node.position = *position;
                    dirty |= !dragging;
                }
                NodeChange::Remove { id } => {
                    let doomed = HashSet::from([id.clone()]);
                    if self.remove_nodes(&doomed) == 0 {
                        log::warn!("remove change for unknown node {id}");
                        continue;
                    }
                    self.selection.retain(|selected| selected != id);
                    dirty = true;
                }
                NodeChange::Select { id, selected } => self.select(id, *selected),
            }
        }
        if dirty {
            self.commit();
        }
    }

    pub fn on_edges_change(&mut self, changes: &[EdgeChange]) {
        let mut dirty = false;
        for change in changes {
            match change {
                EdgeChange::Remove { id } => {
                    let before = self.graph.edges.len();
                    self.graph.edges.retain(|edge| &edge.id != id);
                    if self.graph.edges.len() == before {
                        log::warn!("remove change for unknown edge {id}");
                    } else {
                        dirty = true;
                    }
                }
            }
        }
        if dirty {
            self.commit();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.graph = snapshot.clone();
        self.prune_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.graph = snapshot.clone();
        self.prune_selection();
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn commit(&mut self) {
        self.history.commit(self.graph.clone());
    }

    fn has_node(&self, id: &str) -> bool {
        self.graph.nodes.iter().any(|node| node.id == id)
    }

    fn select(&mut self, id: &str, selected: bool) {
        if selected {
            if !self.has_node(id) {
                log::warn!("selection of unknown node {id}");
                return;
            }
            if !self.selection.iter().any(|s| s == id) {
                self.selection.push(id.to_string());
            }
        } else {
            self.selection.retain(|s| s != id);
        }
    }

    fn remove_nodes(&mut self, doomed: &HashSet<String>) -> usize {
        let before = self.graph.nodes.len();
        self.graph.nodes.retain(|node| !doomed.contains(&node.id));
        self.graph
            .edges
            .retain(|edge| !doomed.contains(&edge.source) && !doomed.contains(&edge.target));
        before - self.graph.nodes.len()
    }

    fn prune_selection(&mut self) {
        let live: HashSet<&str> = self.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        self.selection.retain(|id| live.contains(id.as_str()));
    }

    fn allocate_id(&mut self) -> String {
        loop {
            let candidate = self.next_id.to_string();
            // Past u64::MAX the counter restarts low; the presence check
            // below still rules out collisions.
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            if !self.has_node(&candidate) {
                return candidate;
            }
        }
    }
}

fn first_free_numeric_id(graph: &Snapshot) -> u64 {
    graph
        .nodes
        .iter()
        .filter_map(|node| node.id.parse::<u64>().ok())
        .max()
        .and_then(|max| max.checked_add(1))
        .unwrap_or(1)
}

fn random_coordinate(rng: &mut StdRng, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
