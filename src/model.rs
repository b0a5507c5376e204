use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Side of a node's bounding box where an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<Side>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            data: NodeData {
                label: label.into(),
            },
            target_position: None,
            source_position: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// How the renderer routes an edge between its anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Routing {
    Straight,
    SmoothStep,
    Curved,
}

/// Visual edge style. The three variants form the toggle cycle
/// `Dotted -> SmoothStep -> Curved -> Dotted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeStyle {
    Dotted,
    SmoothStep,
    #[default]
    Curved,
}

impl EdgeStyle {
    pub const ALL: [EdgeStyle; 3] = [EdgeStyle::Dotted, EdgeStyle::SmoothStep, EdgeStyle::Curved];

    pub fn next(self) -> Self {
        match self {
            EdgeStyle::Dotted => EdgeStyle::SmoothStep,
            EdgeStyle::SmoothStep => EdgeStyle::Curved,
            EdgeStyle::Curved => EdgeStyle::Dotted,
        }
    }

    pub fn routing(self) -> Routing {
        match self {
            EdgeStyle::Dotted => Routing::Straight,
            EdgeStyle::SmoothStep => Routing::SmoothStep,
            EdgeStyle::Curved => Routing::Curved,
        }
    }

    /// SVG `stroke-dasharray` for the style; `None` draws a solid line.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            EdgeStyle::Dotted => Some("2 4"),
            EdgeStyle::SmoothStep => None,
            EdgeStyle::Curved => Some("5 5"),
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "dotted" => Some(Self::Dotted),
            "smoothstep" | "smooth-step" | "step" => Some(Self::SmoothStep),
            "curved" | "default" | "bezier" => Some(Self::Curved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub style: EdgeStyle,
}

impl Edge {
    pub fn connect(source: &str, target: &str, style: EdgeStyle, animated: bool) -> Self {
        Self {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            animated,
            style,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("e{source}-{target}")
}

/// Full copy of the node and edge lists at one point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Steps every edge to the next style in the cycle. Returns `false` when
    /// there are no edges to change.
    pub fn toggle_edge_styles(&mut self) -> bool {
        for edge in &mut self.edges {
            edge.style = edge.style.next();
        }
        !self.edges.is_empty()
    }

    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
