use flowcanvas::{
    CanvasController, Config, Direction, EdgeChange, EdgeStyle, LayoutAlgorithm, NodeChange,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    algorithm: Option<String>,
    direction: Option<String>,
    columns: Option<usize>,
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn resolve_algorithm(options: &LayoutOptions, config: &Config) -> Result<LayoutAlgorithm, String> {
    let columns = options.columns.unwrap_or(config.layout.grid.columns);
    match options.algorithm.as_deref() {
        None => Ok(LayoutAlgorithm::Layered),
        Some(token) => LayoutAlgorithm::from_token(token, columns).map_err(|e| e.to_string()),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Editor session handle for the browser canvas. Graph state crosses the
/// boundary as JSON strings in the `{ nodes, edges }` shape.
#[wasm_bindgen]
pub struct FlowCanvas {
    inner: CanvasController,
}

#[wasm_bindgen]
impl FlowCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<FlowCanvas, JsValue> {
        let config = match config_json {
            Some(raw) => flowcanvas::config::parse_config(&raw).map_err(to_js)?,
            None => Config::default(),
        };
        let rng = StdRng::from_entropy();
        Ok(FlowCanvas {
            inner: CanvasController::with_seed(config, flowcanvas::seed_graph(), rng),
        })
    }

    #[wasm_bindgen(js_name = graphJson)]
    pub fn graph_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.graph()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.stats()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDirection)]
    pub fn set_direction(&mut self, token: &str) -> Result<(), JsValue> {
        let direction: Direction = token.parse().map_err(to_js)?;
        self.inner.set_direction(direction);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDefaultEdgeStyle)]
    pub fn set_default_edge_style(&mut self, token: &str) -> Result<(), JsValue> {
        let style = EdgeStyle::from_token(token)
            .ok_or_else(|| JsValue::from_str(&format!("unknown edge style `{token}`")))?;
        self.inner.set_default_edge_style(style);
        Ok(())
    }

    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self) -> String {
        self.inner.add_node()
    }

    #[wasm_bindgen(js_name = onConnect)]
    pub fn on_connect(&mut self, source: &str, target: &str) -> String {
        self.inner.on_connect(source, target)
    }

    #[wasm_bindgen(js_name = onNodesChange)]
    pub fn on_nodes_change(&mut self, changes_json: &str) -> Result<(), JsValue> {
        let changes: Vec<NodeChange> = serde_json::from_str(changes_json).map_err(to_js)?;
        self.inner.on_nodes_change(&changes);
        Ok(())
    }

    #[wasm_bindgen(js_name = onEdgesChange)]
    pub fn on_edges_change(&mut self, changes_json: &str) -> Result<(), JsValue> {
        let changes: Vec<EdgeChange> = serde_json::from_str(changes_json).map_err(to_js)?;
        self.inner.on_edges_change(&changes);
        Ok(())
    }

    #[wasm_bindgen(js_name = onSelectionChange)]
    pub fn on_selection_change(&mut self, ids: Vec<String>) {
        self.inner.on_selection_change(&ids);
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> usize {
        self.inner.delete_selected()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = toggleEdgeStyles)]
    pub fn toggle_edge_styles(&mut self) {
        self.inner.toggle_edge_styles();
    }

    #[wasm_bindgen(js_name = applyLayout)]
    pub fn apply_layout(&mut self, options_json: Option<String>) -> Result<(), JsValue> {
        let options = match options_json {
            Some(raw) => serde_json::from_str::<LayoutOptions>(&raw).map_err(to_js)?,
            None => LayoutOptions::default(),
        };
        if let Some(token) = options.direction.as_deref() {
            self.set_direction(token)?;
        }
        let algorithm = resolve_algorithm(&options, self.inner.config()).map_err(to_js)?;
        self.inner.apply_layout(algorithm).map_err(to_js)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.inner.clear_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_layered_layout() {
        let config = Config::default();
        let algorithm = resolve_algorithm(&LayoutOptions::default(), &config).unwrap();
        assert_eq!(algorithm, LayoutAlgorithm::Layered);
    }

    #[test]
    fn grid_columns_fall_back_to_config() {
        let config = Config::default();
        let options: LayoutOptions = serde_json::from_str(r#"{ "algorithm": "grid" }"#).unwrap();
        assert_eq!(
            resolve_algorithm(&options, &config).unwrap(),
            LayoutAlgorithm::Grid { columns: 3 }
        );
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let options: LayoutOptions = serde_json::from_str(r#"{ "algorithm": "spiral" }"#).unwrap();
        assert!(resolve_algorithm(&options, &Config::default()).is_err());
    }

    #[test]
    fn session_round_trips_graph_json() {
        let mut canvas = FlowCanvas::new(None).unwrap();
        let id = canvas.add_node();
        assert_eq!(id, "5");
        canvas
            .on_nodes_change(r#"[{ "type": "select", "id": "5", "selected": true }]"#)
            .unwrap();
        assert_eq!(canvas.delete_selected(), 1);
        assert!(canvas.can_undo());
        let graph: flowcanvas::Snapshot =
            serde_json::from_str(&canvas.graph_json().unwrap()).unwrap();
        assert_eq!(graph, flowcanvas::seed_graph());
    }
}
