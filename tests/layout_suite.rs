use flowcanvas::{
    Direction, Edge, EdgeStyle, LayoutConfig, LayoutError, Node, Position, Side,
    compute_layered_layout, seed_graph,
};
use pretty_assertions::assert_eq;

fn chain(ids: &[&str]) -> (Vec<Node>, Vec<Edge>) {
    let nodes = ids
        .iter()
        .map(|id| Node::new(*id, id.to_uppercase(), Position::default()))
        .collect();
    let edges = ids
        .windows(2)
        .map(|pair| Edge::connect(pair[0], pair[1], EdgeStyle::Curved, true))
        .collect();
    (nodes, edges)
}

fn positions(nodes: &[Node]) -> Vec<(f32, f32)> {
    nodes.iter().map(|n| (n.position.x, n.position.y)).collect()
}

#[test]
fn top_bottom_chain_descends() {
    let (nodes, edges) = chain(&["a", "b", "c"]);
    let (laid_out, _) =
        compute_layered_layout(&nodes, &edges, Direction::TopBottom, &LayoutConfig::default())
            .expect("layout failed");
    let p = positions(&laid_out);
    assert!(p[0].1 < p[1].1 && p[1].1 < p[2].1, "{p:?}");
    assert!((p[0].0 - p[1].0).abs() < 1.0 && (p[1].0 - p[2].0).abs() < 1.0, "{p:?}");
    assert!(laid_out.iter().all(|n| n.target_position == Some(Side::Top)));
    assert!(laid_out.iter().all(|n| n.source_position == Some(Side::Bottom)));
}

#[test]
fn left_right_chain_advances() {
    let (nodes, edges) = chain(&["a", "b", "c"]);
    let (laid_out, _) =
        compute_layered_layout(&nodes, &edges, Direction::LeftRight, &LayoutConfig::default())
            .expect("layout failed");
    let p = positions(&laid_out);
    assert!(p[0].0 < p[1].0 && p[1].0 < p[2].0, "{p:?}");
    assert!((p[0].1 - p[1].1).abs() < 1.0 && (p[1].1 - p[2].1).abs() < 1.0, "{p:?}");
    assert!(laid_out.iter().all(|n| n.target_position == Some(Side::Left)));
    assert!(laid_out.iter().all(|n| n.source_position == Some(Side::Right)));
}

#[test]
fn reversed_directions_flip_the_main_axis() {
    let (nodes, edges) = chain(&["a", "b", "c"]);
    let config = LayoutConfig::default();
    let (bt, _) = compute_layered_layout(&nodes, &edges, Direction::BottomTop, &config).unwrap();
    let (rl, _) = compute_layered_layout(&nodes, &edges, Direction::RightLeft, &config).unwrap();
    let bt = positions(&bt);
    let rl = positions(&rl);
    assert!(bt[0].1 > bt[1].1 && bt[1].1 > bt[2].1, "{bt:?}");
    assert!(rl[0].0 > rl[1].0 && rl[1].0 > rl[2].0, "{rl:?}");
}

#[test]
fn ranks_are_separated_by_at_least_the_footprint() {
    let (nodes, edges) = chain(&["a", "b"]);
    let config = LayoutConfig::default();
    let (tb, _) = compute_layered_layout(&nodes, &edges, Direction::TopBottom, &config).unwrap();
    assert!(tb[1].position.y - tb[0].position.y >= config.node_height);
    let (lr, _) = compute_layered_layout(&nodes, &edges, Direction::LeftRight, &config).unwrap();
    assert!(lr[1].position.x - lr[0].position.x >= config.node_width);
}

#[test]
fn layout_is_a_fixed_point() {
    let graph = seed_graph();
    let config = LayoutConfig::default();
    for direction in Direction::ALL {
        let (first, edges) =
            compute_layered_layout(&graph.nodes, &graph.edges, direction, &config).unwrap();
        let (second, _) = compute_layered_layout(&first, &edges, direction, &config).unwrap();
        assert_eq!(first, second, "{direction}");
    }
}

#[test]
fn seed_graph_layers_start_above_end() {
    let graph = seed_graph();
    let (laid_out, edges) = compute_layered_layout(
        &graph.nodes,
        &graph.edges,
        Direction::TopBottom,
        &LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(edges, graph.edges);
    let y = |id: &str| laid_out.iter().find(|n| n.id == id).unwrap().position.y;
    assert!(y("1") < y("2"));
    assert!(y("1") < y("3"));
    assert!((y("2") - y("3")).abs() < 1.0);
    assert!(y("2") < y("4"));
}

#[test]
fn self_loops_and_parallel_edges_are_tolerated() {
    let (nodes, mut edges) = chain(&["a", "b"]);
    edges.push(Edge::connect("a", "a", EdgeStyle::Dotted, false));
    edges.push(Edge::connect("a", "b", EdgeStyle::Dotted, false));
    let (laid_out, out_edges) =
        compute_layered_layout(&nodes, &edges, Direction::TopBottom, &LayoutConfig::default())
            .unwrap();
    assert_eq!(laid_out.len(), 2);
    assert_eq!(out_edges.len(), 3);
    assert_eq!(out_edges, edges);
    assert!(laid_out[0].position.y < laid_out[1].position.y);
}

#[test]
fn dangling_edges_are_rejected() {
    let (nodes, mut edges) = chain(&["a", "b"]);
    edges.push(Edge::connect("b", "zz", EdgeStyle::Curved, false));
    let err = compute_layered_layout(&nodes, &edges, Direction::TopBottom, &LayoutConfig::default())
        .unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidReference {
            edge: "eb-zz".to_string(),
            node: "zz".to_string()
        }
    );
}
