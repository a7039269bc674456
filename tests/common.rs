//! Common test utilities for building request graphs.
use reqgraph::prelude::*;

/// Creates a node with a recognisable signature and response.
#[allow(dead_code)]
pub fn request(id: &str) -> RequestNodeDefinition {
    RequestNodeDefinition {
        id: id.to_string(),
        node_type: "request".to_string(),
        content: RequestContent {
            key: format!("curl https://api.example.com/{}", id),
            value: format!("{{\"from\": \"{}\"}}", id),
        },
        dynamic_parts: vec![],
        extracted_parts: vec![],
        input_variables: vec![],
    }
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> DependencyEdgeDefinition {
    DependencyEdgeDefinition {
        source: source.to_string(),
        target: target.to_string(),
        label: None,
    }
}

/// Builds a graph from node ids and `(source, target)` pairs.
#[allow(dead_code)]
pub fn graph_of(nodes: &[&str], edges: &[(&str, &str)]) -> RequestGraph {
    RequestGraph::new(GraphDefinition {
        nodes: nodes.iter().map(|id| request(id)).collect(),
        edges: edges.iter().map(|(s, t)| edge(s, t)).collect(),
    })
}

/// A -> B, A -> C, B -> C. C is reachable along two paths.
#[allow(dead_code)]
pub fn create_diamond_graph() -> RequestGraph {
    graph_of(&["A", "B", "C"], &[("A", "B"), ("A", "C"), ("B", "C")])
}

/// S -> A -> B -> C -> A. The only source leads into a three-node cycle.
#[allow(dead_code)]
pub fn create_cyclic_graph() -> RequestGraph {
    graph_of(
        &["S", "A", "B", "C"],
        &[("S", "A"), ("A", "B"), ("B", "C"), ("C", "A")],
    )
}

/// S1 alone, plus S2 -> T.
#[allow(dead_code)]
pub fn create_disconnected_graph() -> RequestGraph {
    graph_of(&["S1", "S2", "T"], &[("S2", "T")])
}

/// A login flow annotated the way the upstream builder annotates it:
/// the final call depends on a token extracted from the login response.
#[allow(dead_code)]
pub fn create_login_graph() -> RequestGraph {
    let mut orders = request("orders");
    orders.node_type = "master".to_string();
    orders.dynamic_parts = vec!["token".to_string(), "user_id".to_string()];
    orders.input_variables = vec!["search_term".to_string()];

    let mut login = request("login");
    login.node_type = "cookie".to_string();
    login.extracted_parts = vec!["token".to_string()];

    let mut profile = request("profile");
    profile.dynamic_parts = vec!["token".to_string()];
    profile.extracted_parts = vec!["user_id".to_string()];

    RequestGraph::new(GraphDefinition {
        nodes: vec![orders, login, profile],
        edges: vec![
            edge("orders", "profile"),
            edge("orders", "login"),
            edge("profile", "login"),
        ],
    })
}

/// Checks that every edge `a -> b` has `b` emitted before `a`.
#[allow(dead_code)]
pub fn assert_children_first(graph: &RequestGraph, order: &[String]) {
    for (index, node) in order.iter().enumerate() {
        for child in graph.successors(node) {
            let child_index = order
                .iter()
                .position(|id| id == child)
                .unwrap_or_else(|| panic!("child '{}' of '{}' was never emitted", child, node));
            assert!(
                child_index < index,
                "'{}' was emitted before its child '{}'",
                node,
                child
            );
        }
    }
}

/// Pins a closure to the synthesizer signature so its error type is inferred.
#[allow(dead_code)]
pub fn synthesizer_fn<F>(f: F) -> F
where
    F: FnMut(&SynthesisRequest<'_>) -> std::result::Result<String, SynthesisError>,
{
    f
}
