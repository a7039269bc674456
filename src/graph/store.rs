use super::definition::{DependencyEdgeDefinition, GraphDefinition, RequestNodeDefinition};
use crate::error::GraphError;
use ahash::AHashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Read-only access to a request dependency graph.
///
/// The traversal engine only ever reads through this trait, so any graph
/// representation can be walked as long as it reports neighbours in a stable order.
pub trait GraphStore {
    /// All node ids, in insertion order.
    fn nodes(&self) -> &[String];

    /// The attributes recorded for `id`, or `None` if the node is unknown.
    fn node(&self, id: &str) -> Option<&RequestNodeDefinition>;

    /// Targets of the outgoing edges of `id`, in edge insertion order.
    fn successors(&self, id: &str) -> &[String];

    /// Sources of the incoming edges of `id`, in edge insertion order.
    fn predecessors(&self, id: &str) -> &[String];

    /// The display label attached to the edge `source -> target`, if any.
    fn edge_label(&self, source: &str, target: &str) -> Option<&str>;

    fn in_degree(&self, id: &str) -> usize {
        self.predecessors(id).len()
    }

    fn out_degree(&self, id: &str) -> usize {
        self.successors(id).len()
    }

    fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }
}

/// The in-memory graph of captured requests.
///
/// Built once from a `GraphDefinition` and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RequestGraph {
    order: Vec<String>,
    nodes: AHashMap<String, RequestNodeDefinition>,
    successors: AHashMap<String, Vec<String>>,
    predecessors: AHashMap<String, Vec<String>>,
    labels: AHashMap<(String, String), String>,
}

impl RequestGraph {
    pub fn new(definition: GraphDefinition) -> Self {
        let mut graph = Self::default();
        for node in definition.nodes {
            graph.insert_node(node);
        }
        for edge in definition.edges {
            graph.insert_edge(edge);
        }
        graph
    }

    /// Parses the JSON node-link form of a graph.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let definition: GraphDefinition =
            serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        Ok(Self::new(definition))
    }

    /// Loads a graph from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    // A repeated id keeps its original position but takes the newer attributes.
    fn insert_node(&mut self, node: RequestNodeDefinition) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    fn ensure_node(&mut self, id: &str) {
        if !self.nodes.contains_key(id) {
            warn!(node_id = id, "edge references unknown node, adding it with blank attributes");
            self.insert_node(RequestNodeDefinition::blank(id));
        }
    }

    fn insert_edge(&mut self, edge: DependencyEdgeDefinition) {
        self.ensure_node(&edge.source);
        self.ensure_node(&edge.target);

        let targets = self.successors.entry(edge.source.clone()).or_default();
        if !targets.contains(&edge.target) {
            targets.push(edge.target.clone());
            self.predecessors
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }

        if let Some(label) = edge.label {
            self.labels.insert((edge.source, edge.target), label);
        }
    }
}

impl From<GraphDefinition> for RequestGraph {
    fn from(definition: GraphDefinition) -> Self {
        Self::new(definition)
    }
}

impl GraphStore for RequestGraph {
    fn nodes(&self) -> &[String] {
        &self.order
    }

    fn node(&self, id: &str) -> Option<&RequestNodeDefinition> {
        self.nodes.get(id)
    }

    fn successors(&self, id: &str) -> &[String] {
        self.successors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn predecessors(&self, id: &str) -> &[String] {
        self.predecessors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn edge_label(&self, source: &str, target: &str) -> Option<&str> {
        self.labels
            .get(&(source.to_string(), target.to_string()))
            .map(String::as_str)
    }
}
