use super::definition::GraphDefinition;
use crate::error::GraphConversionError;

/// A trait for custom capture models that can be converted into a `GraphDefinition`.
///
/// This is the extension point for feeding graphs built by an external tool into the
/// traversal engine. Implement it on whatever structure your capture analysis produces.
///
/// # Example
///
/// ```rust,no_run
/// use reqgraph::prelude::*;
/// use reqgraph::error::GraphConversionError;
///
/// struct Capture { calls: Vec<(String, String)>, depends_on: Vec<(String, String)> }
///
/// impl IntoGraph for Capture {
///     fn into_graph(self) -> std::result::Result<GraphDefinition, GraphConversionError> {
///         let nodes = self
///             .calls
///             .into_iter()
///             .map(|(id, curl)| RequestNodeDefinition {
///                 content: RequestContent { key: curl, value: String::new() },
///                 ..RequestNodeDefinition::blank(id)
///             })
///             .collect();
///         let edges = self
///             .depends_on
///             .into_iter()
///             .map(|(source, target)| DependencyEdgeDefinition { source, target, label: None })
///             .collect();
///         Ok(GraphDefinition { nodes, edges })
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a request graph definition.
    fn into_graph(self) -> Result<GraphDefinition, GraphConversionError>;
}

impl IntoGraph for GraphDefinition {
    fn into_graph(self) -> Result<GraphDefinition, GraphConversionError> {
        Ok(self)
    }
}
