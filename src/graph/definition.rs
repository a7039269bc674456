use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a request graph, ready for loading into a store.
/// This is the target structure for any custom capture format conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub nodes: Vec<RequestNodeDefinition>,
    #[serde(default, alias = "links")]
    pub edges: Vec<DependencyEdgeDefinition>,
}

/// A single captured request and the metadata derived from it.
///
/// Every field except `id` falls back to an empty value when absent, so partially
/// annotated captures still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestNodeDefinition {
    pub id: String,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub content: RequestContent,
    #[serde(default)]
    pub dynamic_parts: Vec<String>,
    #[serde(default)]
    pub extracted_parts: Vec<String>,
    #[serde(default)]
    pub input_variables: Vec<String>,
}

/// The literal request signature (`key`) paired with the observed response body (`value`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContent {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// A producer -> consumer relation between two requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdgeDefinition {
    pub source: String,
    pub target: String,
    #[serde(default, alias = "cUrl", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RequestNodeDefinition {
    /// Creates a node with blank attributes.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The literal request signature (method, URL, headers, body).
    pub fn signature(&self) -> &str {
        &self.content.key
    }

    /// The literal observed response body.
    pub fn response(&self) -> &str {
        &self.content.value
    }
}
