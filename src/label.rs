use crate::graph::RequestNodeDefinition;
use itertools::Itertools;

/// Formats request nodes into human-readable labels.
pub struct NodeLabel;

impl NodeLabel {
    /// Single-line label used by the post-order tree.
    pub fn inline(node_id: &str, node: &RequestNodeDefinition) -> String {
        format!(
            "[{}] [node_id: {}] [dynamic_parts: {}] [extracted_parts: {}] [input_variables: {}] [{}]",
            node.node_type,
            node_id,
            Self::format_parts(&node.dynamic_parts),
            Self::format_parts(&node.extracted_parts),
            Self::format_parts(&node.input_variables),
            node.signature(),
        )
    }

    /// Multi-line label used by the forward tree.
    ///
    /// Continuation lines start with `indent` followed by four spaces, so they line up
    /// under the node when `indent` is the prefix of the node's children. The input
    /// variables line is left out when the node has none.
    pub fn block(node_id: &str, node: &RequestNodeDefinition, indent: &str) -> String {
        let mut label = format!("[{}] [node_id: {}]", node.node_type, node_id);
        if !node.input_variables.is_empty() {
            label.push_str(&format!(
                "\n{}    [input_variables: {}]",
                indent,
                Self::format_parts(&node.input_variables)
            ));
        }
        label.push_str(&format!(
            "\n{}    [dynamic_parts: {}]",
            indent,
            Self::format_parts(&node.dynamic_parts)
        ));
        label.push_str(&format!(
            "\n{}    [extracted_parts: {}]",
            indent,
            Self::format_parts(&node.extracted_parts)
        ));
        label.push_str(&format!("\n{}    [{}]", indent, node.signature()));
        label
    }

    /// Formats a list of value names as `['a', 'b']`.
    pub fn format_parts(parts: &[String]) -> String {
        format!("[{}]", parts.iter().map(|p| format!("'{}'", p)).join(", "))
    }
}
