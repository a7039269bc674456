//! Diagnostic tree views of both traversal orders.

use crate::graph::{GraphStore, RequestNodeDefinition};
use crate::label::NodeLabel;
use crate::traversal::{Direction, ForwardStep, ForwardWalk, PostOrder};
use std::fmt;

/// The forward (pre-order) tree rooted at `start`.
pub struct ForwardTree<'a, G: GraphStore + ?Sized> {
    pub graph: &'a G,
    pub start: &'a str,
    pub max_depth: Option<usize>,
    pub direction: Direction,
    /// Prefix child lines with `<edge label> ` when the followed edge has one.
    pub edge_labels: bool,
}

impl<G: GraphStore + ?Sized> ForwardTree<'_, G> {
    fn via(&self, step: &ForwardStep) -> String {
        if !self.edge_labels {
            return String::new();
        }
        step.parent
            .as_deref()
            .and_then(|parent| self.direction.edge_label(self.graph, parent, &step.node_id))
            .map(|label| format!("<{}> ", label))
            .unwrap_or_default()
    }
}

impl<G: GraphStore + ?Sized> fmt::Display for ForwardTree<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let walk =
            ForwardWalk::new(self.graph, self.start, self.max_depth).with_direction(self.direction);
        for step in walk {
            let prefix = step.position.prefix();
            let connector = step.position.connector();
            let via = self.via(&step);
            if step.already_visited {
                writeln!(
                    f,
                    "{}{}{}(Already visited) [node_id: {}]",
                    prefix, connector, via, step.node_id
                )?;
            } else {
                let indent = step.position.child_prefix();
                let label = with_node(self.graph, &step.node_id, |node| {
                    NodeLabel::block(&step.node_id, node, &indent)
                });
                writeln!(f, "{}{}{}{}", prefix, connector, via, label)?;
            }
        }
        Ok(())
    }
}

/// The post-order tree across all sources, one line per emitted node.
///
/// Children appear above their parents because lines are written in emission order.
pub struct PostOrderTree<'a, G: GraphStore + ?Sized> {
    pub graph: &'a G,
    pub max_depth: Option<usize>,
    pub direction: Direction,
}

impl<G: GraphStore + ?Sized> fmt::Display for PostOrderTree<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in PostOrder::directed(self.graph, self.direction, self.max_depth) {
            let label = with_node(self.graph, &step.node_id, |node| {
                NodeLabel::inline(&step.node_id, node)
            });
            writeln!(
                f,
                "{}{}{}",
                step.position.prefix(),
                step.position.connector(),
                label
            )?;
        }
        Ok(())
    }
}

/// Renders the forward tree from `start` following outgoing edges.
pub fn render_forward<G: GraphStore + ?Sized>(
    graph: &G,
    start: &str,
    max_depth: Option<usize>,
) -> String {
    ForwardTree {
        graph,
        start,
        max_depth,
        direction: Direction::Downstream,
        edge_labels: false,
    }
    .to_string()
}

/// Renders the post-order tree from every source following outgoing edges.
pub fn render_post_order<G: GraphStore + ?Sized>(graph: &G, max_depth: Option<usize>) -> String {
    PostOrderTree {
        graph,
        max_depth,
        direction: Direction::Downstream,
    }
    .to_string()
}

/// Runs `f` on the node's attributes, substituting blank ones for unknown ids.
pub(crate) fn with_node<G, T>(graph: &G, id: &str, f: impl FnOnce(&RequestNodeDefinition) -> T) -> T
where
    G: GraphStore + ?Sized,
{
    match graph.node(id) {
        Some(node) => f(node),
        None => f(&RequestNodeDefinition::blank(id)),
    }
}
