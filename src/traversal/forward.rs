use super::{Direction, TreePosition, within_limit};
use crate::graph::GraphStore;
use ahash::AHashSet;
use tracing::warn;

/// One node reported by a [`ForwardWalk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardStep {
    pub node_id: String,
    pub position: TreePosition,
    /// The node was already expanded earlier in the walk and is not expanded again.
    pub already_visited: bool,
    /// The node whose expansion reported this one. `None` for the start node.
    pub parent: Option<String>,
}

/// Depth-first pre-order walk from a single start node.
///
/// Once a node has been expanded anywhere in the walk, every later edge into it is
/// reported with `already_visited` set and not followed. A node at `max_depth` is still
/// reported, but its children are not.
pub struct ForwardWalk<'g, G: GraphStore + ?Sized> {
    graph: &'g G,
    direction: Direction,
    max_depth: Option<usize>,
    visited: AHashSet<String>,
    stack: Vec<(String, TreePosition, Option<String>)>,
}

impl<'g, G: GraphStore + ?Sized> ForwardWalk<'g, G> {
    pub fn new(graph: &'g G, start: &str, max_depth: Option<usize>) -> Self {
        if !graph.contains(start) {
            warn!(node_id = start, "forward walk starts at a node missing from the graph");
        }
        Self {
            graph,
            direction: Direction::Downstream,
            max_depth,
            visited: AHashSet::new(),
            stack: vec![(start.to_string(), TreePosition::root(true), None)],
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl<G: GraphStore + ?Sized> Iterator for ForwardWalk<'_, G> {
    type Item = ForwardStep;

    fn next(&mut self) -> Option<Self::Item> {
        let (node_id, position, parent) = self.stack.pop()?;

        // Checked on pop rather than push so that earlier siblings' subtrees count.
        if self.visited.contains(&node_id) {
            return Some(ForwardStep {
                node_id,
                position,
                already_visited: true,
                parent,
            });
        }
        self.visited.insert(node_id.clone());

        if within_limit(self.max_depth, position.depth) {
            let children = self.direction.children(self.graph, &node_id);
            let last = children.len().saturating_sub(1);
            for (i, child) in children.iter().enumerate().rev() {
                self.stack
                    .push((child.clone(), position.child(i == last), Some(node_id.clone())));
            }
        }

        Some(ForwardStep {
            node_id,
            position,
            already_visited: false,
            parent,
        })
    }
}
