//! Visitation orders over a request graph.
//!
//! Two walks are provided:
//!
//! - [`ForwardWalk`]: depth-first pre-order from a single start node, used for
//!   human inspection. Its visited set is global to the walk and never shrinks, so a
//!   node is expanded at most once no matter how many edges reach it.
//! - [`PostOrder`]: depth-first post-order from every source node, used to decide
//!   the order in which code blocks are emitted. It keeps two sets with different
//!   lifetimes: `visited` holds only the nodes on the active path of the current
//!   source walk and is the cycle guard, while `fully_processed` spans the whole run
//!   and guarantees each node is emitted at most once.
//!
//! Both walks run on an explicit stack and are exposed as iterators, so neither deep
//! chains nor cycles can exhaust the call stack.

use crate::graph::GraphStore;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

mod forward;
mod reverse;

pub use forward::{ForwardStep, ForwardWalk};
pub use reverse::{PostOrder, PostOrderStep};

/// Which neighbours count as a node's children during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow outgoing edges. Sources are nodes without incoming edges.
    #[default]
    Downstream,
    /// Follow incoming edges. Sources are nodes without outgoing edges.
    Upstream,
}

impl Direction {
    /// The neighbours of `id` that a walk descends into.
    pub fn children<'g, G: GraphStore + ?Sized>(self, graph: &'g G, id: &str) -> &'g [String] {
        match self {
            Direction::Downstream => graph.successors(id),
            Direction::Upstream => graph.predecessors(id),
        }
    }

    /// The label of the edge a walk followed from `parent` to `child`.
    pub fn edge_label<'g, G: GraphStore + ?Sized>(
        self,
        graph: &'g G,
        parent: &str,
        child: &str,
    ) -> Option<&'g str> {
        match self {
            Direction::Downstream => graph.edge_label(parent, child),
            Direction::Upstream => graph.edge_label(child, parent),
        }
    }

    /// Nodes no edge leads into under this direction, in graph order.
    pub fn sources<G: GraphStore + ?Sized>(self, graph: &G) -> Vec<String> {
        graph
            .nodes()
            .iter()
            .filter(|id| match self {
                Direction::Downstream => graph.in_degree(id) == 0,
                Direction::Upstream => graph.out_degree(id) == 0,
            })
            .cloned()
            .collect()
    }
}

/// Where a step sits in the rendered tree.
#[derive(Debug, Clone)]
pub struct TreePosition {
    pub depth: usize,
    pub is_last: bool,
    // ancestor chain, shared with the parent position
    parent: Option<Rc<Ancestor>>,
}

#[derive(Debug)]
struct Ancestor {
    is_last: bool,
    parent: Option<Rc<Ancestor>>,
}

// Unlinks iteratively; the default drop recurses once per level.
impl Drop for Ancestor {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(ancestor) = next {
            match Rc::try_unwrap(ancestor) {
                Ok(mut ancestor) => next = ancestor.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl TreePosition {
    pub fn root(is_last: bool) -> Self {
        Self {
            depth: 0,
            is_last,
            parent: None,
        }
    }

    pub fn child(&self, is_last: bool) -> Self {
        Self {
            depth: self.depth + 1,
            is_last,
            parent: Some(Rc::new(Ancestor {
                is_last: self.is_last,
                parent: self.parent.clone(),
            })),
        }
    }

    /// The is-last flag of every ancestor, root first.
    pub fn lineage(&self) -> Vec<bool> {
        let mut flags = Vec::with_capacity(self.depth);
        let mut current = self.parent.as_deref();
        while let Some(ancestor) = current {
            flags.push(ancestor.is_last);
            current = ancestor.parent.as_deref();
        }
        flags.reverse();
        flags
    }

    /// `└── ` for the last sibling, `├── ` otherwise.
    pub fn connector(&self) -> &'static str {
        if self.is_last { "└── " } else { "├── " }
    }

    /// The indentation drawn before this node's connector.
    pub fn prefix(&self) -> String {
        self.lineage().into_iter().map(Self::segment).collect()
    }

    /// The indentation drawn before the connectors of this node's children.
    pub fn child_prefix(&self) -> String {
        let mut prefix = self.prefix();
        prefix.push_str(Self::segment(self.is_last));
        prefix
    }

    fn segment(is_last: bool) -> &'static str {
        if is_last { "    " } else { "│   " }
    }
}

impl PartialEq for TreePosition {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
            && self.is_last == other.is_last
            && self.lineage() == other.lineage()
    }
}

impl Eq for TreePosition {}

fn within_limit(max_depth: Option<usize>, depth: usize) -> bool {
    max_depth.is_none_or(|max| depth < max)
}
