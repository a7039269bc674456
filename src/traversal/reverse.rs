use super::{Direction, TreePosition, within_limit};
use crate::graph::GraphStore;
use ahash::AHashSet;
use tracing::trace;

/// One node emitted by a [`PostOrder`] walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOrderStep {
    pub node_id: String,
    pub position: TreePosition,
}

enum Frame {
    Enter(String, TreePosition),
    Exit(String, TreePosition),
}

/// Depth-first post-order walk across every source node.
///
/// Each source is walked in turn with a fresh path set. A node is emitted only after
/// all of its children have returned, and never more than once per run. Re-entering a
/// node that is still on the active path ends that branch silently, which is how cycles
/// are broken; the node is emitted later when its own frame completes. Nodes beyond
/// `max_depth` are not emitted from that branch.
pub struct PostOrder<'g, G: GraphStore + ?Sized> {
    graph: &'g G,
    direction: Direction,
    max_depth: Option<usize>,
    sources: Vec<String>,
    next_source: usize,
    stack: Vec<Frame>,
    /// Nodes on the active path of the current source walk.
    visited: AHashSet<String>,
    /// Nodes already emitted during this run, across all source walks.
    fully_processed: AHashSet<String>,
}

impl<'g, G: GraphStore + ?Sized> PostOrder<'g, G> {
    /// Walks from the given sources, in order, following outgoing edges.
    pub fn new<I, S>(graph: &'g G, sources: I, max_depth: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            graph,
            direction: Direction::Downstream,
            max_depth,
            sources: sources.into_iter().map(Into::into).collect(),
            next_source: 0,
            stack: Vec::new(),
            visited: AHashSet::new(),
            fully_processed: AHashSet::new(),
        }
    }

    /// Walks from every node with no incoming edges.
    pub fn from_sources(graph: &'g G, max_depth: Option<usize>) -> Self {
        Self::directed(graph, Direction::Downstream, max_depth)
    }

    /// Walks from every source under `direction`, descending along the same direction.
    pub fn directed(graph: &'g G, direction: Direction, max_depth: Option<usize>) -> Self {
        let mut walk = Self::new(graph, direction.sources(graph), max_depth);
        walk.direction = direction;
        walk
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Nodes of the graph that have not been emitted so far, in graph order.
    ///
    /// After the walk is exhausted these are the nodes no source reaches (within the
    /// depth limit), such as components made up entirely of cycles.
    pub fn unreached(&self) -> Vec<&'g str> {
        self.graph
            .nodes()
            .iter()
            .filter(|id| !self.fully_processed.contains(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    fn start_next_source(&mut self) -> bool {
        let Some(source) = self.sources.get(self.next_source) else {
            return false;
        };
        let is_last = self.next_source + 1 == self.sources.len();
        self.next_source += 1;
        self.visited.clear();
        self.stack
            .push(Frame::Enter(source.clone(), TreePosition::root(is_last)));
        true
    }
}

impl<G: GraphStore + ?Sized> Iterator for PostOrder<'_, G> {
    type Item = PostOrderStep;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(frame) = self.stack.pop() else {
                if self.start_next_source() {
                    continue;
                }
                return None;
            };

            match frame {
                Frame::Enter(node_id, position) => {
                    if self.fully_processed.contains(&node_id) {
                        continue;
                    }
                    if self.visited.contains(&node_id) {
                        trace!(node_id = node_id.as_str(), "cycle on active path, branch dropped");
                        continue;
                    }
                    if !within_limit(self.max_depth, position.depth) {
                        continue;
                    }

                    self.visited.insert(node_id.clone());
                    let children = self.direction.children(self.graph, &node_id);
                    let last = children.len().saturating_sub(1);
                    let child_frames: Vec<Frame> = children
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(i, child)| Frame::Enter(child.clone(), position.child(i == last)))
                        .collect();
                    self.stack.push(Frame::Exit(node_id, position));
                    self.stack.extend(child_frames);
                }
                Frame::Exit(node_id, position) => {
                    self.visited.remove(&node_id);
                    self.fully_processed.insert(node_id.clone());
                    return Some(PostOrderStep { node_id, position });
                }
            }
        }
    }
}
