use crate::error::EmitError;
use crate::graph::GraphStore;
use crate::label::NodeLabel;
use crate::render::with_node;
use crate::traversal::{Direction, PostOrder};
use tracing::{debug, warn};

mod artifact;
pub mod prompt;
mod synth;

pub use artifact::{DEFAULT_ARTIFACT_PATH, EmittedBlock, GeneratedCode};
pub use prompt::{CodePrompt, CommandModel, EchoModel, LanguageModel, PromptSynthesizer};
pub use synth::{SynthesisRequest, Synthesizer};

/// Walks a graph in post-order and asks a [`Synthesizer`] for each node's code.
///
/// Synthesis happens one node at a time, in emission order, and each node is
/// synthesized at most once. The first failure aborts the run.
pub struct EmissionDriver<'g, G: GraphStore + ?Sized> {
    graph: &'g G,
    max_depth: Option<usize>,
    direction: Direction,
}

pub struct EmissionDriverBuilder<'g, G: GraphStore + ?Sized> {
    graph: &'g G,
    max_depth: Option<usize>,
    direction: Direction,
}

impl<'g, G: GraphStore + ?Sized> EmissionDriverBuilder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_depth: None,
            direction: Direction::Downstream,
        }
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn build(self) -> EmissionDriver<'g, G> {
        EmissionDriver {
            graph: self.graph,
            max_depth: self.max_depth,
            direction: self.direction,
        }
    }
}

impl<'g, G: GraphStore + ?Sized> EmissionDriver<'g, G> {
    pub fn builder(graph: &'g G) -> EmissionDriverBuilder<'g, G> {
        EmissionDriverBuilder::new(graph)
    }

    fn walk(&self) -> PostOrder<'g, G> {
        PostOrder::directed(self.graph, self.direction, self.max_depth)
    }

    /// The node ids in the order code would be emitted.
    pub fn plan(&self) -> Vec<String> {
        self.walk().map(|step| step.node_id).collect()
    }

    /// Synthesizes every node in emission order.
    pub fn emit<S: Synthesizer + ?Sized>(
        &self,
        synthesizer: &mut S,
    ) -> Result<GeneratedCode, EmitError> {
        let mut walk = self.walk();
        let mut blocks = Vec::new();

        for step in walk.by_ref() {
            let block = with_node(self.graph, &step.node_id, |node| {
                debug!(node_id = step.node_id.as_str(), "synthesizing request");
                let request = SynthesisRequest::from_node(&step.node_id, node);
                let code = synthesizer
                    .synthesize(&request)
                    .map_err(|source| EmitError::Synthesis {
                        node_id: step.node_id.clone(),
                        source,
                    })?;
                Ok::<_, EmitError>(EmittedBlock {
                    node_id: step.node_id.clone(),
                    label: NodeLabel::inline(&step.node_id, node),
                    code,
                })
            })?;
            debug!(label = block.label.as_str(), code_chars = block.code.len(), "block emitted");
            blocks.push(block);
        }

        let unreached = walk.unreached();
        if !unreached.is_empty() {
            warn!(
                count = unreached.len(),
                nodes = ?unreached,
                "nodes not reachable from any source were skipped"
            );
        }

        Ok(GeneratedCode { blocks })
    }
}
