//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a graph, walk it, and emit code.
//!
//! # Example
//!
//! ```rust,no_run
//! use reqgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = RequestGraph::from_file("path/to/graph.json")?;
//! for step in PostOrder::from_sources(&graph, None) {
//!     println!("{}", step.node_id);
//! }
//! # Ok(())
//! # }
//! ```

// Graph model and store
pub use crate::graph::{
    DependencyEdgeDefinition, GraphDefinition, GraphStore, IntoGraph, RequestContent,
    RequestGraph, RequestNodeDefinition,
};

// Traversal
pub use crate::traversal::{
    Direction, ForwardStep, ForwardWalk, PostOrder, PostOrderStep, TreePosition,
};

// Labels and diagnostic trees
pub use crate::label::NodeLabel;
pub use crate::render::{ForwardTree, PostOrderTree, render_forward, render_post_order};

// Emission
pub use crate::emit::{
    CodePrompt, CommandModel, DEFAULT_ARTIFACT_PATH, EchoModel, EmissionDriver, EmittedBlock,
    GeneratedCode, LanguageModel, PromptSynthesizer, SynthesisRequest, Synthesizer,
};

// Configuration
pub use crate::config::RunConfig;

// Error types
pub use crate::error::{ConfigError, EmitError, GraphConversionError, GraphError, SynthesisError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
