//! # reqgraph - Dependency-Ordered Request Replay
//!
//! **reqgraph** models a sequence of captured network requests as a directed graph of
//! dependent operations and walks that graph to emit code that replays the requests
//! in dependency order. Building the graph from raw traffic and deciding what the
//! generated code looks like are left to collaborators; this crate owns the ordering.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Graph**: Read the JSON node-link form with `RequestGraph::from_file`, or
//!     implement `IntoGraph` for your own capture model.
//! 2.  **Inspect**: Render the forward tree from any request (`render_forward`) or the
//!     post-order tree across all sources (`render_post_order`).
//! 3.  **Emit**: Build an `EmissionDriver` and hand it a `Synthesizer`. Every node is
//!     synthesized exactly once, after all of its children.
//! 4.  **Save**: Write the resulting `GeneratedCode` to a plain-text artifact.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = RequestGraph::from_json(r#"{
//!         "nodes": [
//!             {"id": "login", "node_type": "cookie", "content": {"key": "curl https://example.com/login", "value": "{}"},
//!              "extracted_parts": ["token"]},
//!             {"id": "orders", "node_type": "master", "content": {"key": "curl https://example.com/orders", "value": "[]"},
//!              "dynamic_parts": ["token"]}
//!         ],
//!         "edges": [{"source": "orders", "target": "login"}]
//!     }"#)?;
//!
//!     print!("{}", render_post_order(&graph, None));
//!
//!     let driver = EmissionDriver::builder(&graph).build();
//!     let mut synthesizer = PromptSynthesizer::new(EchoModel);
//!     let code = driver.emit(&mut synthesizer)?;
//!     code.save(DEFAULT_ARTIFACT_PATH)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod label;
pub mod prelude;
pub mod render;
pub mod traversal;
