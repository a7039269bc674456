use crate::error::SynthesisError;
use crate::graph::RequestNodeDefinition;

/// Everything a synthesizer gets to know about one request.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
    /// The literal request signature (method, URL, headers, body).
    pub signature: &'a str,
    /// The literal observed response body.
    pub response: &'a str,
    pub dynamic_parts: &'a [String],
    pub extracted_parts: &'a [String],
    pub input_variables: &'a [String],
}

impl<'a> SynthesisRequest<'a> {
    pub fn from_node(node_id: &'a str, node: &'a RequestNodeDefinition) -> Self {
        Self {
            node_id,
            node_type: &node.node_type,
            signature: node.signature(),
            response: node.response(),
            dynamic_parts: &node.dynamic_parts,
            extracted_parts: &node.extracted_parts,
            input_variables: &node.input_variables,
        }
    }
}

/// Produces the code text for a single request.
///
/// The returned text is treated as opaque. An `Err` aborts the emission run.
pub trait Synthesizer {
    fn synthesize(&mut self, request: &SynthesisRequest<'_>) -> Result<String, SynthesisError>;
}

impl<F> Synthesizer for F
where
    F: FnMut(&SynthesisRequest<'_>) -> Result<String, SynthesisError>,
{
    fn synthesize(&mut self, request: &SynthesisRequest<'_>) -> Result<String, SynthesisError> {
        self(request)
    }
}
