use thiserror::Error;

/// Errors that can occur while loading a request graph.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read graph file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when converting a custom capture format into a `GraphDefinition`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised by a synthesis collaborator while producing code for one request.
#[derive(Error, Debug, Clone)]
pub enum SynthesisError {
    #[error("Model invocation failed: {0}")]
    Model(String),

    #[error("Model command '{program}' failed: {message}")]
    Command { program: String, message: String },
}

/// Errors that abort an emission run.
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    #[error("Synthesis failed for node '{node_id}': {source}")]
    Synthesis {
        node_id: String,
        #[source]
        source: SynthesisError,
    },

    #[error("Could not write artifact '{path}': {message}")]
    Artifact { path: String, message: String },
}

/// Errors that can occur while loading a run configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },
}
