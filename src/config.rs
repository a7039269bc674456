use crate::emit::DEFAULT_ARTIFACT_PATH;
use crate::emit::prompt::DEFAULT_RESPONSE_LIMIT;
use crate::error::ConfigError;
use crate::traversal::Direction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one traversal and emission run.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub max_depth: Option<usize>,
    pub direction: Direction,
    pub artifact_path: String,
    pub response_limit: usize,
    pub language: String,
    /// `[program, args...]` to pipe prompts through. Prompts are echoed when unset.
    pub model_command: Option<Vec<String>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            direction: Direction::Downstream,
            artifact_path: DEFAULT_ARTIFACT_PATH.to_string(),
            response_limit: DEFAULT_RESPONSE_LIMIT,
            language: "python".to_string(),
            model_command: None,
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }

    /// Load a run configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_artifact_path(mut self, path: impl Into<String>) -> Self {
        self.artifact_path = path.into();
        self
    }

    pub fn with_response_limit(mut self, limit: usize) -> Self {
        self.response_limit = limit;
        self
    }

    pub fn with_model_command(mut self, command: Vec<String>) -> Self {
        self.model_command = Some(command);
        self
    }
}
