use crate::error::EmitError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Where generated code is written when no other path is configured.
pub const DEFAULT_ARTIFACT_PATH: &str = "generated_code.txt";

/// One synthesized code block and the node it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedBlock {
    pub node_id: String,
    pub label: String,
    pub code: String,
}

/// The code blocks of one emission run, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub blocks: Vec<EmittedBlock>,
}

impl GeneratedCode {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.node_id.as_str())
    }

    /// Concatenates the blocks, each followed by a blank line.
    pub fn render(&self) -> String {
        self.blocks.iter().fold(String::new(), |mut out, block| {
            out.push_str(&block.code);
            out.push_str("\n\n");
            out
        })
    }

    /// Writes the rendered code to `path`, replacing any previous artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EmitError> {
        let path = path.as_ref();
        let failure = |e: std::io::Error| EmitError::Artifact {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(failure)?;
        }
        fs::write(path, self.render()).map_err(failure)?;

        info!(path = %path.display(), blocks = self.len(), "generated code saved");
        Ok(())
    }
}
