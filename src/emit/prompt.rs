use super::synth::{SynthesisRequest, Synthesizer};
use crate::error::SynthesisError;
use crate::label::NodeLabel;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Responses longer than this many characters are left out of the prompt.
pub const DEFAULT_RESPONSE_LIMIT: usize = 800_000;

/// Builds the natural-language instruction that asks a model for one request's code.
#[derive(Debug, Clone)]
pub struct CodePrompt {
    pub response_limit: usize,
    pub language: String,
}

impl Default for CodePrompt {
    fn default() -> Self {
        Self {
            response_limit: DEFAULT_RESPONSE_LIMIT,
            language: "python".to_string(),
        }
    }
}

impl CodePrompt {
    pub fn new(response_limit: usize) -> Self {
        Self {
            response_limit,
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn render(&self, request: &SynthesisRequest<'_>) -> String {
        let dynamic_parts = NodeLabel::format_parts(request.dynamic_parts);
        let extracted_parts = NodeLabel::format_parts(request.extracted_parts);

        let response_section = if request.response.chars().count() > self.response_limit {
            format!("# parse out the variables {} from the response", extracted_parts)
        } else {
            format!(
                "The response is below:\n{}\n\nThe below variables should be parsed out of the response:\n{}",
                request.response, extracted_parts
            )
        };

        let input_section = if request.input_variables.is_empty() {
            String::new()
        } else {
            format!(
                "Assume these variables below are provided by the user:\n{}\n\n\
                 The key should be the variable name and the value should be the value to be passed in.",
                NodeLabel::format_parts(request.input_variables)
            )
        };

        format!(
            "Task:\n\
             Write me a {language} function with a descriptive name that makes a request like the cURL below:\n\
             {signature}\n\n\
             Do not hard code cookie headers. Assume cookies are in a variable called \"cookie_string\"\n\n\
             The below variables should be passed into the request instead of hard coded:\n\
             {dynamic_parts}\n\n\
             {response_section}\n\n\
             {input_section}\n\n\
             Important:\n\
             - Only output the {language} script and nothing else.\n\
             - Don't include any backticks.\n\
             - Do not use HTTP/2 pseudo-headers (those starting with ':') in the headers dictionary.\n\
             - Remove any 'priority' headers.\n\
             - Use standard HTTP/1.1 headers only.\n",
            language = self.language,
            signature = request.signature,
        )
    }
}

/// A text-completion model that answers a prompt.
pub trait LanguageModel {
    fn invoke(&mut self, prompt: &str) -> Result<String, SynthesisError>;
}

/// Adapts a [`LanguageModel`] into a [`Synthesizer`] by prompting it once per request.
pub struct PromptSynthesizer<M: LanguageModel> {
    pub prompt: CodePrompt,
    pub model: M,
}

impl<M: LanguageModel> PromptSynthesizer<M> {
    pub fn new(model: M) -> Self {
        Self {
            prompt: CodePrompt::default(),
            model,
        }
    }

    pub fn with_prompt(mut self, prompt: CodePrompt) -> Self {
        self.prompt = prompt;
        self
    }
}

impl<M: LanguageModel> Synthesizer for PromptSynthesizer<M> {
    fn synthesize(&mut self, request: &SynthesisRequest<'_>) -> Result<String, SynthesisError> {
        let prompt = self.prompt.render(request);
        debug!(
            node_id = request.node_id,
            prompt_chars = prompt.len(),
            "invoking model"
        );
        let output = self.model.invoke(&prompt)?;
        Ok(output.trim().to_string())
    }
}

/// Returns every prompt unchanged. Useful for reviewing prompts before spending on a model.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoModel;

impl LanguageModel for EchoModel {
    fn invoke(&mut self, prompt: &str) -> Result<String, SynthesisError> {
        Ok(prompt.to_string())
    }
}

/// Pipes each prompt into an external program's stdin and returns its stdout.
#[derive(Debug, Clone)]
pub struct CommandModel {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandModel {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builds a model from `[program, args...]`. Returns `None` for an empty command line.
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn failure(&self, message: impl Into<String>) -> SynthesisError {
        SynthesisError::Command {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

impl LanguageModel for CommandModel {
    fn invoke(&mut self, prompt: &str) -> Result<String, SynthesisError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("could not start: {}", e)))?;

        // The child may fill its stdout pipe before it has read the whole prompt, so the
        // prompt is written from a separate thread while the output is drained here.
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_owned();
            thread::spawn(move || stdin.write_all(prompt.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| self.failure(format!("could not read output: {}", e)))?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // A child that exits without reading all of its input is judged by its status.
                Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(self.failure(format!("could not write prompt: {}", e))),
                Err(_) => return Err(self.failure("prompt writer panicked")),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("exited with {}: {}", output.status, stderr.trim())));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| self.failure(format!("output is not valid UTF-8: {}", e)))
    }
}
