use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::{Builder, NamedTempFile};
use thiserror::Error;
use tokio::process::Command;

use crate::ai_structs::{response_schema, RenameSuggestion};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Every way the external call can fail. All of them surface as "no result"
/// for the file being processed; none may abort the batch.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transient artifact i/o failed: {0}")]
    Artifact(#[from] std::io::Error),
    #[error("failed to encode response schema: {0}")]
    SchemaEncode(serde_json::Error),
    #[error("could not invoke generator command: {0}")]
    Spawn(std::io::Error),
    #[error("generator exited with {0}")]
    ExitStatus(std::process::ExitStatus),
    #[error("generator timed out after {0}s")]
    Timeout(u64),
    #[error("generator output does not match the response contract: {0}")]
    MalformedOutput(serde_json::Error),
    #[error("generator returned an empty filename")]
    EmptyFilename,
}

/// Client for the out-of-process structured-generation command.
///
/// Protocol: `<program> [args..] <input> <output> <schema> [--image <raw>]`,
/// exit code zero, output file valid JSON conforming to the schema. The
/// three artifacts are `NamedTempFile`s, so they are removed when this call
/// returns no matter which path it returns through.
pub struct StructuredGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl StructuredGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Split a configured command line like `python scripts/gen_struct.py`
    /// into program and leading arguments.
    pub fn from_command_line(command: &str, timeout: Duration) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect(), timeout))
    }

    pub async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&Path>,
    ) -> Result<RenameSuggestion, GenerationError> {
        let mut input = named_temp("renamile-input-", ".txt")?;
        input.write_all(prompt.as_bytes())?;
        input.flush()?;

        let mut schema = named_temp("renamile-schema-", ".json")?;
        let schema_json = serde_json::to_vec(&response_schema())
            .map_err(GenerationError::SchemaEncode)?;
        schema.write_all(&schema_json)?;
        schema.flush()?;

        let output = named_temp("renamile-output-", ".json")?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(input.path())
            .arg(output.path())
            .arg(schema.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(raw) = attachment {
            cmd.arg("--image").arg(raw);
        }

        // Dropping the status future on timeout kills the child.
        let status = tokio::time::timeout(self.timeout, cmd.status())
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout.as_secs()))?
            .map_err(GenerationError::Spawn)?;
        if !status.success() {
            return Err(GenerationError::ExitStatus(status));
        }

        let raw = std::fs::read_to_string(output.path())?;
        let suggestion: RenameSuggestion =
            serde_json::from_str(&raw).map_err(GenerationError::MalformedOutput)?;
        if suggestion.new_filename.trim().is_empty() {
            return Err(GenerationError::EmptyFilename);
        }
        Ok(suggestion)
    }
}

fn named_temp(prefix: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    Builder::new().prefix(prefix).suffix(suffix).tempfile()
}
