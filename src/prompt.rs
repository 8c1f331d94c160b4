use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Upper bound on the evidence text substituted into the prompt.
pub const MAX_CONTENT_CHARS: usize = 30_000;

const FILE_NAME_SLOT: &str = "{file_name}";
const FILE_CONTENT_SLOT: &str = "{file_content}";

/// Prompt template loaded once per run. A missing template aborts the run
/// before any file is touched.
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Template file not found: {}", path.display()))?;
        Ok(Self { text })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Substitute the filename and a bounded content slice into the
    /// template. Content is truncated from the end, on a char boundary.
    pub fn render(&self, file_name: &str, content: &str) -> String {
        self.text
            .replace(FILE_NAME_SLOT, file_name)
            .replace(FILE_CONTENT_SLOT, truncate_chars(content, MAX_CONTENT_CHARS))
    }
}

pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
