use anyhow::{Context, Result};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

pub const IMAGE_SENTINEL: &str =
    "This is an image file, see the attached image for more information.";
pub const BINARY_SENTINEL: &str = "This is a binary file.";
pub const PDF_FAILURE: &str = "Error extracting text from PDF.";
pub const WORD_FAILURE: &str = "Error extracting text from Word document.";
pub const TEXT_FAILURE: &str = "Error reading text file.";

/// Content category a file is routed through. Unknown extensions fall
/// through to `Binary` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Text,
    Pdf,
    WordDoc,
    Image,
    Binary,
}

impl FileCategory {
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension.map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("txt") | Some("md") => FileCategory::Text,
            Some("pdf") => FileCategory::Pdf,
            Some("doc") | Some("docx") => FileCategory::WordDoc,
            Some("jpg") | Some("jpeg") | Some("png") | Some("gif") | Some("bmp")
            | Some("tiff") => FileCategory::Image,
            _ => FileCategory::Binary,
        }
    }

    /// Images carry no evidence text, so the raw file is attached to the
    /// generation request instead.
    pub fn wants_attachment(self) -> bool {
        matches!(self, FileCategory::Image)
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub name: String,
    pub extension: Option<String>,
    pub category: FileCategory,
    pub size: u64,
}

impl AnalyzedFile {
    pub fn new(path: PathBuf, workspace_root: &Path) -> Result<Self> {
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let relative_path = path
            .strip_prefix(workspace_root)
            .unwrap_or(&path)
            .to_path_buf();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_string());
        let category = FileCategory::from_extension(extension.as_deref());

        Ok(Self {
            path,
            relative_path,
            name,
            extension,
            category,
            size: metadata.len(),
        })
    }

    /// Produce the evidence text for this file. Never fails: parse errors
    /// collapse to a fixed diagnostic string and image/binary categories
    /// yield their sentinel.
    pub fn extract_content(&self) -> String {
        match self.category {
            FileCategory::Text => fs::read_to_string(&self.path)
                .unwrap_or_else(|_| TEXT_FAILURE.to_string()),
            FileCategory::Pdf => extract_pdf_text(&self.path),
            FileCategory::WordDoc => extract_word_text(&self.path),
            FileCategory::Image => IMAGE_SENTINEL.to_string(),
            FileCategory::Binary => BINARY_SENTINEL.to_string(),
        }
    }
}

// pdf-extract can panic on malformed cross-reference tables, so the call is
// fenced with catch_unwind to keep the never-fail contract.
fn extract_pdf_text(path: &Path) -> String {
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));
    match result {
        Ok(Ok(text)) => text,
        _ => PDF_FAILURE.to_string(),
    }
}

fn extract_word_text(path: &Path) -> String {
    match read_word_paragraphs(path) {
        Ok(paragraphs) => paragraphs.join("\n"),
        Err(_) => WORD_FAILURE.to_string(),
    }
}

fn read_word_paragraphs(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let doc = docx_rs::read_docx(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            let mut text = String::new();
            for p_child in &para.children {
                if let docx_rs::ParagraphChild::Run(run) = p_child {
                    for run_child in &run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs)
}
