use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    file_analyzer::AnalyzedFile,
    generator::StructuredGenerator,
    prompt::PromptTemplate,
    skip_policy,
    utils::format_size,
};

/// Terminal state of one file's trip through the pipeline. Everything but
/// `Renamed` leaves the file under its original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { to: String },
    Skipped,
    ExtractionFailed,
    GenerationFailed,
    RenameFailed,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub extraction_failed: usize,
    pub generation_failed: usize,
    pub rename_failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::Skipped => self.skipped += 1,
            RenameOutcome::ExtractionFailed => self.extraction_failed += 1,
            RenameOutcome::GenerationFailed => self.generation_failed += 1,
            RenameOutcome::RenameFailed => self.rename_failed += 1,
        }
    }
}

pub struct RenameExecutor {
    generator: StructuredGenerator,
    template: PromptTemplate,
    workspace_root: PathBuf,
    dry_run: bool,
}

impl RenameExecutor {
    pub fn new(
        generator: StructuredGenerator,
        template: PromptTemplate,
        workspace_root: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            generator,
            template,
            workspace_root,
            dry_run,
        }
    }

    /// Process every file under the workspace root, one at a time. Failures
    /// are per-file; the traversal always reaches the end of the snapshot.
    pub async fn run(&self) -> Result<RunSummary> {
        let files = snapshot_files(&self.workspace_root);
        let mut summary = RunSummary::default();

        if files.is_empty() {
            println!("{}", "No files found in the workspace.".yellow());
            return Ok(summary);
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        for path in &files {
            progress.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            let outcome = self.process_file(path, &progress).await;
            summary.record(&outcome);
            progress.inc(1);
        }

        progress.finish_with_message("✓ Workspace processing complete");
        self.print_summary(&summary);
        Ok(summary)
    }

    async fn process_file(&self, path: &Path, progress: &ProgressBar) -> RenameOutcome {
        if let Some(reason) = skip_policy::should_skip(path, &self.workspace_root) {
            progress.println(format!(
                "  {} {} ({})",
                "Skipped".yellow(),
                display_relative(path, &self.workspace_root),
                reason
            ));
            return RenameOutcome::Skipped;
        }

        let file = match AnalyzedFile::new(path.to_path_buf(), &self.workspace_root) {
            Ok(file) => file,
            Err(e) => {
                progress.println(format!(
                    "  {} {}: {}",
                    "Unreadable".red(),
                    display_relative(path, &self.workspace_root),
                    e
                ));
                return RenameOutcome::ExtractionFailed;
            }
        };

        let content = file.extract_content();
        let rendered = self.template.render(&file.name, &content);
        let attachment = file.category.wants_attachment().then_some(path);

        let suggestion = match self.generator.generate(&rendered, attachment).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                progress.println(format!(
                    "  {} {}: {}",
                    "No result".red(),
                    file.relative_path.display(),
                    e
                ));
                return RenameOutcome::GenerationFailed;
            }
        };

        let new_name = candidate_file_name(&suggestion.new_filename, file.extension.as_deref());
        let target = match path.parent() {
            Some(parent) => parent.join(&new_name),
            None => return RenameOutcome::RenameFailed,
        };

        if self.dry_run {
            progress.println(format!(
                "  {} {} → {} ({})",
                "Would rename".cyan(),
                file.relative_path.display(),
                new_name.green(),
                format_size(file.size)
            ));
            progress.println(format!("    {}", suggestion.reason.dimmed()));
            return RenameOutcome::Renamed { to: new_name };
        }

        // A rename onto itself is a no-op; any other existing target is a
        // collision and the file keeps its name.
        if target != path && target.exists() {
            progress.println(format!(
                "  {} {}: target {} already exists",
                "Collision".red(),
                file.relative_path.display(),
                new_name
            ));
            return RenameOutcome::RenameFailed;
        }

        match std::fs::rename(path, &target) {
            Ok(()) => {
                progress.println(format!(
                    "  {} {} → {} ({})",
                    "Renamed".green(),
                    file.relative_path.display(),
                    new_name.green(),
                    format_size(file.size)
                ));
                progress.println(format!("    {}", suggestion.reason.dimmed()));
                RenameOutcome::Renamed { to: new_name }
            }
            Err(e) => {
                progress.println(format!(
                    "  {} {}: {}",
                    "Rename failed".red(),
                    file.relative_path.display(),
                    e
                ));
                RenameOutcome::RenameFailed
            }
        }
    }

    fn print_summary(&self, summary: &RunSummary) {
        println!("\n{}", "Summary:".cyan().bold());
        println!("  renamed:           {}", summary.renamed.to_string().green());
        println!("  skipped:           {}", summary.skipped);
        println!("  unreadable:        {}", summary.extraction_failed);
        println!("  no result:         {}", summary.generation_failed);
        println!("  rename failures:   {}", summary.rename_failed);
        if self.dry_run {
            println!("  {}", "(dry run, nothing was changed)".yellow());
        }
    }
}

/// Collect the full file list before anything is renamed, so renames cannot
/// re-order or hide entries mid-walk.
fn snapshot_files(workspace_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(workspace_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Final candidate name: trailing dots stripped from the stem, original
/// extension re-appended. The generation service never supplies the
/// extension.
pub fn candidate_file_name(stem: &str, extension: Option<&str>) -> String {
    let stem = stem.trim_end_matches('.');
    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

fn display_relative(path: &Path, workspace_root: &Path) -> String {
    path.strip_prefix(workspace_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
