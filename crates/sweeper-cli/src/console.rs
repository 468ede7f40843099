use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use colored::*;
use sweeper_core::{parse_selection, FileHit, Interaction, Plan, Selection, TrashOutcome};
use tracing::warn;

/// Cap on file-browser windows opened by `--preview`.
const PREVIEW_MAX_WINDOWS: usize = 3;

/// Stdin-backed interaction: numbered candidate tables, typed confirmation
/// phrases, optional reveal-in-file-browser preview.
pub struct ConsoleInteraction {
    preview: bool,
}

impl ConsoleInteraction {
    pub fn new(preview: bool) -> Self {
        Self { preview }
    }
}

impl Interaction for ConsoleInteraction {
    fn show_plan(&mut self, plan: &Plan) {
        println!("{} {}", "Plan:".cyan(), plan.rationale);
        for step in &plan.steps {
            println!(" - {}: {}", step.action.name(), step.description);
        }
    }

    fn show_candidates(&mut self, hits: &[FileHit], hidden: usize) {
        if hidden > 0 {
            println!(
                "{}",
                format!("{hidden} candidate(s) outside the allowed scopes were hidden.").yellow()
            );
        }
        if hits.is_empty() {
            println!("{}", "No candidates found.".yellow());
            return;
        }
        println!("\n{}", "Candidates (newest first):".bold());
        print_table(hits);
    }

    fn show_pending(&mut self, chosen: &[FileHit], dry_run: bool) {
        println!("\n{}", "Ready to move to the trash:".bold());
        print_table(chosen);
        if self.preview {
            preview_paths(chosen);
        }
        if dry_run {
            println!(
                "{}",
                "Dry-run: re-run with --execute to actually delete.".blue()
            );
        }
    }

    fn show_result(&mut self, trashed: usize, failures: &[TrashOutcome]) {
        println!(
            "{}",
            format!("Moved {trashed} item(s) to the trash.").green()
        );
        if !failures.is_empty() {
            println!("{}", "Errors:".red());
            for failure in failures {
                println!(
                    " - {} -> {}",
                    failure.path.display(),
                    failure.error.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.yellow());
    }

    fn select_targets(&mut self, hits: &[FileHit]) -> Selection {
        if hits.is_empty() {
            return Selection::Cancelled;
        }
        let input = prompt_line(
            "\nPick numbers (e.g. 1,3-5), 'all' for everything, or Enter to cancel: ",
        )
        .unwrap_or_default();
        parse_selection(&input, hits.len())
    }

    fn risk_response(&mut self, risky: &[FileHit], phrase: &str) -> String {
        println!(
            "\n{}",
            "Warning: some selections look system-like. Double-check:".red()
        );
        print_table(risky);
        prompt_line(&format!("Type '{phrase}' to keep going: ")).unwrap_or_default()
    }

    fn bulk_response(&mut self, count: usize, total_bytes: u64, phrase: &str) -> String {
        println!(
            "\n{}",
            format!(
                "Large selection: {count} item(s), {} total.",
                format_size(total_bytes)
            )
            .red()
        );
        prompt_line(&format!("Type '{phrase}' to keep going: ")).unwrap_or_default()
    }

    fn final_response(&mut self) -> String {
        prompt_line("Type 'yes' to confirm: ").unwrap_or_default()
    }
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_table(hits: &[FileHit]) {
    for (i, hit) in hits.iter().enumerate() {
        let name = hit
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "{:>3}. {:40} {}  |  {:>10}  |  {}",
            i + 1,
            name,
            hit.path.display(),
            format_size(hit.size),
            format_modified(hit),
        );
    }
}

fn format_size(size_bytes: u64) -> String {
    let mut value = size_bytes as f64 / 1024.0;
    for unit in ["KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

fn format_modified(hit: &FileHit) -> String {
    let local: DateTime<Local> = hit.modified.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Best-effort reveal in the OS file browser, one window per parent
/// directory, capped at PREVIEW_MAX_WINDOWS.
fn preview_paths(chosen: &[FileHit]) {
    let mut parents: Vec<&Path> = Vec::new();
    for hit in chosen {
        if let Some(parent) = hit.path.parent() {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
    }

    let skipped = parents.len().saturating_sub(PREVIEW_MAX_WINDOWS);
    for parent in parents.into_iter().take(PREVIEW_MAX_WINDOWS) {
        if let Err(e) = open::that(parent) {
            warn!("Could not open {}: {}", parent.display(), e);
        }
    }
    if skipped > 0 {
        println!("{}", format!("({skipped} more folder(s) not opened)").dimmed());
    }
}
