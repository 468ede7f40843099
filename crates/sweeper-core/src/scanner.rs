//! Candidate discovery: a sequential, fault-tolerant walk over the scope
//! roots. A partial filesystem view is never an error; anything unreadable
//! is skipped and the scan carries on.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use glob::{MatchOptions, Pattern};
use tracing::{debug, error};

use crate::plan::SearchSpec;

const SECONDS_PER_DAY: u64 = 86_400;

/// A candidate file, snapshotted at scan time. No identity beyond the path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHit {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub size: u64,
}

/// Scan `roots` for regular files matching `spec`. Missing roots are
/// skipped without error. Results are ordered newest-first, with the path
/// as tiebreak so identical trees produce identical orderings.
pub fn find(roots: &[PathBuf], spec: &SearchSpec) -> Vec<FileHit> {
    let now = SystemTime::now();
    let patterns = compile_patterns(&spec.patterns);
    let mut hits = Vec::new();

    for root in roots {
        if !root.exists() {
            debug!("Scope root {} does not exist, skipping", root.display());
            continue;
        }
        walk(root, &patterns, spec, now, &mut hits);
    }

    hits.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    });
    hits
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

fn walk(
    dir: &Path,
    patterns: &[Pattern],
    spec: &SearchSpec,
    now: SystemTime,
    hits: &mut Vec<FileHit>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("Skipping unreadable directory {}: {}", dir.display(), err);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping entry in {}: {}", dir.display(), err);
                continue;
            }
        };

        let path = entry.path();
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };

        if metadata.is_dir() {
            walk(&path, patterns, spec, now, hits);
            continue;
        }
        if !metadata.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if !matches_any(patterns, &file_name) {
            continue;
        }
        if !passes_name(&file_name, spec.name_hint.as_deref()) {
            continue;
        }

        let modified = match metadata.modified() {
            Ok(time) => time,
            Err(err) => {
                debug!("No modification time for {}: {}", path.display(), err);
                continue;
            }
        };
        if !passes_age(modified, now, spec.newer_than_days, spec.older_than_days) {
            continue;
        }
        if !passes_size(metadata.len(), spec.min_size_kb, spec.max_size_kb) {
            continue;
        }

        hits.push(FileHit {
            path,
            modified,
            size: metadata.len(),
        });
    }
}

fn matches_any(patterns: &[Pattern], file_name: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    patterns
        .iter()
        .any(|pattern| pattern.matches_with(file_name, options))
}

/// Both bounds are inclusive: a file exactly at a cutoff passes.
fn passes_age(
    modified: SystemTime,
    now: SystemTime,
    newer_than_days: Option<u32>,
    older_than_days: Option<u32>,
) -> bool {
    if let Some(days) = newer_than_days {
        let cutoff = now - Duration::from_secs(u64::from(days) * SECONDS_PER_DAY);
        if modified < cutoff {
            return false;
        }
    }
    if let Some(days) = older_than_days {
        let cutoff = now - Duration::from_secs(u64::from(days) * SECONDS_PER_DAY);
        if modified > cutoff {
            return false;
        }
    }
    true
}

/// Inclusive on both ends, in 1024-byte kilobyte units.
fn passes_size(size: u64, min_size_kb: Option<u64>, max_size_kb: Option<u64>) -> bool {
    if let Some(min_kb) = min_size_kb {
        if size < min_kb * 1024 {
            return false;
        }
    }
    if let Some(max_kb) = max_size_kb {
        if size > max_kb * 1024 {
            return false;
        }
    }
    true
}

/// Case-insensitive substring match on the file name only.
fn passes_name(file_name: &str, hint: Option<&str>) -> bool {
    match hint {
        Some(hint) => file_name.to_lowercase().contains(&hint.to_lowercase()),
        None => true,
    }
}
