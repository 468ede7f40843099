//! Pure safety predicates. No side effects; the executor decides what to
//! do with the answers.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;

/// True iff `path` resolves under at least one scope root. Containment is
/// component-wise, so `/data2` is not inside the scope `/data`.
pub fn in_allowed_scopes(path: &Path, scopes: &[PathBuf]) -> bool {
    let resolved = canonical_or_lexical(path);
    scopes
        .iter()
        .any(|root| resolved.starts_with(canonical_or_lexical(root)))
}

fn canonical_or_lexical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Coarse heuristic: flags any path whose string form contains a risky
/// pattern, case-insensitively. False positives are acceptable; a flagged
/// path only costs the user one extra typed phrase.
pub fn requires_extra_confirmation(path: &Path, risky_patterns: &[String]) -> bool {
    let haystack = path.to_string_lossy().to_lowercase();
    risky_patterns
        .iter()
        .any(|pattern| haystack.contains(&pattern.to_lowercase()))
}

/// Strictly greater-than on both limits; a selection exactly at a limit
/// does not trigger the bulk gate.
pub fn bulk_threshold_exceeded(count: usize, total_bytes: u64, config: &AppConfig) -> bool {
    count > config.max_delete_count
        || total_bytes > config.max_total_delete_mb * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risky_pattern_case_insensitive() {
        let config = AppConfig::default();
        assert!(requires_extra_confirmation(
            Path::new("C:/Windows/System32/drivers/etc/hosts"),
            &config.risky_patterns
        ));
        assert!(requires_extra_confirmation(
            Path::new("/home/me/.ssh/id_ed25519"),
            &config.risky_patterns
        ));
        assert!(!requires_extra_confirmation(
            Path::new("C:/Users/me/Downloads/file.txt"),
            &config.risky_patterns
        ));
    }

    #[test]
    fn test_bulk_threshold_strict_inequality() {
        let config = AppConfig {
            max_delete_count: 50,
            max_total_delete_mb: 1,
            ..AppConfig::default()
        };
        assert!(!bulk_threshold_exceeded(50, 0, &config));
        assert!(bulk_threshold_exceeded(51, 0, &config));
        assert!(!bulk_threshold_exceeded(1, 1024 * 1024, &config));
        assert!(bulk_threshold_exceeded(1, 1024 * 1024 + 1, &config));
    }
}
