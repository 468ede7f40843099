use config::{Config, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Error;

/// Runtime configuration. Scopes, thresholds and confirmation phrases are
/// carried explicitly rather than living in process-wide statics, so tests
/// can run with alternate limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directories the tool may operate in. Empty means the default
    /// document-bearing directories (downloads, desktop, documents).
    pub scopes: Vec<String>,
    /// Case-insensitive substrings that mark a path as system-like.
    pub risky_patterns: Vec<String>,
    /// Selections with more items than this require the bulk phrase.
    pub max_delete_count: usize,
    /// Selections heavier than this (in MB) require the bulk phrase.
    pub max_total_delete_mb: u64,
    /// Phrase the user must type when a risky path is selected.
    pub risk_phrase: String,
    /// Phrase the user must type when the bulk thresholds are exceeded.
    pub bulk_phrase: String,
    /// Audit log destination. None means `~/.sweeper/logs/audit.jsonl`.
    pub audit_log: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scopes: Vec::new(),
            risky_patterns: [
                ".ssh",
                "AppData",
                "Library",
                "Program Files",
                "Windows",
                "System32",
                "/bin",
                "/sbin",
                "/usr",
                "/etc",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_delete_count: 50,
            max_total_delete_mb: 1024,
            risk_phrase: "I UNDERSTAND".to_string(),
            bulk_phrase: "I ACCEPT THE RISK".to_string(),
            audit_log: None,
        }
    }
}

impl AppConfig {
    /// Effective scope roots: configured roots, or the defaults when none
    /// are configured, reduced to their outermost members.
    pub fn scope_paths(&self) -> Vec<PathBuf> {
        let roots = if self.scopes.is_empty() {
            default_scopes()
        } else {
            self.scopes.iter().map(PathBuf::from).collect()
        };
        non_overlapping_scopes(roots)
    }

    pub fn audit_path(&self) -> PathBuf {
        match &self.audit_log {
            Some(path) => PathBuf::from(path),
            None => default_log_dir().join("audit.jsonl"),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sweeper")
        .join("logs")
}

/// The user's standard document-bearing directories.
pub fn default_scopes() -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    vec![
        dirs::download_dir().unwrap_or_else(|| home.join("Downloads")),
        dirs::desktop_dir().unwrap_or_else(|| home.join("Desktop")),
        dirs::document_dir().unwrap_or_else(|| home.join("Documents")),
    ]
}

/// Remove scopes that are subdirectories of other scopes in the list, so a
/// file is never discovered twice through nested roots.
pub fn non_overlapping_scopes(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for root in roots {
        if result.iter().any(|kept| root.starts_with(kept)) {
            continue;
        }
        result.retain(|kept| !kept.starts_with(&root));
        result.push(root);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_overlapping_no_overlap() {
        let roots = vec![
            PathBuf::from("/home/user/photos"),
            PathBuf::from("/home/user/docs"),
            PathBuf::from("/var/data"),
        ];
        let result = non_overlapping_scopes(roots.clone());
        assert_eq!(result, roots);
    }

    #[test]
    fn test_non_overlapping_with_subdirectory() {
        let roots = vec![
            PathBuf::from("/home/user"),
            PathBuf::from("/home/user/docs"),
            PathBuf::from("/var/data"),
        ];
        let result = non_overlapping_scopes(roots);
        assert_eq!(
            result,
            vec![PathBuf::from("/home/user"), PathBuf::from("/var/data")]
        );
    }

    #[test]
    fn test_non_overlapping_parent_added_last() {
        let roots = vec![
            PathBuf::from("/home/user/docs"),
            PathBuf::from("/home/user"),
        ];
        let result = non_overlapping_scopes(roots);
        assert_eq!(result, vec![PathBuf::from("/home/user")]);
    }

    #[test]
    fn test_default_thresholds_and_phrases() {
        let config = AppConfig::default();
        assert_eq!(config.max_delete_count, 50);
        assert_eq!(config.max_total_delete_mb, 1024);
        assert_eq!(config.risk_phrase, "I UNDERSTAND");
        assert_eq!(config.bulk_phrase, "I ACCEPT THE RISK");
        assert!(!config.risky_patterns.is_empty());
    }
}
