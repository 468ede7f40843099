//! Heuristic intent-to-plan compiler: maps a plain-English cleanup request
//! onto a fixed search → select → trash pipeline. Compilation never fails;
//! a prompt without a recognizable intent becomes a no-op plan carrying a
//! usage hint.

mod phrases;

use crate::plan::{Plan, PlanStep, SearchSpec, StepAction};

/// Look-back window applied when the prompt carries no age phrase at all.
const DEFAULT_LOOKBACK_DAYS: u32 = 14;

const INTENT_KEYWORDS: [&str; 6] = [
    "delete", "remove", "trash", "clean up", "cleanup", "clean",
];

const USAGE_HINT: &str =
    "No cleanup request recognized. Try: delete the zip files older than 30 days containing 'report'";

/// Keyword → glob patterns. Multiple matching keywords union their
/// patterns; nothing matching falls back to `*`.
const TYPE_KEYWORDS: [(&str, &[&str]); 20] = [
    ("zip", &["*.zip"]),
    ("archive", &["*.zip", "*.rar", "*.7z", "*.tar", "*.gz"]),
    ("exe", &["*.exe"]),
    ("installer", &["*.exe", "*.msi"]),
    ("msi", &["*.msi"]),
    ("pdf", &["*.pdf"]),
    ("doc", &["*.doc", "*.docx"]),
    ("screenshot", &["*.png", "*.jpg", "*.jpeg"]),
    ("image", &["*.png", "*.jpg", "*.jpeg", "*.gif"]),
    ("photo", &["*.jpg", "*.jpeg", "*.png"]),
    ("picture", &["*.jpg", "*.jpeg", "*.png"]),
    ("video", &["*.mp4", "*.mkv", "*.avi", "*.mov"]),
    ("movie", &["*.mp4", "*.mkv", "*.avi"]),
    ("audio", &["*.mp3", "*.wav", "*.flac"]),
    ("music", &["*.mp3", "*.wav", "*.flac"]),
    ("song", &["*.mp3", "*.flac"]),
    ("log", &["*.log"]),
    ("text file", &["*.txt"]),
    ("temp file", &["*.tmp"]),
    ("tmp", &["*.tmp"]),
];

/// Compile a free-text prompt into a Plan.
pub fn compile(prompt: &str) -> Plan {
    let text = prompt.to_lowercase();

    if !INTENT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Plan {
            steps: vec![PlanStep::new(USAGE_HINT, StepAction::Noop)],
            rationale: "no delete intent recognized in the prompt".to_string(),
        };
    }

    let name_hint = phrases::parse_name_hint(&text);
    // Quoted spans are stripped before age/size scanning so a hint like
    // "today" cannot masquerade as an age phrase.
    let scrubbed = phrases::strip_quoted(&text);

    let age = phrases::parse_age(&scrubbed);
    let size = phrases::parse_size(&scrubbed);

    let newer_than_days = if age.matched {
        age.newer_than_days
    } else {
        Some(DEFAULT_LOOKBACK_DAYS)
    };

    let spec = SearchSpec {
        patterns: infer_patterns(&text),
        newer_than_days,
        older_than_days: age.older_than_days,
        min_size_kb: size.min_size_kb,
        max_size_kb: size.max_size_kb,
        name_hint,
    };

    let steps = vec![
        PlanStep::new(describe_search(&spec), StepAction::SearchFiles(spec)),
        PlanStep::new(
            "Ask which of the candidates to delete",
            StepAction::SelectTargets,
        ),
        PlanStep::new(
            "Move the selection to the recoverable trash",
            StepAction::MoveToTrash,
        ),
    ];

    Plan {
        steps,
        rationale: "heuristic keyword plan derived from the prompt".to_string(),
    }
}

fn infer_patterns(text: &str) -> Vec<String> {
    let mut patterns: Vec<String> = Vec::new();

    for pattern in phrases::explicit_extensions(text) {
        push_unique(&mut patterns, pattern);
    }
    for (keyword, globs) in TYPE_KEYWORDS {
        if text.contains(keyword) {
            for glob in globs {
                push_unique(&mut patterns, glob.to_string());
            }
        }
    }

    if patterns.is_empty() {
        patterns.push("*".to_string());
    }
    patterns
}

fn push_unique(patterns: &mut Vec<String>, pattern: String) {
    if !patterns.iter().any(|p| p == &pattern) {
        patterns.push(pattern);
    }
}

fn describe_search(spec: &SearchSpec) -> String {
    let mut parts = vec![format!("Search {} files", spec.patterns.join(", "))];
    if let Some(days) = spec.newer_than_days {
        parts.push(format!("modified in the last {days} day(s)"));
    }
    if let Some(days) = spec.older_than_days {
        parts.push(format!("older than {days} day(s)"));
    }
    if let Some(kb) = spec.min_size_kb {
        parts.push(format!("at least {kb} KB"));
    }
    if let Some(kb) = spec.max_size_kb {
        parts.push(format!("at most {kb} KB"));
    }
    if let Some(hint) = &spec.name_hint {
        parts.push(format!("named like \"{hint}\""));
    }
    parts.join(", ")
}
