//! Phrase extraction for the planner: age windows, size bounds, name hints
//! and explicit extension tokens. All input is expected lowercased.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OLDER_THAN: Regex =
        Regex::new(r"\bolder\s+than\s+(\d+)\s+(day|week|month|year)s?\b").unwrap();
    static ref NEWER_THAN: Regex =
        Regex::new(r"\b(?:within|in\s+the\s+last|last)\s+(\d+)\s+(day|week|month|year)s?\b")
            .unwrap();
    static ref MIN_SIZE: Regex =
        Regex::new(r"\b(?:greater\s+than|over|at\s+least)\s+(\d+)\s*(kib|mib|gib|kb|mb|gb)\b")
            .unwrap();
    static ref MAX_SIZE: Regex =
        Regex::new(r"\b(?:less\s+than|under|at\s+most)\s+(\d+)\s*(kib|mib|gib|kb|mb|gb)\b")
            .unwrap();
    static ref QUOTED: Regex = Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap();
    static ref HINT: Regex =
        Regex::new(r"\b(?:containing|named|with\s+name|with)\s+(.+)$").unwrap();
    static ref EXTENSION: Regex = Regex::new(r"\.([a-z][a-z0-9]{0,5})\b").unwrap();
}

/// Keywords that end an unquoted name hint; they belong to age or size
/// clauses, not to the hint.
const RESERVED: [&str; 9] = [
    "older",
    "within",
    "last",
    "greater",
    "less",
    "over",
    "under",
    "today",
    "yesterday",
];

#[derive(Debug, Default, PartialEq)]
pub struct AgeWindow {
    pub newer_than_days: Option<u32>,
    pub older_than_days: Option<u32>,
    /// True iff any age phrase was recognized. The planner's look-back
    /// default applies only when this is false, even for one-sided windows.
    pub matched: bool,
}

/// Recognize `older than N <unit>`, `within|in the last|last N <unit>` and
/// the absolute words today/yesterday/last week. When several absolute
/// words appear, the widest window wins; an explicit numeric phrase beats
/// the absolute words.
pub fn parse_age(text: &str) -> AgeWindow {
    let mut window = AgeWindow::default();

    if let Some(caps) = OLDER_THAN.captures(text) {
        window.older_than_days = Some(captured_days(&caps));
        window.matched = true;
    }
    if let Some(caps) = NEWER_THAN.captures(text) {
        window.newer_than_days = Some(captured_days(&caps));
        window.matched = true;
    }

    let mut absolute: Option<u32> = None;
    if text.contains("today") {
        absolute = absolute.max(Some(1));
    }
    if text.contains("yesterday") {
        absolute = absolute.max(Some(2));
    }
    if text.contains("last week") {
        absolute = absolute.max(Some(7));
    }
    if absolute.is_some() {
        window.matched = true;
        if window.newer_than_days.is_none() {
            window.newer_than_days = absolute;
        }
    }

    window
}

fn captured_days(caps: &regex::Captures<'_>) -> u32 {
    let n: u32 = caps[1].parse().unwrap_or(0);
    n.saturating_mul(unit_days(&caps[2]))
}

fn unit_days(unit: &str) -> u32 {
    match unit {
        "day" => 1,
        "week" => 7,
        "month" => 30,
        _ => 365,
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SizeBounds {
    pub min_size_kb: Option<u64>,
    pub max_size_kb: Option<u64>,
}

/// Recognize `greater than|over|at least N <unit>` and `less than|under|at
/// most N <unit>`. Decimal units (kb/mb/gb) scale by 1000, binary units
/// (kib/mib/gib) by 1024; the result is expressed in kilobyte units.
pub fn parse_size(text: &str) -> SizeBounds {
    let mut bounds = SizeBounds::default();

    if let Some(caps) = MIN_SIZE.captures(text) {
        bounds.min_size_kb = Some(captured_kb(&caps));
    }
    if let Some(caps) = MAX_SIZE.captures(text) {
        bounds.max_size_kb = Some(captured_kb(&caps));
    }

    bounds
}

fn captured_kb(caps: &regex::Captures<'_>) -> u64 {
    let n: u64 = caps[1].parse().unwrap_or(0);
    match &caps[2] {
        "kb" | "kib" => n,
        "mb" => n * 1000,
        "gb" => n * 1000 * 1000,
        "mib" => n * 1024,
        _ => n * 1024 * 1024,
    }
}

/// A quoted substring wins; otherwise a phrase introduced by
/// `containing|named|with name|with` is captured and cut at the first
/// reserved keyword so trailing age/size clauses are not swallowed.
pub fn parse_name_hint(text: &str) -> Option<String> {
    if let Some(caps) = QUOTED.captures(text) {
        let quoted = caps.get(1).or_else(|| caps.get(2))?.as_str();
        return clean_hint(quoted);
    }

    let caps = HINT.captures(text)?;
    let mut tail = caps.get(1)?.as_str();
    if let Some(cut) = RESERVED.iter().filter_map(|kw| tail.find(kw)).min() {
        tail = &tail[..cut];
    }
    clean_hint(tail)
}

fn clean_hint(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_end_matches(['.', ',', ';', ':', '!', '?'])
        .trim()
        .to_lowercase();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Replace quoted spans with a space so their content cannot be mistaken
/// for age or size vocabulary.
pub fn strip_quoted(text: &str) -> String {
    QUOTED.replace_all(text, " ").into_owned()
}

/// Explicit extension tokens (`.zip`, `.tar`) as glob patterns.
pub fn explicit_extensions(text: &str) -> Vec<String> {
    EXTENSION
        .captures_iter(text)
        .map(|caps| format!("*.{}", &caps[1]))
        .collect()
}
