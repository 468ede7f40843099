use std::fs;
use std::path::Path;

use sweeper_core::policy::{bulk_threshold_exceeded, in_allowed_scopes, requires_extra_confirmation};
use sweeper_core::AppConfig;
use tempfile::tempdir;

#[test]
fn test_path_under_scope_is_allowed() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir_all(&root).unwrap();
    let file = root.join("a.txt");
    fs::write(&file, "x").unwrap();

    assert!(in_allowed_scopes(&file, &[root]));
}

#[test]
fn test_path_outside_all_scopes_is_rejected() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir_all(&root).unwrap();
    let outside = tmp.path().join("outside.txt");
    fs::write(&outside, "y").unwrap();

    assert!(!in_allowed_scopes(&outside, &[root]));
}

#[test]
fn test_sibling_string_prefix_is_not_containment() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("data");
    let sibling = tmp.path().join("data2");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&sibling).unwrap();
    let file = sibling.join("b.txt");
    fs::write(&file, "z").unwrap();

    // "data2" starts with the string "data" but is not inside it.
    assert!(!in_allowed_scopes(&file, &[root]));
}

#[test]
fn test_nonexistent_path_falls_back_to_lexical_containment() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir_all(&root).unwrap();

    assert!(in_allowed_scopes(&root.join("ghost.txt"), &[root.clone()]));
    assert!(!in_allowed_scopes(Path::new("/elsewhere/ghost.txt"), &[root]));
}

#[test]
fn test_risky_patterns() {
    let config = AppConfig::default();
    assert!(requires_extra_confirmation(
        Path::new("C:/Windows/System32/drivers/etc/hosts"),
        &config.risky_patterns
    ));
    assert!(requires_extra_confirmation(
        Path::new("/home/me/.ssh/known_hosts"),
        &config.risky_patterns
    ));
    assert!(!requires_extra_confirmation(
        Path::new("/home/me/downloads/file.txt"),
        &config.risky_patterns
    ));
}

#[test]
fn test_bulk_thresholds_are_strict() {
    let config = AppConfig {
        max_delete_count: 3,
        max_total_delete_mb: 1,
        ..AppConfig::default()
    };

    assert!(!bulk_threshold_exceeded(3, 100, &config));
    assert!(bulk_threshold_exceeded(4, 100, &config));
    assert!(!bulk_threshold_exceeded(1, 1024 * 1024, &config));
    assert!(bulk_threshold_exceeded(1, 1024 * 1024 + 1, &config));
}
