use std::path::PathBuf;

use tocmark::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use tocmark::highlight::MissingEntryPolicy;
use tocmark::observer::Threshold;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".tocmarkrc");
    let content = r"
# comment
--strict

--threshold 0.5

--debug-log=events.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.strict);
    assert_eq!(flags.threshold, Some(0.5));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".tocmarkrc");
    let content = "--no-toc\n--marker-class active\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "tocmark".to_string(),
        "--marker-class".to_string(),
        "is-current".to_string(),
        "--strict".to_string(),
        "post.md".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_toc, "file flags should remain enabled");
    assert!(effective.strict, "cli flags should be applied");
    assert_eq!(
        effective.marker_class.as_deref(),
        Some("is-current"),
        "cli should override marker class"
    );
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_overrides_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".tocmarkrc");
    std::fs::write(&global, "--threshold 0.25\n--nav-prefix toc-\n").unwrap();
    std::fs::write(&local, "--threshold 0.75\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    let settings = merged.settings();
    assert_eq!(settings.threshold, Threshold::new(0.75).unwrap());
    assert_eq!(settings.nav_prefix, "toc-");
    assert_eq!(settings.policy, MissingEntryPolicy::Skip);
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "tocmark".to_string(),
        "--threshold=0.4".to_string(),
        "--nav-prefix=toc-".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.threshold, Some(0.4));
    assert_eq!(flags.nav_prefix.as_deref(), Some("toc-"));
}
