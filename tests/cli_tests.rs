use clap::Parser;
use nyzo_distribute::cli::Args;
use nyzo_distribute::config::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["nyzo_distribute", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["nyzo_distribute", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);

    let args = Args::parse_from(["nyzo_distribute"]);
    assert!(args.effective_log_level().is_none());
}

#[test]
fn apply_overrides_sets_fields() {
    let args = Args::parse_from([
        "nyzo_distribute",
        "--source-dir",
        "/blocks/in",
        "--destination-dir",
        "/blocks/out",
        "--log-level",
        "info",
        "--dry-run",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_dir, PathBuf::from("/blocks/in"));
    assert_eq!(cfg.destination_dir, PathBuf::from("/blocks/out"));
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["nyzo_distribute"]);
    let mut cfg = Config::default();
    let before = cfg.clone();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_dir, before.source_dir);
    assert_eq!(cfg.destination_dir, before.destination_dir);
    assert_eq!(cfg.log_level, before.log_level);
    assert!(!cfg.dry_run);
}

#[test]
fn short_source_flag_parses() {
    let args = Args::parse_from(["nyzo_distribute", "-s", "/tmp/blocks"]);
    assert_eq!(args.source_dir, Some(PathBuf::from("/tmp/blocks")));
}

#[test]
fn invalid_log_level_string_is_ignored() {
    let args = Args::parse_from(["nyzo_distribute", "--log-level", "shout"]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Normal);
}
