//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override config-file values; unset flags leave the config alone.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the nyzo_distribute library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Distribute Nyzo block files into a sharded directory tree"
)]
pub struct Args {
    /// Override the source directory (normally configured via XML).
    #[arg(long, short = 's', value_hint = ValueHint::DirPath, help = "Override the source directory holding .nyzoblock files")]
    pub source_dir: Option<PathBuf>,

    /// Override the destination root (normally configured via XML).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the destination root of the sharded tree")]
    pub destination_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Write logs to this file in addition to stdout.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Write logs to this file in addition to stdout")]
    pub log_file: Option<PathBuf>,

    /// Print where nyzo_distribute will look for the config file (or
    /// NYZO_DISTRIBUTE_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by nyzo_distribute and exit"
    )]
    pub print_config: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be copied, but do not modify the destination"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source_dir {
            cfg.source_dir = src.clone();
        }
        if let Some(dst) = &self.destination_dir {
            cfg.destination_dir = dst.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
