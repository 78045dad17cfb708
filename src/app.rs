//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates paths, and runs the distribution pass.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use nyzo_distribute::cli::Args;
use nyzo_distribute::config::{
    self, CONFIG_ENV, LogLevel, default_config_path, ensure_default_config_exists,
};
use nyzo_distribute::errors::DistributeError;
use nyzo_distribute::logging::init_tracing;
use nyzo_distribute::output as out;
use nyzo_distribute::{distribute_all, shutdown};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!(
                "To override, unset {CONFIG_ENV} or set it to another file."
            ));
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!(
                    "Default nyzo_distribute config path:\n  {}\n",
                    p.display()
                ));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. Run without --print-config to create a template.",
                    );
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init). Skipped
    // when both directories are given on the command line; the config file is
    // not needed for such a run.
    let dirs_from_cli = args.source_dir.is_some() && args.destination_dir.is_some();
    if !dirs_from_cli && let Some(path) = ensure_default_config_exists() {
        out::print_success(&format!(
            "A template nyzo_distribute config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to set `source_dir` and `destination_dir` and optionally `log_level` and `log_file`. Example:\n\n<config>\n  <source_dir>/var/www/blocks</source_dir>\n  <destination_dir>/var/lib/nyzo/production/blocks</destination_dir>\n  <log_level>normal</log_level>\n</config>\n",
        );
        out::print_info(&format!(
            "Then re-run this command. To use a different location set {CONFIG_ENV}."
        ));
        return Ok(());
    }

    // Build config: explicit env file > default file > built-in defaults.
    let mut cfg = match config::load_config_from_xml_env()? {
        Some(cfg) => cfg,
        None => config::load_config_from_default_xml()?.unwrap_or_default(),
    };

    // Apply CLI overrides (CLI wins)
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting nyzo_distribute: {:?}", args);

    // Main run (so we can drop guard after)
    let result = (|| -> Result<()> {
        cfg.validate()?;

        match distribute_all(&cfg) {
            Ok(report) => {
                if cfg.dry_run {
                    out::print_info(&format!(
                        "Dry-run: would copy {} file(s) into '{}'",
                        report.copied,
                        cfg.destination_dir.display()
                    ));
                }
                info!(
                    matched = report.matched,
                    copied = report.copied,
                    skipped = report.skipped_existing,
                    ignored = report.ignored,
                    shard_dirs = report.shard_dirs_created,
                    bytes = report.bytes_copied,
                    "Distribution completed"
                );
                if !matches!(cfg.log_level, LogLevel::Quiet) {
                    out::print_user(&report.summary());
                }
                Ok(())
            }
            Err(e) => {
                match &e {
                    DistributeError::Enumerate { path, .. } => {
                        error!(kind = e.kind(), path = %path.display(), "Distribution failed")
                    }
                    DistributeError::CreateShardDir { path, .. } => {
                        error!(kind = e.kind(), path = %path.display(), "Distribution failed")
                    }
                    DistributeError::Copy { src, dest, .. } => {
                        error!(kind = e.kind(), src = %src.display(), dest = %dest.display(), "Distribution failed")
                    }
                    DistributeError::Interrupted => {
                        error!(kind = e.kind(), "Distribution aborted by user")
                    }
                }
                Err(e.into())
            }
        }
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
