//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a secure template if missing (unless NYZO_DISTRIBUTE_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation
//!   happens elsewhere.
//! - Unknown XML fields cause a hard failure to surface misconfigurations early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{CONFIG_ENV, DESTINATION_DIR_DEFAULT, SOURCE_DIR_DEFAULT};

use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "source_dir")]
    source_dir: Option<String>,
    #[serde(rename = "destination_dir")]
    destination_dir: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Map XmlConfig -> Config, filling unset fields from defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.source_dir.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.source_dir = PathBuf::from(trimmed);
        }
    }
    if let Some(s) = parsed.destination_dir.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.destination_dir = PathBuf::from(trimmed);
        }
    }
    if let Some(s) = parsed.log_level.as_deref() {
        if let Ok(level) = s.trim().parse::<LogLevel>() {
            cfg.log_level = level;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = match from_xml_str(&contents) {
        Ok(x) => x,
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("unknown field") {
                panic!(
                    "Unknown field in nyzo_distribute config {}: {}. Refusing to start.",
                    path.display(),
                    msg
                );
            }
            return Err(e).with_context(|| format!("parse config xml '{}'", path.display()));
        }
    };
    Ok(xml_to_config(parsed))
}

/// If NYZO_DISTRIBUTE_CONFIG is set, load and return that Config; otherwise Ok(None).
pub fn load_config_from_xml_env() -> Result<Option<Config>> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let cfg = load_config_from_xml_path(Path::new(&p))?;
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Try loading Config from the platform default config.xml path.
/// Returns Ok(Some(cfg)) if the file exists and parses; Ok(None) if missing.
pub fn load_config_from_default_xml() -> Result<Option<Config>> {
    let path = default_config_path().context("resolve default config path")?;
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some(cfg))
}

/// Create default template config file and parent directory.
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/nyzo_distribute.log".into());

    let content = format!(
        "<!--\n  nyzo_distribute configuration (XML)\n\n  Fields:\n    source_dir       -> flat directory holding fetched .nyzoblock files\n    destination_dir  -> root of the sharded production block tree\n    log_level        -> quiet | normal | info | debug\n    log_file         -> path to log file (optional; stdout is always used)\n\n  Notes:\n    - CLI flags override XML values.\n    - Files are bucketed under destination_dir/<first 3 chars of filename>/.\n-->\n<config>\n  <source_dir>{}</source_dir>\n  <destination_dir>{}</destination_dir>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        SOURCE_DIR_DEFAULT, DESTINATION_DIR_DEFAULT, suggested_log
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if NYZO_DISTRIBUTE_CONFIG is not set and no file
/// exists yet; return the created path so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }

    let cfg_path = match default_config_path() {
        Ok(p) => p,
        Err(_) => return None,
    };

    if cfg_path.exists() {
        return None;
    }

    if let Ok(true) = path_has_symlink_ancestor(&cfg_path) {
        eprintln!(
            "Refusing to create template config because an existing ancestor is a symlink: {}",
            cfg_path.display()
        );
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
