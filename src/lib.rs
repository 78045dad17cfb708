//! Core library for `nyzo_distribute`.
//!
//! Copies consolidated Nyzo block files (`*.nyzoblock`) from a flat source
//! directory into a sharded destination tree, one subdirectory per
//! three-character filename prefix. Files already present at their destination
//! are left untouched, so repeated runs are idempotent.
//!
//! The library exposes a Config type with sensible defaults, validation for
//! the configured directories, and [`distribute_all`] which performs one
//! sequential pass over the source.

pub mod cli;
pub mod config;
pub mod distribute;
pub mod errors;
pub mod logging;
pub mod output;
pub mod platform;
pub mod shutdown;
mod utils;

pub use config::{Config, LogLevel};
pub use config::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use config::xml::load_config_from_xml_path;
pub use distribute::{RunReport, distribute_all};
pub use errors::DistributeError;
