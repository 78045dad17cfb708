//! Configuration: types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{
    create_template_config, ensure_default_config_exists, load_config_from_default_xml,
    load_config_from_xml_env, load_config_from_xml_path,
};

/// Defaults shared across submodules. These mirror the paths the original
/// deployment used; override them in config.xml or with CLI flags.
pub const SOURCE_DIR_DEFAULT: &str = "/var/www/blocks";
pub const DESTINATION_DIR_DEFAULT: &str = "/var/lib/nyzo/production/blocks";

/// Environment variable naming an explicit config file location.
pub const CONFIG_ENV: &str = "NYZO_DISTRIBUTE_CONFIG";
