//! Typed error definitions for nyzo_distribute.
//! One variant per failure mode of a distribution run; the first error aborts
//! the run, so each variant names the path it failed on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributeError {
    #[error("Cannot enumerate source directory '{path}': {source}")]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create shard directory '{path}': {source}")]
    CreateShardDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy '{src}' -> '{dest}': {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Run interrupted by user")]
    Interrupted,
}

impl DistributeError {
    /// Short machine-readable tag used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DistributeError::Enumerate { .. } => "enumerate",
            DistributeError::CreateShardDir { .. } => "create_shard_dir",
            DistributeError::Copy { .. } => "copy",
            DistributeError::Interrupted => "interrupted",
        }
    }
}
