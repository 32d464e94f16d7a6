//! Temp-directory configuration for staged file pairs.
//!
//! Resolved once at startup and threaded into the
//! [`Stager`](crate::staging::Stager) explicitly; there is no hidden
//! process-wide state.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, WhiteboxError};

/// Environment variable overriding the staging directory.
pub const TEMP_DIR_ENV: &str = "WHITEBOX_TEMP_DIR";

/// Per-user fallback directory name under `$HOME`.
const DEFAULT_TEMP_DIR_NAME: &str = ".whitebox_tools_tempdir";

/// Where staged header+body pairs are written.
#[derive(Debug, Clone)]
pub struct StagingConfig {
    temp_dir: PathBuf,
}

impl StagingConfig {
    /// Resolve the staging directory from [`TEMP_DIR_ENV`], falling back to
    /// `$HOME/.whitebox_tools_tempdir` (created if absent).
    ///
    /// Fails fast with a configuration error if neither location is usable.
    pub fn from_env() -> Result<StagingConfig> {
        if let Some(dir) = env::var_os(TEMP_DIR_ENV) {
            let temp_dir = PathBuf::from(dir);
            if !temp_dir.is_dir() {
                return Err(WhiteboxError::Configuration(format!(
                    "{} does not exist; point {TEMP_DIR_ENV} at an existing directory",
                    temp_dir.display()
                )));
            }
            return Ok(StagingConfig { temp_dir });
        }

        let home = env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
            WhiteboxError::Configuration(format!(
                "{TEMP_DIR_ENV} is unset and no home directory is available"
            ))
        })?;
        let temp_dir = home.join(DEFAULT_TEMP_DIR_NAME);
        if !temp_dir.is_dir() {
            fs::create_dir_all(&temp_dir).map_err(|e| {
                WhiteboxError::Configuration(format!(
                    "cannot create {}: {e}",
                    temp_dir.display()
                ))
            })?;
            debug!(dir = %temp_dir.display(), "created staging directory");
        }
        Ok(StagingConfig { temp_dir })
    }

    /// Use an explicit, existing directory.
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Result<StagingConfig> {
        let temp_dir = dir.into();
        if !temp_dir.is_dir() {
            return Err(WhiteboxError::Configuration(format!(
                "{} is not a directory",
                temp_dir.display()
            )));
        }
        Ok(StagingConfig { temp_dir })
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}
