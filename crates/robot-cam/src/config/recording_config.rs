use crate::config::default_output_dir;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recording output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Directory recordings are written to (relative paths resolve against
    /// the working directory).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}
