//! Rename plan model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a single file goes and which date it should carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    /// Full target path, always under the output root.
    pub destination_path: PathBuf,
    /// Release date (YYYY-MM-DD) to stamp on the moved file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_override: Option<String>,
}
