//! Feature toggles for the engine.

use serde::{Deserialize, Serialize};

/// Which optional behaviors the host has opted into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Features {
    /// Expand recurring series masters into occurrences on save.
    pub recurring: bool,
    /// Copy the master's category tags onto each occurrence.
    pub categories: bool,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            recurring: true,
            categories: true,
        }
    }
}
