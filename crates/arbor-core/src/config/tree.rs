//! Tree maintenance policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for the tree/path subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// When true, a dangling `parent_id` (referenced parent row missing)
    /// fails the operation instead of silently treating the parent as
    /// absent. Lenient mode tolerates chains broken by external tooling.
    #[serde(default = "default_strict_ancestry")]
    pub strict_ancestry: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            strict_ancestry: default_strict_ancestry(),
        }
    }
}

fn default_strict_ancestry() -> bool {
    true
}
