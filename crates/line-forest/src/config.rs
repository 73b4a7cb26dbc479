use serde::{Deserialize, Serialize};

/// Tuning knobs of a [`crate::PositionTree`].
///
/// Every combination keeps the tree valid; the flags only trade work for
/// speed. Deserializable so the host can keep it in its settings file:
///
/// ```
/// use line_forest::TreeConfig;
///
/// let config: TreeConfig = serde_json::from_str(r#"{ "full_rebalance": true }"#).unwrap();
/// assert!(config.full_rebalance);
/// assert!(config.sequential_cache);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Remember the last looked-up position so that neighbouring lookups
    /// step through `next`/`prev` instead of descending from the root.
    pub sequential_cache: bool,
    /// Stop aggregate recomputation at the first ancestor whose values did
    /// not change.
    pub early_fix_stop: bool,
    /// Keep walking to the root after a rotation on insertion as well, not
    /// only on deletion.
    pub full_rebalance: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            sequential_cache: true,
            early_fix_stop: true,
            full_rebalance: false,
        }
    }
}
