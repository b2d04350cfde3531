use std::time::Duration;

use crate::error::WalkError;

/// The output of a completed walk.
///
/// A walk that returns `Ok` always left every level it entered, so
/// `stats.containers` equals both the number of `Enter` and `Leave`
/// notifications that were sent.
#[derive(Debug)]
pub struct Results {
    /// Number of `on_entry` calls made.
    pub entries: usize,

    /// Whether the visitor requested an early stop.
    pub stopped: bool,

    /// Provider failures that were absorbed as empty listings or skipped rows.
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<WalkError>,

    /// Walk statistics.
    pub stats: WalkStats,
}

/// Counters for a completed walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Containers expanded, root included.
    pub containers: usize,

    /// Leaf entries visited.
    pub leaves: usize,

    /// Deepest level entered. The root level is 0.
    pub max_depth: usize,

    /// Wall-clock time from walk start to completion.
    pub duration: Duration,
}
