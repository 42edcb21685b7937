//! Widget notifications.

use crate::reveal::RevealPhase;

/// Notifications sent to widget observers.
#[derive(Debug, Clone, PartialEq)]
pub enum ScratchEvent {
    /// New scratch points were recorded.
    Scratched { new_points: usize, total_points: usize },
    /// The reveal phase changed.
    PhaseChanged { from: RevealPhase, to: RevealPhase },
    /// The threshold was crossed; fired once.
    Finished,
}
