//! Reveal state machine: decides when the cover goes away.
//!
//! Visibility is derived on every evaluation from the scratch session and
//! the configuration, never stored:
//!
//! `visible = is_scratching || scratching_millis < moving_threshold_millis`
//!
//! The first time it evaluates to false the machine enters
//! [`RevealPhase::Revealing`] and invokes the completion callback. The exit
//! transition then runs to [`RevealPhase::Revealed`], which is terminal.

use std::fmt;

use crate::config::ScratchConfig;
use crate::gesture::ScratchSession;
use crate::transition::{CoverPresentation, ExitTransition};

/// Where a scratchable widget is in its one-way reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealPhase {
    /// Cover shown, no contact down.
    #[default]
    Covered,
    /// Cover shown, at least one contact scratching.
    Scratching,
    /// Threshold met, exit transition playing.
    Revealing,
    /// Cover gone. Terminal.
    Revealed,
}

impl RevealPhase {
    /// Whether the cover is still logically visible (intercepts input).
    pub fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Scratching)
    }

    /// Whether the cover still needs drawing.
    pub fn is_drawn(self) -> bool {
        self != Self::Revealed
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Revealed
    }
}

/// Completion callback, invoked at most once.
pub type FinishedCallback = Box<dyn FnMut()>;

/// Phase transition `(from, to)`.
pub type PhaseChange = (RevealPhase, RevealPhase);

/// Whether the cover is visible for the given session and configuration.
pub fn cover_visible(session: &ScratchSession, config: &ScratchConfig) -> bool {
    let below_threshold = session.scratching_millis() < config.moving_threshold_millis;
    if config.reveal_while_scratching {
        below_threshold
    } else {
        session.is_scratching() || below_threshold
    }
}

pub struct RevealMachine {
    phase: RevealPhase,
    /// Timestamp at which the exit transition started.
    revealing_since: Option<u64>,
    on_finished: Option<FinishedCallback>,
    finished: bool,
}

impl fmt::Debug for RevealMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealMachine")
            .field("phase", &self.phase)
            .field("revealing_since", &self.revealing_since)
            .field("has_callback", &self.on_finished.is_some())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Default for RevealMachine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RevealMachine {
    pub fn new(on_finished: Option<FinishedCallback>) -> Self {
        Self {
            phase: RevealPhase::Covered,
            revealing_since: None,
            on_finished,
            finished: false,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether the threshold has been crossed (callback fired or skipped).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn revealing_since(&self) -> Option<u64> {
        self.revealing_since
    }

    /// Re-derive the phase after a session change at time `now`.
    pub fn evaluate(
        &mut self,
        session: &ScratchSession,
        config: &ScratchConfig,
        now: u64,
    ) -> Option<PhaseChange> {
        if !self.phase.is_covered() {
            return None;
        }

        let next = if !cover_visible(session, config) {
            RevealPhase::Revealing
        } else if session.is_scratching() {
            RevealPhase::Scratching
        } else {
            RevealPhase::Covered
        };
        if next == self.phase {
            return None;
        }

        let from = self.phase;
        self.phase = next;
        if next == RevealPhase::Revealing {
            self.revealing_since = Some(now);
            self.finish();
        }
        Some((from, next))
    }

    /// Advance the exit transition to time `now`.
    pub fn advance(&mut self, now: u64, transition: &ExitTransition) -> Option<PhaseChange> {
        let since = self.revealing_since?;
        if self.phase != RevealPhase::Revealing || !transition.is_complete(now.saturating_sub(since)) {
            return None;
        }
        self.phase = RevealPhase::Revealed;
        Some((RevealPhase::Revealing, RevealPhase::Revealed))
    }

    /// How the cover should be drawn at time `now`.
    pub fn presentation(&self, now: u64, transition: &ExitTransition) -> CoverPresentation {
        match self.phase {
            RevealPhase::Covered | RevealPhase::Scratching => CoverPresentation::OPAQUE,
            RevealPhase::Revealing => {
                let elapsed = now.saturating_sub(self.revealing_since.unwrap_or(now));
                transition.presentation(transition.progress(elapsed))
            }
            RevealPhase::Revealed => transition.presentation(1.0),
        }
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        log::info!("Scratch threshold reached, revealing content");
        if let Some(callback) = self.on_finished.as_mut() {
            callback();
        }
    }
}
