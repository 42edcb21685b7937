//! The scratchable widget controller.

use std::fmt;

use kurbo::{Point, Size};

use crate::config::ScratchConfig;
use crate::geometry::CoverShape;
use crate::gesture::ScratchSession;
use crate::input::{EventResponse, PointerEvent};
use crate::reveal::{FinishedCallback, PhaseChange, RevealMachine, RevealPhase, cover_visible};
use crate::transition::CoverPresentation;

use super::state::ScratchEvent;

/// Observer of widget notifications.
pub type ScratchObserver = Box<dyn FnMut(&ScratchEvent)>;

/// One scratch-off cover over a piece of content.
///
/// The host feeds pointer events in arrival order through
/// [`Scratchable::handle_pointer_event`], reports layout changes through
/// [`Scratchable::set_content_size`] and calls [`Scratchable::advance`] once
/// per frame. The controller owns all scratch state; dropping it is the only
/// way to stop it.
pub struct Scratchable {
    config: ScratchConfig,
    session: ScratchSession,
    reveal: RevealMachine,
    /// Measured content size in content-local units.
    content_size: Size,
    /// Content-local units per density-independent unit.
    scale_factor: f64,
    observers: Vec<ScratchObserver>,
    /// Set whenever the cover needs to be drawn again.
    dirty: bool,
}

impl fmt::Debug for Scratchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scratchable")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("reveal", &self.reveal)
            .field("content_size", &self.content_size)
            .field("scale_factor", &self.scale_factor)
            .field("observers", &self.observers.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Scratchable {
    fn default() -> Self {
        Self::new(ScratchConfig::default())
    }
}

impl Scratchable {
    /// Create a widget without a completion callback.
    pub fn new(config: ScratchConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a widget that calls `on_finished` once the content is revealed.
    pub fn with_on_finished(config: ScratchConfig, on_finished: impl FnMut() + 'static) -> Self {
        Self::build(config, Some(Box::new(on_finished)))
    }

    fn build(config: ScratchConfig, on_finished: Option<FinishedCallback>) -> Self {
        Self {
            config: config.sanitized(),
            session: ScratchSession::new(),
            reveal: RevealMachine::new(on_finished),
            content_size: Size::ZERO,
            scale_factor: 1.0,
            observers: Vec::new(),
            dirty: true,
        }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn session(&self) -> &ScratchSession {
        &self.session
    }

    pub fn phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Register an observer for phase changes and scratch progress.
    pub fn subscribe(&mut self, observer: impl FnMut(&ScratchEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Report the measured content size.
    pub fn set_content_size(&mut self, size: Size) {
        if size == self.content_size {
            return;
        }
        log::debug!("Scratchable content size {:?} -> {:?}", self.content_size, size);
        self.content_size = size;
        self.dirty = true;
    }

    /// Report the density scale factor used to convert the scratcher radius.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            log::warn!("Ignoring invalid scale factor {}", scale_factor);
            return;
        }
        if (scale_factor - self.scale_factor).abs() > f64::EPSILON {
            self.scale_factor = scale_factor;
            self.dirty = true;
        }
    }

    /// Scratcher radius in content-local units.
    pub fn radius_px(&self) -> f64 {
        self.config.scratcher_radius.to_px(self.scale_factor)
    }

    /// Derived cover visibility. True until the threshold is crossed.
    pub fn is_cover_visible(&self) -> bool {
        self.reveal.phase().is_covered() && cover_visible(&self.session, &self.config)
    }

    /// Whether the cover still intercepts pointer input.
    pub fn intercepts_input(&self) -> bool {
        self.reveal.phase().is_covered()
    }

    /// Consume one pointer event.
    ///
    /// While the cover is up every event is handled, so content beneath never
    /// sees it. Once the threshold is crossed events are left alone.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> EventResponse {
        if !self.intercepts_input() {
            return EventResponse::IGNORED;
        }

        let appended = self.session.process(event, self.radius_px());
        if appended > 0 {
            self.dirty = true;
            self.notify(&ScratchEvent::Scratched {
                new_points: appended,
                total_points: self.session.points().len(),
            });
        }

        let change = self
            .reveal
            .evaluate(&self.session, &self.config, event.timestamp_ms);
        if let Some(change) = change {
            self.on_phase_change(change);
        }

        EventResponse {
            handled: true,
            needs_redraw: self.dirty,
        }
    }

    /// Advance time-driven state to `now_ms`: re-derive visibility, then move
    /// the exit transition forward.
    ///
    /// Returns true if the cover must be redrawn.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if let Some(change) = self.reveal.evaluate(&self.session, &self.config, now_ms) {
            self.on_phase_change(change);
        }
        let transition = self.config.cover_exit_transition;
        if let Some(change) = self.reveal.advance(now_ms, &transition) {
            self.on_phase_change(change);
        }
        if self.reveal.phase() == RevealPhase::Revealing {
            self.dirty = true;
        }
        self.dirty
    }

    /// Whether a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Take the pending redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The shape to paint as cover, or `None` once the cover is gone.
    ///
    /// Built only while the cover is drawn. During the exit transition the
    /// erased region is frozen as it was when the threshold was crossed.
    pub fn cover_shape(&self) -> Option<CoverShape> {
        if !self.reveal.phase().is_drawn() {
            return None;
        }
        Some(CoverShape::new(
            self.content_size,
            self.radius_px(),
            self.session.points(),
        ))
    }

    /// How the cover is presented at `now_ms`.
    pub fn presentation(&self, now_ms: u64) -> CoverPresentation {
        self.reveal
            .presentation(now_ms, &self.config.cover_exit_transition)
    }

    /// Whether `point` (content-local) is still hidden by the cover.
    pub fn is_point_covered(&self, point: Point) -> bool {
        self.cover_shape().is_some_and(|shape| shape.contains(point))
    }

    fn on_phase_change(&mut self, (from, to): PhaseChange) {
        log::debug!("Scratchable phase {:?} -> {:?}", from, to);
        self.dirty = true;
        self.notify(&ScratchEvent::PhaseChanged { from, to });
        if to == RevealPhase::Revealing {
            self.notify(&ScratchEvent::Finished);
        }
    }

    fn notify(&mut self, event: &ScratchEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}
