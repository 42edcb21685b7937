//! Pointer input model for scratch gestures.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifier of one contact (finger, pen or mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u64);

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
}

/// A single contact change inside a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerChange {
    pub id: PointerId,
    /// Position in content-local coordinates.
    pub position: Point,
}

/// A pointer event delivered by the host, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Contacts that changed with this event.
    pub changes: Vec<PointerChange>,
    /// Host timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create an event with a single contact.
    pub fn new(kind: PointerEventKind, id: PointerId, position: Point, timestamp_ms: u64) -> Self {
        Self {
            kind,
            changes: vec![PointerChange { id, position }],
            timestamp_ms,
        }
    }

    /// Primary contact pressed.
    pub fn press(position: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Press, PointerId::default(), position, timestamp_ms)
    }

    /// Primary contact moved.
    pub fn moved(position: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, PointerId::default(), position, timestamp_ms)
    }

    /// Primary contact released.
    pub fn release(position: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Release, PointerId::default(), position, timestamp_ms)
    }

    /// Add another contact to the event.
    pub fn with_change(mut self, id: PointerId, position: Point) -> Self {
        self.changes.push(PointerChange { id, position });
        self
    }
}

/// What the widget did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The event was consumed by the cover and must not reach the content.
    pub handled: bool,
    /// The cover needs to be drawn again.
    pub needs_redraw: bool,
}

impl EventResponse {
    /// Event left for the content beneath.
    pub const IGNORED: Self = Self {
        handled: false,
        needs_redraw: false,
    };
}
