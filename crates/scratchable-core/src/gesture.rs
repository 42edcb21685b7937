//! Gesture tracking: scratch points and accumulated scratching time.

use std::collections::HashSet;
use std::f64::consts::PI;

use kurbo::Point;

use crate::input::{PointerEvent, PointerEventKind, PointerId};

/// Transient scratch state of one widget.
///
/// Scratching time is cumulative across press/release cycles and is never
/// reset; points only ever grow.
#[derive(Debug, Clone, Default)]
pub struct ScratchSession {
    /// Contacts currently down on the cover.
    active: HashSet<PointerId>,
    /// Timestamp of the last press or counted move.
    last_move_timestamp: Option<u64>,
    /// Total time spent moving with a contact down.
    scratching_millis: u64,
    /// Recorded scratch positions, in arrival order.
    points: Vec<Point>,
    /// Sum of erase-circle areas, overlaps counted twice.
    scratched_area: f64,
}

impl ScratchSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any contact is down.
    pub fn is_scratching(&self) -> bool {
        !self.active.is_empty()
    }

    /// Accumulated scratching duration in milliseconds.
    pub fn scratching_millis(&self) -> u64 {
        self.scratching_millis
    }

    pub fn last_move_timestamp(&self) -> Option<u64> {
        self.last_move_timestamp
    }

    /// All recorded scratch points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Approximate erased area (sum of circle areas, overlaps included).
    ///
    /// Auxiliary only; reveal decisions use scratching time.
    pub fn scratched_area(&self) -> f64 {
        self.scratched_area
    }

    /// Consume one pointer event.
    ///
    /// `radius_px` is the erase radius used for the area bookkeeping. Returns
    /// the number of points appended.
    pub fn process(&mut self, event: &PointerEvent, radius_px: f64) -> usize {
        let now = event.timestamp_ms;
        let before = self.points.len();

        match event.kind {
            PointerEventKind::Press => {
                for change in &event.changes {
                    self.active.insert(change.id);
                    self.record(change.position, radius_px);
                }
                self.last_move_timestamp = Some(now);
            }
            PointerEventKind::Move => {
                if !self.is_scratching() {
                    // Hovering over the cover
                    return 0;
                }
                // A move without a recorded press starts counting from itself
                let last = self.last_move_timestamp.unwrap_or(now);
                self.scratching_millis += now.saturating_sub(last);
                self.last_move_timestamp = Some(now.max(last));

                for change in &event.changes {
                    if self.active.contains(&change.id) {
                        self.record(change.position, radius_px);
                    }
                }
            }
            PointerEventKind::Release => {
                for change in &event.changes {
                    if self.active.remove(&change.id) {
                        self.record(change.position, radius_px);
                    }
                }
            }
        }

        let appended = self.points.len() - before;
        log::trace!(
            "{:?} at {}ms: +{} points, {}ms scratched",
            event.kind,
            now,
            appended,
            self.scratching_millis
        );
        appended
    }

    fn record(&mut self, position: Point, radius_px: f64) {
        self.points.push(position);
        let r = radius_px.max(0.0);
        self.scratched_area += PI * r * r;
    }
}
