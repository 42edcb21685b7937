//! Translation of egui input events into scratch pointer events.

use egui::{Event, PointerButton, Pos2, Rect};
use kurbo::Point;
use scratchable_core::{PointerEvent, PointerEventKind, PointerId};

/// Tracks the primary pointer across frames for one cover.
///
/// egui folds the primary touch into pointer events, so a single contact id
/// is used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTranslator {
    pressed: bool,
    last_position: Option<Pos2>,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press on the cover is still down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Translate one frame of egui events.
    ///
    /// Presses only count inside `rect`; moves and the release of a press that
    /// started on the cover are followed anywhere. Positions are converted to
    /// content-local physical pixels.
    pub fn translate(
        &mut self,
        events: &[Event],
        rect: Rect,
        pixels_per_point: f32,
        timestamp_ms: u64,
    ) -> Vec<PointerEvent> {
        let local = |pos: Pos2| {
            let offset = (pos - rect.min) * pixels_per_point;
            Point::new(offset.x as f64, offset.y as f64)
        };
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed && rect.contains(*pos) && !self.pressed {
                        self.pressed = true;
                        out.push(single(PointerEventKind::Press, local(*pos), timestamp_ms));
                    } else if !*pressed && self.pressed {
                        self.pressed = false;
                        out.push(single(PointerEventKind::Release, local(*pos), timestamp_ms));
                    }
                    self.last_position = Some(*pos);
                }
                Event::PointerMoved(pos) => {
                    if self.pressed || rect.contains(*pos) {
                        out.push(single(PointerEventKind::Move, local(*pos), timestamp_ms));
                    }
                    self.last_position = Some(*pos);
                }
                Event::PointerGone => {
                    if self.pressed {
                        self.pressed = false;
                        let pos = self.last_position.unwrap_or(rect.min);
                        out.push(single(PointerEventKind::Release, local(pos), timestamp_ms));
                    }
                    self.last_position = None;
                }
                _ => {}
            }
        }
        out
    }
}

fn single(kind: PointerEventKind, position: Point, timestamp_ms: u64) -> PointerEvent {
    PointerEvent::new(kind, PointerId::default(), position, timestamp_ms)
}
