//! The scratchable widget: state definitions and the controller that wires
//! gesture tracking, reveal state and cover geometry together.
//!
//! The controller is host-agnostic. A host adapter measures the content,
//! forwards pointer events, ticks the controller every frame and paints
//! whatever [`Scratchable::cover_shape`] returns.

mod controller;
mod state;

pub use controller::{Scratchable, ScratchObserver};
pub use crate::reveal::RevealPhase;
pub use state::ScratchEvent;
