//! egui host for scratch-off covers.
//!
//! - **ScratchArea**: lays out content, paints the cover over it and routes
//!   pointer input to a [`scratchable_core::Scratchable`]
//! - **Pointer**: egui event translation into scratch pointer events

pub mod pointer;
pub mod scratch_area;

pub use pointer::PointerTranslator;
pub use scratch_area::{ScratchArea, ScratchAreaResponse, layout_for};
