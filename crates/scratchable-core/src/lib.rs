//! Scratchable Core Library
//!
//! Platform-agnostic scratch-off engine: content is hidden beneath an opaque
//! cover that pointer gestures erase. Reveal is driven by cumulative
//! scratching time, not by erased area.

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod reveal;
pub mod transition;
pub mod widget;

pub use config::{ConfigError, ContentAlignment, CoverColor, Dp, ScratchConfig};
pub use geometry::{BoundaryArc, CoverMask, CoverShape, PATH_TOLERANCE};
pub use gesture::ScratchSession;
pub use input::{EventResponse, PointerChange, PointerEvent, PointerEventKind, PointerId};
pub use reveal::{FinishedCallback, RevealMachine, RevealPhase, cover_visible};
pub use transition::{CoverPresentation, ExitTransition, SlideDirection};
pub use widget::{ScratchEvent, ScratchObserver, Scratchable};
