//! Renderer trait abstraction.

use peniko::Color;
use scratchable_core::{CoverPresentation, CoverShape, Scratchable};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to draw the cover for one frame.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Cover shape in content-local pixels.
    pub shape: &'a CoverShape,
    /// Cover fill color.
    pub color: Color,
    /// Exit transition state.
    pub presentation: CoverPresentation,
}

impl<'a> RenderContext<'a> {
    /// Create a context for a fully shown cover.
    pub fn new(shape: &'a CoverShape, color: Color) -> Self {
        Self {
            shape,
            color,
            presentation: CoverPresentation::OPAQUE,
        }
    }

    /// Set the exit transition state.
    pub fn with_presentation(mut self, presentation: CoverPresentation) -> Self {
        self.presentation = presentation;
        self
    }
}

/// Trait for cover rendering backends.
pub trait CoverRenderer {
    /// Draw the cover for a frame.
    fn render_cover(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Drop whatever was drawn; the cover is gone.
    fn clear(&mut self);
}

/// Draw the current cover of `widget` at `now_ms`.
///
/// Returns false, after clearing the renderer, once the cover is gone.
pub fn render_scratchable<R: CoverRenderer + ?Sized>(
    renderer: &mut R,
    widget: &Scratchable,
    now_ms: u64,
) -> RenderResult<bool> {
    let Some(shape) = widget.cover_shape() else {
        renderer.clear();
        return Ok(false);
    };
    let ctx = RenderContext::new(&shape, widget.config().cover.into())
        .with_presentation(widget.presentation(now_ms));
    renderer.render_cover(&ctx)?;
    Ok(true)
}
