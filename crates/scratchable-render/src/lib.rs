//! Scratchable Render Library
//!
//! Renderer abstraction for scratch-off covers. The default implementation
//! rasterises the cover in software into an RGBA8 image that hosts upload as
//! a texture or export as PNG.

mod pixel;
mod renderer;

pub use pixel::PixelRenderer;
pub use renderer::{CoverRenderer, RenderContext, RenderResult, RendererError, render_scratchable};
