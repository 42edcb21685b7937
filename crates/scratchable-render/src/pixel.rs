//! Software renderer producing an RGBA8 image of the cover.

use kurbo::{Point, Vec2};
use scratchable_core::CoverMask;

use crate::renderer::{CoverRenderer, RenderContext, RenderResult, RendererError};

/// Renders the cover into an unmultiplied RGBA8 buffer the size of the content.
#[derive(Debug, Clone, Default)]
pub struct PixelRenderer {
    mask: CoverMask,
    /// RGBA pixel data (4 bytes per pixel).
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rendered pixels, row-major RGBA8.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// The coverage mask behind the last frame.
    pub fn mask(&self) -> &CoverMask {
        &self.mask
    }

    /// RGBA of the pixel at `(x, y)`; transparent outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    /// Encode the last frame as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        if self.width == 0 || self.height == 0 {
            return Err(RendererError::Surface("nothing rendered".to_string()));
        }
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .write_image_data(&self.rgba)
                .map_err(|e| RendererError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }

    /// Coverage for destination pixel `(x, y)` after the presentation
    /// transform (scale about the center, then offset).
    fn sample(&self, x: u32, y: u32, center: Point, scale: f64, offset: Vec2) -> u8 {
        let dst = Point::new(x as f64 + 0.5, y as f64 + 0.5) - offset;
        let src = center + (dst - center) / scale;
        if src.x < 0.0 || src.y < 0.0 {
            return 0;
        }
        self.mask.alpha(src.x as u32, src.y as u32)
    }
}

impl CoverRenderer for PixelRenderer {
    fn render_cover(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if ctx.shape.is_empty() {
            self.clear();
            return Ok(());
        }

        self.mask.sync(ctx.shape);
        if (self.width, self.height) != (self.mask.width(), self.mask.height()) {
            log::debug!(
                "Cover raster resized to {}x{}",
                self.mask.width(),
                self.mask.height()
            );
        }
        self.width = self.mask.width();
        self.height = self.mask.height();
        self.rgba.clear();
        self.rgba.resize(self.width as usize * self.height as usize * 4, 0);

        let presentation = ctx.presentation;
        if !presentation.is_visible() {
            return Ok(());
        }

        let color = ctx.color.to_rgba8();
        let opacity = presentation.opacity.clamp(0.0, 1.0);
        let identity = (presentation.scale - 1.0).abs() < f64::EPSILON
            && presentation.offset == Vec2::ZERO;
        let center = Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        let offset = Vec2::new(
            presentation.offset.x * self.width as f64,
            presentation.offset.y * self.height as f64,
        );

        for y in 0..self.height {
            for x in 0..self.width {
                let coverage = if identity {
                    self.mask.alpha(x, y)
                } else {
                    self.sample(x, y, center, presentation.scale, offset)
                };
                if coverage == 0 {
                    continue;
                }
                let alpha = color.a as f64 * (coverage as f64 / u8::MAX as f64) * opacity;
                let i = ((y * self.width + x) * 4) as usize;
                self.rgba[i] = color.r;
                self.rgba[i + 1] = color.g;
                self.rgba[i + 2] = color.b;
                self.rgba[i + 3] = alpha.round() as u8;
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.mask = CoverMask::new();
        self.rgba.clear();
        self.width = 0;
        self.height = 0;
    }
}
