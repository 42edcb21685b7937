//! Rasterised cover coverage.

use kurbo::Circle;

use super::CoverShape;

/// Per-pixel coverage of the cover (255 = covered, 0 = scratched away).
///
/// Holes are stamped incrementally: syncing with a shape only rasterises
/// circles added since the previous sync.
#[derive(Debug, Clone, Default)]
pub struct CoverMask {
    width: u32,
    height: u32,
    radius: f64,
    coverage: Vec<u8>,
    /// Number of holes of the shape already stamped.
    stamped: usize,
}

impl CoverMask {
    /// Create an empty (zero-size) mask.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Row-major coverage values.
    pub fn data(&self) -> &[u8] {
        &self.coverage
    }

    /// Coverage of the pixel at `(x, y)`; zero outside the mask.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }

    /// Bring the mask up to date with `shape`.
    ///
    /// Returns true if any pixel may have changed.
    pub fn sync(&mut self, shape: &CoverShape) -> bool {
        let bounds = shape.bounds();
        let width = bounds.width().ceil() as u32;
        let height = bounds.height().ceil() as u32;
        let holes = shape.holes();

        let reset = width != self.width
            || height != self.height
            || (shape.radius() - self.radius).abs() > f64::EPSILON
            || holes.len() < self.stamped;
        if reset {
            log::debug!("Cover mask reset to {}x{}", width, height);
            self.width = width;
            self.height = height;
            self.radius = shape.radius();
            self.coverage = vec![u8::MAX; width as usize * height as usize];
            self.stamped = 0;
        }

        if self.stamped == holes.len() {
            return reset;
        }
        for circle in &holes[self.stamped..] {
            self.stamp(circle);
        }
        self.stamped = holes.len();
        true
    }

    /// Share of the mask that is scratched away, in `[0, 1]`.
    pub fn revealed_fraction(&self) -> f64 {
        if self.coverage.is_empty() {
            return 0.0;
        }
        let covered: u64 = self.coverage.iter().map(|&a| a as u64).sum();
        1.0 - covered as f64 / (self.coverage.len() as u64 * u8::MAX as u64) as f64
    }

    /// Erase one anti-aliased circle.
    fn stamp(&mut self, circle: &Circle) {
        let r = circle.radius;
        if r <= 0.0 || self.coverage.is_empty() {
            return;
        }
        let c = circle.center;
        let x0 = (c.x - r - 1.0).floor().max(0.0) as u32;
        let y0 = (c.y - r - 1.0).floor().max(0.0) as u32;
        let x1 = ((c.x + r + 1.0).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((c.y + r + 1.0).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            let py = y as f64 + 0.5;
            for x in x0..x1 {
                let px = x as f64 + 0.5;
                let distance = ((px - c.x).powi(2) + (py - c.y).powi(2)).sqrt() - r;
                let erased = (0.5 - distance).clamp(0.0, 1.0);
                if erased <= 0.0 {
                    continue;
                }
                let keep = ((1.0 - erased) * u8::MAX as f64).round() as u8;
                let idx = (y * self.width + x) as usize;
                self.coverage[idx] = self.coverage[idx].min(keep);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    #[test]
    fn test_full_cover_without_points() {
        let mut mask = CoverMask::new();
        assert!(mask.sync(&CoverShape::new(Size::new(4.0, 3.0), 2.0, &[])));
        assert_eq!(mask.width(), 4);
        assert_eq!(mask.height(), 3);
        assert!(mask.data().iter().all(|&a| a == u8::MAX));
        assert!(mask.revealed_fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn test_stamp_center_circle() {
        let mut mask = CoverMask::new();
        let shape = CoverShape::new(Size::new(100.0, 100.0), 20.0, &[Point::new(50.0, 50.0)]);
        mask.sync(&shape);

        assert_eq!(mask.alpha(50, 50), 0);
        assert_eq!(mask.alpha(5, 5), u8::MAX);
        assert_eq!(mask.alpha(75, 50), u8::MAX);

        let expected = std::f64::consts::PI * 400.0 / 10_000.0;
        assert!((mask.revealed_fraction() - expected).abs() < 0.005);
    }

    #[test]
    fn test_incremental_sync() {
        let mut mask = CoverMask::new();
        let size = Size::new(50.0, 50.0);
        let mut points = vec![Point::new(10.0, 10.0)];
        mask.sync(&CoverShape::new(size, 5.0, &points));
        let after_one = mask.revealed_fraction();

        // Nothing new to stamp
        assert!(!mask.sync(&CoverShape::new(size, 5.0, &points)));

        points.push(Point::new(40.0, 40.0));
        assert!(mask.sync(&CoverShape::new(size, 5.0, &points)));
        assert!(mask.revealed_fraction() > after_one);
        assert_eq!(mask.alpha(40, 40), 0);
    }

    #[test]
    fn test_resize_resets() {
        let mut mask = CoverMask::new();
        let points = [Point::new(5.0, 5.0)];
        mask.sync(&CoverShape::new(Size::new(10.0, 10.0), 3.0, &points));
        assert_eq!(mask.alpha(5, 5), 0);

        mask.sync(&CoverShape::new(Size::new(20.0, 20.0), 3.0, &points));
        assert_eq!(mask.width(), 20);
        // Restamped after the reset
        assert_eq!(mask.alpha(5, 5), 0);
        assert_eq!(mask.alpha(15, 15), u8::MAX);
    }

    #[test]
    fn test_zero_size_and_out_of_bounds_points() {
        let mut mask = CoverMask::new();
        mask.sync(&CoverShape::new(Size::ZERO, 10.0, &[Point::new(1.0, 1.0)]));
        assert!(mask.is_empty());
        assert!(mask.revealed_fraction().abs() < f64::EPSILON);
        assert_eq!(mask.alpha(0, 0), 0);

        mask.sync(&CoverShape::new(
            Size::new(10.0, 10.0),
            2.0,
            &[Point::new(-50.0, -50.0), Point::new(500.0, 3.0)],
        ));
        assert!(mask.data().iter().all(|&a| a == u8::MAX));
    }
}
