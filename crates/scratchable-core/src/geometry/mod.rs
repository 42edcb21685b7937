//! Cover geometry: the full cover rectangle minus the scratched circles.
//!
//! Two renditions of the same shape are provided:
//! - [`CoverShape::to_path`]: exact vector path built from the union boundary
//! - [`CoverMask`]: anti-aliased coverage raster, stamped incrementally

mod mask;
mod union;

pub use mask::CoverMask;
pub use union::{BoundaryArc, union_boundary, union_contains};

use kurbo::{Arc, BezPath, Circle, Point, Rect, Shape as KurboShape, Size, Vec2};

/// Default flattening tolerance for cover paths, in content-local units.
pub const PATH_TOLERANCE: f64 = 0.1;

/// The visible part of the cover.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverShape {
    bounds: Rect,
    radius: f64,
    holes: Vec<Circle>,
}

impl CoverShape {
    /// Build the cover for content of `size`, erased by circles of
    /// `radius` centered at `points`.
    pub fn new(size: Size, radius: f64, points: &[Point]) -> Self {
        let width = if size.width.is_finite() { size.width.max(0.0) } else { 0.0 };
        let height = if size.height.is_finite() { size.height.max(0.0) } else { 0.0 };
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        let holes = if radius > 0.0 {
            points.iter().map(|p| Circle::new(*p, radius)).collect()
        } else {
            Vec::new()
        };
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            radius,
            holes,
        }
    }

    /// The full cover rectangle. Painting is clipped to it.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Erase radius in content-local units.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Erased circles, in scratch order.
    pub fn holes(&self) -> &[Circle] {
        &self.holes
    }

    /// True when there is nothing to draw (zero-size bounds).
    pub fn is_empty(&self) -> bool {
        self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0
    }

    /// True when nothing has been erased inside the bounds.
    pub fn is_full(&self) -> bool {
        !self.is_empty() && self.holes.iter().all(|c| !self.bounds.overlaps(c.bounding_box()))
    }

    /// Whether `point` is still covered.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty() && self.bounds.contains(point) && !union_contains(&self.holes, point)
    }

    /// Boundary arcs of the erased region.
    ///
    /// Holes lying wholly outside the bounds are skipped: their disks never
    /// touch the cover, so the clipped result is unchanged.
    pub fn erased_boundary(&self) -> Vec<BoundaryArc> {
        let inside: Vec<Circle> = self
            .holes
            .iter()
            .copied()
            .filter(|c| self.bounds.overlaps(c.bounding_box()))
            .collect();
        union_boundary(&inside)
    }

    /// Vector path of the cover.
    ///
    /// Exact rendition for export and inspection. The union is cubic in the
    /// number of holes, so per-frame painting goes through [`CoverMask`],
    /// which only stamps new holes.
    ///
    /// The rectangle and the erased boundary run in opposite directions, so
    /// filling with the non-zero rule leaves the erased region empty. Erased
    /// circles reaching outside the bounds add area there; clip to
    /// [`CoverShape::bounds`] when filling.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        if self.is_empty() {
            return BezPath::new();
        }

        let mut path = self.bounds.to_path(tolerance);
        // Every arc is closed through a shared apex; the apex edges of
        // consecutive arcs cancel out in the winding.
        let apex = self.bounds.origin();
        for arc in self.erased_boundary() {
            let reversed = Arc::new(
                arc.center,
                Vec2::new(arc.radius, arc.radius),
                arc.start_angle + arc.sweep,
                -arc.sweep,
                0.0,
            );
            path.move_to(apex);
            path.line_to(arc.end());
            for el in reversed.append_iter(tolerance) {
                path.push(el);
            }
            path.close_path();
        }
        path
    }
}
