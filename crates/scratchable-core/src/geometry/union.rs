//! Exact boundary of a union of circles.
//!
//! The boundary is made of circular arcs: for every circle, the parts of its
//! outline that lie outside all the other circles.

use std::f64::consts::TAU;

use kurbo::{Circle, Point, Vec2};

/// Tolerance for containment and duplicate tests.
const EPSILON: f64 = 1e-9;

/// Smallest arc sweep kept in the boundary.
const MIN_SWEEP: f64 = 1e-12;

/// One arc of a union boundary, swept with increasing angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryArc {
    pub center: Point,
    pub radius: f64,
    /// Start angle in radians, in `[0, TAU)`.
    pub start_angle: f64,
    /// Sweep in radians, in `(0, TAU]`.
    pub sweep: f64,
}

impl BoundaryArc {
    /// Point on the arc's circle at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    pub fn start(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> Point {
        self.point_at(self.start_angle + self.sweep)
    }

    /// Whether the arc is a complete circle.
    pub fn is_full_circle(&self) -> bool {
        (self.sweep - TAU).abs() < EPSILON
    }
}

/// Compute the boundary of the union of `circles`.
///
/// Circles with a non-positive or non-finite radius are ignored, as are
/// duplicates and circles inside another circle.
pub fn union_boundary(circles: &[Circle]) -> Vec<BoundaryArc> {
    let circles = significant_circles(circles);
    let mut arcs = Vec::new();

    for (i, circle) in circles.iter().enumerate() {
        let mut cuts = Vec::new();
        for (j, other) in circles.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some((a, b)) = intersection_angles(circle, other) {
                cuts.push(a);
                cuts.push(b);
            }
        }

        if cuts.is_empty() {
            arcs.push(BoundaryArc {
                center: circle.center,
                radius: circle.radius,
                start_angle: 0.0,
                sweep: TAU,
            });
            continue;
        }

        cuts.sort_by(f64::total_cmp);
        for k in 0..cuts.len() {
            let start = cuts[k];
            let end = if k + 1 < cuts.len() {
                cuts[k + 1]
            } else {
                cuts[0] + TAU
            };
            let sweep = end - start;
            if sweep <= MIN_SWEEP {
                continue;
            }
            let arc = BoundaryArc {
                center: circle.center,
                radius: circle.radius,
                start_angle: start,
                sweep,
            };
            let mid = arc.point_at(start + sweep / 2.0);
            let covered = circles
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && strictly_inside(other, mid));
            if !covered {
                arcs.push(arc);
            }
        }
    }

    arcs
}

/// Whether `point` lies in the union of `circles` (boundary included).
pub fn union_contains(circles: &[Circle], point: Point) -> bool {
    circles.iter().any(|c| {
        c.radius > 0.0 && c.radius.is_finite() && (point - c.center).hypot2() <= c.radius * c.radius
    })
}

/// Drop degenerate, duplicate and contained circles.
fn significant_circles(circles: &[Circle]) -> Vec<Circle> {
    let valid: Vec<Circle> = circles
        .iter()
        .copied()
        .filter(|c| c.radius > 0.0 && c.radius.is_finite() && c.center.is_finite())
        .collect();

    valid
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            !valid.iter().enumerate().any(|(j, other)| {
                if i == j {
                    return false;
                }
                let d = (c.center - other.center).hypot();
                let contained = d + c.radius <= other.radius + EPSILON;
                let identical = d < EPSILON && (c.radius - other.radius).abs() < EPSILON;
                // Of identical circles only the first survives
                contained && (!identical || j < i)
            })
        })
        .map(|(_, c)| *c)
        .collect()
}

/// Angles on `circle` where it crosses `other`, if the outlines cross.
fn intersection_angles(circle: &Circle, other: &Circle) -> Option<(f64, f64)> {
    let delta = other.center - circle.center;
    let d = delta.hypot();
    if d < EPSILON || d >= circle.radius + other.radius || d <= (circle.radius - other.radius).abs() {
        return None;
    }

    let base = delta.atan2();
    let cos_half = ((circle.radius * circle.radius + d * d - other.radius * other.radius)
        / (2.0 * circle.radius * d))
        .clamp(-1.0, 1.0);
    let half = cos_half.acos();
    Some((normalize_angle(base - half), normalize_angle(base + half)))
}

fn strictly_inside(circle: &Circle, point: Point) -> bool {
    (point - circle.center).hypot() < circle.radius - EPSILON
}

fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_sweep(arcs: &[BoundaryArc]) -> f64 {
        arcs.iter().map(|a| a.sweep).sum()
    }

    #[test]
    fn test_single_circle_is_full_arc() {
        let arcs = union_boundary(&[Circle::new((50.0, 50.0), 20.0)]);
        assert_eq!(arcs.len(), 1);
        assert!(arcs[0].is_full_circle());
        assert!((arcs[0].radius - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disjoint_circles() {
        let arcs = union_boundary(&[
            Circle::new((0.0, 0.0), 5.0),
            Circle::new((100.0, 0.0), 5.0),
        ]);
        assert_eq!(arcs.len(), 2);
        assert!(arcs.iter().all(BoundaryArc::is_full_circle));
    }

    #[test]
    fn test_duplicates_collapse() {
        let c = Circle::new((10.0, 10.0), 3.0);
        let arcs = union_boundary(&[c, c, c]);
        assert_eq!(arcs.len(), 1);
        assert!(arcs[0].is_full_circle());
    }

    #[test]
    fn test_contained_circle_dropped() {
        let arcs = union_boundary(&[
            Circle::new((0.0, 0.0), 10.0),
            Circle::new((2.0, 0.0), 3.0),
        ]);
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0].radius - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlapping_pair() {
        // Two unit circles one radius apart: each keeps 240 degrees
        let arcs = union_boundary(&[
            Circle::new((0.0, 0.0), 1.0),
            Circle::new((1.0, 0.0), 1.0),
        ]);
        assert_eq!(arcs.len(), 2);
        let expected = 2.0 * (TAU - 2.0 * (TAU / 6.0));
        assert!((total_sweep(&arcs) - expected).abs() < 1e-9);

        // The arcs meet at the intersection points
        let top = Point::new(0.5, 3f64.sqrt() / 2.0);
        let bottom = Point::new(0.5, -(3f64.sqrt()) / 2.0);
        for arc in &arcs {
            let ends = [arc.start(), arc.end()];
            assert!(ends.iter().any(|e| (*e - top).hypot() < 1e-9));
            assert!(ends.iter().any(|e| (*e - bottom).hypot() < 1e-9));
        }
    }

    #[test]
    fn test_three_in_a_row() {
        let arcs = union_boundary(&[
            Circle::new((0.0, 0.0), 1.0),
            Circle::new((1.0, 0.0), 1.0),
            Circle::new((2.0, 0.0), 1.0),
        ]);
        assert_eq!(arcs.len(), 4);

        // The middle circle only shows above and below the gaps
        let middle: Vec<_> = arcs
            .iter()
            .filter(|a| (a.center.x - 1.0).abs() < f64::EPSILON)
            .collect();
        assert_eq!(middle.len(), 2);
        for arc in middle {
            assert!((arc.sweep - TAU / 6.0).abs() < 1e-9);
        }
        assert!((total_sweep(&arcs) - 10.0 * std::f64::consts::PI / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_radius_ignored() {
        assert!(union_boundary(&[Circle::new((0.0, 0.0), 0.0)]).is_empty());
        assert!(union_boundary(&[Circle::new((0.0, 0.0), -4.0)]).is_empty());
        assert!(union_boundary(&[Circle::new((0.0, 0.0), f64::NAN)]).is_empty());
    }

    #[test]
    fn test_union_contains() {
        let circles = [Circle::new((0.0, 0.0), 1.0), Circle::new((5.0, 0.0), 1.0)];
        assert!(union_contains(&circles, Point::new(0.5, 0.0)));
        assert!(union_contains(&circles, Point::new(5.0, 1.0)));
        assert!(!union_contains(&circles, Point::new(2.5, 0.0)));
    }
}
