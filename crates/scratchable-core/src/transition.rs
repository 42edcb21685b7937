//! Exit transitions played when the cover is dismissed.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Direction the cover leaves in for [`ExitTransition::Slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl SlideDirection {
    /// Unit vector in content-local coordinates (y grows downwards).
    pub fn unit(self) -> Vec2 {
        match self {
            SlideDirection::Up => Vec2::new(0.0, -1.0),
            SlideDirection::Down => Vec2::new(0.0, 1.0),
            SlideDirection::Left => Vec2::new(-1.0, 0.0),
            SlideDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// How the cover visually disappears once the content is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitTransition {
    /// Remove the cover immediately.
    None,
    /// Fade the cover out.
    Fade { duration_ms: u64 },
    /// Shrink the cover towards its center.
    Shrink { duration_ms: u64 },
    /// Slide the cover out of its bounds.
    Slide {
        duration_ms: u64,
        #[serde(default)]
        direction: SlideDirection,
    },
}

impl Default for ExitTransition {
    fn default() -> Self {
        ExitTransition::Fade {
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }
}

/// Visual state of the cover at one point of its exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPresentation {
    /// Multiplier for the cover alpha.
    pub opacity: f64,
    /// Scale around the cover center.
    pub scale: f64,
    /// Offset as a fraction of the cover size.
    pub offset: Vec2,
}

impl CoverPresentation {
    /// Fully shown, untransformed cover.
    pub const OPAQUE: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    /// Whether anything of the cover is still drawn.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0 && self.offset.x.abs() < 1.0 && self.offset.y.abs() < 1.0
    }
}

impl ExitTransition {
    pub const DEFAULT_DURATION_MS: u64 = 300;

    pub fn fade() -> Self {
        Self::default()
    }

    /// Duration of the transition.
    pub fn duration_ms(&self) -> u64 {
        match *self {
            ExitTransition::None => 0,
            ExitTransition::Fade { duration_ms }
            | ExitTransition::Shrink { duration_ms }
            | ExitTransition::Slide { duration_ms, .. } => duration_ms,
        }
    }

    /// Linear progress (0.0 = start, 1.0 = complete) after `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: u64) -> f64 {
        let duration = self.duration_ms();
        if duration == 0 {
            return 1.0;
        }
        (elapsed_ms as f64 / duration as f64).clamp(0.0, 1.0)
    }

    /// Whether the transition has finished after `elapsed_ms`.
    pub fn is_complete(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms()
    }

    /// Cover presentation for a linear progress value.
    pub fn presentation(&self, progress: f64) -> CoverPresentation {
        let t = ease_out_cubic(progress.clamp(0.0, 1.0));
        match *self {
            ExitTransition::None => CoverPresentation {
                opacity: if progress >= 1.0 { 0.0 } else { 1.0 },
                ..CoverPresentation::OPAQUE
            },
            ExitTransition::Fade { .. } => CoverPresentation {
                opacity: 1.0 - t,
                ..CoverPresentation::OPAQUE
            },
            ExitTransition::Shrink { .. } => CoverPresentation {
                scale: 1.0 - t,
                ..CoverPresentation::OPAQUE
            },
            ExitTransition::Slide { direction, .. } => CoverPresentation {
                offset: direction.unit() * t,
                ..CoverPresentation::OPAQUE
            },
        }
    }
}

/// Ease-out cubic: fast start, slow finish.
fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fade() {
        assert_eq!(ExitTransition::default(), ExitTransition::Fade { duration_ms: 300 });
        assert_eq!(ExitTransition::default().duration_ms(), 300);
    }

    #[test]
    fn test_progress_clamped() {
        let fade = ExitTransition::Fade { duration_ms: 200 };
        assert!(fade.progress(0).abs() < f64::EPSILON);
        assert!((fade.progress(100) - 0.5).abs() < f64::EPSILON);
        assert!((fade.progress(1000) - 1.0).abs() < f64::EPSILON);
        assert!(!fade.is_complete(199));
        assert!(fade.is_complete(200));
    }

    #[test]
    fn test_none_completes_immediately() {
        let none = ExitTransition::None;
        assert!(none.is_complete(0));
        assert!((none.progress(0) - 1.0).abs() < f64::EPSILON);
        assert!(!none.presentation(1.0).is_visible());
    }

    #[test]
    fn test_fade_presentation() {
        let fade = ExitTransition::fade();
        assert_eq!(fade.presentation(0.0), CoverPresentation::OPAQUE);
        let half = fade.presentation(0.5);
        assert!(half.opacity > 0.0 && half.opacity < 0.5);
        assert!(!fade.presentation(1.0).is_visible());
    }

    #[test]
    fn test_shrink_and_slide_end_invisible() {
        let shrink = ExitTransition::Shrink { duration_ms: 100 };
        assert!(shrink.presentation(1.0).scale.abs() < f64::EPSILON);
        assert!(!shrink.presentation(1.0).is_visible());

        let slide = ExitTransition::Slide {
            duration_ms: 100,
            direction: SlideDirection::Left,
        };
        let end = slide.presentation(1.0);
        assert!((end.offset.x + 1.0).abs() < f64::EPSILON);
        assert!(!end.is_visible());
        assert!(slide.presentation(0.2).is_visible());
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&ExitTransition::Shrink { duration_ms: 50 }).unwrap();
        assert_eq!(json, r#"{"kind":"shrink","duration_ms":50}"#);
        let slide: ExitTransition = serde_json::from_str(r#"{"kind":"slide","duration_ms":10}"#).unwrap();
        assert_eq!(
            slide,
            ExitTransition::Slide {
                duration_ms: 10,
                direction: SlideDirection::Down
            }
        );
    }
}
