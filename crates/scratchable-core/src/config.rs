//! Widget configuration: scratcher size, cover color, reveal threshold.

use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transition::ExitTransition;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A density-independent length.
///
/// Converted to content-local pixels with the host's scale factor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dp(pub f64);

impl Dp {
    /// Convert to pixels for the given scale factor.
    pub fn to_px(self, scale_factor: f64) -> f64 {
        self.0 * scale_factor
    }
}

impl Default for Dp {
    fn default() -> Self {
        Self(ScratchConfig::DEFAULT_RADIUS)
    }
}

/// Serializable cover color (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CoverColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray() -> Self {
        Self::new(0x88, 0x88, 0x88, 0xFF)
    }

    pub const fn blue() -> Self {
        Self::new(0x00, 0x00, 0xFF, 0xFF)
    }

    pub const fn green() -> Self {
        Self::new(0x00, 0xFF, 0x00, 0xFF)
    }

    pub const fn yellow() -> Self {
        Self::new(0xFF, 0xFF, 0x00, 0xFF)
    }
}

impl Default for CoverColor {
    fn default() -> Self {
        Self::gray()
    }
}

impl From<Color> for CoverColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<CoverColor> for Color {
    fn from(color: CoverColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Placement of content inside the widget bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentAlignment {
    TopStart,
    TopCenter,
    TopEnd,
    CenterStart,
    #[default]
    Center,
    CenterEnd,
    BottomStart,
    BottomCenter,
    BottomEnd,
}

impl ContentAlignment {
    /// Horizontal bias in `[-1, 1]` (start to end).
    pub fn horizontal_bias(self) -> f64 {
        match self {
            Self::TopStart | Self::CenterStart | Self::BottomStart => -1.0,
            Self::TopCenter | Self::Center | Self::BottomCenter => 0.0,
            Self::TopEnd | Self::CenterEnd | Self::BottomEnd => 1.0,
        }
    }

    /// Vertical bias in `[-1, 1]` (top to bottom).
    pub fn vertical_bias(self) -> f64 {
        match self {
            Self::TopStart | Self::TopCenter | Self::TopEnd => -1.0,
            Self::CenterStart | Self::Center | Self::CenterEnd => 0.0,
            Self::BottomStart | Self::BottomCenter | Self::BottomEnd => 1.0,
        }
    }

    /// Top-left corner of `content` placed inside `container`.
    ///
    /// Content larger than the container overflows symmetrically for center
    /// alignment.
    pub fn align(self, content: Size, container: Size) -> Point {
        let free_x = container.width - content.width;
        let free_y = container.height - content.height;
        Point::new(
            free_x / 2.0 * (1.0 + self.horizontal_bias()),
            free_y / 2.0 * (1.0 + self.vertical_bias()),
        )
    }
}

/// Configuration for one scratchable widget. Immutable once the widget is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// Radius of the circular scratcher.
    pub scratcher_radius: Dp,
    /// Fill color of the cover.
    pub cover: CoverColor,
    /// Cumulative scratching time needed to reveal the content.
    pub moving_threshold_millis: u64,
    /// How the cover disappears once the threshold is reached.
    pub cover_exit_transition: ExitTransition,
    /// Placement of the content within the widget.
    pub content_alignment: ContentAlignment,
    /// Reveal as soon as the threshold is reached, even with a contact down.
    pub reveal_while_scratching: bool,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            scratcher_radius: Dp(Self::DEFAULT_RADIUS),
            cover: CoverColor::default(),
            moving_threshold_millis: Self::DEFAULT_THRESHOLD_MILLIS,
            cover_exit_transition: ExitTransition::default(),
            content_alignment: ContentAlignment::default(),
            reveal_while_scratching: false,
        }
    }
}

impl ScratchConfig {
    pub const DEFAULT_RADIUS: f64 = 10.0;
    pub const DEFAULT_THRESHOLD_MILLIS: u64 = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: Dp) -> Self {
        self.scratcher_radius = radius;
        self
    }

    pub fn with_cover(mut self, cover: impl Into<CoverColor>) -> Self {
        self.cover = cover.into();
        self
    }

    pub fn with_threshold_millis(mut self, millis: u64) -> Self {
        self.moving_threshold_millis = millis;
        self
    }

    pub fn with_exit_transition(mut self, transition: ExitTransition) -> Self {
        self.cover_exit_transition = transition;
        self
    }

    pub fn with_alignment(mut self, alignment: ContentAlignment) -> Self {
        self.content_alignment = alignment;
        self
    }

    pub fn with_reveal_while_scratching(mut self, enabled: bool) -> Self {
        self.reveal_while_scratching = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace values the engine cannot use with harmless ones.
    ///
    /// A non-finite radius becomes zero, which erases nothing.
    pub fn sanitized(mut self) -> Self {
        if !self.scratcher_radius.0.is_finite() {
            log::warn!(
                "Non-finite scratcher radius {:?}, using 0",
                self.scratcher_radius.0
            );
            self.scratcher_radius = Dp(0.0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScratchConfig::default();
        assert!((config.scratcher_radius.0 - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.cover, CoverColor::gray());
        assert_eq!(config.moving_threshold_millis, 1000);
        assert_eq!(config.cover_exit_transition, ExitTransition::default());
        assert_eq!(config.content_alignment, ContentAlignment::Center);
        assert!(!config.reveal_while_scratching);
    }

    #[test]
    fn test_dp_to_px() {
        assert!((Dp(10.0).to_px(2.5) - 25.0).abs() < f64::EPSILON);
        assert!((Dp(10.0).to_px(1.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScratchConfig::from_json(
            r#"{ "scratcher_radius": 20.0, "cover": { "r": 0, "g": 255, "b": 0, "a": 255 } }"#,
        )
        .unwrap();
        assert!((config.scratcher_radius.0 - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.cover, CoverColor::green());
        assert_eq!(config.moving_threshold_millis, 1000);
    }

    #[test]
    fn test_json_round_trip_preserves_transition() {
        let config = ScratchConfig::new()
            .with_threshold_millis(250)
            .with_exit_transition(ExitTransition::Shrink { duration_ms: 120 })
            .with_alignment(ContentAlignment::BottomEnd);
        let json = config.to_json().unwrap();
        assert_eq!(ScratchConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ScratchConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_sanitize_non_finite_radius() {
        let config = ScratchConfig::new().with_radius(Dp(f64::NAN)).sanitized();
        assert!(config.scratcher_radius.0.abs() < f64::EPSILON);
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = CoverColor::blue().into();
        assert_eq!(CoverColor::from(color), CoverColor::blue());
    }

    #[test]
    fn test_alignment() {
        let content = Size::new(20.0, 10.0);
        let container = Size::new(100.0, 50.0);

        let center = ContentAlignment::Center.align(content, container);
        assert!((center.x - 40.0).abs() < f64::EPSILON);
        assert!((center.y - 20.0).abs() < f64::EPSILON);

        let top_start = ContentAlignment::TopStart.align(content, container);
        assert!(top_start.x.abs() < f64::EPSILON);
        assert!(top_start.y.abs() < f64::EPSILON);

        let bottom_end = ContentAlignment::BottomEnd.align(content, container);
        assert!((bottom_end.x - 80.0).abs() < f64::EPSILON);
        assert!((bottom_end.y - 40.0).abs() < f64::EPSILON);
    }
}
