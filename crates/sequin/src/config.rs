//! Configuration types for Sequin layouts.
//!
//! All types implement [`serde::Deserialize`] and are usually loaded from a
//! TOML file. Every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and text settings.
//! - [`LayoutConfig`] - Dimensions used by placement and adjustment.
//! - [`TextConfig`] - Label font and the way labels are measured.
//!
//! # Example
//!
//! ```
//! # use sequin::config::{AppConfig, Measurement};
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [layout]
//!     actor_pitch = 240
//!
//!     [text]
//!     measurement = "estimated"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().actor_pitch(), 240.0);
//! assert_eq!(config.layout().min_gap(), 140.0);
//! assert_eq!(config.text().measurement(), Measurement::Estimated);
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use sequin_core::draw::{EstimatedTextMeasure, ShapedTextMeasure, TextDefinition, TextMeasure};

use crate::SequinError;

/// Top-level configuration combining layout and text settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout dimensions section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Label text section.
    #[serde(default)]
    text: TextConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Dimensions used by placement and adjustment.
    /// * `text` - Label font and measurement.
    pub fn new(layout: LayoutConfig, text: TextConfig) -> Self {
        Self { layout, text }
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Config`] if the TOML is malformed or a value
    /// fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, SequinError> {
        let config: Self = toml::from_str(content)
            .map_err(|err| SequinError::Config(format!("failed to parse TOML: {err}")))?;
        config.validate()?;

        debug!(config:?; "Configuration parsed");
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Io`] if the file cannot be read, and
    /// [`SequinError::Config`] if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SequinError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration");

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that every dimension is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Config`] naming the first offending value.
    pub fn validate(&self) -> Result<(), SequinError> {
        self.layout.validate()?;
        self.text.validate()
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the text configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }
}

/// Dimensions used by placement and adjustment.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `actor_pitch` | `200` |
/// | `actor_width` | `100` |
/// | `actor_height` | `50` |
/// | `actor_padding` | `10` |
/// | `signal_pitch` | `50` |
/// | `self_signal_width` | `25` |
/// | `self_signal_height` | `50` |
/// | `label_offset_x` | `5` |
/// | `label_offset_y` | `5` |
/// | `signal_padding` | `10` |
/// | `creation_width` | `100` |
/// | `cross_width` | `20` |
/// | `max_sweeps` | `8` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    actor_pitch: f32,
    actor_width: f32,
    actor_height: f32,
    actor_padding: f32,
    signal_pitch: f32,
    self_signal_width: f32,
    self_signal_height: f32,
    label_offset_x: f32,
    label_offset_y: f32,
    signal_padding: f32,
    creation_width: f32,
    cross_width: f32,
    max_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            actor_pitch: 200.0,
            actor_width: 100.0,
            actor_height: 50.0,
            actor_padding: 10.0,
            signal_pitch: 50.0,
            self_signal_width: 25.0,
            self_signal_height: 50.0,
            label_offset_x: 5.0,
            label_offset_y: 5.0,
            signal_padding: 10.0,
            creation_width: 100.0,
            cross_width: 20.0,
            max_sweeps: 8,
        }
    }
}

impl LayoutConfig {
    /// Sets the upper bound of adjustment sweeps.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Sets the horizontal distance between initial actor origins.
    pub fn with_actor_pitch(mut self, actor_pitch: f32) -> Self {
        self.actor_pitch = actor_pitch;
        self
    }

    pub fn actor_pitch(&self) -> f32 {
        self.actor_pitch
    }

    pub fn actor_width(&self) -> f32 {
        self.actor_width
    }

    pub fn actor_height(&self) -> f32 {
        self.actor_height
    }

    /// Horizontal pad kept on both sides of an actor label.
    pub fn actor_padding(&self) -> f32 {
        self.actor_padding
    }

    /// Vertical distance between consecutive signals.
    pub fn signal_pitch(&self) -> f32 {
        self.signal_pitch
    }

    pub fn self_signal_width(&self) -> f32 {
        self.self_signal_width
    }

    pub fn self_signal_height(&self) -> f32 {
        self.self_signal_height
    }

    pub fn label_offset_x(&self) -> f32 {
        self.label_offset_x
    }

    pub fn label_offset_y(&self) -> f32 {
        self.label_offset_y
    }

    /// Pad kept between a signal label and a life line it was moved clear of.
    pub fn signal_padding(&self) -> f32 {
        self.signal_padding
    }

    /// Length of the line drawn by an actor creation.
    pub fn creation_width(&self) -> f32 {
        self.creation_width
    }

    /// Width and height of the destruction cross.
    pub fn cross_width(&self) -> f32 {
        self.cross_width
    }

    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }

    /// Minimum horizontal gap between adjacent actor boxes.
    pub fn min_gap(&self) -> f32 {
        self.actor_pitch - self.actor_width
    }

    fn validate(&self) -> Result<(), SequinError> {
        let dimensions = [
            ("actor_pitch", self.actor_pitch),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("signal_pitch", self.signal_pitch),
            ("self_signal_width", self.self_signal_width),
            ("self_signal_height", self.self_signal_height),
            ("creation_width", self.creation_width),
            ("cross_width", self.cross_width),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(SequinError::Config(format!(
                    "layout.{name} must be positive, got {value}"
                )));
            }
        }

        let offsets = [
            ("actor_padding", self.actor_padding),
            ("label_offset_x", self.label_offset_x),
            ("label_offset_y", self.label_offset_y),
            ("signal_padding", self.signal_padding),
        ];
        for (name, value) in offsets {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SequinError::Config(format!(
                    "layout.{name} must not be negative, got {value}"
                )));
            }
        }

        if self.actor_pitch < self.actor_width {
            return Err(SequinError::Config(format!(
                "layout.actor_pitch ({}) must not be smaller than layout.actor_width ({})",
                self.actor_pitch, self.actor_width
            )));
        }

        if self.max_sweeps == 0 {
            return Err(SequinError::Config(
                "layout.max_sweeps must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// How label sizes are measured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    /// Real font metrics with cosmic-text shaping.
    #[default]
    Shaped,
    /// Fixed advance per character, independent of installed fonts.
    Estimated,
}

/// Label font and measurement settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    font_family: String,
    font_size: u16,
    measurement: Measurement,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 15,
            measurement: Measurement::default(),
        }
    }
}

impl TextConfig {
    /// Sets how labels are measured.
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = measurement;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Builds the [`TextDefinition`] labels are measured and drawn with.
    pub fn text_definition(&self) -> TextDefinition {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(self.font_size);
        definition
    }

    /// Creates the configured [`TextMeasure`].
    pub fn measure(&self) -> Box<dyn TextMeasure> {
        match self.measurement {
            Measurement::Shaped => Box::new(ShapedTextMeasure),
            Measurement::Estimated => Box::new(EstimatedTextMeasure),
        }
    }

    fn validate(&self) -> Result<(), SequinError> {
        if self.font_size == 0 {
            return Err(SequinError::Config(
                "text.font_size must be positive".to_string(),
            ));
        }
        if self.font_family.trim().is_empty() {
            return Err(SequinError::Config(
                "text.font_family must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_dimensions() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.actor_pitch(), 200.0);
        assert_eq!(layout.actor_width(), 100.0);
        assert_eq!(layout.actor_height(), 50.0);
        assert_eq!(layout.signal_pitch(), 50.0);
        assert_eq!(layout.self_signal_width(), 25.0);
        assert_eq!(layout.self_signal_height(), 50.0);
        assert_eq!(layout.min_gap(), 100.0);
        assert_eq!(layout.max_sweeps(), 8);
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [layout]
            signal_pitch = 60.0
            max_sweeps = 3

            [text]
            font_family = "monospace"
            font_size = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().signal_pitch(), 60.0);
        assert_eq!(config.layout().max_sweeps(), 3);
        assert_eq!(config.layout().actor_width(), 100.0);
        assert_eq!(config.text().font_family(), "monospace");
        assert_eq!(config.text().font_size(), 12);
        assert_eq!(config.text().measurement(), Measurement::Shaped);

        let definition = config.text().text_definition();
        assert_eq!(definition.font_family(), "monospace");
        assert_eq!(definition.font_size(), 12);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[layout\nactor_pitch = ").unwrap_err();
        assert!(matches!(err, SequinError::Config(_)));
    }

    #[test]
    fn test_unknown_measurement_is_config_error() {
        let err = AppConfig::from_toml_str("[text]\nmeasurement = \"guess\"").unwrap_err();
        assert!(matches!(err, SequinError::Config(_)));
    }

    #[test]
    fn test_validation_rejects_bad_dimensions() {
        for content in [
            "[layout]\nactor_width = 0",
            "[layout]\nsignal_pitch = -5",
            "[layout]\nmax_sweeps = 0",
            "[layout]\nactor_pitch = 80",
            "[layout]\nsignal_padding = -1",
            "[text]\nfont_size = 0",
        ] {
            let result = AppConfig::from_toml_str(content);
            assert!(
                matches!(result, Err(SequinError::Config(_))),
                "expected validation error for {content:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nactor_height = 40").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.layout().actor_height(), 40.0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SequinError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let layout = LayoutConfig::default()
            .with_max_sweeps(2)
            .with_actor_pitch(300.0);
        assert_eq!(layout.max_sweeps(), 2);
        assert_eq!(layout.min_gap(), 200.0);

        let text = TextConfig::default().with_measurement(Measurement::Estimated);
        assert_eq!(text.measurement(), Measurement::Estimated);
    }
}
