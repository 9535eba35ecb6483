//! Text measurement for diagram labels.
//!
//! Label widths drive the whole adjustment engine: actor boxes grow to fit
//! their names and actors move apart to make room for signal messages. Labels
//! are therefore measured analytically, before anything is drawn.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Font family and size shared by every label
//! - [`TextMeasure`] - The measurement capability
//! - [`ShapedTextMeasure`] - Measures with real font metrics and shaping (cosmic-text)
//! - [`EstimatedTextMeasure`] - Fixed-advance estimate, independent of installed fonts
//!
//! # Quick Start
//!
//! ```
//! # use sequin_core::draw::{EstimatedTextMeasure, TextDefinition, TextMeasure};
//! let mut definition = TextDefinition::new();
//! definition.set_font_size(12);
//!
//! let size = EstimatedTextMeasure.measure("GET /ping", &definition);
//! assert!(size.width() > 0.0);
//! assert!(size.height() > 0.0);
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

/// Points to pixels, roughly 1.33x for standard DPI.
const PT_TO_PX: f32 = 1.33;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Average glyph advance relative to the pixel font size.
const ESTIMATED_ADVANCE: f32 = 0.55;

/// Defines the font used to render and measure labels.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `15` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "Arial", "Times New Roman", "monospace")
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    fn font_size_px(&self) -> f32 {
        self.font_size as f32 * PT_TO_PX
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 15,
        }
    }
}

/// Measures the rendered size of a label.
///
/// Implementations must be deterministic: measuring the same content with the
/// same definition always yields the same size. The adjustment engine relies on
/// this to reach a fixed point.
pub trait TextMeasure: fmt::Debug {
    /// Returns the size `content` occupies when rendered with `definition`.
    ///
    /// Empty content measures as [`Size::default`].
    fn measure(&self, content: &str, definition: &TextDefinition) -> Size;
}

/// Measures text with cosmic-text shaping against the system fonts.
///
/// Falls back to the fixed-advance estimate when no installed font can shape
/// the content.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapedTextMeasure;

impl TextMeasure for ShapedTextMeasure {
    fn measure(&self, content: &str, definition: &TextDefinition) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(content, definition)
    }
}

/// Estimates text size from its character count.
///
/// Every character advances by `0.55 × font size in pixels` and every line is
/// `1.15 × font size in pixels` tall.
///
/// # Examples
///
/// ```
/// # use sequin_core::draw::{EstimatedTextMeasure, TextDefinition, TextMeasure};
/// let definition = TextDefinition::new();
/// let short = EstimatedTextMeasure.measure("ab", &definition);
/// let long = EstimatedTextMeasure.measure("abcd", &definition);
/// assert!(long.width() > short.width());
/// assert_eq!(long.height(), short.height());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimatedTextMeasure;

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, content: &str, definition: &TextDefinition) -> Size {
        if content.is_empty() {
            return Size::default();
        }

        let font_size_px = definition.font_size_px();
        let widest = content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = content.lines().count().max(1);

        Size::new(
            widest as f32 * font_size_px * ESTIMATED_ADVANCE,
            lines as f32 * font_size_px * LINE_HEIGHT_FACTOR,
        )
    }
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    /// Create a new TextManager with a default FontSystem
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the actual size of text in pixels using cosmic-text.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = text_def.font_size_px();
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        // Unlimited size so that text flows naturally on its own lines
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            return EstimatedTextMeasure.measure(text, text_def);
        }

        for last in layout_runs.iter().map(|run| run.glyphs.last()) {
            if let Some(last) = last {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            return EstimatedTextMeasure.measure(text, text_def);
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 15);
        assert_eq!(def.font_family(), "Arial");
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_size(24);
        def.set_font_family("monospace");

        assert_eq!(def.font_size(), 24);
        assert_eq!(def.font_family(), "monospace");
    }

    #[test]
    fn test_estimated_measure_empty() {
        let size = EstimatedTextMeasure.measure("", &TextDefinition::new());
        assert_eq!(size, Size::default());
    }

    #[test]
    fn test_estimated_measure_single_line() {
        let mut def = TextDefinition::new();
        def.set_font_size(10);

        let size = EstimatedTextMeasure.measure("hello", &def);
        // 5 chars * 13.3px * 0.55
        assert_approx_eq!(f32, size.width(), 5.0 * 13.3 * 0.55, epsilon = 0.001);
        assert_approx_eq!(f32, size.height(), 13.3 * 1.15, epsilon = 0.001);
    }

    #[test]
    fn test_estimated_measure_multiline_uses_widest_line() {
        let def = TextDefinition::new();
        let single = EstimatedTextMeasure.measure("abcdef", &def);
        let multi = EstimatedTextMeasure.measure("abc\nabcdef", &def);

        assert_approx_eq!(f32, multi.width(), single.width());
        assert_approx_eq!(f32, multi.height(), single.height() * 2.0, epsilon = 0.001);
    }

    #[test]
    fn test_estimated_measure_counts_chars_not_bytes() {
        let def = TextDefinition::new();
        let ascii = EstimatedTextMeasure.measure("ab", &def);
        let accented = EstimatedTextMeasure.measure("éè", &def);
        assert_approx_eq!(f32, ascii.width(), accented.width());
    }

    #[test]
    fn test_shaped_measure_empty() {
        let size = ShapedTextMeasure.measure("", &TextDefinition::new());
        assert_eq!(size, Size::default());
    }

    #[test]
    fn test_shaped_measure_grows_with_content() {
        let def = TextDefinition::new();
        let short = ShapedTextMeasure.measure("ping", &def);
        let long = ShapedTextMeasure.measure("ping ping ping ping", &def);

        assert!(short.width() > 0.0);
        assert!(
            long.width() > short.width(),
            "Longer text ({}) should be wider than shorter text ({})",
            long.width(),
            short.width()
        );
    }

    #[test]
    fn test_shaped_measure_is_deterministic() {
        let def = TextDefinition::new();
        let first = ShapedTextMeasure.measure("Backend", &def);
        let second = ShapedTextMeasure.measure("Backend", &def);
        assert_eq!(first, second);
    }
}
