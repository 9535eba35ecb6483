//! Sequin - Placement and auto-adjustment engine for sequence diagrams.
//!
//! Sequin turns an ordered list of actors and an ordered list of signals
//! exchanged between them into a 2-D layout, then repairs that layout so that
//! variable-width labels never overlap neighbouring actors or life lines.
//!
//! Layout happens in two explicit passes:
//!
//! 1. **Placement** puts every actor at a fixed pitch and every signal at a
//!    fixed vertical offset, synthesizing actors created by signals and ending
//!    the life lines of destroyed ones.
//! 2. **Adjustment** grows actor boxes to fit their names, restores the
//!    minimum gap between boxes and moves actors right until no signal label
//!    straddles a life line.
//!
//! The result is a [`DiagramState`] holding all geometry explicitly. It can be
//! inspected, described, or drawn on any [`Surface`](draw::Surface).

pub mod config;
pub mod element;
pub mod input;
pub mod model;

mod describe;
mod error;
mod layout;
mod render;
mod state;

pub use sequin_core::{color, draw, geometry, identifier};

pub use error::{LayoutIssue, SequinError};
pub use state::DiagramState;

use std::{fs, path::Path};

use log::{debug, info, trace};

use sequin_core::draw::{Surface, SvgSurface, TextDefinition, TextMeasure};

use config::AppConfig;
use describe::StateDescription;
use input::InputDocument;
use layout::{adjust, placement::Placement};
use model::{Actor, Signal};

/// Lays out, adjusts and renders sequence diagrams.
///
/// # Examples
///
/// ```
/// use sequin::{
///     LayoutEngine,
///     config::{AppConfig, LayoutConfig, Measurement, TextConfig},
///     model::{Actor, Signal},
/// };
///
/// let config = AppConfig::new(
///     LayoutConfig::default(),
///     TextConfig::default().with_measurement(Measurement::Estimated),
/// );
/// let engine = LayoutEngine::new(config);
///
/// let actors = [Actor::new("Client"), Actor::new("Server")];
/// let signals = [Signal::new("Client", "Server", "GET /index.html")];
///
/// let mut state = engine.layout(&actors, &signals);
/// engine.adjust(&mut state);
///
/// let server = state.actor_by_name("Server").unwrap();
/// let label = state.signals()[0].label().bounds();
/// assert!(label.max_x() < server.line_x());
///
/// let svg = engine.render_svg(&state).unwrap();
/// assert!(svg.contains("GET /index.html"));
/// ```
#[derive(Debug)]
pub struct LayoutEngine {
    config: AppConfig,
    text: TextDefinition,
    measure: Box<dyn TextMeasure>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl LayoutEngine {
    /// Creates a new engine with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout dimensions and label text settings
    pub fn new(config: AppConfig) -> Self {
        let text = config.text().text_definition();
        let measure = config.text().measure();
        Self {
            config,
            text,
            measure,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Places actors and signals, producing the first-draft layout.
    ///
    /// Signals that cannot be drawn are skipped and reported in
    /// [`DiagramState::issues`]. The returned state is not adjusted yet; call
    /// [`LayoutEngine::adjust`] to remove label overlaps.
    pub fn layout(&self, actors: &[Actor], signals: &[Signal]) -> DiagramState {
        self.place(actors, signals.iter().enumerate(), Vec::new())
    }

    /// Adjusts a placed diagram until no label overlaps a life line.
    ///
    /// Adjustment only moves actors right and is idempotent: adjusting an
    /// already adjusted state changes nothing.
    pub fn adjust(&self, state: &mut DiagramState) {
        let outcome = adjust::adjust(state, self.config.layout());
        debug!(
            sweeps = outcome.sweeps,
            converged = outcome.converged;
            "Adjustment finished"
        );
        trace!(state:?; "Adjusted state");
    }

    /// Returns a printable summary of every actor, signal and issue.
    pub fn describe_state(&self, state: &DiagramState) -> String {
        StateDescription::new(state).to_string()
    }

    /// Parses a TOML input document, lays it out and adjusts it.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Input`] if the document cannot be parsed.
    /// Unreadable signal records are reported as issues instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin::LayoutEngine;
    ///
    /// let engine = LayoutEngine::default();
    /// let state = engine
    ///     .layout_document(
    ///         r#"
    ///         [[actors]]
    ///         name = "A"
    ///
    ///         [[actors]]
    ///         name = "B"
    ///
    ///         [[signals]]
    ///         from = "A"
    ///         to = "B"
    ///         message = "hi"
    ///         "#,
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(state.signals().len(), 1);
    /// ```
    pub fn layout_document(&self, content: &str) -> Result<DiagramState, SequinError> {
        info!("Laying out input document");
        let (actors, signals, issues) = InputDocument::from_toml_str(content)?.into_parts();

        let mut state = self.place(
            &actors,
            signals.iter().map(|(index, signal)| (*index, signal)),
            issues,
        );
        self.adjust(&mut state);
        Ok(state)
    }

    /// Draws `state` on a surface.
    pub fn render<S: Surface>(&self, state: &DiagramState, surface: &mut S) {
        render::render(state, surface);
    }

    /// Renders `state` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Export`] if the state has no actors.
    pub fn render_svg(&self, state: &DiagramState) -> Result<String, SequinError> {
        if state.actors().is_empty() {
            return Err(SequinError::Export(
                "diagram has no actors to render".to_string(),
            ));
        }

        let mut surface = SvgSurface::new(self.text.clone(), self.config.text().measure());
        self.render(state, &mut surface);

        info!(primitives_count = surface.len(); "SVG rendered");
        Ok(surface.render())
    }

    /// Renders `state` to an SVG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Export`] if the state has no actors and
    /// [`SequinError::Io`] if the file cannot be written.
    pub fn write_svg(&self, state: &DiagramState, path: impl AsRef<Path>) -> Result<(), SequinError> {
        let path = path.as_ref();
        let svg = self.render_svg(state)?;
        fs::write(path, svg)?;

        info!(path = path.display().to_string(); "SVG written");
        Ok(())
    }

    fn place<'s>(
        &self,
        actors: &[Actor],
        signals: impl IntoIterator<Item = (usize, &'s Signal)>,
        issues: Vec<LayoutIssue>,
    ) -> DiagramState {
        info!(actors_count = actors.len(); "Placing diagram");

        let mut placement = Placement::new(self.config.layout(), &self.text, self.measure.as_ref());
        placement.report_all(issues);
        placement.place_actors(actors);
        for (index, signal) in signals {
            placement.place_signal(index, signal);
        }

        let state = placement.finish();
        trace!(state:?; "Placed state");
        state
    }
}
