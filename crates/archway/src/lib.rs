//! Archway - architecture documents to whiteboard diagrams.
//!
//! Validation, layout and element synthesis for architecture documents: a
//! typed description of components (nodes), their relationships
//! (connections) and optional groups is turned into a fully positioned
//! whiteboard scene [`Document`](document::Document).
//!
//! Schema violations are the only fatal condition. Everything else (dangling
//! references, unknown layout strategies, cyclic dependency graphs) is
//! repaired deterministically and reported through
//! [`Diagnostics`](diagnostic::Diagnostics) next to the produced document.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod export;
pub mod layout;
pub mod routing;
pub mod structure;

mod error;

pub use archway_core::{color, geometry, identifier, semantic, style};
pub use archway_parser::{ArchitectureSource, SchemaError};

pub use error::ArchwayError;
pub use export::context::RenderContext;

use log::{debug, info, trace};

use archway_core::{semantic::Architecture, style::StyleTable};

use config::AppConfig;
use diagnostic::Diagnostics;
use document::Document;
use export::{Exporter, excalidraw::ExcalidrawBuilder};
use layout::PositionedLayout;
use structure::ArchitectureGraph;

/// A rendered document together with the issues repaired on the way.
#[derive(Debug)]
pub struct GeneratedDiagram {
    document: Document,
    diagnostics: Diagnostics,
}

impl GeneratedDiagram {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Document, Diagnostics) {
        (self.document, self.diagnostics)
    }
}

/// Builder for validating, laying out and rendering architecture documents.
///
/// A builder holds configuration only. Every render call creates its own
/// [`RenderContext`], so one builder can serve any number of concurrent
/// requests.
///
/// # Examples
///
/// ```
/// use archway::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [
///         { "id": "u", "type": "actor" },
///         { "id": "s", "type": "service" }
///     ],
///     "connections": [{ "from": "u", "to": "s", "type": "http" }]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default().with_seed(7));
/// let diagram = builder.generate(source).expect("valid document");
///
/// assert!(diagram.diagnostics().is_empty());
/// assert_eq!(diagram.document().elements().len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    styles: StyleTable,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            styles: StyleTable::default(),
        }
    }

    /// Replaces the node style table.
    ///
    /// Node types missing from `styles` render with its fallback style.
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validates a document from any [`ArchitectureSource`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Schema`] listing every schema violation.
    pub fn parse<S: ArchitectureSource>(&self, source: S) -> Result<Architecture, ArchwayError> {
        info!("Validating architecture document");
        let architecture = source.produce()?;
        debug!(
            nodes_len = architecture.nodes().len(),
            connections_len = architecture.connections().len(),
            groups_len = architecture.groups().len();
            "Architecture validated",
        );
        trace!(architecture:?; "Validated architecture");
        Ok(architecture)
    }

    /// Calculates the layout of `architecture`, recording repaired issues in
    /// `diagnostics`.
    ///
    /// `architecture` must have unique node ids, as every document returned
    /// by [`DiagramBuilder::parse`] does. The render methods check this for
    /// models assembled in memory; here a duplicated id resolves to its last
    /// occurrence.
    pub fn layout<'a>(
        &self,
        architecture: &'a Architecture,
        diagnostics: &mut Diagnostics,
    ) -> PositionedLayout<'a> {
        info!("Building dependency graph");
        let graph = ArchitectureGraph::new(architecture, diagnostics);
        layout::calculate(
            &graph,
            self.config.layout(),
            &self.styles,
            self.config.render().font_size(),
            diagnostics,
        )
    }

    /// Lays out and renders `architecture` with a fresh render context.
    ///
    /// The context is reproducible when the configuration fixes a seed.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Schema`] if node or group ids are duplicated,
    /// or [`ArchwayError::Config`] for an invalid configuration.
    pub fn render(&self, architecture: &Architecture) -> Result<GeneratedDiagram, ArchwayError> {
        let exporter = ExcalidrawBuilder::new()
            .with_render(self.config.render())
            .with_style(self.config.style());
        self.render_with(architecture, exporter)
    }

    /// Lays out and renders `architecture` using `context` for element ids
    /// and jitter.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Schema`] if node or group ids are duplicated,
    /// or [`ArchwayError::Config`] for an invalid configuration.
    pub fn render_with_context(
        &self,
        architecture: &Architecture,
        context: RenderContext,
    ) -> Result<GeneratedDiagram, ArchwayError> {
        let exporter = ExcalidrawBuilder::new()
            .with_render(self.config.render())
            .with_style(self.config.style())
            .with_context(context);
        self.render_with(architecture, exporter)
    }

    /// Validates, lays out and renders a document.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Schema`] if the document is invalid, or
    /// [`ArchwayError::Config`] for an invalid configuration.
    pub fn generate<S: ArchitectureSource>(&self, source: S) -> Result<GeneratedDiagram, ArchwayError> {
        let architecture = self.parse(source)?;
        self.render(&architecture)
    }

    fn render_with(
        &self,
        architecture: &Architecture,
        exporter: ExcalidrawBuilder,
    ) -> Result<GeneratedDiagram, ArchwayError> {
        archway_parser::check_uniqueness(architecture)?;
        self.config.validate()?;
        let mut exporter = exporter.build()?;

        let mut diagnostics = Diagnostics::new();
        let layout = self.layout(architecture, &mut diagnostics);
        let document = exporter.export_layout(&layout)?;

        info!(
            elements_len = document.elements().len(),
            diagnostics_len = diagnostics.len();
            "Diagram rendered",
        );
        Ok(GeneratedDiagram {
            document,
            diagnostics,
        })
    }
}
