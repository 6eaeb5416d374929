//! Configuration types for Archway diagram generation.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, rendered and styled. All types implement
//! [`serde::Deserialize`] for loading from external sources; every section
//! and field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Canvas padding, per-strategy spacing, label placement.
//! - [`RenderConfig`] - Font, stroke and jitter settings of emitted elements.
//! - [`StyleConfig`] - Document-level view state such as background color.
//!
//! # Example
//!
//! ```
//! # use archway::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.layout().canvas_padding(), 50.0);
//! ```

use serde::Deserialize;

use archway_core::{color::Color, semantic::LayoutKind};

use crate::ArchwayError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, render: RenderConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            render,
            style,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a copy with the jitter seed fixed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.render.seed = Some(seed);
        self
    }

    /// Checks values that deserialization alone cannot reject.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Config`] for an unparsable color or a negative
    /// or non-finite length.
    pub fn validate(&self) -> Result<(), ArchwayError> {
        self.style.background_color()?;

        let lengths = [
            ("layout.canvas_padding", self.layout.canvas_padding),
            ("layout.label_offset", self.layout.label_offset),
            ("layout.hierarchical.node", self.layout.hierarchical.node),
            ("layout.hierarchical.rank", self.layout.hierarchical.rank),
            ("layout.layered.node", self.layout.layered.node),
            ("layout.layered.rank", self.layout.layered.rank),
            ("layout.grid.node", self.layout.grid.node),
            ("layout.grid.rank", self.layout.grid.rank),
            ("render.font_size", self.render.font_size),
            ("render.label_font_size", self.render.label_font_size),
            ("render.stroke_width", self.render.stroke_width),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ArchwayError::Config(format!(
                    "`{name}` must be a finite, non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Gaps used by one layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpacingConfig {
    /// Gap between neighbouring nodes inside a rank.
    node: f32,
    /// Gap between consecutive ranks.
    rank: f32,
}

impl SpacingConfig {
    pub fn new(node: f32, rank: f32) -> Self {
        Self { node, rank }
    }

    pub fn node(&self) -> f32 {
        self.node
    }

    pub fn rank(&self) -> f32 {
        self.rank
    }
}

/// Where a connection label sits relative to its arrow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    /// Exactly on the segment midpoint.
    Midpoint,
    /// Beside the midpoint, offset perpendicular to the segment.
    #[default]
    Perpendicular,
}

/// Layout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_padding: f32,
    hierarchical: SpacingConfig,
    layered: SpacingConfig,
    grid: SpacingConfig,
    label_placement: LabelPlacement,
    label_offset: f32,
}

impl LayoutConfig {
    /// Distance between the canvas origin and the first node.
    pub fn canvas_padding(&self) -> f32 {
        self.canvas_padding
    }

    /// Default spacing of a strategy.
    pub fn spacing(&self, kind: LayoutKind) -> SpacingConfig {
        match kind {
            LayoutKind::Hierarchical => self.hierarchical,
            LayoutKind::Layered => self.layered,
            LayoutKind::Grid => self.grid,
        }
    }

    pub fn label_placement(&self) -> LabelPlacement {
        self.label_placement
    }

    /// Perpendicular distance between a connection and its label.
    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_padding: 50.0,
            hierarchical: SpacingConfig::new(100.0, 150.0),
            layered: SpacingConfig::new(100.0, 120.0),
            grid: SpacingConfig::new(80.0, 100.0),
            label_placement: LabelPlacement::default(),
            label_offset: 14.0,
        }
    }
}

/// Settings applied to every emitted element.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    font_size: f32,
    label_font_size: f32,
    font_family: u8,
    stroke_width: f32,
    roughness: u8,
    seed: Option<u64>,
    source: String,
}

impl RenderConfig {
    /// Font size of node labels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Font size of group and connection labels.
    pub fn label_font_size(&self) -> f32 {
        self.label_font_size
    }

    pub fn font_family(&self) -> u8 {
        self.font_family
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn roughness(&self) -> u8 {
        self.roughness
    }

    /// Fixed jitter seed. When set, output is reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Value of the document's `source` field.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            label_font_size: 16.0,
            font_family: 1,
            stroke_width: 2.0,
            roughness: 1,
            seed: None,
            source: "archway".to_string(),
        }
    }
}

/// Document-level visual settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    grid_size: u32,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Config`] if the configured string is not a
    /// valid CSS color.
    pub fn background_color(&self) -> Result<Color, ArchwayError> {
        Color::new(&self.background_color)
            .map_err(|err| ArchwayError::Config(format!("Invalid background color in config: {err}")))
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            grid_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing_per_strategy() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.spacing(LayoutKind::Hierarchical), SpacingConfig::new(100.0, 150.0));
        assert_eq!(layout.spacing(LayoutKind::Layered), SpacingConfig::new(100.0, 120.0));
        assert_eq!(layout.spacing(LayoutKind::Grid), SpacingConfig::new(80.0, 100.0));
        assert_eq!(layout.label_placement(), LabelPlacement::Perpendicular);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            canvas_padding = 10.0
            label_placement = "midpoint"

            [layout.grid]
            node = 40.0
            rank = 60.0

            [render]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().canvas_padding(), 10.0);
        assert_eq!(config.layout().label_placement(), LabelPlacement::Midpoint);
        assert_eq!(config.layout().spacing(LayoutKind::Grid), SpacingConfig::new(40.0, 60.0));
        assert_eq!(
            config.layout().spacing(LayoutKind::Hierarchical),
            SpacingConfig::new(100.0, 150.0)
        );
        assert_eq!(config.render().seed(), Some(7));
        assert_eq!(config.render().font_size(), 20.0);
        assert_eq!(config.style().grid_size(), 20);
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig = toml::from_str("[style]\nbackground_color = \"nope\"").unwrap();
        assert!(matches!(config.validate(), Err(ArchwayError::Config(_))));
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let config: AppConfig = toml::from_str("[layout.layered]\nnode = -1.0\nrank = 5.0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.layered.node"));
    }

    #[test]
    fn test_with_seed() {
        let config = AppConfig::default().with_seed(42);
        assert_eq!(config.render().seed(), Some(42));
    }
}
