//! Whiteboard document model.
//!
//! The serialized form follows the Excalidraw scene format: a `type` /
//! `version` / `source` envelope, a flat list of elements and a default
//! view state. Elements reference each other by id only (text containers,
//! bound elements and arrow bindings).

use serde::Serialize;

use archway_core::style::{Arrowhead, FillStyle, StrokeStyle};

use crate::error::ArchwayError;

/// Format tag written to the envelope.
pub const DOCUMENT_TYPE: &str = "excalidraw";

/// Scene format version written to the envelope.
pub const DOCUMENT_VERSION: u32 = 2;

/// Kind of an element listed in another element's `boundElements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundKind {
    Text,
    Arrow,
}

/// Reference from a shape to an element attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundElement {
    id: String,
    #[serde(rename = "type")]
    kind: BoundKind,
}

impl BoundElement {
    pub fn new(id: impl Into<String>, kind: BoundKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> BoundKind {
        self.kind
    }
}

/// Corner rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    kind: u8,
}

impl Roundness {
    /// Radius adapts to the element size.
    pub const ADAPTIVE: Self = Self { kind: 3 };

    pub fn kind(&self) -> u8 {
        self.kind
    }
}

/// Attributes shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    id: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    angle: f32,
    stroke_color: String,
    background_color: String,
    fill_style: FillStyle,
    stroke_width: f32,
    stroke_style: StrokeStyle,
    roughness: u8,
    opacity: u8,
    group_ids: Vec<String>,
    frame_id: Option<String>,
    roundness: Option<Roundness>,
    seed: u32,
    version: u32,
    version_nonce: u32,
    is_deleted: bool,
    bound_elements: Vec<BoundElement>,
    updated: u64,
    link: Option<String>,
    locked: bool,
}

impl ElementBase {
    /// Creates an element with the format's default attributes.
    ///
    /// Colors, stroke and rounding are set with the `with_*` methods.
    pub fn new(id: String, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            angle: 0.0,
            stroke_color: "#1e1e1e".to_string(),
            background_color: "transparent".to_string(),
            fill_style: FillStyle::default(),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::default(),
            roughness: 1,
            opacity: 100,
            group_ids: Vec::new(),
            frame_id: None,
            roundness: None,
            seed: 1,
            version: 1,
            version_nonce: 1,
            is_deleted: false,
            bound_elements: Vec::new(),
            updated: 0,
            link: None,
            locked: false,
        }
    }

    pub fn with_stroke(mut self, color: String, style: StrokeStyle, width: f32) -> Self {
        self.stroke_color = color;
        self.stroke_style = style;
        self.stroke_width = width;
        self
    }

    pub fn with_fill(mut self, color: String, style: FillStyle) -> Self {
        self.background_color = color;
        self.fill_style = style;
        self
    }

    pub fn with_roundness(mut self, roundness: Option<Roundness>) -> Self {
        self.roundness = roundness;
        self
    }

    pub fn with_roughness(mut self, roughness: u8) -> Self {
        self.roughness = roughness;
        self
    }

    /// Sets the sketch seed, the version nonce and the update timestamp.
    pub fn with_revision(mut self, seed: u32, version_nonce: u32, updated: u64) -> Self {
        self.seed = seed;
        self.version_nonce = version_nonce;
        self.updated = updated;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn roundness(&self) -> Option<Roundness> {
        self.roundness
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn bound_elements(&self) -> &[BoundElement] {
        &self.bound_elements
    }

    pub fn push_bound_element(&mut self, bound: BoundElement) {
        self.bound_elements.push(bound);
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// Vertical text alignment inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
}

/// A shape; rectangles, ellipses and diamonds share the same attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeElement {
    #[serde(flatten)]
    base: ElementBase,
}

impl ShapeElement {
    pub fn new(base: ElementBase) -> Self {
        Self { base }
    }
}

/// A text element, either bound to a container or freestanding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    base: ElementBase,
    text: String,
    font_size: f32,
    font_family: u8,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
    container_id: Option<String>,
    original_text: String,
    line_height: f32,
    auto_resize: bool,
}

impl TextElement {
    pub fn new(base: ElementBase, text: impl Into<String>, font_size: f32, font_family: u8) -> Self {
        let text = text.into();
        Self {
            base,
            original_text: text.clone(),
            text,
            font_size,
            font_family,
            text_align: TextAlign::Center,
            vertical_align: VerticalAlign::Middle,
            container_id: None,
            line_height: 1.25,
            auto_resize: true,
        }
    }

    pub fn with_alignment(mut self, text_align: TextAlign, vertical_align: VerticalAlign) -> Self {
        self.text_align = text_align;
        self.vertical_align = vertical_align;
        self
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }
}

/// Attachment of an arrow end to a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    element_id: String,
    focus: f32,
    gap: f32,
}

impl Binding {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            focus: 0.0,
            gap: 0.0,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

/// A straight two-point arrow.
///
/// `x`/`y` hold the start point; `points` are relative to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowElement {
    #[serde(flatten)]
    base: ElementBase,
    points: Vec<[f32; 2]>,
    last_committed_point: Option<[f32; 2]>,
    start_binding: Option<Binding>,
    end_binding: Option<Binding>,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    elbowed: bool,
}

impl ArrowElement {
    pub fn new(base: ElementBase, points: Vec<[f32; 2]>) -> Self {
        Self {
            base,
            points,
            last_committed_point: None,
            start_binding: None,
            end_binding: None,
            start_arrowhead: None,
            end_arrowhead: None,
            elbowed: false,
        }
    }

    pub fn with_bindings(mut self, start: Binding, end: Binding) -> Self {
        self.start_binding = Some(start);
        self.end_binding = Some(end);
        self
    }

    pub fn with_arrowheads(mut self, start: Option<Arrowhead>, end: Option<Arrowhead>) -> Self {
        self.start_arrowhead = start;
        self.end_arrowhead = end;
        self
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    pub fn start_binding(&self) -> Option<&Binding> {
        self.start_binding.as_ref()
    }

    pub fn end_binding(&self) -> Option<&Binding> {
        self.end_binding.as_ref()
    }

    pub fn start_arrowhead(&self) -> Option<Arrowhead> {
        self.start_arrowhead
    }

    pub fn end_arrowhead(&self) -> Option<Arrowhead> {
        self.end_arrowhead
    }
}

/// A drawable element, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rectangle(ShapeElement),
    Ellipse(ShapeElement),
    Diamond(ShapeElement),
    Text(TextElement),
    Arrow(ArrowElement),
}

impl Element {
    pub fn base(&self) -> &ElementBase {
        match self {
            Self::Rectangle(shape) | Self::Ellipse(shape) | Self::Diamond(shape) => &shape.base,
            Self::Text(text) => &text.base,
            Self::Arrow(arrow) => &arrow.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Self::Rectangle(shape) | Self::Ellipse(shape) | Self::Diamond(shape) => {
                &mut shape.base
            }
            Self::Text(text) => &mut text.base,
            Self::Arrow(arrow) => &mut arrow.base,
        }
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    /// The serialized `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::Ellipse(_) => "ellipse",
            Self::Diamond(_) => "diamond",
            Self::Text(_) => "text",
            Self::Arrow(_) => "arrow",
        }
    }

    /// Returns true for rectangles, ellipses and diamonds.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Rectangle(_) | Self::Ellipse(_) | Self::Diamond(_))
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&ArrowElement> {
        match self {
            Self::Arrow(arrow) => Some(arrow),
            _ => None,
        }
    }
}

/// Zoom level of the initial view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zoom {
    value: f32,
}

/// Initial view state of the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    view_background_color: String,
    grid_size: u32,
    scroll_x: f32,
    scroll_y: f32,
    zoom: Zoom,
}

impl AppState {
    pub fn new(view_background_color: String, grid_size: u32) -> Self {
        Self {
            view_background_color,
            grid_size,
            scroll_x: 0.0,
            scroll_y: 0.0,
            zoom: Zoom { value: 1.0 },
        }
    }

    pub fn view_background_color(&self) -> &str {
        &self.view_background_color
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }
}

/// The document envelope handed to whiteboard consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type")]
    kind: &'static str,
    version: u32,
    source: String,
    elements: Vec<Element>,
    app_state: AppState,
    files: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(source: impl Into<String>, elements: Vec<Element>, app_state: AppState) -> Self {
        Self {
            kind: DOCUMENT_TYPE,
            version: DOCUMENT_VERSION,
            source: source.into(),
            elements,
            app_state,
            files: serde_json::Map::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ArchwayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ArchwayError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(id: &str) -> Element {
        Element::Rectangle(ShapeElement::new(ElementBase::new(
            id.to_string(),
            10.0,
            20.0,
            160.0,
            80.0,
        )))
    }

    #[test]
    fn test_element_serializes_type_tag_and_camel_case() {
        let value = serde_json::to_value(rectangle("rectangle_0_1")).unwrap();

        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["id"], "rectangle_0_1");
        assert_eq!(value["strokeColor"], "#1e1e1e");
        assert_eq!(value["fillStyle"], "solid");
        assert_eq!(value["isDeleted"], false);
        assert!(value["roundness"].is_null());
        assert_eq!(value["boundElements"], serde_json::json!([]));
    }

    #[test]
    fn test_text_defaults_to_centered() {
        let text = TextElement::new(
            ElementBase::new("text_0_2".to_string(), 0.0, 0.0, 36.0, 25.0),
            "API",
            20.0,
            1,
        )
        .with_container("rectangle_0_1");
        let value = serde_json::to_value(Element::Text(text)).unwrap();

        assert_eq!(value["type"], "text");
        assert_eq!(value["textAlign"], "center");
        assert_eq!(value["verticalAlign"], "middle");
        assert_eq!(value["containerId"], "rectangle_0_1");
        assert_eq!(value["originalText"], "API");
    }

    #[test]
    fn test_arrow_serializes_bindings_and_arrowheads() {
        let arrow = ArrowElement::new(
            ElementBase::new("arrow_0_3".to_string(), 0.0, 0.0, 0.0, 100.0),
            vec![[0.0, 0.0], [0.0, 100.0]],
        )
        .with_bindings(Binding::new("a"), Binding::new("b"))
        .with_arrowheads(None, Some(Arrowhead::Arrow));
        let value = serde_json::to_value(Element::Arrow(arrow)).unwrap();

        assert_eq!(value["startBinding"]["elementId"], "a");
        assert_eq!(value["endBinding"]["elementId"], "b");
        assert!(value["startArrowhead"].is_null());
        assert_eq!(value["endArrowhead"], "arrow");
        assert_eq!(value["points"], serde_json::json!([[0.0, 0.0], [0.0, 100.0]]));
    }

    #[test]
    fn test_document_envelope() {
        let document = Document::new(
            "archway",
            vec![rectangle("rectangle_0_1")],
            AppState::new("#ffffff".to_string(), 20),
        );
        let value = document.to_value().unwrap();

        assert_eq!(value["type"], DOCUMENT_TYPE);
        assert_eq!(value["version"], 2);
        assert_eq!(value["source"], "archway");
        assert_eq!(value["appState"]["viewBackgroundColor"], "#ffffff");
        assert_eq!(value["appState"]["gridSize"], 20);
        assert_eq!(value["appState"]["zoom"]["value"], 1.0);
        assert_eq!(value["files"], serde_json::json!({}));
        assert!(document.element("rectangle_0_1").is_some());
    }
}
