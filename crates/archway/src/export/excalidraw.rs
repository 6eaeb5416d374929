//! Whiteboard scene synthesis.
//!
//! Converts a [`PositionedLayout`] into a [`Document`]: one box and one
//! bound label per group, one shape and one bound label per node, one arrow
//! per connection plus a freestanding text for labelled connections.
//! Elements are emitted groups first, then nodes in tree order, then
//! arrows, so later elements draw above earlier ones.

use log::{debug, info};

use archway_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    style::{ConnectionStyle, FillStyle, GroupStyle, ShapeKind, StrokeStyle},
};

use crate::{
    config::{RenderConfig, StyleConfig},
    document::{
        AppState, ArrowElement, Binding, BoundElement, BoundKind, Document, Element, ElementBase,
        Roundness, ShapeElement, TextAlign, TextElement, VerticalAlign,
    },
    error::ArchwayError,
    export::{Exporter, context::RenderContext},
    layout::{
        PositionedConnection, PositionedGroup, PositionedLayout, PositionedNode,
        positioning::{COMPOSITE_PADDING, text_size},
    },
};

/// Inset of a group label from the group's top-left corner.
const GROUP_LABEL_INSET: f32 = 10.0;

/// Builder for an [`Excalidraw`] exporter.
#[derive(Debug, Default)]
pub struct ExcalidrawBuilder {
    render: RenderConfig,
    style: StyleConfig,
    context: Option<RenderContext>,
}

impl ExcalidrawBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render(mut self, render: &RenderConfig) -> Self {
        self.render = render.clone();
        self
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Uses `context` for ids and jitter instead of deriving one from the
    /// render configuration.
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builds the exporter.
    ///
    /// Without an explicit context, a configured seed yields a reproducible
    /// context with timestamp 0; otherwise a fresh context is created.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError::Config`] if the background color is invalid.
    pub fn build(self) -> Result<Excalidraw, ArchwayError> {
        let background = self.style.background_color()?;
        let context = match (self.context, self.render.seed()) {
            (Some(context), _) => context,
            (None, Some(seed)) => RenderContext::seeded(seed, 0),
            (None, None) => RenderContext::new(),
        };
        Ok(Excalidraw {
            render: self.render,
            background,
            grid_size: self.style.grid_size(),
            context,
        })
    }
}

/// Exporter producing whiteboard scene documents.
#[derive(Debug)]
pub struct Excalidraw {
    render: RenderConfig,
    background: Color,
    grid_size: u32,
    context: RenderContext,
}

impl Excalidraw {
    fn base(&mut self, prefix: &str, bounds: Bounds) -> ElementBase {
        let id = self.context.next_id(prefix);
        let seed = self.context.jitter();
        let nonce = self.context.jitter();
        ElementBase::new(id, bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height())
            .with_roughness(self.render.roughness())
            .with_revision(seed, nonce, self.context.timestamp())
    }

    fn text(
        &mut self,
        content: &str,
        font_size: f32,
        top_left: Point,
        size: Size,
        stroke_color: String,
    ) -> TextElement {
        let base = self
            .base("text", Bounds::new_from_top_left(top_left, size))
            .with_stroke(stroke_color, StrokeStyle::Solid, 1.0);
        TextElement::new(base, content, font_size, self.render.font_family())
    }

    fn render_group(&mut self, group: &PositionedGroup<'_>, elements: &mut Vec<Element>) {
        let style = GroupStyle::for_kind(group.group().kind());
        let bounds = group.bounds();

        let mut shape = self
            .base("rectangle", bounds)
            .with_stroke(
                style.stroke_color().to_hex(),
                style.stroke_style(),
                self.render.stroke_width(),
            )
            .with_fill(style.background_color().to_hex(), FillStyle::Solid);

        let font_size = self.render.label_font_size();
        let label = group.group().label();
        let label_origin = Point::new(
            bounds.min_x() + GROUP_LABEL_INSET,
            bounds.min_y() + GROUP_LABEL_INSET,
        );
        let text = self
            .text(
                label,
                font_size,
                label_origin,
                text_size(label, font_size),
                style.stroke_color().to_hex(),
            )
            .with_alignment(TextAlign::Left, VerticalAlign::Top)
            .with_container(shape.id());

        shape.push_bound_element(BoundElement::new(text.id(), BoundKind::Text));
        elements.push(Element::Rectangle(ShapeElement::new(shape)));
        elements.push(Element::Text(text));
    }

    /// Emits a node's shape and label; returns the shape's index in `elements`.
    fn render_node(&mut self, node: &PositionedNode<'_>, elements: &mut Vec<Element>) -> usize {
        let style = node.style();
        let bounds = node.bounds();
        let shape_kind = style.shape();

        let mut base = self
            .base(shape_kind.as_str(), bounds)
            .with_stroke(
                style.stroke_color().to_hex(),
                style.stroke_style(),
                self.render.stroke_width(),
            )
            .with_fill(style.background_color().to_hex(), style.fill_style())
            .with_roundness(shape_kind.supports_roundness().then_some(Roundness::ADAPTIVE));

        let font_size = self.render.font_size();
        let label_size = node.label_size();
        let (label_origin, vertical_align) = if node.has_children() {
            let top = Point::new(
                bounds.center().x() - label_size.width() / 2.0,
                bounds.min_y() + COMPOSITE_PADDING,
            );
            (top, VerticalAlign::Top)
        } else {
            let centered = Point::new(
                bounds.center().x() - label_size.width() / 2.0,
                bounds.center().y() - label_size.height() / 2.0,
            );
            (centered, VerticalAlign::Middle)
        };
        let text = self
            .text(
                node.node().label(),
                font_size,
                label_origin,
                label_size,
                style.stroke_color().to_hex(),
            )
            .with_alignment(TextAlign::Center, vertical_align)
            .with_container(base.id());

        base.push_bound_element(BoundElement::new(text.id(), BoundKind::Text));
        let shape = ShapeElement::new(base);
        elements.push(match shape_kind {
            ShapeKind::Rectangle => Element::Rectangle(shape),
            ShapeKind::Ellipse => Element::Ellipse(shape),
            ShapeKind::Diamond => Element::Diamond(shape),
        });
        let shape_index = elements.len() - 1;
        elements.push(Element::Text(text));
        shape_index
    }

    fn render_connection(
        &mut self,
        connection: &PositionedConnection<'_>,
        shape_indices: &[usize],
        elements: &mut Vec<Element>,
    ) {
        let semantic = connection.connection();
        let style = ConnectionStyle::for_kind(semantic.kind());
        let route = connection.route();
        let start = route.from_point();
        let delta = route.to_point().sub_point(start);

        let from_shape = shape_indices[connection.from()];
        let to_shape = shape_indices[connection.to()];
        let from_id = elements[from_shape].id().to_string();
        let to_id = elements[to_shape].id().to_string();

        let bounds = Bounds::new_from_top_left(
            start,
            Size::new(delta.x().abs(), delta.y().abs()),
        );
        let base = self.base("arrow", bounds).with_stroke(
            style.stroke_color().to_hex(),
            style.stroke_style(),
            self.render.stroke_width(),
        );
        let arrow = ArrowElement::new(base, vec![[0.0, 0.0], [delta.x(), delta.y()]])
            .with_bindings(Binding::new(from_id), Binding::new(to_id))
            .with_arrowheads(
                style.start_arrowhead(semantic.is_bidirectional()),
                style.end_arrowhead(),
            );
        let arrow_id = arrow.id().to_string();

        elements[from_shape]
            .base_mut()
            .push_bound_element(BoundElement::new(arrow_id.clone(), BoundKind::Arrow));
        if to_shape != from_shape {
            elements[to_shape]
                .base_mut()
                .push_bound_element(BoundElement::new(arrow_id, BoundKind::Arrow));
        }
        elements.push(Element::Arrow(arrow));

        if let (Some(label), Some(position)) = (semantic.label(), connection.label_position()) {
            let font_size = self.render.label_font_size();
            let size = text_size(label, font_size);
            let origin = Point::new(
                position.x() - size.width() / 2.0,
                position.y() - size.height() / 2.0,
            );
            let text = self.text(label, font_size, origin, size, style.stroke_color().to_hex());
            elements.push(Element::Text(text));
        }
    }
}

impl Exporter for Excalidraw {
    type Output = Document;

    fn export_layout(&mut self, layout: &PositionedLayout<'_>) -> Result<Document, ArchwayError> {
        info!(
            nodes_len = layout.nodes().len(),
            connections_len = layout.connections().len();
            "Synthesizing elements",
        );

        let mut elements = Vec::new();

        for group in layout.groups() {
            self.render_group(group, &mut elements);
        }

        let shape_indices: Vec<usize> = layout
            .nodes()
            .iter()
            .map(|node| self.render_node(node, &mut elements))
            .collect();

        for connection in layout.connections() {
            self.render_connection(connection, &shape_indices, &mut elements);
        }

        debug!(elements_len = elements.len(); "Elements synthesized");

        Ok(Document::new(
            self.render.source(),
            elements,
            AppState::new(self.background.to_hex(), self.grid_size),
        ))
    }
}
