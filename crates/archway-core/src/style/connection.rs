//! Per-type connection styles.

use crate::{
    color::Color,
    semantic::ConnectionKind,
    style::{
        node::palette,
        stroke::{Arrowhead, StrokeStyle},
    },
};

/// Visual definition of one connection type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionStyle {
    stroke_color: Color,
    stroke_style: StrokeStyle,
    end_arrowhead: Option<Arrowhead>,
}

impl ConnectionStyle {
    fn new(stroke_color: Color, stroke_style: StrokeStyle, end_arrowhead: Option<Arrowhead>) -> Self {
        Self {
            stroke_color,
            stroke_style,
            end_arrowhead,
        }
    }

    /// The style of `kind`.
    ///
    /// ```
    /// # use archway_core::{semantic::ConnectionKind, style::{ConnectionStyle, StrokeStyle}};
    /// let style = ConnectionStyle::for_kind(ConnectionKind::Async);
    /// assert_eq!(style.stroke_style(), StrokeStyle::Dashed);
    /// assert!(ConnectionStyle::for_kind(ConnectionKind::None).end_arrowhead().is_none());
    /// ```
    pub fn for_kind(kind: ConnectionKind) -> Self {
        let arrow = Some(Arrowhead::Arrow);
        match kind {
            ConnectionKind::Http => Self::new(palette("#1971c2"), StrokeStyle::Solid, arrow),
            ConnectionKind::Async => Self::new(palette("#e8590c"), StrokeStyle::Dashed, arrow),
            ConnectionKind::Query => Self::new(palette("#2f9e44"), StrokeStyle::Solid, arrow),
            ConnectionKind::Sync => Self::new(palette("#1e1e1e"), StrokeStyle::Solid, arrow),
            ConnectionKind::DataFlow => Self::new(palette("#6741d9"), StrokeStyle::Dotted, arrow),
            ConnectionKind::None => Self::new(palette("#868e96"), StrokeStyle::Solid, None),
        }
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn end_arrowhead(&self) -> Option<Arrowhead> {
        self.end_arrowhead
    }

    /// Arrowhead at the source end. Only bidirectional connections get one,
    /// mirroring the end marker.
    pub fn start_arrowhead(&self, bidirectional: bool) -> Option<Arrowhead> {
        if bidirectional {
            self.end_arrowhead
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_flow_is_dotted() {
        let style = ConnectionStyle::for_kind(ConnectionKind::DataFlow);
        assert_eq!(style.stroke_style(), StrokeStyle::Dotted);
        assert_eq!(style.stroke_color().to_hex(), "#6741d9");
    }

    #[test]
    fn test_bidirectional_mirrors_end_arrowhead() {
        let http = ConnectionStyle::for_kind(ConnectionKind::Http);
        assert_eq!(http.start_arrowhead(false), None);
        assert_eq!(http.start_arrowhead(true), Some(Arrowhead::Arrow));

        let none = ConnectionStyle::for_kind(ConnectionKind::None);
        assert_eq!(none.start_arrowhead(true), None);
    }
}
