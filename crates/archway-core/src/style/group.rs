//! Per-type group box styles.

use crate::{
    color::Color,
    semantic::GroupKind,
    style::{node::palette, stroke::StrokeStyle},
};

/// Outline of a group box. Group boxes are never filled.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStyle {
    stroke_color: Color,
    stroke_style: StrokeStyle,
}

impl GroupStyle {
    pub fn for_kind(kind: GroupKind) -> Self {
        let stroke_style = match kind {
            GroupKind::Layer => StrokeStyle::Solid,
            GroupKind::Boundary => StrokeStyle::Dashed,
            GroupKind::Cluster => StrokeStyle::Dotted,
        };
        Self {
            stroke_color: palette("#868e96"),
            stroke_style,
        }
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn background_color(&self) -> Color {
        palette("transparent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_stroke_by_kind() {
        assert_eq!(GroupStyle::for_kind(GroupKind::Layer).stroke_style(), StrokeStyle::Solid);
        assert_eq!(GroupStyle::for_kind(GroupKind::Boundary).stroke_style(), StrokeStyle::Dashed);
        assert_eq!(GroupStyle::for_kind(GroupKind::Cluster).stroke_style(), StrokeStyle::Dotted);
        assert_eq!(GroupStyle::for_kind(GroupKind::Layer).background_color().to_hex(), "transparent");
    }
}
