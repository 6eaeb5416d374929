//! Node measurement and rank placement.
//!
//! Sizes are computed bottom-up: a leaf takes the default size of its type,
//! a composite node grows until its label band and vertically stacked
//! children fit. Positions are assigned top-down: the layout engine places
//! top-level nodes, then each composite node stacks its children inside its
//! own rectangle.

use std::collections::HashSet;

use archway_core::{
    geometry::{Bounds, Point, Size},
    semantic::Direction,
    style::{NodeStyle, StyleTable},
};

use crate::{
    config::SpacingConfig,
    diagnostic::{Diagnostics, WarningCode},
    structure::ArchitectureGraph,
};

/// Padding inside a composite node, around its label band and children.
pub const COMPOSITE_PADDING: f32 = 20.0;

/// Line height relative to font size.
pub const LINE_HEIGHT: f32 = 1.25;

/// Average glyph advance relative to font size.
const GLYPH_WIDTH: f32 = 0.6;

/// Estimates the rendered size of `text`.
///
/// The estimate depends only on character counts, so output never varies
/// with the fonts installed on a machine.
///
/// ```
/// # use archway::layout::positioning::text_size;
/// let size = text_size("API\nGateway", 20.0);
/// assert_eq!(size.width(), 7.0 * 0.6 * 20.0);
/// assert_eq!(size.height(), 2.0 * 1.25 * 20.0);
/// ```
pub fn text_size(text: &str, font_size: f32) -> Size {
    let lines = text.split('\n');
    let (count, longest) = lines.fold((0usize, 0usize), |(count, longest), line| {
        (count + 1, longest.max(line.chars().count()))
    });
    Size::new(
        longest as f32 * GLYPH_WIDTH * font_size,
        count as f32 * LINE_HEIGHT * font_size,
    )
}

/// Size, style and label size of every node, indexed like
/// [`ArchitectureGraph::entries`].
#[derive(Debug)]
pub struct NodeMetrics {
    sizes: Vec<Size>,
    styles: Vec<NodeStyle>,
    label_sizes: Vec<Size>,
    children: Vec<Vec<usize>>,
}

impl NodeMetrics {
    /// Measures every node of `graph`.
    ///
    /// A node type missing from `styles` uses the fallback style; one
    /// diagnostic is recorded per missing type.
    pub fn measure(
        graph: &ArchitectureGraph<'_>,
        styles: &StyleTable,
        font_size: f32,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let entries = graph.entries();

        let mut children = vec![Vec::new(); entries.len()];
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(parent) = entry.parent() {
                children[parent].push(idx);
            }
        }

        let mut missing = HashSet::new();
        let node_styles: Vec<NodeStyle> = entries
            .iter()
            .map(|entry| {
                let kind = entry.node().kind();
                match styles.get(kind) {
                    Some(style) => style.clone(),
                    None => {
                        if missing.insert(kind) {
                            diagnostics.emit(
                                WarningCode::W006,
                                format!("no style for node type `{kind}`, using the service style"),
                            );
                        }
                        styles.fallback().clone()
                    }
                }
            })
            .collect();

        let label_sizes: Vec<Size> = entries
            .iter()
            .map(|entry| text_size(entry.node().label(), font_size))
            .collect();

        // Entries are in pre-order, so walking them backwards sizes every
        // child before its parent.
        let mut sizes = vec![Size::default(); entries.len()];
        for idx in (0..entries.len()).rev() {
            let base = node_styles[idx].size();
            sizes[idx] = if children[idx].is_empty() {
                base
            } else {
                let content = children[idx]
                    .iter()
                    .map(|&child| sizes[child])
                    .fold(Size::default(), Size::merge_vertical);
                let gaps = COMPOSITE_PADDING * (children[idx].len() - 1) as f32;
                let label = label_sizes[idx];

                let width = (content.width() + 2.0 * COMPOSITE_PADDING)
                    .max(label.width() + 2.0 * COMPOSITE_PADDING);
                let height = label.height() + content.height() + gaps + 3.0 * COMPOSITE_PADDING;
                base.max(Size::new(width, height))
            };
        }

        Self {
            sizes,
            styles: node_styles,
            label_sizes,
            children,
        }
    }

    pub fn size(&self, entry: usize) -> Size {
        self.sizes[entry]
    }

    pub fn style(&self, entry: usize) -> &NodeStyle {
        &self.styles[entry]
    }

    pub fn label_size(&self, entry: usize) -> Size {
        self.label_sizes[entry]
    }

    /// Entry indices of the direct children of `entry`, in input order.
    pub fn children(&self, entry: usize) -> &[usize] {
        &self.children[entry]
    }

    /// Positions every nested node given the bounds of the top-level ones.
    ///
    /// `bounds` is indexed by entry; top-level entries must already be set.
    /// Children are stacked top to bottom below their parent's label band
    /// and centered horizontally.
    pub fn place_children(&self, bounds: &mut [Bounds]) {
        for parent in 0..bounds.len() {
            let children = &self.children[parent];
            if children.is_empty() {
                continue;
            }

            let parent_bounds = bounds[parent];
            let center_x = parent_bounds.center().x();
            let mut y = parent_bounds.min_y()
                + COMPOSITE_PADDING
                + self.label_sizes[parent].height()
                + COMPOSITE_PADDING;

            for &child in children {
                let size = self.sizes[child];
                bounds[child] =
                    Bounds::new_from_top_left(Point::new(center_x - size.width() / 2.0, y), size);
                y += size.height() + COMPOSITE_PADDING;
            }
        }
    }
}

/// Places ranked nodes and returns the top-left corner of each.
///
/// `ranks` holds indices into `sizes`. Ranks are stacked along the rank axis
/// of `direction`; inside a rank, nodes are laid out along the cross axis and
/// the rank is centered on the canvas midline. Each node is centered inside
/// its rank band. `BT` and `RL` put the first rank farthest from the origin.
pub fn place_ranks(
    ranks: &[Vec<usize>],
    sizes: &[Size],
    direction: Direction,
    spacing: SpacingConfig,
    padding: f32,
) -> Vec<Point> {
    let vertical = direction.is_vertical();
    let along = |size: Size| if vertical { size.height() } else { size.width() };
    let across = |size: Size| if vertical { size.width() } else { size.height() };

    let thickness: Vec<f32> = ranks
        .iter()
        .map(|rank| rank.iter().map(|&idx| along(sizes[idx])).fold(0.0, f32::max))
        .collect();
    let extents: Vec<f32> = ranks
        .iter()
        .map(|rank| {
            let total: f32 = rank.iter().map(|&idx| across(sizes[idx])).sum();
            total + spacing.node() * rank.len().saturating_sub(1) as f32
        })
        .collect();
    let max_extent = extents.iter().copied().fold(0.0, f32::max);

    let mut band_starts = vec![0.0; ranks.len()];
    let mut cursor = padding;
    let order: Box<dyn Iterator<Item = usize>> = if direction.is_reversed() {
        Box::new((0..ranks.len()).rev())
    } else {
        Box::new(0..ranks.len())
    };
    for rank_idx in order {
        band_starts[rank_idx] = cursor;
        cursor += thickness[rank_idx] + spacing.rank();
    }

    let mut positions = vec![Point::default(); sizes.len()];
    for (rank_idx, rank) in ranks.iter().enumerate() {
        let mut cross = padding + (max_extent - extents[rank_idx]) / 2.0;
        for &idx in rank {
            let size = sizes[idx];
            let main = band_starts[rank_idx] + (thickness[rank_idx] - along(size)) / 2.0;
            positions[idx] = if vertical {
                Point::new(cross, main)
            } else {
                Point::new(main, cross)
            };
            cross += across(size) + spacing.node();
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use archway_core::semantic::{Architecture, LayoutSpec, Node, NodeKind};
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_size_counts_longest_line() {
        let size = text_size("ab\nabcd\n", 10.0);
        assert_approx_eq!(f32, size.width(), 24.0);
        assert_approx_eq!(f32, size.height(), 37.5);
    }

    #[test]
    fn test_place_ranks_top_to_bottom_centers_ranks() {
        let sizes = vec![Size::new(100.0, 40.0), Size::new(50.0, 40.0), Size::new(50.0, 60.0)];
        let ranks = vec![vec![0], vec![1, 2]];
        let spacing = SpacingConfig::new(10.0, 30.0);

        let positions = place_ranks(&ranks, &sizes, Direction::TB, spacing, 5.0);

        // The second rank is 110 wide, so the first is shifted by half the difference.
        assert_eq!(positions[0], Point::new(10.0, 5.0));
        // Second band starts after 40 + 30; node 1 is centered in the 60 high band.
        assert_eq!(positions[1], Point::new(5.0, 85.0));
        assert_eq!(positions[2], Point::new(65.0, 75.0));
    }

    #[test]
    fn test_place_ranks_narrow_rank_is_centered() {
        let sizes = vec![Size::new(40.0, 40.0), Size::new(40.0, 40.0), Size::new(40.0, 40.0)];
        let ranks = vec![vec![0], vec![1, 2]];
        let positions = place_ranks(&ranks, &sizes, Direction::TB, SpacingConfig::new(20.0, 20.0), 0.0);

        // Widest rank spans 100; the single node sits in its middle.
        assert_eq!(positions[0].x(), 30.0);
        assert_eq!(positions[1].x(), 0.0);
        assert_eq!(positions[2].x(), 60.0);
    }

    #[test]
    fn test_place_ranks_reversed_and_horizontal() {
        let sizes = vec![Size::new(40.0, 20.0), Size::new(40.0, 20.0)];
        let ranks = vec![vec![0], vec![1]];
        let spacing = SpacingConfig::new(0.0, 10.0);

        let bt = place_ranks(&ranks, &sizes, Direction::BT, spacing, 0.0);
        assert!(bt[0].y() > bt[1].y());

        let lr = place_ranks(&ranks, &sizes, Direction::LR, spacing, 0.0);
        assert_eq!(lr[0], Point::new(0.0, 0.0));
        assert_eq!(lr[1], Point::new(50.0, 0.0));

        let rl = place_ranks(&ranks, &sizes, Direction::RL, spacing, 0.0);
        assert_eq!(rl[0], Point::new(50.0, 0.0));
        assert_eq!(rl[1], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_composite_grows_to_fit_children() {
        let architecture = Architecture::new(
            vec![Node::new("platform", NodeKind::Service, "Platform").with_children(vec![
                Node::new("auth", NodeKind::Service, "Auth"),
                Node::new("db", NodeKind::Database, "DB"),
            ])],
            Vec::new(),
            Vec::new(),
            LayoutSpec::default(),
        );
        let mut diagnostics = Diagnostics::new();
        let graph = ArchitectureGraph::new(&architecture, &mut diagnostics);
        let metrics = NodeMetrics::measure(&graph, &StyleTable::default(), 20.0, &mut diagnostics);

        let parent = metrics.size(0);
        // Widest child (160) plus padding on both sides.
        assert_approx_eq!(f32, parent.width(), 200.0);
        // Label band (25) + children (80 + 90) + one gap + three paddings.
        assert_approx_eq!(f32, parent.height(), 25.0 + 170.0 + 20.0 + 60.0);
        assert_eq!(metrics.children(0), &[1, 2]);

        let mut bounds = vec![Bounds::default(); 3];
        bounds[0] = Bounds::new_from_top_left(Point::new(0.0, 0.0), parent);
        metrics.place_children(&mut bounds);

        assert_approx_eq!(f32, bounds[1].min_y(), 65.0);
        assert_approx_eq!(f32, bounds[1].center().x(), 100.0);
        assert_approx_eq!(f32, bounds[2].min_y(), 165.0);
        assert!(bounds[2].max_y() <= bounds[0].max_y());
    }

    #[test]
    fn test_missing_style_falls_back_once_per_type() {
        let architecture = Architecture::new(
            vec![
                Node::new("a", NodeKind::Cache, "A"),
                Node::new("b", NodeKind::Cache, "B"),
            ],
            Vec::new(),
            Vec::new(),
            LayoutSpec::default(),
        );
        let mut diagnostics = Diagnostics::new();
        let graph = ArchitectureGraph::new(&architecture, &mut diagnostics);
        let metrics = NodeMetrics::measure(&graph, &StyleTable::empty(), 20.0, &mut diagnostics);

        assert_eq!(metrics.style(1), StyleTable::empty().fallback());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.contains(WarningCode::W006));
    }
}
