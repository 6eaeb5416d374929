//! Grid layout engine
//!
//! Rank-free: nodes fill a near-square grid row by row in input order.
//! Every cell is as large as the largest node, and each node is centered in
//! its cell. Direction does not apply.

use archway_core::geometry::{Point, Size};

use crate::{
    config::SpacingConfig,
    diagnostic::Diagnostics,
    layout::engines::{Arrangement, ComponentEngine},
    structure::ArchitectureGraph,
};

pub struct Engine {
    spacing: SpacingConfig,
    padding: f32,
}

impl Engine {
    pub fn new(spacing: SpacingConfig, padding: f32) -> Self {
        Self { spacing, padding }
    }
}

/// Columns and rows of the grid for `count` nodes.
///
/// Columns are `ceil(sqrt(count))` and rows `ceil(count / columns)`.
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let columns = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(columns);
    (columns, rows)
}

impl ComponentEngine for Engine {
    fn arrange(
        &self,
        _graph: &ArchitectureGraph<'_>,
        sizes: &[Size],
        _diagnostics: &mut Diagnostics,
    ) -> Arrangement {
        let (columns, _) = grid_shape(sizes.len());
        let cell = sizes.iter().fold(Size::default(), |cell, size| cell.max(*size));

        let positions = sizes
            .iter()
            .enumerate()
            .map(|(idx, size)| {
                let column = (idx % columns) as f32;
                let row = (idx / columns) as f32;
                Point::new(
                    self.padding
                        + column * (cell.width() + self.spacing.node())
                        + (cell.width() - size.width()) / 2.0,
                    self.padding
                        + row * (cell.height() + self.spacing.rank())
                        + (cell.height() - size.height()) / 2.0,
                )
            })
            .collect();

        let rows = (0..sizes.len())
            .collect::<Vec<_>>()
            .chunks(columns.max(1))
            .map(<[usize]>::to_vec)
            .collect();

        Arrangement::new(positions, rows)
    }
}
