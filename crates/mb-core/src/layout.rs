//! Grid auto-arrangement.
//!
//! Items are laid out row-major in fixed-footprint cells. The footprint is
//! independent of each item's current size; only positions change.

use crate::model::{Point, Size};

/// A row-major grid anchored at the center of its first cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub origin: Point,
    pub cell: Size,
    pub columns: usize,
}

impl GridSpec {
    /// Fit as many whole cells as the container allows, never fewer than one.
    pub fn fit(container_width: f32, origin: Point, cell: Size) -> Self {
        Self {
            origin,
            cell,
            columns: columns_for(container_width, cell.width),
        }
    }

    /// `(row, col)` of the `index`-th item.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Center of the `index`-th cell.
    pub fn position(&self, index: usize) -> Point {
        grid_position(index, self.columns, self.origin, self.cell)
    }
}

/// Center of the `index`-th row-major cell in a grid of `columns` columns.
pub fn grid_position(index: usize, columns: usize, origin: Point, cell: Size) -> Point {
    let columns = columns.max(1);
    let (row, col) = (index / columns, index % columns);
    Point::new(
        origin.x + col as f32 * cell.width,
        origin.y + row as f32 * cell.height,
    )
}

/// `max(1, floor(container_width / cell_width))`.
pub fn columns_for(container_width: f32, cell_width: f32) -> usize {
    if !(container_width.is_finite() && cell_width > 0.0) {
        return 1;
    }
    let fit = (container_width / cell_width).floor();
    if fit < 1.0 { 1 } else { fit as usize }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Point = Point::new(120.0, 300.0);
    const CELL: Size = Size::new(220.0, 180.0);

    #[test]
    fn columns_floor_and_minimum() {
        assert_eq!(columns_for(660.0, 220.0), 3);
        assert_eq!(columns_for(659.0, 220.0), 2);
        assert_eq!(columns_for(10.0, 220.0), 1);
        assert_eq!(columns_for(-5.0, 220.0), 1);
        assert_eq!(columns_for(f32::NAN, 220.0), 1);
    }

    #[test]
    fn fifth_item_of_three_columns() {
        let grid = GridSpec::fit(660.0, ORIGIN, CELL);
        assert_eq!(grid.cell_of(4), (1, 1));
        assert_eq!(grid.position(4), Point::new(340.0, 480.0));
    }

    #[test]
    fn zero_columns_is_treated_as_one() {
        assert_eq!(grid_position(2, 0, ORIGIN, CELL), Point::new(120.0, 660.0));
    }

    #[test]
    fn first_cell_is_origin() {
        let grid = GridSpec::fit(1000.0, ORIGIN, CELL);
        assert_eq!(grid.position(0), ORIGIN);
    }
}
