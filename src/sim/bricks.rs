//! Brick grid layout and brick status
//!
//! The grid is rebuilt from scratch whenever the canvas size changes; bricks
//! are never resized in place.

use super::rect::Rect;
use crate::Bounds;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Alive,
    Broken,
}

/// A single target. Its rectangle is fixed at creation and status only
/// ever moves from `Alive` to `Broken`.
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    rect: Rect,
    status: BrickStatus,
}

impl Brick {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            status: BrickStatus::Alive,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn status(&self) -> BrickStatus {
        self.status
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Mark as broken. Returns false if it already was.
    pub fn mark_broken(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.status = BrickStatus::Broken;
        was_alive
    }
}

/// Bricks stored column-major: all rows of column 0, then column 1, ...
#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out a full grid of live bricks across the canvas width.
    ///
    /// columns = floor(width / cell width), at least one; each brick is the
    /// column's share of the width minus the spacing, centered in its cell.
    pub fn layout(bounds: Bounds, tuning: &Tuning) -> Self {
        let columns = ((bounds.width / tuning.brick_cell_width).floor() as usize).max(1);
        let rows = tuning.brick_rows;
        let cell = bounds.width / columns as f32;
        let width = (cell - tuning.brick_spacing).max(1.0);
        let height = tuning.brick_height;

        let mut bricks = Vec::with_capacity(columns * rows);
        for col in 0..columns {
            for row in 0..rows {
                let x = col as f32 * cell + tuning.brick_spacing / 2.0;
                let y = tuning.brick_offset_top + row as f32 * (height + tuning.brick_spacing);
                bricks.push(Brick::new(Rect::new(x, y, width, height)));
            }
        }

        log::debug!(
            "Brick grid: {}x{} bricks of {:.1}x{:.1} for width {}",
            columns,
            rows,
            width,
            height,
            bounds.width
        );

        Self {
            columns,
            rows,
            bricks,
        }
    }

    /// Build a grid from explicit columns (each a top-down list of bricks).
    /// Every column must have the same length.
    #[cfg(test)]
    pub fn from_columns(columns: Vec<Vec<Brick>>) -> Self {
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        assert!(
            columns.iter().all(|c| c.len() == rows),
            "brick columns must have equal length"
        );
        Self {
            columns: columns.len(),
            rows,
            bricks: columns.into_iter().flatten().collect(),
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column < self.columns && row < self.rows {
            self.bricks.get(column * self.rows + row)
        } else {
            None
        }
    }

    /// Bricks with their (column, row), column-major
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        let rows = self.rows.max(1);
        self.bricks
            .iter()
            .enumerate()
            .map(move |(i, b)| (i / rows, i % rows, b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Brick)> {
        let rows = self.rows.max(1);
        self.bricks
            .iter_mut()
            .enumerate()
            .map(move |(i, b)| (i / rows, i % rows, b))
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_800_wide() {
        let grid = BrickGrid::layout(Bounds::new(800.0, 560.0), &Tuning::default());
        assert_eq!(grid.columns(), 8);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.len(), 40);
        assert_eq!(grid.alive_count(), 40);

        let first = grid.get(0, 0).unwrap().rect();
        assert_eq!(first.size.x, 90.0);
        assert_eq!(first.size.y, 20.0);
        assert_eq!(first.origin.x, 5.0);
        assert_eq!(first.origin.y, 50.0);

        let last = grid.get(7, 4).unwrap().rect();
        assert_eq!(last.origin.x, 705.0);
        assert_eq!(last.origin.y, 170.0);
        assert!(last.right() <= 800.0);
    }

    #[test]
    fn test_layout_fills_odd_widths() {
        let grid = BrickGrid::layout(Bounds::new(1000.0, 600.0), &Tuning::default());
        // floor(1000 / 90) = 11 columns, 1000 / 11 - 10 wide
        assert_eq!(grid.columns(), 11);
        let w = grid.get(0, 0).unwrap().rect().size.x;
        assert!((w - (1000.0 / 11.0 - 10.0)).abs() < 1e-4);
        let last = grid.get(10, 0).unwrap().rect();
        assert!((last.right() - 995.0).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_canvas_keeps_one_column() {
        let grid = BrickGrid::layout(Bounds::new(50.0, 300.0), &Tuning::default());
        assert_eq!(grid.columns(), 1);
        assert!(grid.get(0, 0).unwrap().rect().size.x > 0.0);
    }

    #[test]
    fn test_column_major_order() {
        let grid = BrickGrid::layout(Bounds::new(800.0, 560.0), &Tuning::default());
        let order: Vec<(usize, usize)> = grid.iter().take(6).map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 0)]);
        assert!(grid.get(8, 0).is_none());
        assert!(grid.get(0, 5).is_none());
    }

    #[test]
    fn test_broken_is_permanent() {
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(brick.mark_broken());
        assert!(!brick.mark_broken());
        assert_eq!(brick.status(), BrickStatus::Broken);
    }
}
