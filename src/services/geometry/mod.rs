//! Geometry hit-testing seam.
//!
//! The engine never measures pixels itself; the rendering host supplies
//! row/column rectangles through `GeometryProvider`. Measurements may be
//! stale, so controllers re-resolve on every event and treat a missed
//! hit-test as "no match" rather than an error.

/// A pointer position in the host's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Host-supplied mapping between pixel space and grid ordinals.
pub trait GeometryProvider {
    /// Column ordinal under `x`, if any.
    fn column_at(&self, x: f32) -> Option<usize>;
    /// Row ordinal under `y`, if any.
    fn row_at(&self, y: f32) -> Option<usize>;
    /// Top pixel edge of a row, if the row is laid out.
    fn row_top(&self, row_index: usize) -> Option<f32>;
    /// Uniform row height in pixels.
    fn row_height(&self) -> f32;
}

/// Uniform-grid geometry: evenly sized rows, per-column widths.
///
/// The concrete provider used by tests and simple hosts; toolkit-backed
/// hosts implement `GeometryProvider` over their own measured rectangles.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    origin_x: f32,
    origin_y: f32,
    row_height: f32,
    row_count: usize,
    column_widths: Vec<f32>,
}

impl GridGeometry {
    pub fn new(
        origin_x: f32,
        origin_y: f32,
        row_height: f32,
        row_count: usize,
        column_widths: Vec<f32>,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            row_height,
            row_count,
            column_widths,
        }
    }

    /// Evenly sized grid of `columns` columns of `column_width` each.
    pub fn uniform(
        row_height: f32,
        row_count: usize,
        column_width: f32,
        columns: usize,
    ) -> Self {
        Self::new(0.0, 0.0, row_height, row_count, vec![column_width; columns])
    }
}

impl GeometryProvider for GridGeometry {
    fn column_at(&self, x: f32) -> Option<usize> {
        let mut left = self.origin_x;
        if x < left {
            return None;
        }
        for (index, width) in self.column_widths.iter().enumerate() {
            let right = left + width;
            if x < right {
                return Some(index);
            }
            left = right;
        }
        None
    }

    fn row_at(&self, y: f32) -> Option<usize> {
        if self.row_height <= 0.0 || y < self.origin_y {
            return None;
        }
        let index = ((y - self.origin_y) / self.row_height) as usize;
        (index < self.row_count).then_some(index)
    }

    fn row_top(&self, row_index: usize) -> Option<f32> {
        (row_index < self.row_count)
            .then(|| self.origin_y + row_index as f32 * self.row_height)
    }

    fn row_height(&self) -> f32 {
        self.row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridGeometry {
        GridGeometry::new(10.0, 20.0, 24.0, 40, vec![100.0, 100.0, 60.0])
    }

    #[test]
    fn test_column_at() {
        let g = grid();
        assert_eq!(g.column_at(10.0), Some(0));
        assert_eq!(g.column_at(109.9), Some(0));
        assert_eq!(g.column_at(110.0), Some(1));
        assert_eq!(g.column_at(250.0), Some(2));
        assert_eq!(g.column_at(270.0), None);
        assert_eq!(g.column_at(0.0), None);
    }

    #[test]
    fn test_row_at() {
        let g = grid();
        assert_eq!(g.row_at(20.0), Some(0));
        assert_eq!(g.row_at(43.9), Some(0));
        assert_eq!(g.row_at(44.0), Some(1));
        assert_eq!(g.row_at(19.0), None);
        assert_eq!(g.row_at(20.0 + 40.0 * 24.0), None);
    }

    #[test]
    fn test_row_top_round_trips_row_at() {
        let g = grid();
        for index in [0, 7, 39] {
            let top = g.row_top(index).unwrap();
            assert_eq!(g.row_at(top), Some(index));
        }
        assert_eq!(g.row_top(40), None);
    }
}
