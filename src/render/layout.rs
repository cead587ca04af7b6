//! Plot geometry shared by all renderers.
//!
//! Horizontally: margin, set-size bars, set names, matrix, margin.
//! Vertically: margin, title, count labels, intersection bars, matrix, margin.

use super::RenderConfig;
use crate::data::IntersectionSet;

const TITLE_HEIGHT: f64 = 28.0;
const COUNT_LABEL_HEIGHT: f64 = 18.0;
/// Part of the set-size panel kept free for the size labels.
const SET_LABEL_ROOM: f64 = 40.0;

/// Axis-aligned rectangle in plot units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }
}

/// Positions of every plot element for one intersection set.
#[derive(Debug, Clone)]
pub struct PlotLayout {
    /// Total width in plot units.
    pub width: f64,
    /// Total height in plot units.
    pub height: f64,
    /// Side of one matrix cell.
    pub cell: f64,
    /// Left edge of the matrix.
    pub matrix_left: f64,
    /// Top edge of the matrix.
    pub matrix_top: f64,
    /// Baseline of the intersection bars.
    pub bars_bottom: f64,
    /// Height of the tallest intersection bar.
    pub bar_height: f64,
    /// Right edge of the set-size bars (they grow leftwards).
    pub set_bars_right: f64,
    /// Width of the widest set-size bar.
    pub set_bar_width: f64,
    /// Right edge of the set-name column.
    pub labels_right: f64,
    /// Vertical centre of the title, if any.
    pub title_y: Option<f64>,
    n_columns: usize,
    n_rows: usize,
    max_count: usize,
    max_set_size: usize,
}

impl PlotLayout {
    /// Compute the layout for `set` under `config`.
    pub fn new(set: &IntersectionSet, config: &RenderConfig) -> Self {
        let margin = config.margin as f64;
        let cell = config.cell_size as f64;
        let set_bar_width = if config.show_set_sizes {
            config.set_bar_width as f64
        } else {
            0.0
        };
        let label_width = config.label_width as f64;
        let bar_height = config.bar_height as f64;

        let n_columns = set.len();
        let n_rows = set.set_names.len();

        let set_bars_right = margin + set_bar_width;
        let labels_right = set_bars_right + label_width;
        let matrix_left = labels_right;

        let title_y = config.title.as_ref().map(|_| margin + TITLE_HEIGHT / 2.0);
        let title_space = if title_y.is_some() { TITLE_HEIGHT } else { 0.0 };
        let bars_bottom = margin + title_space + COUNT_LABEL_HEIGHT + bar_height;
        let matrix_top = bars_bottom + cell / 2.0;

        Self {
            width: matrix_left + n_columns as f64 * cell + margin,
            height: matrix_top + n_rows as f64 * cell + margin,
            cell,
            matrix_left,
            matrix_top,
            bars_bottom,
            bar_height,
            set_bars_right,
            set_bar_width,
            labels_right,
            title_y,
            n_columns,
            n_rows,
            max_count: set.max_count(),
            max_set_size: set.set_sizes.iter().copied().max().unwrap_or(0),
        }
    }

    /// Number of matrix columns (records).
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Number of matrix rows (sets).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Horizontal centre of matrix column `col`.
    pub fn column_x(&self, col: usize) -> f64 {
        self.matrix_left + (col as f64 + 0.5) * self.cell
    }

    /// Vertical centre of matrix row `row`.
    pub fn row_y(&self, row: usize) -> f64 {
        self.matrix_top + (row as f64 + 0.5) * self.cell
    }

    /// Background band for matrix row `row`, spanning names and matrix.
    pub fn row_band(&self, row: usize) -> Rect {
        let right = self.matrix_left + self.n_columns as f64 * self.cell;
        Rect::new(
            self.set_bars_right,
            self.matrix_top + row as f64 * self.cell,
            right - self.set_bars_right,
            self.cell,
        )
    }

    /// Radius of matrix dots.
    pub fn dot_radius(&self) -> f64 {
        self.cell * 0.3
    }

    /// Intersection bar for column `col` with `count` rows.
    pub fn bar(&self, col: usize, count: usize) -> Rect {
        let w = self.cell * 0.7;
        let h = scaled(count, self.max_count, self.bar_height);
        Rect::new(self.column_x(col) - w / 2.0, self.bars_bottom - h, w, h)
    }

    /// Set-size bar for matrix row `row` with `size` rows.
    pub fn set_bar(&self, row: usize, size: usize) -> Rect {
        let h = self.cell * 0.6;
        let extent = (self.set_bar_width - SET_LABEL_ROOM).max(0.0);
        let w = scaled(size, self.max_set_size, extent);
        Rect::new(self.set_bars_right - w, self.row_y(row) - h / 2.0, w, h)
    }

    /// Vertical connector through the active rows of a column, if it spans
    /// more than one row.
    pub fn connector(&self, col: usize, mask: &[bool]) -> Option<Rect> {
        let first = mask.iter().position(|&m| m)?;
        let last = mask.iter().rposition(|&m| m)?;
        if first == last {
            return None;
        }
        let w = (self.cell * 0.1).max(1.0);
        let top = self.row_y(first);
        Some(Rect::new(self.column_x(col) - w / 2.0, top, w, self.row_y(last) - top))
    }
}

fn scaled(value: usize, max: usize, extent: f64) -> f64 {
    if max == 0 {
        0.0
    } else {
        extent * value as f64 / max as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_intersections;
    use crate::data::MembershipMatrix;

    fn sample_set() -> IntersectionSet {
        let m = MembershipMatrix::from_flags(
            vec!["A".into(), "B".into(), "C".into()],
            &[vec![1, 0, 1], vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 1]],
        )
        .unwrap();
        aggregate_intersections(&m)
    }

    #[test]
    fn test_dimensions() {
        let config = RenderConfig::default();
        let layout = PlotLayout::new(&sample_set(), &config);

        assert_eq!(layout.n_columns(), 3);
        assert_eq!(layout.n_rows(), 3);
        let expected_width = 24.0 + 120.0 + 140.0 + 3.0 * 32.0 + 24.0;
        assert!((layout.width - expected_width).abs() < 1e-9);
    }

    #[test]
    fn test_bars_scale_to_max() {
        let layout = PlotLayout::new(&sample_set(), &RenderConfig::default());

        let tallest = layout.bar(0, 2);
        let half = layout.bar(1, 1);
        assert!((tallest.h - 180.0).abs() < 1e-9);
        assert!((half.h - 90.0).abs() < 1e-9);
        assert!((tallest.bottom() - layout.bars_bottom).abs() < 1e-9);
        assert!(layout.bar(2, 0).h.abs() < 1e-9);
    }

    #[test]
    fn test_connector() {
        let layout = PlotLayout::new(&sample_set(), &RenderConfig::default());

        let c = layout.connector(0, &[true, false, true]).unwrap();
        assert!((c.y - layout.row_y(0)).abs() < 1e-9);
        assert!((c.bottom() - layout.row_y(2)).abs() < 1e-9);
        assert!(layout.connector(1, &[false, true, false]).is_none());
        assert!(layout.connector(1, &[false, false, false]).is_none());
    }

    #[test]
    fn test_title_shifts_plot_down() {
        let plain = PlotLayout::new(&sample_set(), &RenderConfig::default());
        let titled = PlotLayout::new(
            &sample_set(),
            &RenderConfig {
                title: Some("T".into()),
                ..RenderConfig::default()
            },
        );

        assert!(titled.matrix_top > plain.matrix_top);
        assert!(titled.title_y.is_some());
    }
}
