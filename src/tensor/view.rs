//! Non-owning 2-D matrix views
//!
//! A `MatrixView` describes how to index into a caller-supplied buffer; it
//! never owns the storage. Both the CPU reference and the device provider
//! read operands through exactly the same stride arithmetic, which is what
//! makes their outputs comparable.

use crate::precision::Element;

/// Logical 2-D view over externally owned storage.
///
/// `element(row, col)` maps to `storage[row * stride1 + col * stride2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView {
    pub rows: usize,
    pub cols: usize,
    pub ld: usize,
    pub stride1: usize,
    pub stride2: usize,
}

impl MatrixView {
    pub fn new(rows: usize, cols: usize, ld: usize, stride1: usize, stride2: usize) -> Self {
        MatrixView {
            rows,
            cols,
            ld,
            stride1,
            stride2,
        }
    }

    /// Column-major view: row index varies fastest, columns are `ld` apart.
    /// This is the storage order of every operand buffer in this crate.
    pub fn column_major(rows: usize, cols: usize, ld: usize) -> Self {
        MatrixView::new(rows, cols, ld, 1, ld)
    }

    /// Flat buffer index of element (row, col).
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.stride1 + col * self.stride2
    }

    /// Minimum buffer length this view can address.
    pub fn required_len(&self) -> usize {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }
        self.index(self.rows - 1, self.cols - 1) + 1
    }

    /// Read element (row, col) from `storage`.
    #[inline]
    pub fn get<E: Element>(&self, storage: &[E], row: usize, col: usize) -> E {
        storage[self.index(row, col)]
    }

    /// Render the viewed matrix for debug output, one storage row per line.
    pub fn format<E: Element>(&self, name: &str, storage: &[E]) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "{} ({}x{}, ld={}):", name, self.rows, self.cols, self.ld);
        for row in 0..self.rows {
            let _ = write!(out, "  ");
            for col in 0..self.cols {
                let _ = write!(out, "{:>10.4} ", self.get(storage, row, col).widen());
            }
            let _ = writeln!(out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_column_major_indexing() {
        let view = MatrixView::column_major(2, 3, 4); // ld > rows, padded storage
        assert_eq!(view.index(0, 0), 0);
        assert_eq!(view.index(1, 0), 1);
        assert_eq!(view.index(0, 1), 4);
        assert_eq!(view.index(1, 2), 9);
        assert_eq!(view.required_len(), 10);
    }

    #[test]
    fn test_row_contiguous_indexing() {
        // Transposed-operand view: columns vary fastest
        let view = MatrixView::new(2, 3, 3, 3, 1);
        assert_eq!(view.index(0, 1), 1);
        assert_eq!(view.index(1, 0), 3);
        assert_eq!(view.required_len(), 6);
    }

    #[test]
    fn test_get_reads_through_strides() {
        let data: Vec<f16> = (0..6).map(|v| f16::from_f32(v as f32)).collect();
        let view = MatrixView::column_major(2, 3, 2);
        assert_eq!(view.get(&data, 0, 0).to_f32(), 0.0);
        assert_eq!(view.get(&data, 1, 0).to_f32(), 1.0);
        assert_eq!(view.get(&data, 0, 2).to_f32(), 4.0);
    }

    #[test]
    fn test_format_contains_all_elements() {
        let data = vec![1.0f32, 2.0, 3.0, 4.0];
        let view = MatrixView::column_major(2, 2, 2);
        let rendered = view.format("matrix A", &data);
        assert!(rendered.contains("matrix A"));
        assert!(rendered.contains("1.0000"));
        assert!(rendered.contains("4.0000"));
    }
}
