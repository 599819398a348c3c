//! Dense ASCII rendering of a reordered matrix
//!
//! Each cell prints as its marker when nonzero and as a space otherwise,
//! followed by one space. Markers: `B` in the border columns, `X` inside the
//! still-active submatrix, `+` everywhere else.

use std::fmt;
use std::io::{self, Write};

use hrform_core::{ActiveSubmatrix, SparsePattern};

/// Marker for the logical cell `(row, col)`
pub fn marker(row: usize, col: usize, dimension: usize, active: ActiveSubmatrix) -> char {
    if col >= dimension - active.q {
        'B'
    } else if row >= active.p && col >= active.p {
        'X'
    } else {
        '+'
    }
}

/// `Display` adapter drawing a pattern against an active submatrix
pub struct DenseView<'a, P: SparsePattern + ?Sized> {
    pattern: &'a P,
    active: ActiveSubmatrix,
}

impl<'a, P: SparsePattern + ?Sized> DenseView<'a, P> {
    pub fn new(pattern: &'a P, active: ActiveSubmatrix) -> Self {
        Self { pattern, active }
    }
}

impl<P: SparsePattern + ?Sized> fmt::Display for DenseView<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.pattern.dimension();
        let mut cells = vec![false; m];
        for row in 0..m {
            self.pattern.fill_row(row, &mut cells);
            for (col, &set) in cells.iter().enumerate() {
                let c = if set {
                    marker(row, col, m, self.active)
                } else {
                    ' '
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Write the rendering to `writer`
pub fn render_dense<W, P>(mut writer: W, pattern: &P, active: ActiveSubmatrix) -> io::Result<()>
where
    W: Write,
    P: SparsePattern + ?Sized,
{
    write!(writer, "{}", DenseView::new(pattern, active))?;
    writer.flush()
}
