//! JSON summary of a reordering run

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hrform_core::{ActiveSubmatrix, CrsMatrix, ReorderSummary};
use serde::{Deserialize, Serialize};

use crate::error::EncodeResult;

/// Machine-readable outcome of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderReport {
    pub dimension: usize,
    pub nnz: usize,
    pub density: f64,
    pub min_nnz_per_row: Option<usize>,
    pub active: ActiveSubmatrix,
    pub blocks: usize,
    pub singleton_blocks: usize,
    /// Physical row at each logical position
    pub row_order: Vec<usize>,
    /// Physical column at each logical position
    pub col_order: Vec<usize>,
}

impl ReorderReport {
    pub fn new(matrix: &CrsMatrix, summary: &ReorderSummary) -> Self {
        Self {
            dimension: matrix.dimension(),
            nnz: matrix.nnz(),
            density: matrix.density(),
            min_nnz_per_row: matrix.min_nnz_per_row(),
            active: summary.active,
            blocks: summary.blocks,
            singleton_blocks: summary.singleton_blocks,
            row_order: matrix.row_order().as_slice().to_vec(),
            col_order: matrix.col_order().as_slice().to_vec(),
        }
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> EncodeResult<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> EncodeResult<()> {
        self.write_json(BufWriter::new(File::create(path)?))
    }
}
