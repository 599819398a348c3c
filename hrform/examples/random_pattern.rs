//! Generate a random sparse bitmap, reorder it and show the result
//!
//! Usage: `cargo run --example random_pattern -- [DIMENSION] [DENSITY]`

use std::time::Instant;

use hrform::{render_dense, CrsMatrix, PbmFile, Reorderer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let dimension: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(24);
    let density: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0.12);

    let mut rng = StdRng::seed_from_u64(7);
    let rows: Vec<Vec<usize>> = (0..dimension)
        .map(|i| {
            let mut cols: Vec<usize> = (0..dimension).filter(|_| rng.gen_bool(density)).collect();
            if !cols.contains(&i) {
                cols.push(i);
            }
            cols
        })
        .collect();
    let mut matrix = CrsMatrix::from_rows(dimension, rows)?;
    println!(
        "Generated {dimension} x {dimension} pattern with {} nonzeros",
        matrix.nnz()
    );

    let path = std::env::temp_dir().join("hrform_random_pattern.pbm");
    PbmFile::save(&path, &matrix)?;
    println!("Saved original to {}", path.display());

    let start = Instant::now();
    let summary = Reorderer::new().run(&mut matrix);
    println!(
        "Reordered in {:.3}ms: {} diagonal, {} border columns, {} blocks",
        start.elapsed().as_secs_f64() * 1000.0,
        summary.active.p,
        summary.active.q,
        summary.blocks
    );

    if dimension <= 64 {
        render_dense(std::io::stdout().lock(), &matrix, summary.active)?;
    }
    Ok(())
}
