//! Random dense linear systems and their solution.

use anyhow::{anyhow, Result};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build an `n x n` system matrix and right-hand side with entries drawn
/// uniformly from `[0, 1)`.
///
/// With a seed the system is reproducible across runs; without one it is
/// drawn from the thread RNG.
pub fn random_system(n: usize, seed: Option<u64>) -> (DMatrix<f64>, DVector<f64>) {
    match seed {
        Some(seed) => build(n, &mut StdRng::seed_from_u64(seed)),
        None => build(n, &mut rand::thread_rng()),
    }
}

fn build<R: Rng>(n: usize, rng: &mut R) -> (DMatrix<f64>, DVector<f64>) {
    let a = DMatrix::from_fn(n, n, |_, _| rng.gen::<f64>());
    let b = DVector::from_fn(n, |_, _| rng.gen::<f64>());
    (a, b)
}

/// Solve `A x = b` by LU decomposition with partial pivoting.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    a.clone()
        .lu()
        .solve(b)
        .ok_or_else(|| anyhow!("matrix is singular, the system has no unique solution"))
}

/// Format a matrix row by row: fixed point, four decimals, right-aligned
/// ten-character columns.
pub fn format_matrix(m: &DMatrix<f64>) -> String {
    let mut out = String::new();
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            out.push_str(&format!("{:>10.4}", m[(i, j)]));
        }
        out.push('\n');
    }
    out
}

/// Format a column vector, one entry per line.
pub fn format_vector(v: &DVector<f64>) -> String {
    let mut out = String::new();
    for value in v.iter() {
        out.push_str(&format!("{value:>10.4}"));
        out.push('\n');
    }
    out
}
