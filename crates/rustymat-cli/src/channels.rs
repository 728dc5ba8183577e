//! Loading struct fields from MAT-files as matrices and selecting channels.
//!
//! Capture files store one struct per recording; its `data` field holds the
//! samples as a samples-by-channels matrix. Extraction validates the field
//! before any copy: it must be real double-precision data with exactly two
//! dimensions.

use anyhow::{bail, ensure, Context, Result};
use nalgebra::{DMatrix, DVector};
use rustymat::{ArrayClass, MatFile, MatVar};

/// Open a MAT-file for reading.
pub fn open_file(path: &str) -> Result<MatFile> {
    MatFile::open(path).with_context(|| format!("Cannot open file: {path}"))
}

/// Load `struct_name.field_name` as a dense matrix.
///
/// The file stores the data column-major, which is also the layout
/// `DMatrix::from_column_slice` expects, so samples land at the same
/// (row, column) positions they had in the file.
pub fn load_field(file: &MatFile, struct_name: &str, field_name: &str) -> Result<DMatrix<f64>> {
    let var = file
        .var(struct_name)
        .with_context(|| format!("Failed to read variable {struct_name}"))?;
    let var = match var {
        Some(v) => v,
        None => bail!("Struct not found: {struct_name}"),
    };
    ensure!(
        var.class() == ArrayClass::Struct,
        "Variable {} is not a struct (class {})",
        struct_name,
        var.class()
    );

    let field = lookup_field(&var, struct_name, field_name)?;
    ensure!(
        field.class() == ArrayClass::Double,
        "Field {}.{} must be double precision, found {}",
        struct_name,
        field_name,
        field.class()
    );
    ensure!(
        !field.is_complex(),
        "Field {}.{} must be real, complex data is not supported",
        struct_name,
        field_name
    );
    ensure!(
        field.rank() == 2,
        "Field {}.{} must be a 2-D matrix, found rank {}",
        struct_name,
        field_name,
        field.rank()
    );

    let rows = field.dims()[0] as usize;
    let cols = field.dims()[1] as usize;
    let vals = field.read_f64()?;
    Ok(DMatrix::from_column_slice(rows, cols, &vals))
}

fn lookup_field(var: &MatVar, struct_name: &str, field_name: &str) -> Result<MatVar> {
    match var.field(field_name, 0) {
        Some(f) => Ok(f),
        None => {
            let available = var
                .field_names()
                .map(|names| names.join(", "))
                .unwrap_or_default();
            bail!(
                "Field '{field_name}' not found in struct '{struct_name}' (fields: {available})"
            )
        }
    }
}

/// Select one channel (column) of a sample matrix.
pub fn channel(m: &DMatrix<f64>, index: usize) -> Result<DVector<f64>> {
    ensure!(
        index < m.ncols(),
        "Channel {} out of range: matrix has {} columns",
        index,
        m.ncols()
    );
    Ok(m.column(index).into_owned())
}
