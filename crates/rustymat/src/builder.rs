//! Writing API: MatFileBuilder for creating MAT-files.

use rustymat_format::class::ArrayClass;
use rustymat_format::element::NumericData;
use rustymat_format::writer;
use rustymat_io::{FileWriter, MatReadWrite};

use crate::error::Error;

/// Header text written when the caller does not override it.
const DEFAULT_TEXT: &str = "MATLAB 5.0 MAT-file, Platform: rustymat, Created by: rustymat builder";

const COMPRESSION_LEVEL: u32 = 6;

struct NumericVar {
    name: String,
    class: ArrayClass,
    dims: Vec<i32>,
    real: NumericData,
    imag: Option<NumericData>,
}

enum Var {
    Numeric(NumericVar),
    Struct(StructBuilder),
}

/// Builder for creating a new MAT-file.
///
/// Data is staged as it is added; validation happens in [`finish`], so the
/// first inconsistent variable surfaces there.
///
/// # Example
///
/// ```no_run
/// use rustymat::MatFileBuilder;
///
/// let mut builder = MatFileBuilder::new();
/// builder.f64_matrix("x", 2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// builder.write("output.mat").unwrap();
/// ```
///
/// [`finish`]: MatFileBuilder::finish
pub struct MatFileBuilder {
    text: String,
    compress: bool,
    vars: Vec<Var>,
}

impl MatFileBuilder {
    /// Create a new file builder.
    pub fn new() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            compress: false,
            vars: Vec::new(),
        }
    }

    /// Override the descriptive header text.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Wrap each variable in a zlib-compressed element.
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Add a real double-precision matrix. `vals` are stored as given, in
    /// column-major order.
    pub fn f64_matrix(&mut self, name: &str, rows: usize, cols: usize, vals: &[f64]) {
        self.add_numeric(
            name,
            ArrayClass::Double,
            &[rows as i32, cols as i32],
            writer::f64_payload(vals),
            None,
        );
    }

    /// Add a numeric array with full control over class, dimensions, and
    /// stored payloads.
    pub fn add_numeric(
        &mut self,
        name: &str,
        class: ArrayClass,
        dims: &[i32],
        real: NumericData,
        imag: Option<NumericData>,
    ) {
        self.vars.push(Var::Numeric(NumericVar {
            name: name.to_string(),
            class,
            dims: dims.to_vec(),
            real,
            imag,
        }));
    }

    /// Create a scalar struct variable. Returns a builder for its fields.
    pub fn create_struct(&mut self, name: &str) -> &mut StructBuilder {
        self.vars.push(Var::Struct(StructBuilder {
            name: name.to_string(),
            field_names: Vec::new(),
            fields: Vec::new(),
        }));
        match self.vars.last_mut() {
            Some(Var::Struct(s)) => s,
            _ => unreachable!("just pushed a struct"),
        }
    }

    /// Serialize the file to bytes in memory.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let mut elements = Vec::with_capacity(self.vars.len());
        for var in &self.vars {
            let element = match var {
                Var::Numeric(n) => {
                    writer::numeric_array(&n.name, n.class, &n.dims, &n.real, n.imag.as_ref())?
                }
                Var::Struct(s) => s.build()?,
            };
            let element = if self.compress {
                writer::compressed(&element, COMPRESSION_LEVEL)?
            } else {
                element
            };
            elements.push(element);
        }
        Ok(writer::file_bytes(&self.text, &elements))
    }

    /// Serialize and write the file to the given path.
    pub fn write<P: AsRef<std::path::Path>>(self, path: P) -> Result<(), Error> {
        let bytes = self.finish()?;
        let mut fw = FileWriter::create(path).map_err(Error::Io)?;
        fw.write_all_bytes(&bytes).map_err(Error::Io)
    }
}

impl Default for MatFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the fields of a scalar (1x1) struct variable.
pub struct StructBuilder {
    name: String,
    field_names: Vec<String>,
    fields: Vec<NumericVar>,
}

impl StructBuilder {
    /// Add a real double-precision field. `vals` are column-major.
    pub fn f64_field(&mut self, name: &str, rows: usize, cols: usize, vals: &[f64]) -> &mut Self {
        self.numeric_field(
            name,
            ArrayClass::Double,
            &[rows as i32, cols as i32],
            writer::f64_payload(vals),
            None,
        )
    }

    /// Add a real single-precision field. `vals` are column-major.
    pub fn f32_field(&mut self, name: &str, rows: usize, cols: usize, vals: &[f32]) -> &mut Self {
        self.numeric_field(
            name,
            ArrayClass::Single,
            &[rows as i32, cols as i32],
            writer::f32_payload(vals),
            None,
        )
    }

    /// Add a numeric field with full control over class, dimensions, and
    /// stored payloads.
    pub fn numeric_field(
        &mut self,
        name: &str,
        class: ArrayClass,
        dims: &[i32],
        real: NumericData,
        imag: Option<NumericData>,
    ) -> &mut Self {
        self.field_names.push(name.to_string());
        self.fields.push(NumericVar {
            name: String::new(),
            class,
            dims: dims.to_vec(),
            real,
            imag,
        });
        self
    }

    fn build(&self) -> Result<Vec<u8>, rustymat_format::error::FormatError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            fields.push(writer::numeric_array(
                &field.name,
                field.class,
                &field.dims,
                &field.real,
                field.imag.as_ref(),
            )?);
        }
        let names: Vec<&str> = self.field_names.iter().map(String::as_str).collect();
        writer::struct_array(&self.name, &[1, 1], &names, &fields)
    }
}
