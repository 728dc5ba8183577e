//! High-level API for reading and writing MATLAB Level 5 MAT-files.
//!
//! This crate provides an ergonomic interface on top of `rustymat-format`.
//!
//! # Reading
//!
//! ```no_run
//! use rustymat::MatFile;
//!
//! let file = MatFile::open("TD160.mat").unwrap();
//! for info in file.variables().unwrap() {
//!     println!("{info}");
//! }
//! let td = file.var("TD160").unwrap().expect("variable present");
//! let data = td.field("data", 0).expect("field present");
//! println!("dims: {:?}", data.dims());
//! ```
//!
//! # Writing
//!
//! ```no_run
//! use rustymat::MatFileBuilder;
//!
//! let mut builder = MatFileBuilder::new();
//! let s = builder.create_struct("TD160");
//! s.f64_field("data", 4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
//! builder.write("TD160.mat").unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod lazy;
pub mod reader;
pub mod types;

pub use builder::{MatFileBuilder, StructBuilder};
pub use error::Error;
pub use lazy::LazyMatFile;
pub use reader::{MatFile, MatVar};
pub use types::VarInfo;

// Re-export format types that appear in this crate's API, and the format
// crate itself for advanced users.
pub use rustymat_format as format;
pub use rustymat_format::class::ArrayClass;
pub use rustymat_format::datatype::DataType;
pub use rustymat_format::element::NumericData;
