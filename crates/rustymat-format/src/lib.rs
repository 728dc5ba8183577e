//! Pure-Rust MAT-file (Level 5) binary format parsing and construction.
//!
//! This crate provides low-level parsing of MAT-file format structures:
//! the 128-byte header, element tags, miMATRIX arrays, and the zlib
//! envelope of compressed elements. It supports `no_std` environments
//! with the `alloc` crate; compression requires the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod class;
#[cfg(feature = "std")]
pub mod compress;
pub mod datatype;
pub mod element;
pub mod error;
pub mod header;
pub mod numeric;
pub mod tag;
pub mod writer;
