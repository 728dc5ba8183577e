//! Library side of the command-line tools.
//!
//! `channels` loads struct fields from MAT-files into matrices and selects
//! channels; `solve` builds and solves random dense linear systems. The
//! binaries in `src/bin/` are thin argument-parsing shells over these.

pub mod channels;
pub mod solve;
