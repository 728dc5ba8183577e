//! Lazy file handle that decodes variables on demand.
//!
//! Unlike [`crate::MatFile`], which owns its bytes (or a mapping),
//! [`LazyMatFile`] works with any [`rustymat_io::MatRead`] backend —
//! including borrowed slices — and caches what it decodes:
//!
//! - On open: parse ONLY the 128-byte header
//! - On directory access: walk the element tags once, cache the listing
//! - On variable access: decode just the named element, cache the result
//!
//! Repeated access to the same variable therefore decompresses and decodes
//! it once, where [`crate::MatFile::var`] does the work on every call.

use std::cell::RefCell;
use std::collections::HashMap;

use rustymat_format::compress;
use rustymat_format::datatype::DataType;
use rustymat_format::element::{read_element, MatrixElement, MatrixInfo};
use rustymat_format::header::{Header, HEADER_LEN};

use rustymat_io::MatRead;

use crate::error::Error;
use crate::reader::MatVar;
use crate::types::VarInfo;

/// A lazy MAT-file handle that decodes variables on demand.
///
/// On open, only the file header is parsed. The variable directory is
/// built on first access and remembered; each variable is decoded the
/// first time it is requested and served from cache afterwards.
///
/// Works with any [`MatRead`] backend: `MemoryReader`, `BorrowedReader`,
/// `MmapReader`, etc.
pub struct LazyMatFile<R: MatRead> {
    reader: R,
    header: Header,
    /// Directory listing, filled by the first `variables()` call.
    directory: RefCell<Option<Vec<VarInfo>>>,
    /// Cache of decoded variables, keyed by name.
    var_cache: RefCell<HashMap<String, MatrixElement>>,
}

impl LazyMatFile<rustymat_io::MemoryReader> {
    /// Open a lazy file from an in-memory byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let reader = rustymat_io::MemoryReader::new(data);
        Self::open(reader)
    }
}

impl<'a> LazyMatFile<rustymat_io::BorrowedReader<'a>> {
    /// Open a lazy file over a borrowed byte slice, without copying.
    pub fn from_slice(data: &'a [u8]) -> Result<Self, Error> {
        let reader = rustymat_io::BorrowedReader::new(data);
        Self::open(reader)
    }
}

#[cfg(feature = "mmap")]
impl LazyMatFile<rustymat_io::MmapReader> {
    /// Open a lazy file using memory-mapped I/O.
    ///
    /// This is the recommended way to poke at large capture files: the open
    /// parses 128 bytes, and only the variables actually requested are
    /// decompressed and decoded.
    pub fn open_mmap<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let reader = rustymat_io::MmapReader::open(path).map_err(Error::Io)?;
        Self::open(reader)
    }
}

impl<R: MatRead> LazyMatFile<R> {
    /// Open a lazy file from any `MatRead` backend.
    ///
    /// Parses only the file header.
    pub fn open(reader: R) -> Result<Self, Error> {
        let header = Header::parse(reader.as_bytes())?;
        Ok(Self {
            reader,
            header,
            directory: RefCell::new(None),
            var_cache: RefCell::new(HashMap::new()),
        })
    }

    /// Returns the raw file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.reader.as_bytes()
    }

    /// Returns the parsed file header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Access the inner reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// List the variable directory of the file.
    ///
    /// The first call walks the top-level element sequence, inflating
    /// compressed elements to read their metadata; later calls return the
    /// cached listing.
    pub fn variables(&self) -> Result<Vec<VarInfo>, Error> {
        if let Some(dir) = self.directory.borrow().as_ref() {
            return Ok(dir.clone());
        }
        let data = self.reader.as_bytes();
        let mut infos = Vec::new();
        let mut pos = HEADER_LEN;
        while pos < data.len() {
            let (raw, consumed) = read_element(data, pos)?;
            pos += consumed;
            match raw.data_type {
                DataType::Matrix => {
                    infos.push(VarInfo::from_info(&MatrixInfo::parse(raw.payload)?));
                }
                DataType::Compressed => {
                    let inflated = compress::inflate(raw.payload)?;
                    let (inner, _) = read_element(&inflated, 0)?;
                    if inner.data_type == DataType::Matrix {
                        infos.push(VarInfo::from_info(&MatrixInfo::parse(inner.payload)?));
                    }
                }
                _ => {}
            }
        }
        *self.directory.borrow_mut() = Some(infos.clone());
        Ok(infos)
    }

    /// Find a variable by name, decoding it at most once.
    ///
    /// Cache hits clone the decoded element; misses scan the element
    /// sequence, decode the first match, and remember it. Returns
    /// `Ok(None)` when no top-level array carries the name.
    pub fn var(&self, name: &str) -> Result<Option<MatVar>, Error> {
        if let Some(el) = self.var_cache.borrow().get(name) {
            return Ok(Some(MatVar::from_element(el.clone())));
        }

        let data = self.reader.as_bytes();
        let mut pos = HEADER_LEN;
        while pos < data.len() {
            let (raw, consumed) = read_element(data, pos)?;
            pos += consumed;
            let element = match raw.data_type {
                DataType::Matrix => {
                    if MatrixInfo::parse(raw.payload)?.name != name {
                        continue;
                    }
                    MatrixElement::parse(raw.payload)?
                }
                DataType::Compressed => {
                    let inflated = compress::inflate(raw.payload)?;
                    let (inner, _) = read_element(&inflated, 0)?;
                    if inner.data_type != DataType::Matrix
                        || MatrixInfo::parse(inner.payload)?.name != name
                    {
                        continue;
                    }
                    MatrixElement::parse(inner.payload)?
                }
                _ => continue,
            };
            self.var_cache
                .borrow_mut()
                .insert(name.to_string(), element.clone());
            return Ok(Some(MatVar::from_element(element)));
        }
        Ok(None)
    }

    /// Returns the number of cached decoded variables.
    pub fn cached_var_count(&self) -> usize {
        self.var_cache.borrow().len()
    }
}

impl<R: MatRead> std::fmt::Debug for LazyMatFile<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyMatFile")
            .field("size", &self.reader.as_bytes().len())
            .field("version", &self.header.version)
            .field("cached_vars", &self.var_cache.borrow().len())
            .finish()
    }
}
