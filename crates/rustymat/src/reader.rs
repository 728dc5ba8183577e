//! Reading API: MatFile and MatVar handles for reading MAT-files.
//!
//! When the `mmap` feature is enabled (default), [`MatFile::open`] uses
//! memory-mapped I/O for zero-copy access.  [`MatFile::open_buffered`]
//! provides the traditional read-into-`Vec<u8>` fallback.
//! [`MatFile::from_bytes`] remains available for in-memory usage (tests,
//! etc.).

use rustymat_format::class::{ArrayClass, ArrayFlags};
use rustymat_format::compress;
use rustymat_format::datatype::DataType;
use rustymat_format::element::{read_element, MatrixContent, MatrixElement, MatrixInfo};
use rustymat_format::header::{Header, HEADER_LEN};

use crate::error::Error;
use crate::types::VarInfo;

// ---------------------------------------------------------------------------
// FileData — owned bytes or a mapping, behind one bytes view
// ---------------------------------------------------------------------------

/// Storage backing an open file. Both arms expose the same `&[u8]` view.
enum FileData {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mmap(rustymat_io::MmapReader),
}

impl FileData {
    fn as_bytes(&self) -> &[u8] {
        match self {
            FileData::Owned(v) => v,
            #[cfg(feature = "mmap")]
            FileData::Mmap(r) => r.as_bytes(),
        }
    }

    fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

// ---------------------------------------------------------------------------
// MatFile
// ---------------------------------------------------------------------------

/// An open MAT-file for reading.
///
/// The header is parsed at open time, so endianness and version problems
/// surface before any variable access. Variable lookups scan the element
/// sequence; the file handle itself keeps no cursor, so every call starts
/// from the first element.
pub struct MatFile {
    data: FileData,
    header: Header,
}

impl MatFile {
    /// Open a MAT-file from a filesystem path.
    ///
    /// With the `mmap` feature (default) the file is memory-mapped; without
    /// it this falls back to [`MatFile::open_buffered`].
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        #[cfg(feature = "mmap")]
        {
            let reader = rustymat_io::MmapReader::open(path).map_err(Error::Io)?;
            let header = Header::parse(reader.as_bytes())?;
            Ok(Self {
                data: FileData::Mmap(reader),
                header,
            })
        }
        #[cfg(not(feature = "mmap"))]
        {
            Self::open_buffered(path)
        }
    }

    /// Open a MAT-file by reading it entirely into memory.
    ///
    /// Useful when memory-mapping is undesirable (network filesystems,
    /// very small files, etc.).
    pub fn open_buffered<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let reader = rustymat_io::FileReader::open(path).map_err(Error::Io)?;
        Self::from_bytes(reader.into_inner())
    }

    /// Open a MAT-file from an in-memory byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let header = Header::parse(&data)?;
        Ok(Self {
            data: FileData::Owned(data),
            header,
        })
    }

    /// Returns the parsed file header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the raw file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Returns `true` when the open file is a memory mapping.
    pub fn is_mmap(&self) -> bool {
        match &self.data {
            FileData::Owned(_) => false,
            #[cfg(feature = "mmap")]
            FileData::Mmap(_) => true,
        }
    }

    /// List the variable directory of the file.
    ///
    /// Walks the top-level element sequence, inflating compressed elements
    /// to read their metadata. Top-level elements that are not arrays are
    /// skipped. The scan is repeatable; calling this twice yields the same
    /// directory.
    pub fn variables(&self) -> Result<Vec<VarInfo>, Error> {
        let data = self.data.as_bytes();
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
        Ok(infos)
    }

    /// Find a variable by name and fully decode it.
    ///
    /// Returns `Ok(None)` when no top-level array carries the name. Names
    /// are checked on the cheap metadata parse; only the matching element
    /// is fully decoded.
    pub fn var(&self, name: &str) -> Result<Option<MatVar>, Error> {
        let data = self.data.as_bytes();
        let mut pos = HEADER_LEN;
        while pos < data.len() {
            let (raw, consumed) = read_element(data, pos)?;
            pos += consumed;
            match raw.data_type {
                DataType::Matrix => {
                    if MatrixInfo::parse(raw.payload)?.name == name {
                        let element = MatrixElement::parse(raw.payload)?;
                        return Ok(Some(MatVar { element }));
                    }
                }
                DataType::Compressed => {
                    let inflated = compress::inflate(raw.payload)?;
                    let (inner, _) = read_element(&inflated, 0)?;
                    if inner.data_type == DataType::Matrix
                        && MatrixInfo::parse(inner.payload)?.name == name
                    {
                        let element = MatrixElement::parse(inner.payload)?;
                        return Ok(Some(MatVar { element }));
                    }
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for MatFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatFile")
            .field("size", &self.data.len())
            .field("version", &self.header.version)
            .field("mmap", &self.is_mmap())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// MatVar
// ---------------------------------------------------------------------------

/// A fully decoded variable.
///
/// Owns its decoded element, so it stays valid after the `MatFile` that
/// produced it is dropped.
#[derive(Debug, Clone)]
pub struct MatVar {
    element: MatrixElement,
}

impl MatVar {
    pub(crate) fn from_element(element: MatrixElement) -> MatVar {
        MatVar { element }
    }

    /// Variable name; empty for struct fields and cell entries.
    pub fn name(&self) -> &str {
        &self.element.name
    }

    /// Array class.
    pub fn class(&self) -> ArrayClass {
        self.element.flags.class
    }

    /// Decoded array flags.
    pub fn flags(&self) -> &ArrayFlags {
        &self.element.flags
    }

    /// Dimension sizes.
    pub fn dims(&self) -> &[i32] {
        &self.element.dims
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.element.dims.len()
    }

    /// Total number of array elements, saturating at `usize::MAX`.
    pub fn num_elements(&self) -> usize {
        self.element
            .dims
            .iter()
            .fold(1usize, |n, &d| n.saturating_mul(d as usize))
    }

    /// Returns `true` when the array carries an imaginary part.
    pub fn is_complex(&self) -> bool {
        self.element.flags.complex
    }

    /// Stored wire type of the data; `None` for non-numeric arrays.
    ///
    /// May be narrower than the class when the writer compacted
    /// integral-valued data.
    pub fn data_type(&self) -> Option<DataType> {
        match &self.element.content {
            MatrixContent::Numeric { real, .. } => Some(real.data_type),
            _ => None,
        }
    }

    /// Read the real part as `f64` values in column-major order.
    pub fn read_f64(&self) -> Result<Vec<f64>, Error> {
        match &self.element.content {
            MatrixContent::Numeric { real, .. } => Ok(real.to_f64()?),
            _ => Err(Error::NotNumeric(self.element.name.clone())),
        }
    }

    /// Field names of a struct array; `None` for other classes.
    pub fn field_names(&self) -> Option<&[String]> {
        match &self.element.content {
            MatrixContent::Struct { field_names, .. } => Some(field_names),
            _ => None,
        }
    }

    /// Look up a struct field by name and array element index.
    ///
    /// Returns `None` for non-struct variables, unknown field names, and
    /// out-of-range indices.
    pub fn field(&self, name: &str, index: usize) -> Option<MatVar> {
        self.element.field(name, index).map(|el| MatVar {
            element: el.clone(),
        })
    }
}
