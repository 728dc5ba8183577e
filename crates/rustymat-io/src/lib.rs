//! I/O backends for MAT-file access.
//!
//! MAT-files are parsed from a single contiguous byte slice: the element
//! sequence is walked front to back and compressed elements are inflated
//! into temporary buffers, so every backend here exposes the whole file as
//! `&[u8]` through [`MatRead`]. Backends differ only in where those bytes
//! live: an owned buffer, a borrowed slice, a file slurped into memory,
//! or (behind the `mmap` feature) a memory-mapped region.

use std::io::{self, Read, Seek, SeekFrom, Write};

pub use rustymat_format;

/// Read-only access to a complete MAT-file image.
pub trait MatRead {
    /// The entire file content.
    fn as_bytes(&self) -> &[u8];

    /// Length of the data in bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` when no data is present.
    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Read-write access to a complete MAT-file image.
pub trait MatReadWrite: MatRead {
    /// Replace the stored content with `data`.
    fn write_all_bytes(&mut self, data: &[u8]) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryReader — owned in-memory bytes
// ---------------------------------------------------------------------------

/// Reader over an owned `Vec<u8>`.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copy a slice into a new reader.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Take the bytes back out of the reader.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for MemoryReader {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl MatRead for MemoryReader {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl MatReadWrite for MemoryReader {
    fn write_all_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.data.clear();
        self.data.extend_from_slice(data);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BorrowedReader — zero-copy view of caller-owned bytes
// ---------------------------------------------------------------------------

/// Reader over a borrowed slice. Nothing is copied; the reader is `Copy`
/// and lives no longer than the slice it wraps.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedReader<'a> {
    data: &'a [u8],
}

impl<'a> BorrowedReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl MatRead for BorrowedReader<'_> {
    fn as_bytes(&self) -> &[u8] {
        self.data
    }
}

// ---------------------------------------------------------------------------
// FileReader — slurps a file from disk
// ---------------------------------------------------------------------------

/// Reader that loads an entire file into memory at open time.
#[derive(Debug)]
pub struct FileReader {
    data: Vec<u8>,
}

impl FileReader {
    /// Read the file at `path` into memory.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        Ok(Self {
            data: std::fs::read(path)?,
        })
    }

    /// Drain an already-opened file handle.
    ///
    /// Reads from the current position, so a fresh handle yields the whole
    /// file. The size hint from the file metadata is used to reserve the
    /// buffer up front.
    pub fn from_file(mut file: std::fs::File) -> io::Result<Self> {
        let hint = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
        let mut data = Vec::with_capacity(hint);
        file.read_to_end(&mut data)?;
        Ok(Self { data })
    }

    /// Take the bytes back out of the reader.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl MatRead for FileReader {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

// ---------------------------------------------------------------------------
// FileWriter — buffered writes to a file on disk
// ---------------------------------------------------------------------------

/// Writer that keeps the current image in memory and mirrors it to a file.
///
/// The file is created (and truncated) when the writer is constructed, so
/// path problems surface at create time rather than on the first write.
#[derive(Debug)]
pub struct FileWriter {
    file: std::fs::File,
    path: std::path::PathBuf,
    data: Vec<u8>,
}

impl FileWriter {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = std::fs::File::create(&path)?;
        Ok(Self {
            file,
            path,
            data: Vec::new(),
        })
    }

    /// Rewrite the file on disk with the buffered image.
    pub fn flush_to_disk(&mut self) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&self.data)?;
        self.file.set_len(self.data.len() as u64)?;
        self.file.flush()
    }

    /// The path this writer targets.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl MatRead for FileWriter {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl MatReadWrite for FileWriter {
    fn write_all_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.flush_to_disk()
    }
}

// ---------------------------------------------------------------------------
// Optional modules
// ---------------------------------------------------------------------------

#[cfg(feature = "mmap")]
pub mod mmap;

#[cfg(feature = "mmap")]
pub use mmap::MmapReader;

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn memory_reader_owns_bytes() {
        let reader = MemoryReader::new(vec![2u8, 4, 6, 8]);
        assert_eq!(reader.as_bytes(), &[2, 4, 6, 8]);
        assert_eq!(reader.len(), 4);
        assert!(!reader.is_empty());
        assert_eq!(reader.into_inner(), vec![2, 4, 6, 8]);
    }

    #[test]
    fn memory_reader_from_slice_copies() {
        let data = [11u8, 22, 33];
        let reader = MemoryReader::from_slice(&data);
        assert_eq!(reader.as_bytes(), &data);
    }

    #[test]
    fn memory_reader_from_vec_conversion() {
        let reader: MemoryReader = vec![9u8, 8].into();
        assert_eq!(reader.as_bytes(), &[9, 8]);
    }

    #[test]
    fn memory_reader_empty() {
        let reader = MemoryReader::new(Vec::new());
        assert!(reader.is_empty());
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn memory_reader_write_replaces_content() {
        let mut reader = MemoryReader::new(vec![7, 7, 7]);
        reader.write_all_bytes(&[3, 1]).unwrap();
        assert_eq!(reader.as_bytes(), &[3, 1]);
    }

    #[test]
    fn borrowed_reader_is_zero_copy() {
        let data = [5u8, 10, 15];
        let reader = BorrowedReader::new(&data);
        assert_eq!(reader.as_bytes().as_ptr(), data.as_ptr());
        assert_eq!(reader.len(), 3);

        let copy = reader;
        assert_eq!(copy.as_bytes(), reader.as_bytes());
    }

    #[test]
    fn borrowed_reader_empty() {
        let reader = BorrowedReader::new(&[]);
        assert!(reader.is_empty());
    }

    #[test]
    fn file_reader_reads_whole_file() {
        let path = temp_path("rustymat_io_read_whole.bin");
        std::fs::write(&path, [0x4D, 0x41, 0x54, 0x35]).unwrap();

        let reader = FileReader::open(&path).unwrap();
        assert_eq!(reader.as_bytes(), &[0x4D, 0x41, 0x54, 0x35]);
        assert_eq!(reader.into_inner(), vec![0x4D, 0x41, 0x54, 0x35]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_reader_from_open_handle() {
        let path = temp_path("rustymat_io_from_handle.bin");
        std::fs::write(&path, [1, 3, 5, 7, 9, 11]).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let reader = FileReader::from_file(file).unwrap();
        assert_eq!(reader.as_bytes(), &[1, 3, 5, 7, 9, 11]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_reader_missing_file() {
        assert!(FileReader::open("/tmp/rustymat_io_no_such_file_2041.bin").is_err());
    }

    #[test]
    fn file_writer_write_and_read_back() {
        let path = temp_path("rustymat_io_writer.bin");

        let mut writer = FileWriter::create(&path).unwrap();
        assert!(writer.as_bytes().is_empty());
        writer.write_all_bytes(&[40, 50, 60]).unwrap();
        assert_eq!(writer.as_bytes(), &[40, 50, 60]);

        assert_eq!(std::fs::read(&path).unwrap(), vec![40, 50, 60]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_writer_second_write_truncates() {
        let path = temp_path("rustymat_io_writer_truncate.bin");

        let mut writer = FileWriter::create(&path).unwrap();
        writer.write_all_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        writer.write_all_bytes(&[9, 9]).unwrap();

        // Shrinking rewrite must not leave stale tail bytes
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 9]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_writer_create_truncates_existing() {
        let path = temp_path("rustymat_io_writer_existing.bin");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        let writer = FileWriter::create(&path).unwrap();
        assert_eq!(writer.path(), path.as_path());
        assert_eq!(std::fs::read(&path).unwrap(), Vec::<u8>::new());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn file_writer_bad_path_fails_at_create() {
        assert!(FileWriter::create("/tmp/rustymat_io_no_such_dir_2041/out.bin").is_err());
    }

    #[test]
    fn mat_header_parses_through_memory_reader() {
        use rustymat_format::header::Header;
        use rustymat_format::writer;

        let element = writer::f64_array("x", &[1, 2], &[1.0, 2.0]).unwrap();
        let bytes = writer::file_bytes("MATLAB 5.0 MAT-file, io test", &[element]);

        let reader = MemoryReader::new(bytes);
        let hdr = Header::parse(reader.as_bytes()).unwrap();
        assert_eq!(hdr.text, "MATLAB 5.0 MAT-file, io test");
    }

    #[test]
    fn mat_image_roundtrips_through_writer_and_reader() {
        use rustymat_format::datatype::DataType;
        use rustymat_format::element::read_element;
        use rustymat_format::header::HEADER_LEN;
        use rustymat_format::writer;

        let path = temp_path("rustymat_io_mat_roundtrip.mat");

        let element = writer::f64_array("values", &[1, 3], &[10.0, 20.0, 30.0]).unwrap();
        let bytes = writer::file_bytes("MATLAB 5.0 MAT-file, io test", &[element]);

        let mut fw = FileWriter::create(&path).unwrap();
        fw.write_all_bytes(&bytes).unwrap();

        let reader = FileReader::open(&path).unwrap();
        assert_eq!(reader.as_bytes(), &bytes);
        let (raw, _) = read_element(reader.as_bytes(), HEADER_LEN).unwrap();
        assert_eq!(raw.data_type, DataType::Matrix);

        std::fs::remove_file(&path).ok();
    }
}
