//! Data elements and miMATRIX array parsing.
//!
//! Two levels of decode are provided. [`MatrixInfo::parse`] reads only the
//! leading subelements (flags, dimensions, name) plus the tag type of the
//! first data subelement, which is all a directory listing needs.
//! [`MatrixElement::parse`] fully decodes numeric, struct, and cell arrays;
//! other classes are carried as [`MatrixContent::Opaque`].

#[cfg(not(feature = "std"))]
use alloc::{string::String, string::ToString, vec::Vec};

use crate::class::{ArrayClass, ArrayFlags};
use crate::datatype::DataType;
use crate::error::FormatError;
use crate::numeric;
use crate::tag::ElementTag;

/// Maximum nesting depth for struct and cell arrays.
pub const MAX_DEPTH: usize = 32;

/// A tagged element: its type and a borrowed view of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawElement<'a> {
    /// Tag data type.
    pub data_type: DataType,
    /// Payload bytes, padding excluded.
    pub payload: &'a [u8],
}

/// Read the element at `pos`, returning it and the bytes consumed
/// (tag, payload, and alignment padding).
///
/// A file ending exactly at a payload's last byte, without the trailing
/// padding, is accepted.
pub fn read_element(data: &[u8], pos: usize) -> Result<(RawElement<'_>, usize), FormatError> {
    let tag = ElementTag::parse(data, pos)?;
    if tag.small && tag.byte_count > 4 {
        return Err(FormatError::UnexpectedEof {
            expected: tag.byte_count,
            available: 4,
        });
    }
    let start = pos + tag.header_len();
    let end = start + tag.byte_count;
    if end > data.len() {
        return Err(FormatError::UnexpectedEof {
            expected: end,
            available: data.len(),
        });
    }
    let consumed = tag.total_len().min(data.len() - pos);
    Ok((
        RawElement {
            data_type: tag.data_type,
            payload: &data[start..end],
        },
        consumed,
    ))
}

/// Walks the subelements of a miMATRIX payload in order.
struct Subelements<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Subelements<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next(&mut self) -> Result<Option<RawElement<'a>>, FormatError> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let (raw, consumed) = read_element(self.data, self.pos)?;
        self.pos += consumed;
        Ok(Some(raw))
    }

    fn expect(&mut self, what: &'static str) -> Result<RawElement<'a>, FormatError> {
        self.next()?.ok_or(FormatError::MissingSubelement(what))
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

fn parse_common(cur: &mut Subelements<'_>) -> Result<(ArrayFlags, Vec<i32>, String), FormatError> {
    let flags_el = cur.expect("array flags")?;
    if !matches!(flags_el.data_type, DataType::Uint32 | DataType::Int32) {
        return Err(FormatError::SubelementType {
            subelement: "array flags",
            found: flags_el.data_type.code(),
        });
    }
    let flags = ArrayFlags::parse(flags_el.payload)?;

    let dims_el = cur.expect("dimensions")?;
    let dims = numeric::read_i32(dims_el.payload, dims_el.data_type)?;
    if let Some(&d) = dims.iter().find(|&&d| d < 0) {
        return Err(FormatError::NegativeDimension(d));
    }

    let name_el = cur.expect("array name")?;
    if name_el.data_type != DataType::Int8 {
        return Err(FormatError::SubelementType {
            subelement: "array name",
            found: name_el.data_type.code(),
        });
    }
    let name = String::from_utf8_lossy(name_el.payload)
        .trim_end_matches('\0')
        .to_string();

    Ok((flags, dims, name))
}

/// Element count implied by `dims`. Dimensions come straight off the wire,
/// so the product is checked rather than trusted.
pub(crate) fn num_elements(dims: &[i32]) -> Result<u64, FormatError> {
    dims.iter().try_fold(1u64, |acc, &d| {
        acc.checked_mul(d as u64).ok_or(FormatError::DimensionOverflow)
    })
}

/// Upper bound on how many nested elements can still follow the cursor:
/// each one occupies at least an 8-byte tag.
fn nested_capacity(claimed: u64, remaining: usize) -> usize {
    claimed.min((remaining / 8) as u64) as usize
}

// ---------------------------------------------------------------------------
// MatrixInfo — header-only decode for directory listings
// ---------------------------------------------------------------------------

/// Array metadata: flags, dimensions, name, and the stored data tag type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixInfo {
    /// Decoded array flags.
    pub flags: ArrayFlags,
    /// Dimension sizes, all non-negative.
    pub dims: Vec<i32>,
    /// Array name; empty for struct fields and cell entries.
    pub name: String,
    /// Tag type of the first subelement after the name: the stored numeric
    /// type for numeric and char arrays. `None` when no data follows.
    pub stored_type: Option<DataType>,
}

impl MatrixInfo {
    /// Parse the leading subelements of a miMATRIX payload.
    ///
    /// Payload data past the name is not decoded.
    pub fn parse(payload: &[u8]) -> Result<MatrixInfo, FormatError> {
        let mut cur = Subelements::new(payload);
        let (flags, dims, name) = parse_common(&mut cur)?;
        let stored_type = cur.next()?.map(|raw| raw.data_type);
        Ok(MatrixInfo {
            flags,
            dims,
            name,
            stored_type,
        })
    }
}

// ---------------------------------------------------------------------------
// MatrixElement — full decode
// ---------------------------------------------------------------------------

/// A numeric data subelement: stored type plus its raw payload.
///
/// The stored type may be narrower than the array class; [`NumericData::to_f64`]
/// widens on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericData {
    /// Stored wire type.
    pub data_type: DataType,
    /// Raw little-endian payload.
    pub bytes: Vec<u8>,
}

impl NumericData {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self.data_type.size() {
            Some(s) if s > 0 => self.bytes.len() / s,
            _ => 0,
        }
    }

    /// Returns `true` when no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Widen the payload to `f64` values.
    pub fn to_f64(&self) -> Result<Vec<f64>, FormatError> {
        numeric::read_f64(&self.bytes, self.data_type)
    }
}

/// Class-specific payload of a decoded array.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixContent {
    /// Real part and, for complex arrays, the imaginary part.
    Numeric {
        real: NumericData,
        imag: Option<NumericData>,
    },
    /// Field names plus one nested array per (array element, field),
    /// element-major: all fields of element 0, then element 1, and so on.
    Struct {
        field_names: Vec<String>,
        fields: Vec<MatrixElement>,
    },
    /// Nested arrays in column order.
    Cell { cells: Vec<MatrixElement> },
    /// Char, sparse, and object payloads are not decoded.
    Opaque,
}

/// A fully decoded miMATRIX element.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixElement {
    /// Decoded array flags.
    pub flags: ArrayFlags,
    /// Dimension sizes, all non-negative.
    pub dims: Vec<i32>,
    /// Array name; empty for struct fields and cell entries.
    pub name: String,
    /// Class-specific payload.
    pub content: MatrixContent,
}

impl MatrixElement {
    /// Fully parse a miMATRIX payload.
    pub fn parse(payload: &[u8]) -> Result<MatrixElement, FormatError> {
        Self::parse_at_depth(payload, 0)
    }

    fn parse_at_depth(payload: &[u8], depth: usize) -> Result<MatrixElement, FormatError> {
        if depth >= MAX_DEPTH {
            return Err(FormatError::NestingTooDeep(MAX_DEPTH));
        }
        let mut cur = Subelements::new(payload);
        let (flags, dims, name) = parse_common(&mut cur)?;
        let numel = num_elements(&dims)?;

        let content = match flags.class {
            class if class.is_numeric() => {
                let real = Self::numeric_subelement(&mut cur, "real data", numel)?;
                let imag = if flags.complex {
                    Some(Self::numeric_subelement(&mut cur, "imaginary data", numel)?)
                } else {
                    None
                };
                MatrixContent::Numeric { real, imag }
            }
            ArrayClass::Struct => {
                let (field_names, fields) = Self::parse_struct(&mut cur, numel, depth)?;
                MatrixContent::Struct {
                    field_names,
                    fields,
                }
            }
            ArrayClass::Cell => {
                let mut cells = Vec::with_capacity(nested_capacity(numel, cur.remaining()));
                for _ in 0..numel {
                    let cell = cur.expect("cell")?;
                    if cell.data_type != DataType::Matrix {
                        return Err(FormatError::SubelementType {
                            subelement: "cell",
                            found: cell.data_type.code(),
                        });
                    }
                    cells.push(Self::parse_at_depth(cell.payload, depth + 1)?);
                }
                MatrixContent::Cell { cells }
            }
            _ => MatrixContent::Opaque,
        };

        Ok(MatrixElement {
            flags,
            dims,
            name,
            content,
        })
    }

    fn numeric_subelement(
        cur: &mut Subelements<'_>,
        what: &'static str,
        numel: u64,
    ) -> Result<NumericData, FormatError> {
        let raw = cur.expect(what)?;
        if !raw.data_type.is_numeric() {
            return Err(FormatError::SubelementType {
                subelement: what,
                found: raw.data_type.code(),
            });
        }
        let data = NumericData {
            data_type: raw.data_type,
            bytes: raw.payload.to_vec(),
        };
        // Ragged payloads surface here rather than at first read.
        let elem_size = raw.data_type.size().unwrap_or(1);
        if data.bytes.len() % elem_size != 0 {
            return Err(FormatError::PayloadSize {
                elem_size,
                actual: data.bytes.len(),
            });
        }
        if data.len() as u64 != numel {
            return Err(FormatError::DimensionMismatch {
                expected: numel as usize,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    fn parse_struct(
        cur: &mut Subelements<'_>,
        numel: u64,
        depth: usize,
    ) -> Result<(Vec<String>, Vec<MatrixElement>), FormatError> {
        let len_el = cur.expect("field name length")?;
        let lens = numeric::read_i32(len_el.payload, len_el.data_type)?;
        let field_len = match lens.first() {
            Some(&l) if l > 0 => l as usize,
            Some(&l) => return Err(FormatError::BadFieldNameLength(l)),
            None => return Err(FormatError::BadFieldNameLength(0)),
        };

        let names_el = cur.expect("field names")?;
        if names_el.data_type != DataType::Int8 {
            return Err(FormatError::SubelementType {
                subelement: "field names",
                found: names_el.data_type.code(),
            });
        }
        if names_el.payload.len() % field_len != 0 {
            return Err(FormatError::PayloadSize {
                elem_size: field_len,
                actual: names_el.payload.len(),
            });
        }
        let field_names: Vec<String> = names_el
            .payload
            .chunks_exact(field_len)
            .map(|chunk| {
                String::from_utf8_lossy(chunk)
                    .trim_end_matches('\0')
                    .to_string()
            })
            .collect();

        let expected = (field_names.len() as u64)
            .checked_mul(numel)
            .ok_or(FormatError::DimensionOverflow)?;
        let mut fields = Vec::with_capacity(nested_capacity(expected, cur.remaining()));
        for _ in 0..expected {
            let field = cur.expect("struct field")?;
            if field.data_type != DataType::Matrix {
                return Err(FormatError::SubelementType {
                    subelement: "struct field",
                    found: field.data_type.code(),
                });
            }
            fields.push(Self::parse_at_depth(field.payload, depth + 1)?);
        }
        Ok((field_names, fields))
    }

    /// Look up a struct field by name and array element index.
    ///
    /// Returns `None` for non-struct arrays, unknown names, and indices past
    /// the end of the struct array.
    pub fn field(&self, name: &str, index: usize) -> Option<&MatrixElement> {
        match &self.content {
            MatrixContent::Struct {
                field_names,
                fields,
            } => {
                let slot = field_names.iter().position(|n| n == name)?;
                fields.get(index * field_names.len() + slot)
            }
            _ => None,
        }
    }
}
