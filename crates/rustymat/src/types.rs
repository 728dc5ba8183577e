//! Directory entries for the high-level API.

use std::fmt;

use rustymat_format::class::ArrayClass;
use rustymat_format::datatype::DataType;
use rustymat_format::element::MatrixInfo;

/// One entry of a file's variable directory.
///
/// Carries the metadata a listing needs without decoding the data payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInfo {
    /// Variable name; empty when the file omits it.
    pub name: String,
    /// Array class from the flags subelement.
    pub class: ArrayClass,
    /// Tag type of the first data subelement; `None` for empty arrays.
    pub data_type: Option<DataType>,
    /// Dimension sizes.
    pub dims: Vec<i32>,
}

impl VarInfo {
    pub(crate) fn from_info(info: &MatrixInfo) -> VarInfo {
        VarInfo {
            name: info.name.clone(),
            class: info.flags.class,
            data_type: info.stored_type,
            dims: info.dims.clone(),
        }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The `mi` type name shown in listings.
    ///
    /// Container classes report the element type itself; their first inner
    /// tag is a bookkeeping subelement, not the data.
    pub fn type_name(&self) -> &'static str {
        match self.class {
            ArrayClass::Struct | ArrayClass::Cell | ArrayClass::Object => DataType::Matrix.name(),
            _ => match self.data_type {
                Some(ty) => ty.name(),
                None => "-",
            },
        }
    }

    /// The name shown in listings, with a placeholder for unnamed entries.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }
}

impl fmt::Display for VarInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}  rank {}  dims ",
            self.display_name(),
            self.class.name(),
            self.type_name(),
            self.rank()
        )?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}
