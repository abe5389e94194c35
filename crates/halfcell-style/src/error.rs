//! Style compilation errors.

use std::fmt;

/// Why a style descriptor failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The keyword table has no entry for this keyword.
    UnknownKeyword {
        /// Descriptor field holding the keyword.
        field: String,
        /// The keyword after any background prefixing.
        keyword: String,
    },
    /// The field holds something that is neither a keyword nor an escape code.
    InvalidValue {
        /// Descriptor field holding the value.
        field: String,
        /// Debug rendering of the offending value.
        value: String,
    },
}

impl StyleError {
    /// Name of the field that failed to compile.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownKeyword { field, .. } | Self::InvalidValue { field, .. } => field,
        }
    }
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword { field, keyword } => {
                write!(f, "unknown style keyword {keyword:?} in field {field:?}")
            }
            Self::InvalidValue { field, value } => {
                write!(f, "invalid style value {value} in field {field:?}")
            }
        }
    }
}

impl std::error::Error for StyleError {}
