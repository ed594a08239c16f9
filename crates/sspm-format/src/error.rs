//! Error types for SSPM decoding.

use thiserror::Error;

/// Errors that can occur when decoding an SSPM map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bounds-checked read failure from the cursor.
    #[error("{0}")]
    Common(#[from] sspm_common::Error),

    /// A field type tag outside the set the field decoder understands.
    #[error("unsupported data type tag {tag:#04x} at offset {offset}")]
    UnsupportedTag { tag: u8, offset: usize },

    /// A structural inconsistency inside a section.
    #[error("malformed {section} section: {reason}")]
    MalformedSection {
        section: &'static str,
        reason: String,
    },
}

impl Error {
    /// Create a malformed-section error.
    pub(crate) fn malformed(section: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedSection {
            section,
            reason: reason.into(),
        }
    }

    /// Check whether this error is a cursor bounds violation.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::Common(sspm_common::Error::OutOfBounds { .. }))
    }
}

/// Result type for SSPM operations.
pub type Result<T> = std::result::Result<T, Error>;
