//! Error types for encoding, decoding and converting values.
//!
//! Every fallible operation in this crate returns [`Result`]. An [`Error`] is an
//! [`ErrorKind`] plus the path of the value that failed, accumulated from the
//! innermost failure outwards as the error unwinds through struct fields and
//! sequence elements.
//!
//! # Example
//!
//! ```
//! use na_codec::{Codec, ErrorKind, JsonTranscoder, INT};
//! use serde_json::json;
//!
//! let codec = INT.list(8);
//! let err = codec
//!     .decode(&JsonTranscoder::new(), &json!([1, 2, "three"]))
//!     .unwrap_err();
//!
//! assert_eq!(err.path_string(), "[2]");
//! assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
//! ```

use std::fmt::{self, Display};

use crate::NodeKind;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The reason an operation failed, without location information.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The node is of a different kind than the codec expects.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: NodeKind, found: NodeKind },

    /// A required compound entry is absent.
    #[error("missing field `{0}`")]
    FieldMissing(String),

    /// A compound was required but the node is something else.
    #[error("expected compound, found {0}")]
    CompoundExpected(NodeKind),

    /// A sequence is longer than the cap declared by its codec.
    #[error("sequence of {len} elements exceeds the limit of {max}")]
    SizeExceeded { max: usize, len: usize },

    /// An ordinal, name or discriminant outside a closed set of variants.
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),

    /// The target format cannot represent a node of the source format.
    #[error("cannot convert {kind} node: {reason}")]
    UnsupportedConversion { kind: NodeKind, reason: String },

    /// A numeric value does not fit the requested width or declared range.
    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: String },

    /// Two fields of one struct codec resolve to the same key.
    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    /// Nesting exceeds [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    /// A caller-supplied transform rejected the value.
    #[error("{0}")]
    Message(String),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when binary NBT data is truncated, or when a list
    /// declares more elements than the remaining input can hold.
    #[error("unexpected end of input")]
    EndOfFile,

    /// Extra bytes remain after the root tag.
    #[error("trailing data after end of input: {0} bytes remaining")]
    TrailingData(usize),

    /// NBT defines tag types 0-12; anything else is rejected.
    #[error("invalid NBT tag type: {0:#04x}")]
    InvalidTagType(u8),

    /// A list or array has more elements than its length prefix can express.
    #[error("list length too long: {0}")]
    ListTooLong(usize),

    /// A string is longer than its `u16` length prefix can express.
    #[error("string length too long: {0} bytes")]
    StringTooLong(usize),

    /// Binary NBT lists are homogeneous; this element has another tag.
    #[error("tag in list mismatch: expected {0:#04x}, got {1:#04x}")]
    TagMismatch(u8, u8),

    /// An I/O error occurred while writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One step of an error path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// This type represents all possible errors of this crate, together with the
/// location of the failing value.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    // innermost segment first; segments are pushed while unwinding
    path: Vec<PathSegment>,
}

impl Error {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    #[inline]
    pub fn type_mismatch(expected: NodeKind, found: NodeKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, found })
    }

    #[inline]
    pub fn field_missing(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::FieldMissing(name.into()))
    }

    #[inline]
    pub fn compound_expected(found: NodeKind) -> Self {
        Self::new(ErrorKind::CompoundExpected(found))
    }

    #[inline]
    pub fn size_exceeded(max: usize, len: usize) -> Self {
        Self::new(ErrorKind::SizeExceeded { max, len })
    }

    #[inline]
    pub fn unknown_variant(variant: impl Display) -> Self {
        Self::new(ErrorKind::UnknownVariant(variant.to_string()))
    }

    #[inline]
    pub fn unsupported(kind: NodeKind, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedConversion {
            kind,
            reason: reason.into(),
        })
    }

    #[inline]
    pub fn out_of_range(value: impl Display, target: impl Display) -> Self {
        Self::new(ErrorKind::OutOfRange {
            value: value.to_string(),
            target: target.to_string(),
        })
    }

    #[inline]
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message(message.into()))
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Path segments from the outermost value down to the failing one.
    pub fn path(&self) -> impl DoubleEndedIterator<Item = &PathSegment> + ExactSizeIterator {
        self.path.iter().rev()
    }

    /// The path rendered as `objectives[1].name`; empty at the root.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in self.path() {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Records that the error happened inside the compound entry `name`.
    #[inline]
    pub fn at_field(mut self, name: impl Into<String>) -> Self {
        self.path.push(PathSegment::Field(name.into()));
        self
    }

    /// Records that the error happened inside sequence element `index`.
    #[inline]
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push(PathSegment::Index(index));
        self
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(error: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(error))
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            Display::fmt(&self.kind, formatter)
        } else {
            write!(formatter, "{}: {}", self.path_string(), self.kind)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(error) => Some(error),
            _ => None,
        }
    }
}

/// Path helpers for [`Result`].
pub trait ResultExt {
    fn at_field(self, name: &str) -> Self;
    fn at_index(self, index: usize) -> Self;
}

impl<T> ResultExt for Result<T> {
    #[inline]
    fn at_field(self, name: &str) -> Self {
        self.map_err(|e| e.at_field(name))
    }

    #[inline]
    fn at_index(self, index: usize) -> Self {
        self.map_err(|e| e.at_index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_fields_and_indices() {
        let err = Error::type_mismatch(NodeKind::String, NodeKind::Long)
            .at_field("name")
            .at_index(1)
            .at_field("objectives");
        assert_eq!(err.path_string(), "objectives[1].name");
        assert_eq!(
            err.to_string(),
            "objectives[1].name: expected string, found long"
        );
    }

    #[test]
    fn root_index_has_no_leading_dot() {
        let err = Error::field_missing("id").at_field("id").at_index(0);
        assert_eq!(err.path_string(), "[0].id");
    }

    #[test]
    fn empty_path_displays_kind_only() {
        let err = Error::new(ErrorKind::EndOfFile);
        assert_eq!(err.to_string(), "unexpected end of input");
        assert_eq!(err.path().len(), 0);
    }
}
