//! Error types for the Core layer.

use std::fmt;

/// Which half of a store a direct-content request was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessSide {
    Reader,
    Writer,
}

impl fmt::Display for AccessSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessSide::Reader => write!(f, "reader"),
            AccessSide::Writer => write!(f, "writer"),
        }
    }
}

/// The direct-content operation that was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentOperation {
    Get,
    Set,
}

impl fmt::Display for ContentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentOperation::Get => write!(f, "get"),
            ContentOperation::Set => write!(f, "set"),
        }
    }
}

/// Errors at the Core layer.
///
/// Adapters never catch or translate these: an error raised by a conversion,
/// an inner store, or a caller-supplied operation reaches the immediate caller
/// exactly as it was raised.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A key or value could not be converted between two domains.
    #[error("cannot convert {from} to {to}: {message}")]
    Conversion {
        from: &'static str,
        to: &'static str,
        message: String,
    },

    /// The (already converted) key does not exist in the store.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Direct content was requested from a store without that capability.
    #[error("this data {side} does not support direct {operation} content")]
    Unsupported {
        side: AccessSide,
        operation: ContentOperation,
    },

    /// A value accessor was asked for a shape it does not hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Building a typed value from its structural form failed.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Taking a typed value apart into its structural form failed.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Conversion failure from `S` to `T`.
    pub fn conversion<S: ?Sized, T: ?Sized>(message: impl Into<String>) -> Self {
        Error::Conversion {
            from: std::any::type_name::<S>(),
            to: std::any::type_name::<T>(),
            message: message.into(),
        }
    }

    /// Missing key, recorded through its debug form.
    pub fn key_not_found<K: fmt::Debug + ?Sized>(key: &K) -> Self {
        Error::KeyNotFound {
            key: format!("{:?}", key),
        }
    }

    pub fn unsupported(side: AccessSide, operation: ContentOperation) -> Self {
        Error::Unsupported { side, operation }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Error::Other {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_display_names_both_types() {
        let e = Error::conversion::<String, usize>("invalid digit found in string");
        let display = format!("{}", e);
        assert!(display.contains("alloc::string::String"));
        assert!(display.contains("usize"));
        assert!(display.contains("invalid digit"));
    }

    #[test]
    fn key_not_found_uses_debug_form() {
        let e = Error::key_not_found("name");
        assert_eq!(format!("{}", e), "key not found: \"name\"");

        let e = Error::key_not_found(&7usize);
        assert_eq!(format!("{}", e), "key not found: 7");
    }

    #[test]
    fn unsupported_names_side_and_operation() {
        let e = Error::unsupported(AccessSide::Reader, ContentOperation::Get);
        assert_eq!(
            format!("{}", e),
            "this data reader does not support direct get content"
        );

        let e = Error::unsupported(AccessSide::Writer, ContentOperation::Set);
        assert_eq!(
            format!("{}", e),
            "this data writer does not support direct set content"
        );
    }

    #[test]
    fn type_mismatch_display() {
        let e = Error::TypeMismatch {
            expected: "map",
            found: "integer",
        };
        assert_eq!(format!("{}", e), "type mismatch: expected map, found integer");
    }

    #[test]
    fn decode_and_encode_display() {
        assert_eq!(
            format!("{}", Error::decode("missing field `name`")),
            "decode error: missing field `name`"
        );
        assert_eq!(
            format!("{}", Error::encode("key must be a string")),
            "encode error: key must be a string"
        );
    }

    #[test]
    fn other_error_display() {
        assert_eq!(
            format!("{}", Error::other("something went wrong")),
            "something went wrong"
        );
    }

    #[test]
    fn errors_compare_structurally() {
        assert_eq!(Error::key_not_found(&3usize), Error::key_not_found(&3usize));
        assert_ne!(Error::key_not_found(&3usize), Error::key_not_found(&4usize));
    }
}
