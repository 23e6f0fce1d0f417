//! Error families shared by every Hookforge crate.
//!
//! Content loading and network decoding fail in different ways and are
//! handled by different callers, so they are separate types. Both wrap the
//! same [`ValidationError`] produced by modifier construction.

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Alias for `Result<T, DecodeError>`.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A malformed [`ResourceId`](crate::ResourceId).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The namespace is empty or contains illegal characters.
    #[error("invalid namespace in identifier \"{0}\"")]
    InvalidNamespace(String),

    /// The path is empty or contains illegal characters.
    #[error("invalid path in identifier \"{0}\"")]
    InvalidPath(String),
}

/// A module/hook combination that cannot form a modifier.
///
/// Raised by construction regardless of where the definition came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A declared hook name is not registered.
    #[error("unknown hook \"{0}\"")]
    UnknownHook(String),

    /// A module declared a hook it does not implement.
    #[error("module \"{module}\" does not support hook \"{hook}\"")]
    UnsupportedHook {
        /// Loader id of the offending module.
        module: String,
        /// Name of the hook it declared.
        hook: String,
    },

    /// A module listed the same hook more than once.
    #[error("module \"{module}\" declares hook \"{hook}\" more than once")]
    DuplicateHook {
        /// Loader id of the offending module.
        module: String,
        /// Name of the repeated hook.
        hook: String,
    },

    /// An exclusive hook has more than one registrant.
    #[error("hook \"{hook}\" accepts a single module but {count} registered")]
    ExclusiveConflict {
        /// Name of the exclusive hook.
        hook: String,
        /// How many modules registered it.
        count: usize,
    },
}

/// Errors raised while loading structured (JSON) content.
///
/// Recoverable: the definition is skipped and loading continues.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The JSON does not match the expected schema.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The text is not valid JSON or a serde-derived shape failed to load.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// An identifier field is malformed.
    #[error(transparent)]
    Id(#[from] IdError),

    /// The definition parsed but its modules and hooks do not fit together.
    #[error("invalid definition: {0}")]
    Invalid(#[from] ValidationError),
}

impl ContentError {
    /// Shorthand for a [`ContentError::Syntax`] with a formatted message.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }
}

/// Errors raised while decoding the binary wire form.
///
/// Fatal to the packet being decoded; nothing from it is applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ended before a field was complete.
    #[error("buffer truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the field required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A varint ran past five bytes.
    #[error("varint too long")]
    VarIntTooLong,

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    /// An enum ordinal is out of range.
    #[error("invalid {what} ordinal {ordinal}")]
    InvalidEnum {
        /// The enum being decoded.
        what: &'static str,
        /// The ordinal read from the wire.
        ordinal: i32,
    },

    /// A string was not valid UTF-8.
    #[error("string is not valid utf-8")]
    InvalidUtf8,

    /// A string length exceeds the configured limit.
    #[error("string of {len} bytes exceeds limit of {max}")]
    StringTooLong {
        /// Declared byte length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A count prefix is negative or exceeds the configured limit.
    #[error("invalid {what} count {count}")]
    InvalidCount {
        /// The collection being decoded.
        what: &'static str,
        /// The count read from the wire.
        count: i64,
    },

    /// A float on the wire is NaN or infinite.
    #[error("non-finite {what}")]
    NonFiniteFloat {
        /// The field being decoded.
        what: &'static str,
    },

    /// A type tag did not resolve to a known decoder.
    #[error("unknown {what} type \"{name}\"")]
    UnknownType {
        /// The kind of object being decoded.
        what: &'static str,
        /// The unresolved type name.
        name: String,
    },

    /// A packet discriminator is not registered on the channel.
    #[error("unknown packet id {0}")]
    UnknownPacket(i32),

    /// Bytes were left over after a complete frame.
    #[error("{0} trailing bytes after packet")]
    TrailingBytes(usize),

    /// An identifier on the wire is malformed.
    #[error(transparent)]
    Id(#[from] IdError),

    /// The decoded modules and hooks do not fit together.
    #[error("invalid definition: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_survives_both_wrappers() {
        let err = ValidationError::UnsupportedHook {
            module: "hookforge:stat_boost".to_string(),
            hook: "hookforge:display_name".to_string(),
        };
        let content = ContentError::from(err.clone());
        let decode = DecodeError::from(err.clone());
        assert!(content.to_string().contains(&err.to_string()));
        assert!(decode.to_string().contains(&err.to_string()));
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(
            DecodeError::Truncated {
                needed: 4,
                remaining: 1
            }
            .to_string(),
            "buffer truncated: needed 4 bytes, 1 remaining"
        );
        assert_eq!(
            DecodeError::InvalidEnum {
                what: "tooltip display",
                ordinal: 7
            }
            .to_string(),
            "invalid tooltip display ordinal 7"
        );
        assert_eq!(DecodeError::InvalidBool(2).to_string(), "invalid boolean byte 0x02");
    }
}
