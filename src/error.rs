use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by direct `encode`/`decode` calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed input at offset {offset}: {kind}")]
    MalformedInput { offset: usize, kind: MalformedKind },
}

impl CodecError {
    pub fn malformed(offset: usize, kind: MalformedKind) -> Self {
        CodecError::MalformedInput { offset, kind }
    }

    /// Byte offset into the input where the offending character or escape starts.
    pub fn offset(&self) -> usize {
        match self {
            CodecError::MalformedInput { offset, .. } => *offset,
        }
    }

    pub fn kind(&self) -> &MalformedKind {
        match self {
            CodecError::MalformedInput { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedKind {
    #[error("character {0:?} has no byte representation in the configured encoding")]
    Unencodable(char),

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("escape needs two hex digits after '%'")]
    TruncatedEscape,

    #[error("escape contains a non-hex digit")]
    InvalidHexDigits,

    #[error("multi-byte sequence ends before the character is complete")]
    IncompleteSequence,

    #[error("byte sequence does not map to any character")]
    UnmappedSequence,
}

/// Construction-time failures. A codec is never handed out when one of these occurs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown character encoding label {0:?}")]
    UnknownEncoding(String),

    #[error("encoding {0} cannot encode single characters on its own")]
    UnsupportedEncoding(&'static str),

    #[error("failed to read settings file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid codec settings")]
    Settings(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_message_names_offset_and_kind() {
        let err = CodecError::malformed(4, MalformedKind::TruncatedEscape);
        assert_eq!(
            err.to_string(),
            "malformed input at offset 4: escape needs two hex digits after '%'"
        );
        assert_eq!(err.offset(), 4);
        assert_eq!(err.kind(), &MalformedKind::TruncatedEscape);
    }

    #[test]
    fn unknown_encoding_message_quotes_label() {
        let err = ConfigError::UnknownEncoding("klingon".to_string());
        assert_eq!(err.to_string(), "unknown character encoding label \"klingon\"");
    }
}
