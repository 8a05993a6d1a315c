//! Error types for the w2d decoding library.

use thiserror::Error;

/// Primary error type for opcode stream decoding.
///
/// An error that reaches the render pass is fatal for it: the pass
/// commits nothing to its device. Non-fatal conditions (unrecognized
/// self-delimiting opcodes, palette misses) never become errors.
#[derive(Error, Debug)]
pub enum W2dError {
    #[error("stream truncated at byte {offset}")]
    TruncatedStream { offset: usize },

    #[error("unknown opcode {id:#04x} at byte {offset}")]
    UnknownOpcode { id: u8, offset: usize },

    #[error("malformed opcode at byte {offset}: {msg}")]
    Malformed { offset: usize, msg: String },

    /// Raised by keyword factories. The decoder downgrades it to an
    /// unrecognized opcode since the keyword form is already consumed.
    #[error("invalid operand for {opcode}: {msg}")]
    InvalidOperand { opcode: &'static str, msg: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl W2dError {
    /// True when the stream ended in the middle of an opcode.
    pub const fn is_truncated(&self) -> bool {
        matches!(self, W2dError::TruncatedStream { .. })
    }
}

/// Convenience Result type alias for W2dError.
pub type Result<T> = std::result::Result<T, W2dError>;
