//! Error types for code validation

use thiserror::Error;

/// Reason a code buffer was rejected
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("undefined opcode {opcode:#04x} at {offset:#x}")]
    UndefinedOpcode { offset: usize, opcode: u8 },

    #[error("truncated immediate of opcode {opcode:#04x} at {offset:#x}")]
    TruncatedImmediate { offset: usize, opcode: u8 },

    #[error("empty jump table at {offset:#x}")]
    EmptyJumpTable { offset: usize },

    #[error("relative jump at {offset:#x} targets {target}, outside of the code")]
    JumpTargetOutOfBounds { offset: usize, target: i64 },

    #[error("code does not end with a terminating instruction")]
    MissingTerminator,

    #[error("relative jump target {target:#x} lands in immediate data")]
    JumpIntoImmediateData { target: usize },
}

impl ValidationError {
    /// Variant name, stable across field values.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::UndefinedOpcode { .. } => "UndefinedOpcode",
            ValidationError::TruncatedImmediate { .. } => "TruncatedImmediate",
            ValidationError::EmptyJumpTable { .. } => "EmptyJumpTable",
            ValidationError::JumpTargetOutOfBounds { .. } => "JumpTargetOutOfBounds",
            ValidationError::MissingTerminator => "MissingTerminator",
            ValidationError::JumpIntoImmediateData { .. } => "JumpIntoImmediateData",
        }
    }
}
