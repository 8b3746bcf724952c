//! Static validation of EVM code with relative jumps.
//!
//! [`validate`] scans a code buffer once, left to right, and either rejects it
//! with a [`ValidationError`] or returns the bitmap of its `JUMPDEST`
//! positions as [`Valids`]. Rejection causes:
//!
//! | Error | Cause |
//! |-------|-------|
//! | `UndefinedOpcode` | byte value with no instruction meaning |
//! | `TruncatedImmediate` | `RJUMP`/`RJUMPI`/`RJUMPV` operand runs past the end |
//! | `EmptyJumpTable` | `RJUMPV` with zero entries |
//! | `JumpTargetOutOfBounds` | relative target negative or past the last byte |
//! | `MissingTerminator` | empty code, or last instruction is not terminating |
//! | `JumpIntoImmediateData` | relative target lands on operand bytes |
//!
//! Push data running past the end of the code is reported as
//! `MissingTerminator`, since no terminating instruction can follow it.

mod cache;
mod error;
pub mod immediate;
pub mod logger;
pub mod opcodes;
mod validate;
mod valids;

pub use cache::{code_hash, JumpDestCache, DEFAULT_CACHE_CAPACITY};
pub use error::ValidationError;
pub use validate::{is_valid_code, validate};
pub use valids::Valids;
