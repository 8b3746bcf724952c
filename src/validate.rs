//! Single-pass structural validation of a code stream.

use log::{debug, trace};

use crate::{
    error::ValidationError,
    immediate::{relative_offset, table_len, vector_size, RELATIVE_OFFSET_SIZE},
    opcodes::{self, Attributes, RJUMP, RJUMPI, RJUMPV},
    valids::Valids,
};

/// Per-call bookkeeping of a scan. Every set is sized to the code.
struct Scan<'a> {
    code: &'a [u8],
    jumpdests: Valids,
    immediates: Vec<bool>,
    rjumpdests: Vec<bool>,
}

impl<'a> Scan<'a> {
    fn new(code: &'a [u8]) -> Self {
        let size = code.len();
        Scan {
            code,
            jumpdests: Valids::with_len(size),
            immediates: vec![false; size],
            rjumpdests: vec![false; size],
        }
    }

    /// Records the target of a relative jump whose reference point is `base`.
    fn add_rjumpdest(
        &mut self,
        offset: usize,
        base: usize,
        relative: i16,
    ) -> Result<(), ValidationError> {
        match base.checked_add_signed(relative as isize) {
            Some(target) if target < self.code.len() => {
                trace!("relative jump at {offset:#x} targets {target:#x}");
                self.rjumpdests[target] = true;
                Ok(())
            }
            _ => Err(ValidationError::JumpTargetOutOfBounds {
                offset,
                target: base as i64 + relative as i64,
            }),
        }
    }

    /// Consumes the instruction at `pos` and returns the position after its
    /// immediate data. The result may exceed the code size for a truncated
    /// push.
    fn step(&mut self, pos: usize, opcode: u8) -> Result<usize, ValidationError> {
        let size = self.code.len();
        let start = pos + 1;
        let mut next = start;

        if let Some(len) = opcodes::push_data_len(opcode) {
            next += len;
        } else if opcode == RJUMP || opcode == RJUMPI {
            if start + RELATIVE_OFFSET_SIZE > size {
                return Err(ValidationError::TruncatedImmediate {
                    offset: pos,
                    opcode,
                });
            }
            next += RELATIVE_OFFSET_SIZE;
            let relative = relative_offset(self.code, start);
            self.add_rjumpdest(pos, next, relative)?;
        } else if opcode == RJUMPV {
            if start + 1 > size {
                return Err(ValidationError::TruncatedImmediate {
                    offset: pos,
                    opcode,
                });
            }
            let entries = vector_size(self.code, start);
            if entries == 0 {
                return Err(ValidationError::EmptyJumpTable { offset: pos });
            }
            next += table_len(entries);
            if next > size {
                return Err(ValidationError::TruncatedImmediate {
                    offset: pos,
                    opcode,
                });
            }
            // Every entry is relative to the end of the whole table.
            for entry in (start + 1..next).step_by(RELATIVE_OFFSET_SIZE) {
                let relative = relative_offset(self.code, entry);
                self.add_rjumpdest(pos, next, relative)?;
            }
        }

        let end = next.min(size);
        self.immediates[start..end].fill(true);
        Ok(next)
    }

    fn run(mut self) -> Result<Valids, ValidationError> {
        let size = self.code.len();
        let mut attribute = Attributes::UNDEFINED;
        let mut pos = 0;

        while pos < size {
            let opcode = self.code[pos];
            attribute = opcodes::attributes(opcode);
            if !attribute.is_defined() {
                return Err(ValidationError::UndefinedOpcode {
                    offset: pos,
                    opcode,
                });
            }
            if attribute.is_jumpdest() {
                self.jumpdests.set(pos);
            }
            pos = self.step(pos, opcode)?;
        }

        if !attribute.is_terminal() {
            return Err(ValidationError::MissingTerminator);
        }

        let into_immediate = self
            .rjumpdests
            .iter()
            .zip(&self.immediates)
            .position(|(target, immediate)| *target && *immediate);
        if let Some(target) = into_immediate {
            return Err(ValidationError::JumpIntoImmediateData { target });
        }

        Ok(self.jumpdests)
    }
}

/// Validates `code` and computes its jump destination bitmap.
///
/// The scan classifies every byte as opcode or immediate data, rejects
/// undefined opcodes and malformed relative jumps, and requires the code to
/// end with a terminating instruction. Relative jump targets must be in
/// bounds and must land on an opcode byte.
pub fn validate(code: impl AsRef<[u8]>) -> Result<Valids, ValidationError> {
    let code = code.as_ref();
    match Scan::new(code).run() {
        Ok(valids) => {
            debug!(
                "accepted {} bytes of code with {} jump destinations",
                code.len(),
                valids.count()
            );
            Ok(valids)
        }
        Err(err) => {
            debug!("rejected {} bytes of code: {}", code.len(), err);
            Err(err)
        }
    }
}

/// Returns `true` if `code` passes [`validate`].
pub fn is_valid_code(code: impl AsRef<[u8]>) -> bool {
    validate(code).is_ok()
}
