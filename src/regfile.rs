//! The register file (spec.md §3, §4.2).
//!
//! 32 general-purpose registers, 16 read-only argument registers and a
//! stack pointer, plus a parallel array of async-load deadlines for every
//! writable slot. Argument registers never carry a deadline: they are
//! populated once at call entry by [`RegFile::set_value`] and never
//! targeted by an async load.

use std::fmt;

use crate::consts::{NO_DEADLINE, NUM_ARG_REGISTERS, NUM_GENERAL_REGISTERS, STACK_MAX};
use crate::error::{EngineError, EngineErrorKind};
use crate::reg::Reg;

/// The register file of one function activation.
#[derive(Debug, Clone)]
pub struct RegFile {
    general: [u64; NUM_GENERAL_REGISTERS],
    general_deadline: [f64; NUM_GENERAL_REGISTERS],
    args: [u64; NUM_ARG_REGISTERS],
    sp: u64,
    sp_deadline: f64,
    nargs: usize,
}

impl RegFile {
    /// A fresh register file: all general registers zero, `Sp =
    /// STACK_MAX`, no pending deadlines, `nargs = 0`.
    pub fn new() -> Self {
        Self {
            general: [0; NUM_GENERAL_REGISTERS],
            general_deadline: [NO_DEADLINE; NUM_GENERAL_REGISTERS],
            args: [0; NUM_ARG_REGISTERS],
            sp: STACK_MAX,
            sp_deadline: NO_DEADLINE,
            nargs: 0,
        }
    }

    /// Set the active call's declared argument count, used to bound-check
    /// `A{k}` reads.
    pub fn set_nargs(&mut self, nargs: usize) {
        self.nargs = nargs;
    }

    /// Unchecked write, including into `A{k}` — used only to plumb
    /// evaluated call arguments into a fresh callee register file.
    pub(crate) fn set_value(&mut self, reg: Reg, value: u64) {
        match reg {
            Reg::General(n) => self.general[n as usize] = value,
            Reg::Arg(n) => self.args[n as usize] = value,
            Reg::Sp => self.sp = value,
            Reg::None => {}
        }
    }

    /// Read a register, taking (and clearing) its pending async deadline.
    /// Argument reads never carry a deadline and are bound-checked against
    /// the active call's `nargs`.
    pub fn read(&mut self, reg: Reg, line: usize) -> Result<(u64, f64), EngineError> {
        match reg {
            Reg::None => Err(EngineError::new(line, EngineErrorKind::ReadNoneRegister)),
            Reg::Arg(n) => {
                if (n as usize) >= self.nargs {
                    Err(EngineError::new(line, EngineErrorKind::ArgOutOfRange { nargs: self.nargs }))
                } else {
                    Ok((self.args[n as usize], NO_DEADLINE))
                }
            }
            Reg::General(n) => {
                let idx = n as usize;
                let deadline = self.general_deadline[idx];
                self.general_deadline[idx] = NO_DEADLINE;
                Ok((self.general[idx], deadline))
            }
            Reg::Sp => {
                let deadline = self.sp_deadline;
                self.sp_deadline = NO_DEADLINE;
                Ok((self.sp, deadline))
            }
        }
    }

    /// Write a register. Silently ignored for [`Reg::None`]; fails for any
    /// `A{k}`. Clears any pending deadline before storing the value.
    pub fn write(&mut self, reg: Reg, value: u64, line: usize) -> Result<(), EngineError> {
        match reg {
            Reg::None => Ok(()),
            Reg::Arg(_) => Err(EngineError::new(line, EngineErrorKind::WriteToArg { reg })),
            Reg::General(n) => {
                self.general_deadline[n as usize] = NO_DEADLINE;
                self.general[n as usize] = value;
                Ok(())
            }
            Reg::Sp => {
                self.sp_deadline = NO_DEADLINE;
                self.sp = value;
                Ok(())
            }
        }
    }

    /// Stamp a new async-load deadline on a writable register. Fails for
    /// [`Reg::None`], any `A{k}`, or a register with an already-pending
    /// deadline (single outstanding load per register).
    pub fn set_async(&mut self, reg: Reg, deadline: f64, line: usize) -> Result<(), EngineError> {
        match reg {
            Reg::None => Err(EngineError::new(line, EngineErrorKind::DuplicateAsyncDeadline { reg })),
            Reg::Arg(_) => Err(EngineError::new(line, EngineErrorKind::WriteToArg { reg })),
            Reg::General(n) => {
                let idx = n as usize;
                if self.general_deadline[idx] >= 0.0 {
                    return Err(EngineError::new(line, EngineErrorKind::DuplicateAsyncDeadline { reg }));
                }
                self.general_deadline[idx] = deadline;
                Ok(())
            }
            Reg::Sp => {
                if self.sp_deadline >= 0.0 {
                    return Err(EngineError::new(line, EngineErrorKind::DuplicateAsyncDeadline { reg }));
                }
                self.sp_deadline = deadline;
                Ok(())
            }
        }
    }
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegFile {
    /// Render as `r1[<v>] ... r32[<v>] a1[<v>] ... a16[<v>] sp[<v>]`,
    /// matching the dump format `original_source/src/regfile.cpp` uses in
    /// assertion-failure reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.general.iter().enumerate() {
            write!(f, "r{}[{}] ", i + 1, v)?;
        }
        for (i, v) in self.args.iter().enumerate() {
            write!(f, "a{}[{}] ", i + 1, v)?;
        }
        write!(f, "sp[{}]", self.sp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_matches_spec() {
        let mut rf = RegFile::new();
        assert_eq!(rf.read(Reg::general(1), 1).unwrap(), (0, NO_DEADLINE));
        assert_eq!(rf.read(Reg::Sp, 1).unwrap(), (STACK_MAX, NO_DEADLINE));
    }

    #[test]
    fn write_to_arg_fails() {
        let mut rf = RegFile::new();
        assert!(rf.write(Reg::arg(1), 1, 1).is_err());
    }

    #[test]
    fn read_none_fails() {
        let mut rf = RegFile::new();
        assert!(rf.read(Reg::None, 1).is_err());
    }

    #[test]
    fn arg_read_out_of_nargs_fails() {
        let mut rf = RegFile::new();
        rf.set_nargs(1);
        assert!(rf.read(Reg::arg(1), 1).is_ok());
        assert!(rf.read(Reg::arg(2), 1).is_err());
    }

    #[test]
    fn duplicate_async_deadline_fails() {
        let mut rf = RegFile::new();
        let r = Reg::general(3);
        rf.set_async(r, 5.0, 1).unwrap();
        assert!(rf.set_async(r, 9.0, 1).is_err());
        // Reading resolves it, so a new deadline can be set afterward.
        rf.read(r, 1).unwrap();
        assert!(rf.set_async(r, 9.0, 1).is_ok());
    }

    #[test]
    fn write_clears_pending_deadline() {
        let mut rf = RegFile::new();
        let r = Reg::general(2);
        rf.set_async(r, 5.0, 1).unwrap();
        rf.write(r, 99, 1).unwrap();
        assert_eq!(rf.read(r, 1).unwrap(), (99, NO_DEADLINE));
    }
}
