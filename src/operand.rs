//! Operand resolution (spec.md §4.1).

use crate::consts::NO_DEADLINE;
use crate::error::EngineError;
use crate::reg::Reg;
use crate::regfile::RegFile;

/// Either a register reference or a literal constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A register reference; resolving it consumes the register's pending
    /// async deadline.
    Register(Reg),
    /// A literal constant. Always resolves with no wait cost.
    Literal(u64),
}

impl Operand {
    /// Resolve to `(value, wait_until)`. Literals always resolve with
    /// `wait_until = NO_DEADLINE`; registers consult and clear the register
    /// file's pending deadline for that slot.
    pub fn resolve(&self, regfile: &mut RegFile, line: usize) -> Result<(u64, f64), EngineError> {
        match self {
            Operand::Register(r) => regfile.read(*r, line),
            Operand::Literal(v) => Ok((*v, NO_DEADLINE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_resolves_with_no_wait() {
        let mut rf = RegFile::new();
        let (v, d) = Operand::Literal(42).resolve(&mut rf, 1).unwrap();
        assert_eq!(v, 42);
        assert_eq!(d, NO_DEADLINE);
    }

    #[test]
    fn register_resolution_clears_pending_deadline() {
        let mut rf = RegFile::new();
        let r = Reg::general(1);
        rf.set_async(r, 10.0, 1).unwrap();
        let (_, d) = Operand::Register(r).resolve(&mut rf, 1).unwrap();
        assert_eq!(d, 10.0);
        // A second read sees no more pending deadline.
        let (_, d2) = Operand::Register(r).resolve(&mut rf, 1).unwrap();
        assert_eq!(d2, NO_DEADLINE);
    }
}
