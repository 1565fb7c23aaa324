//! Binary and unary operator semantics (spec.md §4.5 "Binary ops", "Unary").

use crate::cost::CostTable;
use crate::error::EngineErrorKind;
use crate::width::Width;

/// `Bop` operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BopOp {
    Udiv,
    Sdiv,
    Urem,
    Srem,
    Mul,
    Shl,
    Lshr,
    Ashr,
    And,
    Or,
    Xor,
    Add,
    Sub,
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
}

impl BopOp {
    /// `true` for the seven opcodes that interpret their operands as
    /// two's-complement signed integers.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            BopOp::Sdiv | BopOp::Srem | BopOp::Ashr | BopOp::Sgt | BopOp::Sge | BopOp::Slt | BopOp::Sle
        )
    }

    const fn is_shift(self) -> bool {
        matches!(self, BopOp::Shl | BopOp::Lshr | BopOp::Ashr)
    }

    /// The cost-table field this opcode is billed against.
    pub const fn cost(self, table: &CostTable) -> f64 {
        match self {
            BopOp::Udiv | BopOp::Sdiv | BopOp::Urem | BopOp::Srem | BopOp::Mul => table.muldiv,
            BopOp::Shl | BopOp::Lshr | BopOp::Ashr | BopOp::And | BopOp::Or | BopOp::Xor => table.logical,
            BopOp::Add | BopOp::Sub => table.addsub,
            BopOp::Eq
            | BopOp::Ne
            | BopOp::Ugt
            | BopOp::Uge
            | BopOp::Ult
            | BopOp::Ule
            | BopOp::Sgt
            | BopOp::Sge
            | BopOp::Slt
            | BopOp::Sle => table.comp,
        }
    }

    /// Evaluate `lhs OP rhs` at the declared `size`. Both operands are
    /// normalised first: the shift amount of a shift op is reduced modulo
    /// the bit width rather than sign/zero-extended like a normal operand.
    pub fn eval(self, size: Width, lhs: u64, rhs: u64) -> Result<u64, EngineErrorKind> {
        let op1 = self.normalize(size, lhs);
        let op2 = if self.is_shift() {
            rhs % size.bits() as u64
        } else {
            self.normalize(size, rhs)
        };

        let result = match self {
            BopOp::Udiv => op1.checked_div(op2).ok_or(EngineErrorKind::DivisionByZero)?,
            BopOp::Sdiv => {
                if op2 == 0 {
                    return Err(EngineErrorKind::DivisionByZero);
                }
                (op1 as i64).wrapping_div(op2 as i64) as u64
            }
            BopOp::Urem => op1.checked_rem(op2).ok_or(EngineErrorKind::DivisionByZero)?,
            BopOp::Srem => {
                if op2 == 0 {
                    return Err(EngineErrorKind::DivisionByZero);
                }
                (op1 as i64).wrapping_rem(op2 as i64) as u64
            }
            BopOp::Mul => op1.wrapping_mul(op2),
            BopOp::Shl => op1 << op2,
            BopOp::Lshr => op1 >> op2,
            BopOp::Ashr => ((op1 as i64) >> op2) as u64,
            BopOp::And => op1 & op2,
            BopOp::Or => op1 | op2,
            BopOp::Xor => op1 ^ op2,
            BopOp::Add => op1.wrapping_add(op2),
            BopOp::Sub => op1.wrapping_sub(op2),
            BopOp::Eq => (op1 == op2) as u64,
            BopOp::Ne => (op1 != op2) as u64,
            BopOp::Ugt => (op1 > op2) as u64,
            BopOp::Uge => (op1 >= op2) as u64,
            BopOp::Ult => (op1 < op2) as u64,
            BopOp::Ule => (op1 <= op2) as u64,
            BopOp::Sgt => ((op1 as i64) > (op2 as i64)) as u64,
            BopOp::Sge => ((op1 as i64) >= (op2 as i64)) as u64,
            BopOp::Slt => ((op1 as i64) < (op2 as i64)) as u64,
            BopOp::Sle => ((op1 as i64) <= (op2 as i64)) as u64,
        };

        Ok(size.mask_unsigned(result))
    }

    fn normalize(self, size: Width, value: u64) -> u64 {
        if self.is_signed() {
            size.mask_signed(value)
        } else {
            size.mask_unsigned(value)
        }
    }
}

/// `Uop` operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UopOp {
    Incr,
    Decr,
}

impl UopOp {
    /// `operand +/- 1`, masked to `size`.
    pub fn eval(self, size: Width, value: u64) -> u64 {
        let result = match self {
            UopOp::Incr => value.wrapping_add(1),
            UopOp::Decr => value.wrapping_sub(1),
        };
        size.mask_unsigned(result)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(BopOp::Add, 1, 1 => 2)]
    #[test_case(BopOp::Sub, 5, 3 => 2)]
    #[test_case(BopOp::And, 0b110, 0b011 => 0b010)]
    #[test_case(BopOp::Or, 0b110, 0b011 => 0b111)]
    #[test_case(BopOp::Xor, 0b110, 0b011 => 0b101)]
    #[test_case(BopOp::Mul, 6, 7 => 42)]
    fn bitwise_and_arithmetic_ops_at_bits32(op: BopOp, lhs: u64, rhs: u64) -> u64 {
        op.eval(Width::Bits32, lhs, rhs).unwrap()
    }

    #[test]
    fn unsigned_division_by_zero_fails() {
        assert_eq!(BopOp::Udiv.eval(Width::Bits32, 10, 0), Err(EngineErrorKind::DivisionByZero));
    }

    #[test]
    fn signed_division_interprets_twos_complement() {
        // -8 / 2 == -4, at 8 bits that's 0xfc.
        let neg_eight = Width::Bits8.mask_unsigned(0xf8);
        let result = BopOp::Sdiv.eval(Width::Bits8, neg_eight, 2).unwrap();
        assert_eq!(result, 0xfc);
    }

    #[test]
    fn shift_amount_reduces_modulo_bit_width() {
        // At 8 bits, shifting left by 9 is the same as shifting by 1.
        let a = BopOp::Shl.eval(Width::Bits8, 1, 9).unwrap();
        let b = BopOp::Shl.eval(Width::Bits8, 1, 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ashr_sign_extends_before_shifting() {
        let neg_one = Width::Bits8.mask_unsigned(0xff);
        assert_eq!(BopOp::Ashr.eval(Width::Bits8, neg_one, 1).unwrap(), 0xff);
    }

    #[test]
    fn size1_normalisation_is_parity() {
        assert_eq!(BopOp::Eq.eval(Width::Bit1, 3, 1).unwrap(), 1);
        assert_eq!(BopOp::Eq.eval(Width::Bit1, 2, 0).unwrap(), 1);
    }

    #[test]
    fn comparisons_are_width_independent_zero_or_one() {
        assert_eq!(BopOp::Ult.eval(Width::Bits64, 3, 5).unwrap(), 1);
        assert_eq!(BopOp::Ult.eval(Width::Bits64, 5, 3).unwrap(), 0);
    }

    #[test]
    fn uop_wraps_at_declared_size() {
        assert_eq!(UopOp::Incr.eval(Width::Bits8, 0xff), 0);
        assert_eq!(UopOp::Decr.eval(Width::Bits8, 0), 0xff);
    }
}
