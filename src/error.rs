//! Runtime interpreter error implementation.
//!
//! Every fatal condition the engine itself detects is reported through
//! [`EngineError`], which always carries the source line of the offending
//! statement (spec.md §7). Conditions the engine cannot characterise any
//! further — a missing input file, a malformed stdin token — are carried as
//! [`InterpreterError::Io`].

use std::io;

use thiserror::Error;

use crate::reg::Reg;

/// Top-level error returned by [`crate::interpreter::exec_program`] and the
/// CLI entry point.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// A well-formed fatal condition raised by the engine itself.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Unrecoverable I/O: missing input file, or a malformed `Read` token.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl InterpreterError {
    /// The source line the error was raised at, if the engine recorded one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Engine(e) => Some(e.line),
            Self::Io(_) => None,
        }
    }
}

/// A fatal, line-tagged engine error (spec.md §7 taxonomy).
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct EngineError {
    /// Source line of the statement that raised the error.
    pub line: usize,
    /// What went wrong.
    pub kind: EngineErrorKind,
}

impl EngineError {
    pub(crate) fn new(line: usize, kind: EngineErrorKind) -> Self {
        Self { line, kind }
    }
}

/// The specific reason an [`EngineError`] was raised.
#[derive(Debug, Error, PartialEq)]
pub enum EngineErrorKind {
    /// No function named `main` exists.
    #[error("missing main function")]
    MissingMain,
    /// A function has no basic blocks.
    #[error("missing first basic block in function `{function}`")]
    MissingEntryBlock {
        /// The function with no entry block.
        function: String,
    },
    /// A branch targets a label not present in the current function.
    #[error("branching to an undefined basic block `{label}`")]
    UndefinedBlock {
        /// The unresolved label.
        label: String,
    },
    /// `Call` targets a function that doesn't exist in the program.
    #[error("calling an undefined function `{name}`")]
    UndefinedFunction {
        /// The unresolved function name.
        name: String,
    },
    /// `Call` arity doesn't match the callee's declared `nargs`.
    #[error("calling `{function}` with {got} arguments, expected {expected}")]
    ArgumentCountMismatch {
        /// The callee.
        function: String,
        /// Declared argument count.
        expected: usize,
        /// Arguments actually supplied at the call site.
        got: usize,
    },
    /// `Call` executed while the oracle is active (oracle is a leaf).
    #[error("call instruction executed inside the oracle")]
    CallInsideOracle,
    /// A read targeted [`Reg::None`].
    #[error("reading an unknown register")]
    ReadNoneRegister,
    /// A read targeted `A{k}` with `k` beyond the active call's arity.
    #[error("reading out-of-range argument register (nargs = {nargs})")]
    ArgOutOfRange {
        /// The active call's declared argument count.
        nargs: usize,
    },
    /// A write targeted a read-only `A{k}` register.
    #[error("writing to a read-only register {reg}")]
    WriteToArg {
        /// The offending register.
        reg: Reg,
    },
    /// An async load targeted a register that already has an outstanding
    /// deadline.
    #[error("async load to {reg}, which is already waiting for a previous load to resolve")]
    DuplicateAsyncDeadline {
        /// The offending register.
        reg: Reg,
    },
    /// Access fell inside the reserved hole `[10240, 20480)`.
    #[error("access to reserved address {addr} (reserved hole is [10240, 20480))")]
    ReservedHoleAccess {
        /// The offending address.
        addr: u64,
    },
    /// Access fell outside every mapped region, or crossed a region
    /// boundary.
    #[error("access out of mapped memory at address {addr}, width {width} bytes")]
    OutOfRegionAccess {
        /// The offending address.
        addr: u64,
        /// Access width in bytes.
        width: u64,
    },
    /// `Free` targeted a base address with no live allocation.
    #[error("free of unknown allocation base {addr}")]
    FreeUnknownBase {
        /// The offending address.
        addr: u64,
    },
    /// `Malloc` was asked for zero bytes.
    #[error("malloc of size 0")]
    MallocZeroSize,
    /// `Malloc` would exceed the 64-bit address space.
    #[error("malloc of size {size} overflows the address space")]
    MallocOverflow {
        /// Requested size.
        size: u64,
    },
    /// A `Bop` division or remainder opcode saw a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// `Assert`'s two operands were unequal.
    #[error("assertion failed: {lhs} != {rhs}\n{registers}")]
    AssertionFailed {
        /// Left-hand operand value.
        lhs: u64,
        /// Right-hand operand value.
        rhs: u64,
        /// Rendered register-file dump at the point of failure.
        registers: String,
    },
    /// `Read` consumed a token that doesn't parse as a decimal `u64`.
    #[error("invalid input: `{token}` is not a u64")]
    InvalidInput {
        /// The offending token.
        token: String,
    },
}
