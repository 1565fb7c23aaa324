#![allow(clippy::wrong_self_convention)]

pub mod alu;
pub mod consts;
pub mod cost;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod operand;
pub mod parser;
pub mod program;
pub mod reg;
pub mod regfile;
pub mod width;

pub mod prelude {
    pub use crate::alu::{BopOp, UopOp};
    pub use crate::cost::{CostMachine, MachineKind};
    pub use crate::error::{EngineError, EngineErrorKind, InterpreterError};
    pub use crate::interpreter::{CostNode, Engine, Histogram, RunReport};
    pub use crate::memory::Memory;
    pub use crate::operand::Operand;
    pub use crate::program::{BasicBlock, BlockId, Function, Program, Stmt};
    pub use crate::reg::Reg;
    pub use crate::regfile::RegFile;
    pub use crate::width::Width;
}
