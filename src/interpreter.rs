//! The execution driver (spec.md §4.6): one recursive `exec_function` per
//! activation, dispatching each statement by opcode.

pub mod cost_tree;

use std::io::{self, BufRead, Write};

use tracing::{instrument, trace, warn};

use crate::alu::BopOp;
use crate::consts::{NO_DEADLINE, STACK_TOP};
use crate::cost::{wait_cost, CostMachine, Opcode, ORACLE_FUNCTION_NAME};
use crate::error::{EngineError, EngineErrorKind, InterpreterError};
use crate::memory::{Memory, Region};
use crate::program::{Function, Program, Stmt};
use crate::reg::Reg;
use crate::regfile::RegFile;
use crate::width::Width;

pub use cost_tree::{CostNode, Histogram};

/// Everything `swpp-interpreter.log` and its companions report about one
/// run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub return_value: u64,
    pub execution_cost: f64,
    pub max_heap_usage: u64,
    pub total_wait_cost: f64,
    pub cost_tree: CostNode,
    pub histogram: Histogram,
}

/// Drives one program to completion against a given input/output pair.
pub struct Engine<'p, R, W> {
    program: &'p Program,
    stdin: R,
    stdout: W,
    memory: Memory,
    machine: CostMachine,
    histogram: Histogram,
    total_wait_cost: f64,
}

impl<'p, R: BufRead, W: Write> Engine<'p, R, W> {
    pub fn new(program: &'p Program, stdin: R, stdout: W) -> Self {
        Self {
            program,
            stdin,
            stdout,
            memory: Memory::new(),
            machine: CostMachine::new(),
            histogram: Histogram::new(),
            total_wait_cost: 0.0,
        }
    }

    /// Run `main` to completion.
    pub fn run(mut self) -> Result<RunReport, InterpreterError> {
        let main = self
            .program
            .get("main")
            .ok_or_else(|| EngineError::new(0, EngineErrorKind::MissingMain))?;
        let (return_value, cost_tree) = self.exec_function(main, RegFile::new())?;
        Ok(RunReport {
            return_value,
            execution_cost: cost_tree.cost(),
            max_heap_usage: self.memory.max_alloced(),
            total_wait_cost: self.total_wait_cost,
            cost_tree,
            histogram: self.histogram,
        })
    }

    fn record(&mut self, opcode: Opcode, inst_cost: f64, wait: f64) {
        self.histogram.record(self.machine.kind(), opcode, inst_cost);
        self.total_wait_cost += wait;
    }

    /// Region a successfully-validated address falls in. Only ever called
    /// right after a `Memory::load`/`store` has already accepted `addr`, so
    /// the reserved hole is impossible here.
    fn region_of_validated(addr: u64) -> Region {
        if addr < STACK_TOP {
            Region::Stack
        } else {
            Region::Heap
        }
    }

    fn read_token(&mut self) -> io::Result<String> {
        let mut token = String::new();
        let mut started = false;
        for byte in self.stdin.by_ref().bytes() {
            let byte = byte?;
            if byte.is_ascii_whitespace() {
                if started {
                    break;
                }
                continue;
            }
            started = true;
            token.push(byte as char);
        }
        Ok(token)
    }

    /// Run one activation of `function` to its `Ret`, returning its value
    /// and its fully-populated cost subtree.
    #[instrument(level = "trace", skip_all, fields(function = %function.name))]
    fn exec_function(&mut self, function: &Function, mut regfile: RegFile) -> Result<(u64, CostNode), InterpreterError> {
        self.machine.enter_function(&function.name);
        if self.machine.is_oracle() {
            warn!(function = %function.name, "entering oracle mode");
        }
        regfile.set_nargs(function.nargs);

        let mut node = CostNode::new(function.name.clone());
        let mut block_id = function.entry().ok_or_else(|| {
            EngineError::new(0, EngineErrorKind::MissingEntryBlock { function: function.name.clone() })
        })?;
        let mut stmt_idx = 0;

        loop {
            let stmt = &function.block(block_id).stmts[stmt_idx];
            let line = stmt.line();
            let table = self.machine.cost_table();
            trace!(line, "dispatch");

            match stmt {
                Stmt::Ret { val, .. } => {
                    let (v, d) = val.resolve(&mut regfile, line)?;
                    let wait = wait_cost(node.cost(), d);
                    node.charge(table.ret + wait);
                    self.record(Opcode::Ret, table.ret, wait);
                    self.machine.on_ret();
                    return Ok((v, node));
                }
                Stmt::BrUncond { target, .. } => {
                    node.charge(table.br_uncond);
                    self.record(Opcode::BrUncond, table.br_uncond, 0.0);
                    block_id = *target;
                    stmt_idx = 0;
                    continue;
                }
                Stmt::BrCond { cond, true_block, false_block, .. } => {
                    let (v, d) = cond.resolve(&mut regfile, line)?;
                    let wait = wait_cost(node.cost(), d);
                    let (next, inst_cost) =
                        if v != 0 { (*true_block, table.br_cond_true) } else { (*false_block, table.br_cond_false) };
                    node.charge(inst_cost + wait);
                    self.record(Opcode::BrCond, inst_cost, wait);
                    block_id = next;
                    stmt_idx = 0;
                    continue;
                }
                Stmt::Switch { cond, cases, default, .. } => {
                    let (v, d) = cond.resolve(&mut regfile, line)?;
                    let wait = wait_cost(node.cost(), d);
                    let next = cases.iter().find(|(case, _)| *case == v).map(|(_, b)| *b).unwrap_or(*default);
                    node.charge(table.switch_ + wait);
                    self.record(Opcode::Switch, table.switch_, wait);
                    block_id = next;
                    stmt_idx = 0;
                    continue;
                }
                Stmt::Call { lhs, function: callee_name, args, .. } => {
                    if self.machine.is_oracle() {
                        return Err(EngineError::new(line, EngineErrorKind::CallInsideOracle).into());
                    }
                    let callee = self.program.get(callee_name).ok_or_else(|| {
                        EngineError::new(line, EngineErrorKind::UndefinedFunction { name: callee_name.clone() })
                    })?;
                    if callee.nargs != args.len() {
                        return Err(EngineError::new(
                            line,
                            EngineErrorKind::ArgumentCountMismatch {
                                function: callee_name.clone(),
                                expected: callee.nargs,
                                got: args.len(),
                            },
                        )
                        .into());
                    }
                    let callee_is_oracle = callee_name == ORACLE_FUNCTION_NAME;

                    // Arguments are evaluated against the caller's own
                    // register file (consuming any pending deadlines in
                    // place) and copied into a fresh view for the callee;
                    // the caller's register file needs no separate
                    // save/restore since it is never shared with the callee.
                    let mut callee_regfile = RegFile::new();
                    callee_regfile.set_nargs(callee.nargs);
                    let mut max_deadline = NO_DEADLINE;
                    for (i, arg) in args.iter().enumerate() {
                        let (v, d) = arg.resolve(&mut regfile, line)?;
                        callee_regfile.set_value(Reg::arg((i + 1) as u8), v);
                        if d > max_deadline {
                            max_deadline = d;
                        }
                    }

                    let wait = wait_cost(node.cost(), max_deadline);
                    let call_cost = if callee_is_oracle { table.call_oracle } else { table.call };
                    let inst_cost = call_cost + callee.nargs as f64 * table.per_arg;
                    node.charge(inst_cost + wait);
                    self.record(Opcode::Call, inst_cost, wait);

                    let (ret, callee_node) = self.exec_function(callee, callee_regfile)?;
                    node.add_callee(callee_node);
                    regfile.write(*lhs, ret, line)?;

                    stmt_idx += 1;
                    continue;
                }
                Stmt::Malloc { lhs, size, .. } => {
                    let (sz, d) = size.resolve(&mut regfile, line)?;
                    let addr = self.memory.malloc(sz, line)?;
                    regfile.write(*lhs, addr, line)?;
                    let wait = wait_cost(node.cost(), d);
                    node.charge(table.malloc + wait);
                    self.record(Opcode::Malloc, table.malloc, wait);
                }
                Stmt::Free { ptr, .. } => {
                    let (addr, d) = ptr.resolve(&mut regfile, line)?;
                    self.memory.free(addr, line)?;
                    let wait = wait_cost(node.cost(), d);
                    node.charge(table.free + wait);
                    self.record(Opcode::Free, table.free, wait);
                }
                Stmt::Load { lhs, is_async, width, ptr, offset, .. } => {
                    let (base, d) = ptr.resolve(&mut regfile, line)?;
                    let addr = base.wrapping_add(*offset);
                    let acc = node.cost();
                    let value = self.memory.load(*width, addr, line)?;
                    let region = Self::region_of_validated(addr);
                    let wait = wait_cost(acc, d);
                    regfile.write(*lhs, value, line)?;

                    let inst_cost = if *is_async {
                        table.aload
                    } else {
                        match region {
                            Region::Stack => table.stack,
                            Region::Heap => table.heap,
                        }
                    };
                    if *is_async {
                        let extra = match region {
                            Region::Stack => table.wait_stack,
                            Region::Heap => table.wait_heap,
                        };
                        let deadline = acc + wait + table.aload + extra;
                        regfile.set_async(*lhs, deadline, line)?;
                    }
                    node.charge(inst_cost + wait);
                    self.record(Opcode::Load, inst_cost, wait);
                }
                Stmt::Store { width, val, ptr, offset, .. } => {
                    let (base, pd) = ptr.resolve(&mut regfile, line)?;
                    let addr = base.wrapping_add(*offset);
                    let (v, vd) = val.resolve(&mut regfile, line)?;
                    self.memory.store(*width, addr, v, line)?;
                    let region = Self::region_of_validated(addr);
                    let inst_cost = match region {
                        Region::Stack => table.stack,
                        Region::Heap => table.heap,
                    };
                    let wait = wait_cost(node.cost(), pd).max(wait_cost(node.cost(), vd));
                    node.charge(inst_cost + wait);
                    self.record(Opcode::Store, inst_cost, wait);
                }
                Stmt::Bop { lhs, op, lhs_val, rhs_val, size, .. } => {
                    let (a, ad) = lhs_val.resolve(&mut regfile, line)?;
                    let (b, bd) = rhs_val.resolve(&mut regfile, line)?;
                    let result = eval_bop(*op, *size, a, b, line)?;
                    regfile.write(*lhs, result, line)?;
                    let wait = wait_cost(node.cost(), ad).max(wait_cost(node.cost(), bd));
                    let inst_cost = op.cost(table);
                    node.charge(inst_cost + wait);
                    self.record(Opcode::Bop, inst_cost, wait);
                }
                Stmt::Sum { lhs, values, size, .. } => {
                    let mut sum: u64 = 0;
                    let mut wait: f64 = 0.0;
                    for v in values.iter() {
                        let (val, d) = v.resolve(&mut regfile, line)?;
                        sum = sum.wrapping_add(val);
                        wait = wait_cost(node.cost(), d).max(wait);
                    }
                    regfile.write(*lhs, size.mask_unsigned(sum), line)?;
                    node.charge(table.sum + wait);
                    self.record(Opcode::Sum, table.sum, wait);
                }
                Stmt::Uop { lhs, op, val, size, .. } => {
                    let (v, d) = val.resolve(&mut regfile, line)?;
                    let result = op.eval(*size, v);
                    regfile.write(*lhs, result, line)?;
                    let wait = wait_cost(node.cost(), d);
                    node.charge(table.uop + wait);
                    self.record(Opcode::Uop, table.uop, wait);
                }
                Stmt::Select { lhs, cond, val_true, val_false, .. } => {
                    let (c, cd) = cond.resolve(&mut regfile, line)?;
                    let (vt, td) = val_true.resolve(&mut regfile, line)?;
                    let (vf, fd) = val_false.resolve(&mut regfile, line)?;
                    let (chosen, chosen_d) = if c != 0 { (vt, td) } else { (vf, fd) };
                    regfile.write(*lhs, chosen, line)?;
                    let wait = wait_cost(node.cost(), cd).max(wait_cost(node.cost(), chosen_d));
                    node.charge(table.ternary + wait);
                    self.record(Opcode::Select, table.ternary, wait);
                }
                Stmt::Assert { lhs_val, rhs_val, .. } => {
                    let (a, ad) = lhs_val.resolve(&mut regfile, line)?;
                    let (b, bd) = rhs_val.resolve(&mut regfile, line)?;
                    if a != b {
                        return Err(EngineError::new(
                            line,
                            EngineErrorKind::AssertionFailed { lhs: a, rhs: b, registers: regfile.to_string() },
                        )
                        .into());
                    }
                    let wait = wait_cost(node.cost(), ad).max(wait_cost(node.cost(), bd));
                    node.charge(table.assert_ + wait);
                    self.record(Opcode::Assert, table.assert_, wait);
                }
                Stmt::Read { lhs, .. } => {
                    let token = self.read_token()?;
                    let value: u64 = token
                        .parse()
                        .map_err(|_| EngineError::new(line, EngineErrorKind::InvalidInput { token: token.clone() }))?;
                    regfile.write(*lhs, value, line)?;
                    node.charge(table.call);
                    self.record(Opcode::Read, table.call, 0.0);
                }
                Stmt::Write { lhs, val, .. } => {
                    let (v, d) = val.resolve(&mut regfile, line)?;
                    writeln!(self.stdout, "{v}")?;
                    regfile.write(*lhs, 0, line)?;
                    let wait = wait_cost(node.cost(), d);
                    let inst_cost = table.call + table.per_arg;
                    node.charge(inst_cost + wait);
                    self.record(Opcode::Write, inst_cost, wait);
                }
            }

            stmt_idx += 1;
        }
    }
}

fn eval_bop(op: BopOp, size: Width, a: u64, b: u64, line: usize) -> Result<u64, EngineError> {
    op.eval(size, a, b).map_err(|kind| EngineError::new(line, kind))
}
