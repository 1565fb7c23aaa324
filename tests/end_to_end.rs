//! The six literal end-to-end scenarios (spec.md §8), built directly as
//! `Program` fixtures so they pin down engine semantics independent of the
//! `.swa` surface syntax.

use std::collections::HashMap;
use std::io::Cursor;

use swpp_interpreter::prelude::*;

fn function(name: &str, nargs: usize, blocks: Vec<BasicBlock>) -> (String, Function) {
    (name.to_string(), Function::new(name.to_string(), nargs, blocks))
}

fn program(functions: Vec<(String, Function)>) -> Program {
    Program::new(functions.into_iter().collect::<HashMap<_, _>>())
}

fn run(p: &Program) -> RunReport {
    Engine::new(p, Cursor::new(Vec::new()), Vec::new()).run().expect("run")
}

#[test]
fn minimal_return() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock { label: "entry".into(), stmts: vec![Stmt::Ret { line: 1, val: Operand::Literal(42) }] }],
    )]);
    let report = run(&p);
    assert_eq!(report.return_value, 42);
    assert_eq!(report.execution_cost, 1.0);
    assert_eq!(report.max_heap_usage, 0);
    assert_eq!(report.total_wait_cost, 0.0);
}

#[test]
fn addition_at_size_32() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock {
            label: "entry".into(),
            stmts: vec![
                Stmt::Bop {
                    line: 1,
                    lhs: Reg::general(1),
                    op: BopOp::Add,
                    lhs_val: Operand::Literal(7),
                    rhs_val: Operand::Literal(35),
                    size: Width::Bits32,
                },
                Stmt::Ret { line: 2, val: Operand::Register(Reg::general(1)) },
            ],
        }],
    )]);
    let report = run(&p);
    assert_eq!(report.return_value, 42);
    assert_eq!(report.execution_cost, 6.0);
}

#[test]
fn async_load_wait() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock {
            label: "entry".into(),
            stmts: vec![
                Stmt::Malloc { line: 1, lhs: Reg::general(1), size: Operand::Literal(8) },
                Stmt::Load {
                    line: 2,
                    lhs: Reg::general(1),
                    is_async: true,
                    width: Width::Bits64,
                    ptr: Operand::Register(Reg::general(1)),
                    offset: 0,
                },
                Stmt::Ret { line: 3, val: Operand::Register(Reg::general(1)) },
            ],
        }],
    )]);
    let report = run(&p);
    assert_eq!(report.execution_cost, 85.0);
    assert_eq!(report.total_wait_cost, 33.0);
}

#[test]
fn oracle_call() {
    let p = program(vec![
        function(
            "oracle",
            0,
            vec![BasicBlock { label: "entry".into(), stmts: vec![Stmt::Ret { line: 1, val: Operand::Literal(99) }] }],
        ),
        function(
            "main",
            0,
            vec![BasicBlock {
                label: "entry".into(),
                stmts: vec![
                    Stmt::Call { line: 1, lhs: Reg::general(1), function: "oracle".into(), args: vec![] },
                    Stmt::Ret { line: 2, val: Operand::Register(Reg::general(1)) },
                ],
            }],
        ),
    ]);
    let report = run(&p);
    assert_eq!(report.return_value, 99);
    assert_eq!(report.execution_cost, 42.0);
}

#[test]
fn heap_high_water() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock {
            label: "entry".into(),
            stmts: vec![
                Stmt::Malloc { line: 1, lhs: Reg::general(1), size: Operand::Literal(128) },
                Stmt::Malloc { line: 2, lhs: Reg::general(2), size: Operand::Literal(256) },
                Stmt::Free { line: 3, ptr: Operand::Register(Reg::general(1)) },
                Stmt::Malloc { line: 4, lhs: Reg::general(3), size: Operand::Literal(64) },
                Stmt::Ret { line: 5, val: Operand::Literal(0) },
            ],
        }],
    )]);
    let report = run(&p);
    assert_eq!(report.max_heap_usage, 384);
    let total_cost = report.execution_cost + report.max_heap_usage as f64 * 16.0;
    assert_eq!(total_cost, report.execution_cost + 6144.0);
}

#[test]
fn assertion_success_is_silent_and_free() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock {
            label: "entry".into(),
            stmts: vec![
                Stmt::Assert { line: 1, lhs_val: Operand::Literal(7), rhs_val: Operand::Literal(7) },
                Stmt::Ret { line: 2, val: Operand::Literal(0) },
            ],
        }],
    )]);
    let report = run(&p);
    assert_eq!(report.execution_cost, 1.0);
}

#[test]
fn assertion_failure_is_fatal_and_carries_registers() {
    let p = program(vec![function(
        "main",
        0,
        vec![BasicBlock {
            label: "entry".into(),
            stmts: vec![Stmt::Assert { line: 1, lhs_val: Operand::Literal(7), rhs_val: Operand::Literal(8) }],
        }],
    )]);
    let err = Engine::new(&p, Cursor::new(Vec::new()), Vec::new()).run().unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("assertion failed"));
    assert!(rendered.contains("r1[0]"));
}
