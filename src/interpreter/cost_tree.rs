//! The hierarchical cost tree and per-opcode histogram (spec.md §6).

use std::fmt::Write as _;

use itertools::iproduct;
use strum::IntoEnumIterator;

use crate::cost::{MachineKind, Opcode};

/// One function activation's accumulated cost, plus its callees in
/// invocation order. A node's `cost` already includes the total cost of
/// every callee beneath it.
#[derive(Debug, Clone)]
pub struct CostNode {
    function_name: String,
    cost: f64,
    callees: Vec<CostNode>,
}

impl CostNode {
    pub fn new(function_name: String) -> Self {
        Self { function_name, cost: 0.0, callees: Vec::new() }
    }

    /// The cost accumulated in this activation so far, including every
    /// callee that has already returned.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Add to this node's own cost (an executed instruction's
    /// `inst_cost + wait_cost`).
    pub fn charge(&mut self, amount: f64) {
        self.cost += amount;
    }

    /// Fold a finished callee's total cost into this node, and record it
    /// as the next child in invocation order.
    pub fn add_callee(&mut self, callee: CostNode) {
        self.cost += callee.cost;
        self.callees.push(callee);
    }

    /// Render as `swpp-interpreter-cost.log`'s tree: `"| "` repeated once
    /// per depth, tree order matching invocation order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "");
        out
    }

    fn render_into(&self, out: &mut String, indent: &str) {
        let _ = writeln!(out, "{indent}{}: {:.4}", self.function_name, self.cost);
        for callee in &self.callees {
            callee.render_into(out, &format!("{indent}| "));
        }
    }
}

/// Per-`(machine, opcode)` instruction count and accumulated `inst_cost`.
#[derive(Debug, Clone)]
pub struct Histogram {
    count: [[u64; 16]; 2],
    cost: [[f64; 16]; 2],
}

impl Histogram {
    pub fn new() -> Self {
        Self { count: [[0; 16]; 2], cost: [[0.0; 16]; 2] }
    }

    /// Record one executed instruction of `opcode` under `machine`,
    /// billing its `inst_cost` (not `wait_cost`, which is a single global
    /// scalar — see spec.md §6).
    pub fn record(&mut self, machine: MachineKind, opcode: Opcode, inst_cost: f64) {
        let m = machine as usize;
        let o = opcode as usize;
        self.count[m][o] += 1;
        self.cost[m][o] += inst_cost;
    }

    /// Render `swpp-interpreter-inst.log`'s tab-separated table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Machine\tInstruction\tCount\tCost");
        for (machine, opcode) in iproduct!(MachineKind::iter(), Opcode::LOGGED_ORDER) {
            let m = machine as usize;
            let o = opcode as usize;
            let _ = writeln!(out, "{}\t{}\t{}\t{:.4}", machine, opcode, self.count[m][o], self.cost[m][o]);
        }
        out
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callee_cost_folds_into_caller_and_preserves_order() {
        let mut root = CostNode::new("main".into());
        root.charge(2.0);
        let mut child = CostNode::new("helper".into());
        child.charge(5.0);
        root.add_callee(child);
        assert_eq!(root.cost(), 7.0);
        assert!(root.render().starts_with("main: 7.0000\n"));
        assert!(root.render().contains("| helper: 5.0000\n"));
    }

    #[test]
    fn histogram_tracks_count_and_cost_independently() {
        let mut h = Histogram::new();
        h.record(MachineKind::Normal, Opcode::Call, 2.0);
        h.record(MachineKind::Normal, Opcode::Call, 2.0);
        h.record(MachineKind::Oracle, Opcode::Call, 40.0);
        let rendered = h.render();
        assert!(rendered.contains("Normal\tCall\t2\t4.0000"));
        assert!(rendered.contains("Oracle\tCall\t1\t40.0000"));
    }

    #[test]
    fn assert_is_tracked_but_never_rendered() {
        let mut h = Histogram::new();
        h.record(MachineKind::Normal, Opcode::Assert, 0.0);
        assert!(!h.render().contains("Assert"));
    }
}
