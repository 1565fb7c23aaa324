//! The two-mode cost model (spec.md §4.4, §6).

use std::fmt;

use strum::EnumIter;

/// Per-opcode cost constants. The two tables differ only in `stack` and
/// `heap`; every other field is shared between [`MachineKind::Normal`] and
/// [`MachineKind::Oracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTable {
    pub ret: f64,
    pub br_uncond: f64,
    pub br_cond_true: f64,
    pub br_cond_false: f64,
    pub switch_: f64,
    pub malloc: f64,
    pub free: f64,
    pub stack: f64,
    pub heap: f64,
    pub aload: f64,
    pub wait_stack: f64,
    pub wait_heap: f64,
    pub muldiv: f64,
    pub logical: f64,
    pub addsub: f64,
    pub sum: f64,
    pub uop: f64,
    pub comp: f64,
    pub ternary: f64,
    pub call: f64,
    pub call_oracle: f64,
    pub per_arg: f64,
    pub assert_: f64,
}

/// `Normal` mode's cost table (spec.md §6).
pub const NORMAL_COST: CostTable = CostTable {
    ret: 1.0,
    br_uncond: 1.0,
    br_cond_true: 6.0,
    br_cond_false: 1.0,
    switch_: 4.0,
    malloc: 50.0,
    free: 50.0,
    stack: 20.0,
    heap: 30.0,
    aload: 1.0,
    wait_stack: 24.0,
    wait_heap: 34.0,
    muldiv: 1.0,
    logical: 4.0,
    addsub: 5.0,
    sum: 10.0,
    uop: 1.0,
    comp: 1.0,
    ternary: 1.0,
    call: 2.0,
    call_oracle: 40.0,
    per_arg: 1.0,
    assert_: 0.0,
};

/// `Oracle` mode's cost table: identical to [`NORMAL_COST`] except `stack`
/// and `heap`, which are an order of magnitude cheaper.
pub const ORACLE_COST: CostTable = CostTable {
    stack: 2.0,
    heap: 3.0,
    ..NORMAL_COST
};

/// Which cost table is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MachineKind {
    Normal,
    Oracle,
}

impl MachineKind {
    pub const fn cost_table(self) -> &'static CostTable {
        match self {
            MachineKind::Normal => &NORMAL_COST,
            MachineKind::Oracle => &ORACLE_COST,
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineKind::Normal => write!(f, "Normal"),
            MachineKind::Oracle => write!(f, "Oracle"),
        }
    }
}

/// The name a function must have to switch the machine into oracle mode.
pub const ORACLE_FUNCTION_NAME: &str = "oracle";

/// Tracks the currently active cost table across nested calls.
///
/// There is exactly one of these per [`crate::interpreter::Engine`] run;
/// it is global in the sense that every activation observes the same
/// mode, mirroring the original single `CurrentMachine` pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostMachine {
    kind: MachineKind,
}

impl CostMachine {
    pub const fn new() -> Self {
        Self { kind: MachineKind::Normal }
    }

    pub const fn kind(self) -> MachineKind {
        self.kind
    }

    pub const fn cost_table(self) -> &'static CostTable {
        self.kind.cost_table()
    }

    pub const fn is_oracle(self) -> bool {
        matches!(self.kind, MachineKind::Oracle)
    }

    /// Called on entering a function: switches to oracle mode iff the
    /// callee is literally named `"oracle"`.
    pub fn enter_function(&mut self, function_name: &str) {
        if function_name == ORACLE_FUNCTION_NAME {
            self.kind = MachineKind::Oracle;
        }
    }

    /// Called unconditionally on `Ret`.
    pub fn on_ret(&mut self) {
        self.kind = MachineKind::Normal;
    }
}

impl Default for CostMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Statement-level opcode, used to index the per-`(machine, opcode)`
/// histogram (spec.md §6's `swpp-interpreter-inst.log`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Opcode {
    Ret,
    BrUncond,
    BrCond,
    Switch,
    Malloc,
    Free,
    Load,
    Store,
    Bop,
    Sum,
    Uop,
    Select,
    Call,
    Assert,
    Read,
    Write,
}

impl Opcode {
    /// The fixed row order `swpp-interpreter-inst.log` prints in. `Assert`
    /// is deliberately excluded: the original tool tracks its cost but
    /// never reports it as a histogram row.
    pub const LOGGED_ORDER: [Opcode; 15] = [
        Opcode::Ret,
        Opcode::BrUncond,
        Opcode::BrCond,
        Opcode::Switch,
        Opcode::Malloc,
        Opcode::Free,
        Opcode::Load,
        Opcode::Store,
        Opcode::Bop,
        Opcode::Sum,
        Opcode::Uop,
        Opcode::Select,
        Opcode::Call,
        Opcode::Read,
        Opcode::Write,
    ];
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Ret => "Ret",
            Opcode::BrUncond => "BrUncond",
            Opcode::BrCond => "BrCond",
            Opcode::Switch => "Switch",
            Opcode::Malloc => "Malloc",
            Opcode::Free => "Free",
            Opcode::Load => "Load",
            Opcode::Store => "Store",
            Opcode::Bop => "BinaryOp",
            Opcode::Sum => "Sum",
            Opcode::Uop => "UnaryOp",
            Opcode::Select => "Select",
            Opcode::Call => "Call",
            Opcode::Assert => "Assert",
            Opcode::Read => "Read",
            Opcode::Write => "Write",
        };
        write!(f, "{name}")
    }
}

/// `max(0, deadline - accumulated_cost)` (spec.md §3): the price paid to
/// wait for an unresolved async load.
pub fn wait_cost(accumulated: f64, deadline: f64) -> f64 {
    if deadline < 0.0 || accumulated >= deadline {
        0.0
    } else {
        deadline - accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_differ_only_in_stack_and_heap() {
        assert_eq!(NORMAL_COST.ret, ORACLE_COST.ret);
        assert_eq!(NORMAL_COST.call_oracle, ORACLE_COST.call_oracle);
        assert_ne!(NORMAL_COST.stack, ORACLE_COST.stack);
        assert_ne!(NORMAL_COST.heap, ORACLE_COST.heap);
    }

    #[test]
    fn entering_oracle_by_name_and_returning_resets() {
        let mut m = CostMachine::new();
        assert!(!m.is_oracle());
        m.enter_function("oracle");
        assert!(m.is_oracle());
        m.on_ret();
        assert!(!m.is_oracle());
    }

    #[test]
    fn entering_other_function_names_stays_normal() {
        let mut m = CostMachine::new();
        m.enter_function("compute");
        assert!(!m.is_oracle());
    }

    #[test]
    fn wait_cost_never_negative() {
        assert_eq!(wait_cost(5.0, 3.0), 0.0);
        assert_eq!(wait_cost(5.0, 5.0), 0.0);
        assert_eq!(wait_cost(5.0, 9.0), 4.0);
        assert_eq!(wait_cost(0.0, -1.0), 0.0);
    }
}
