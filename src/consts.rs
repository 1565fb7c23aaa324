//! VM parameters
//!
//! Addresses, register counts and cost table values fixed by the ISA. None
//! of these are configurable at runtime; a different cost model is a
//! different ISA.

/// Number of general-purpose, writable registers (`R1..R32`).
pub const NUM_GENERAL_REGISTERS: usize = 32;

/// Number of read-only argument registers (`A1..A16`).
pub const NUM_ARG_REGISTERS: usize = 16;

/// Initial value of every general-purpose register and of `Sp` before the
/// program runs is `0`, except `Sp`, which starts at [`STACK_MAX`].
pub const STACK_MAX: u64 = 102_400;

/// First address not in the stack region. The stack region is `[0,
/// STACK_TOP)`.
pub const STACK_TOP: u64 = 10_240;

/// First address of the heap region.
pub const HEAP_BASE: u64 = 20_480;

/// Sentinel wait-until value meaning "this register has no outstanding
/// async load".
pub const NO_DEADLINE: f64 = -1.0;

/// Multiplier applied to the max heap high-water mark to obtain its
/// contribution to "Total cost" (spec.md §6).
pub const HEAP_COST_FACTOR: f64 = 16.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_contiguous_with_a_reserved_hole() {
        assert!(STACK_MAX > STACK_TOP, "Sp starts above the stack region by design");
        assert!(STACK_TOP < HEAP_BASE);
    }
}
