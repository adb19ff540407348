//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one in-game month.
pub type Month = u64;

/// Position of an employee in the ordered roster.
pub type EmployeeIndex = usize;
