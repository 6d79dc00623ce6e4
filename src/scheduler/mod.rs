//! Fixed-interval reconciliation ticks.

pub mod ticks;
