//! Shared value types, errors and numeric guards.

pub mod core;
pub mod error;
pub(crate) mod math;
