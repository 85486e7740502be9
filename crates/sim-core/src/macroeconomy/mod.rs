//! Macro State Updaters
//!
//! Five independent pure functions, each taking the previous sub-state and
//! this month's flow variables and returning the new sub-state. Numeric
//! degeneracies are floored or capped inline rather than raised as errors
//! so long batch sweeps stay numerically stable.

pub mod central_bank;
pub mod foreign;
pub mod government;
pub mod inflation;
pub mod labor;
