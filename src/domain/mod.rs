//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, IDs, errors, state machine)
//! - `session` - Phase sequencing, timers, and the session record aggregate
//! - `export` - Tabular projection of a finished record

pub mod export;
pub mod foundation;
pub mod session;
