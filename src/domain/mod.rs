//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `playground` - Tool registry and per-user tool state
//! - `execution` - Pure tool computations and the dispatcher

pub mod execution;
pub mod foundation;
pub mod playground;
