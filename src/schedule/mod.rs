//! Bounded concurrent execution of per-group work for the batch form.
//!
//! The limit is `min(total / 2, free)` logical processors, never below one.
//! Groups are dispatched in fixed-size batches and each batch is joined
//! before the next starts.

pub mod dispatch;
pub mod probe;

pub use dispatch::*;
pub use probe::*;
