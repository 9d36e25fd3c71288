//! Stage iterators.
//!
//! Every operator is a [`cinq_core::Sequence`] that owns its upstream and its
//! parameters. Calling `cursor()` starts a pass with fresh per-pass state
//! (counters, latches, membership sets, buffers); no upstream element is
//! pulled before the first `next()`.

mod combine;
mod filter;
mod group;
mod join;
mod partition;
mod project;
mod set_ops;

pub use combine::{Append, Concat, DefaultIfEmpty, Prepend, Reverse, Zip};
pub use filter::{OfType, Where};
pub use group::{GroupBy, GroupResult};
pub use join::{GroupJoin, Join};
pub use partition::{Skip, SkipLast, SkipWhile, Take, TakeLast, TakeWhile};
pub use project::{Select, SelectMany};
pub use set_ops::{Distinct, Except, Intersect, Union};
