//! Cinq Query - lazy, composable query operators over restartable sequences.
//!
//! This crate provides the operator surface of Cinq:
//!
//! - `Enumerable`: chainable operators and terminal operations for every `Sequence`
//! - `stage`: one iterator stage per operator (filter, project, partition, sets, joins)
//! - `ordering`: comparers and the stably sorted `Ordered` view with `then_by`
//! - `terminal`: single-pass terminal operations shared by the facade
//! - `func`: callback adapters for plain and index-aware operators
//!
//! Chaining never pulls an element. Each terminal call, or each `cursor()` of a
//! composed sequence, is an independent pass over the sources.
//!
//! # Example
//!
//! ```rust
//! use cinq_query::{from_vec, Enumerable};
//!
//! let people = from_vec(vec![("ann", 31), ("bob", 25), ("cid", 31), ("dee", 19)]);
//!
//! let names = (&people)
//!     .filter(|p| p.1 > 20)
//!     .order_by_descending(|p| p.1)
//!     .then_by(|p| p.0)
//!     .select(|p| p.0);
//! assert_eq!(names.to_vec(), vec!["ann", "cid", "bob"]);
//!
//! let by_age = (&people).group_by(|p| p.1);
//! assert_eq!(by_age.count(), 3);
//! assert_eq!(people.first().unwrap(), ("ann", 31));
//! ```

#![no_std]

extern crate alloc;

mod enumerable;
pub mod func;
pub mod ordering;
pub mod stage;
pub mod terminal;

pub use enumerable::{Enumerable, Same};
pub use func::{Indexed, Plain};
pub use ordering::{Order, Ordered};

pub use cinq_core::{
    empty, from_iter, from_once, from_vec, generate, range, repeat, Buffered, Cursor, DataType,
    ElementKind, Error, JsonbValue, RandomAccess, Result, Sequence, Source, Timestamp, Value,
};
pub use cinq_lookup::{eq_by, eq_by_key, Dictionary, EqualityComparer, Grouping, Lookup};
