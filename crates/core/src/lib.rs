//! Cinq Core - the sequence contract and its inputs.
//!
//! This crate provides the foundation every Cinq pipeline is built on:
//!
//! - `Sequence`: a restartable producer; every `cursor()` call is a fresh pass
//! - `Cursor`: per-pass traversal state (`index`, `current`)
//! - `RandomAccess`: O(1) length and indexing for sources that support it
//! - `Source`, `Buffered`: fixed collections and buffered one-shot iterators
//! - `range`, `repeat`, `generate`: generative sources
//! - `Value`, `ElementKind`: tagged elements and kind extraction for `of_type`
//! - `Error`: error taxonomy shared by operators and terminal operations
//!
//! # Example
//!
//! ```rust
//! use cinq_core::{from_once, from_vec, range, Sequence};
//!
//! let numbers = from_vec(vec![1, 2, 3]);
//! assert_eq!(numbers.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
//! // A second pass sees the same elements.
//! assert_eq!(numbers.cursor().count(), 3);
//!
//! // One-shot iterators are buffered on the first pass.
//! let once = from_once("a b c".split(' '));
//! assert_eq!(once.cursor().count(), 3);
//! assert_eq!(once.cursor().last(), Some("c"));
//!
//! let evens = range(0, 10, 2).unwrap();
//! assert_eq!(evens.cursor().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
//! ```

#![no_std]

extern crate alloc;

mod buffered;
mod error;
mod generator;
mod kind;
mod sequence;
mod source;
mod types;
mod value;

pub use buffered::{from_once, Buffered};
pub use error::{Error, Result};
pub use generator::{generate, range, repeat, Generate, Range, Repeat};
pub use kind::{ElementKind, Timestamp};
pub use sequence::{Cursor, RandomAccess, Sequence};
pub use source::{empty, from_iter, from_vec, SharedIter, Source};
pub use types::DataType;
pub use value::{JsonbValue, Value};
