//! Cinq Lookup - hashed indexes built from a single pass over a sequence.
//!
//! This crate provides the structures behind grouping, joins and the set
//! operators:
//!
//! - `Lookup`: key to group index, groups in first-seen key order
//! - `Grouping`: a key and its elements in source order
//! - `MembershipSet`: first-sighting set used by distinct/union/except/intersect
//! - `Dictionary`: insertion-ordered map that rejects duplicate keys
//! - `EqualityComparer`: pluggable equality and hashing for all of the above
//!
//! # Example
//!
//! ```rust
//! use cinq_core::from_vec;
//! use cinq_lookup::{Dictionary, Lookup};
//!
//! let words = from_vec(vec!["apple", "avocado", "banana"]);
//! let by_initial = Lookup::build(&words, |w| w.as_bytes()[0], |w| w);
//!
//! assert_eq!(by_initial.len(), 2);
//! assert_eq!(by_initial.get(&b'a').unwrap().elements(), &["apple", "avocado"]);
//!
//! let mut dict = Dictionary::new();
//! dict.insert("a", 1).unwrap();
//! assert!(dict.insert("a", 2).is_err());
//! ```

#![no_std]

extern crate alloc;

pub mod comparer;
mod dictionary;
mod lookup;
mod set;

pub use comparer::{eq_by, eq_by_key, DefaultEquality, EqualityComparer, FnEquality, KeyEquality};
pub use dictionary::Dictionary;
pub use lookup::{Grouping, Lookup};
pub use set::MembershipSet;
