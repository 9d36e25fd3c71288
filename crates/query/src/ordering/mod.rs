//! Ordering engine: comparers and the stably sorted [`Ordered`] view.

mod comparer;
mod ordered;

pub use comparer::{Comparer, FnComparer, KeyComparer, Order, ThenComparer};
pub use ordered::Ordered;
