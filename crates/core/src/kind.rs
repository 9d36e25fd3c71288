//! Kind extraction for `of_type`.

use crate::value::{JsonbValue, Value};
use alloc::string::String;
use alloc::vec::Vec;

/// A type that can be extracted from an element of type `E` when the element
/// has the matching kind.
pub trait ElementKind<E>: Sized {
    /// Returns the extracted value, or `None` when `element` is of another
    /// kind.
    fn from_element(element: &E) -> Option<Self>;
}

impl<T: Clone> ElementKind<T> for T {
    #[inline]
    fn from_element(element: &T) -> Option<T> {
        Some(element.clone())
    }
}

/// Point in time carried by [`Value::DateTime`], in milliseconds since the
/// Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    #[inline]
    pub fn millis(&self) -> i64 {
        self.0
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::DateTime(ts.0)
    }
}

macro_rules! value_kind {
    ($ty:ty, $variant:ident, $v:ident => $extract:expr) => {
        impl ElementKind<Value> for $ty {
            fn from_element(element: &Value) -> Option<Self> {
                match element {
                    Value::$variant($v) => Some($extract),
                    _ => None,
                }
            }
        }
    };
}

value_kind!(bool, Boolean, v => *v);
value_kind!(i32, Int32, v => *v);
value_kind!(i64, Int64, v => *v);
value_kind!(f64, Float64, v => *v);
value_kind!(String, String, v => v.clone());
value_kind!(Vec<u8>, Bytes, v => v.clone());
value_kind!(Timestamp, DateTime, v => Timestamp(*v));
value_kind!(JsonbValue, Jsonb, v => v.clone());

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_extracts_matching_variant() {
        assert_eq!(i32::from_element(&Value::Int32(7)), Some(7));
        assert_eq!(i64::from_element(&Value::Int32(7)), None);
        assert_eq!(
            String::from_element(&Value::String("x".into())),
            Some(String::from("x"))
        );
        assert_eq!(
            Timestamp::from_element(&Value::DateTime(1500)),
            Some(Timestamp(1500))
        );
        assert_eq!(
            <Vec<u8>>::from_element(&Value::Bytes(vec![1])),
            Some(vec![1])
        );
    }

    #[test]
    fn test_null_matches_nothing() {
        assert_eq!(bool::from_element(&Value::Null), None);
        assert_eq!(JsonbValue::from_element(&Value::Null), None);
    }

    #[test]
    fn test_identity() {
        assert_eq!(<Value>::from_element(&Value::Null), Some(Value::Null));
        assert_eq!(u8::from_element(&3u8), Some(3));
    }
}
