//! Tagged element values.
//!
//! Pipelines over heterogeneous data carry their elements as [`Value`], a sum
//! type with one variant per element kind. `of_type` narrows such a pipeline
//! to a single kind by matching on the variant.

use crate::types::DataType;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// Encoded JSON document carried as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonbValue(pub Vec<u8>);

impl JsonbValue {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A dynamically typed element.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
    Bytes(Vec<u8>),
    Jsonb(JsonbValue),
}

impl Value {
    /// Kind of this element, `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Value::Null => return None,
            Value::Boolean(_) => DataType::Boolean,
            Value::Int32(_) => DataType::Int32,
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::String(_) => DataType::String,
            Value::DateTime(_) => DataType::DateTime,
            Value::Bytes(_) => DataType::Bytes,
            Value::Jsonb(_) => DataType::Jsonb,
        })
    }

    /// Returns true if the element carries the given kind.
    #[inline]
    pub fn is_kind(&self, kind: DataType) -> bool {
        self.data_type() == Some(kind)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<i64> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_jsonb(&self) -> Option<&JsonbValue> {
        match self {
            Value::Jsonb(v) => Some(v),
            _ => None,
        }
    }

    /// Rank used to order elements of different kinds against each other.
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Int32(_) | Value::Int64(_) | Value::Float64(_) => 2,
            Value::String(_) => 3,
            Value::DateTime(_) => 4,
            Value::Bytes(_) => 5,
            Value::Jsonb(_) => 6,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            Value::Int32(v) => Some(Numeric::Int(*v as i64)),
            Value::Int64(v) => Some(Numeric::Int(*v)),
            Value::Float64(v) => Some(Numeric::Float(*v)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    // NaN sorts after every number and equal to itself.
    fn cmp(self, other: Numeric) -> Ordering {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a.cmp(&b),
            (Numeric::Int(a), Numeric::Float(b)) => float_cmp(a as f64, b),
            (Numeric::Float(a), Numeric::Int(b)) => float_cmp(a, b as f64),
            (Numeric::Float(a), Numeric::Float(b)) => float_cmp(a, b),
        }
    }
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

// Equal floats must hash alike: fold every NaN and both zeroes.
fn canonical_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => {
                (a.is_nan() && b.is_nan()) || a == b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Jsonb(a), Value::Jsonb(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int32(i) => i.hash(state),
            Value::Int64(i) | Value::DateTime(i) => i.hash(state),
            Value::Float64(f) => canonical_bits(*f).hash(state),
            Value::String(s) => s.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::Jsonb(j) => j.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order: `Null` first, then by kind rank; numbers of different
/// widths compare by value.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            // Int32(1) != Int64(1), so equal magnitudes fall back to kind.
            return a
                .cmp(b)
                .then_with(|| self.data_type().cmp(&other.data_type()));
        }
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Jsonb(a), Value::Jsonb(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<JsonbValue> for Value {
    fn from(v: JsonbValue) -> Self {
        Value::Jsonb(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_data_type_and_kind() {
        assert_eq!(Value::Int64(42).data_type(), Some(DataType::Int64));
        assert!(Value::String("a".into()).is_kind(DataType::String));
        assert!(!Value::Int32(1).is_kind(DataType::Int64));
        assert_eq!(Value::Null.data_type(), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Int32(42).as_i32(), Some(42));
        assert_eq!(Value::Int32(42).as_i64(), None);
        assert_eq!(Value::DateTime(1000).as_datetime(), Some(1000));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1, 2][..]));
        assert_eq!(
            Value::Jsonb(JsonbValue::new(vec![7])).as_jsonb(),
            Some(&JsonbValue(vec![7]))
        );
    }

    #[test]
    fn test_nan_equals_itself() {
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float64(0.0), Value::Float64(f64::NAN));
    }

    #[test]
    fn test_cross_width_ordering() {
        assert!(Value::Int32(1) < Value::Int64(2));
        assert!(Value::Float64(1.5) > Value::Int32(1));
        assert!(Value::Float64(f64::NAN) > Value::Int64(i64::MAX));
        assert!(Value::Null < Value::Boolean(false));
        assert!(Value::Int64(9) < Value::String("0".into()));
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let a = Value::Int32(1);
        let b = Value::Int64(1);
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_from_option() {
        let v: Value = Some(100i64).into();
        assert_eq!(v.as_i64(), Some(100));
        let v: Value = None::<i32>.into();
        assert!(v.is_null());
    }
}
