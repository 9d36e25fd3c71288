//! Element kinds carried by [`crate::Value`].

/// The kind of a non-null [`crate::Value`].
///
/// Declaration order is the tie-break order between numerically equal
/// values of different widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float64,
    String,
    /// Milliseconds since the Unix epoch.
    DateTime,
    Bytes,
    Jsonb,
}

impl DataType {
    /// Returns true for the integer and floating point kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int32 | DataType::Int64 | DataType::Float64)
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::DateTime => "datetime",
            DataType::Bytes => "bytes",
            DataType::Jsonb => "jsonb",
        }
    }
}
