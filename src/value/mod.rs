mod cast;
mod time;

use std::fmt;

use arrow::datatypes::{DataType, TimeUnit};
pub use cast::*;
pub use time::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: DataType,
        actual: DataType,
    },
    #[error("Null value not allowed")]
    NullNotAllowed,
}

/// A single cell handed to a [`Destination`] by a scan primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Binary(Vec<u8>),
    /// Days since the UNIX epoch.
    Date32(i32),
    /// Milliseconds since the UNIX epoch.
    Date64(i64),
    Timestamp(i64, TimeUnit),
}

impl Value {
    /// Get the arrow data type of the value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Boolean(_) => DataType::Boolean,
            Value::Int8(_) => DataType::Int8,
            Value::Int16(_) => DataType::Int16,
            Value::Int32(_) => DataType::Int32,
            Value::Int64(_) => DataType::Int64,
            Value::UInt8(_) => DataType::UInt8,
            Value::UInt16(_) => DataType::UInt16,
            Value::UInt32(_) => DataType::UInt32,
            Value::UInt64(_) => DataType::UInt64,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::String(_) => DataType::Utf8,
            Value::Binary(_) => DataType::Binary,
            Value::Date32(_) => DataType::Date32,
            Value::Date64(_) => DataType::Date64,
            Value::Timestamp(_, unit) => DataType::Timestamp(*unit, None),
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! implement_value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

implement_value_from!(bool, Boolean);
implement_value_from!(i8, Int8);
implement_value_from!(i16, Int16);
implement_value_from!(i32, Int32);
implement_value_from!(i64, Int64);
implement_value_from!(u8, UInt8);
implement_value_from!(u16, UInt16);
implement_value_from!(u32, UInt32);
implement_value_from!(u64, UInt64);
implement_value_from!(f32, Float32);
implement_value_from!(f64, Float64);
implement_value_from!(String, String);
implement_value_from!(Vec<u8>, Binary);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A writable field of a record instance.
///
/// Every [`FromValue`] type is a slot, so record fields of those types can be filled directly.
pub trait Slot {
    fn set(&mut self, value: Value) -> Result<(), ValueError>;

    fn data_type(&self) -> DataType;
}

impl<T> Slot for T
where
    T: FromValue,
{
    fn set(&mut self, value: Value) -> Result<(), ValueError> {
        *self = T::from_value(value)?;
        Ok(())
    }

    fn data_type(&self) -> DataType {
        T::data_type()
    }
}

/// Where a scan primitive stores one column of the current row.
///
/// Columns that no field claims get [`Destination::Discard`], which accepts and drops any value.
pub enum Destination<'r> {
    Field {
        name: &'static str,
        slot: &'r mut dyn Slot,
    },
    Discard,
}

impl Destination<'_> {
    pub fn set(&mut self, value: Value) -> Result<(), ValueError> {
        match self {
            Destination::Field { slot, .. } => slot.set(value),
            Destination::Discard => Ok(()),
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Destination::Discard)
    }

    /// Name of the record field behind this destination.
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            Destination::Field { name, .. } => Some(*name),
            Destination::Discard => None,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Destination::Field { slot, .. } => Some(slot.data_type()),
            Destination::Discard => None,
        }
    }
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Field { name, slot } => f
                .debug_struct("Field")
                .field("name", name)
                .field("data_type", &slot.data_type())
                .finish(),
            Destination::Discard => f.write_str("Discard"),
        }
    }
}
