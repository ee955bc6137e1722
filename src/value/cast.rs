use arrow::datatypes::DataType;

use crate::value::{Value, ValueError};

/// Conversion from a scanned [`Value`] into a field type.
///
/// Only exact matches and lossless widening are accepted, e.g. an `i64` field takes `Int32`
/// but an `i32` field never takes `Int64`. `Null` is only accepted by `Option<T>` and
/// [`Value`] itself.
pub trait FromValue: Sized {
    /// Arrow type this field stores. [`Value`] reports `Null` as it accepts anything.
    fn data_type() -> DataType;

    fn from_value(value: Value) -> Result<Self, ValueError>;
}

pub(crate) fn mismatch<T: FromValue>(value: &Value) -> ValueError {
    if value.is_null() {
        ValueError::NullNotAllowed
    } else {
        ValueError::TypeMismatch {
            expected: T::data_type(),
            actual: value.data_type(),
        }
    }
}

macro_rules! implement_from_value {
    ($ty:ty, $data_type:expr, [$($variant:ident),+ $(,)?]) => {
        impl FromValue for $ty {
            fn data_type() -> DataType {
                $data_type
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    $(Value::$variant(v) => Ok(v.into()),)+
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

implement_from_value!(bool, DataType::Boolean, [Boolean]);

implement_from_value!(i8, DataType::Int8, [Int8]);
implement_from_value!(i16, DataType::Int16, [Int8, Int16, UInt8]);
implement_from_value!(i32, DataType::Int32, [Int8, Int16, Int32, UInt8, UInt16]);
implement_from_value!(
    i64,
    DataType::Int64,
    [Int8, Int16, Int32, Int64, UInt8, UInt16, UInt32]
);
implement_from_value!(u8, DataType::UInt8, [UInt8]);
implement_from_value!(u16, DataType::UInt16, [UInt8, UInt16]);
implement_from_value!(u32, DataType::UInt32, [UInt8, UInt16, UInt32]);
implement_from_value!(u64, DataType::UInt64, [UInt8, UInt16, UInt32, UInt64]);

implement_from_value!(f32, DataType::Float32, [Float32]);
implement_from_value!(f64, DataType::Float64, [Float32, Float64]);

implement_from_value!(String, DataType::Utf8, [String]);
implement_from_value!(Vec<u8>, DataType::Binary, [Binary]);

impl FromValue for Value {
    fn data_type() -> DataType {
        DataType::Null
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn data_type() -> DataType {
        T::data_type()
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}
