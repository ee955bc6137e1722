use arrow::datatypes::{DataType, TimeUnit};

use crate::value::{cast::mismatch, FromValue, Value, ValueError};

/// Field type for `Date32` columns: days since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date32(pub i32);

/// Field type for `Date64` columns: milliseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date64(pub i64);

/// Field type for timestamp columns of any unit. The unit read from the column is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    pub value: i64,
    pub unit: TimeUnit,
}

impl Timestamp {
    pub fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// The timestamp in nanoseconds since the UNIX epoch, `None` on overflow.
    pub fn as_nanos(&self) -> Option<i64> {
        let factor = match self.unit {
            TimeUnit::Second => 1_000_000_000,
            TimeUnit::Millisecond => 1_000_000,
            TimeUnit::Microsecond => 1_000,
            TimeUnit::Nanosecond => 1,
        };
        self.value.checked_mul(factor)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::new(0, TimeUnit::Microsecond)
    }
}

impl FromValue for Date32 {
    fn data_type() -> DataType {
        DataType::Date32
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Date32(days) => Ok(Date32(days)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Date64 {
    fn data_type() -> DataType {
        DataType::Date64
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Date64(millis) => Ok(Date64(millis)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Timestamp {
    /// Reported as microseconds, values of every unit are accepted.
    fn data_type() -> DataType {
        DataType::Timestamp(TimeUnit::Microsecond, None)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Timestamp(value, unit) => Ok(Timestamp::new(value, unit)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl From<Date32> for Value {
    fn from(date: Date32) -> Self {
        Value::Date32(date.0)
    }
}

impl From<Date64> for Value {
    fn from(date: Date64) -> Self {
        Value::Date64(date.0)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts.value, ts.unit)
    }
}
