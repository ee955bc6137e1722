//! [`Rows`] over Arrow record batches.

use arrow::{
    array::{Array, AsArray, RecordBatch},
    datatypes::{
        DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int16Type, Int32Type,
        Int64Type, Int8Type, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
        TimestampNanosecondType, TimestampSecondType, UInt16Type, UInt32Type, UInt64Type,
        UInt8Type,
    },
};
use thiserror::Error;

use crate::{
    scan::Rows,
    value::{Destination, Value, ValueError},
};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("column {column}: {source}")]
    Value {
        column: String,
        #[source]
        source: ValueError,
    },
    #[error("expected {expected} destinations, got {actual}")]
    ColumnCount { expected: usize, actual: usize },
    #[error("unsupported arrow type: {0}")]
    UnsupportedType(DataType),
    #[error("no current row, advance the cursor first")]
    NoCurrentRow,
    #[error("schema of batch {index} differs from the first batch")]
    SchemaMismatch { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At { batch: usize, row: usize },
    AfterLast,
}

/// A cursor over the rows of one or more record batches sharing a schema.
#[derive(Debug)]
pub struct RecordBatchRows {
    batches: Vec<RecordBatch>,
    position: Position,
}

impl RecordBatchRows {
    /// Creates a cursor without checking that the batches share a schema.
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        Self {
            batches,
            position: Position::BeforeFirst,
        }
    }

    /// Creates a cursor, rejecting batches whose schema differs from the first one.
    pub fn try_new(batches: Vec<RecordBatch>) -> Result<Self, BatchError> {
        if let Some(first) = batches.first() {
            let schema = first.schema();
            if let Some(index) = batches.iter().position(|batch| batch.schema() != schema) {
                return Err(BatchError::SchemaMismatch { index });
            }
        }
        Ok(Self::new(batches))
    }

    /// Total number of rows across all batches.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

impl From<RecordBatch> for RecordBatchRows {
    fn from(batch: RecordBatch) -> Self {
        Self::new(vec![batch])
    }
}

impl Rows for RecordBatchRows {
    type Error = BatchError;

    fn columns(&self) -> Result<Vec<String>, BatchError> {
        Ok(self
            .batches
            .first()
            .map(|batch| {
                batch
                    .schema()
                    .fields()
                    .iter()
                    .map(|field| field.name().clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn advance(&mut self) -> bool {
        let (mut batch, mut row) = match self.position {
            Position::BeforeFirst => (0, 0),
            Position::At { batch, row } => (batch, row + 1),
            Position::AfterLast => return false,
        };

        while let Some(record_batch) = self.batches.get(batch) {
            if row < record_batch.num_rows() {
                self.position = Position::At { batch, row };
                return true;
            }
            batch += 1;
            row = 0;
        }
        self.position = Position::AfterLast;

        false
    }

    fn scan(&mut self, destinations: &mut [Destination<'_>]) -> Result<(), BatchError> {
        let Position::At { batch, row } = self.position else {
            return Err(BatchError::NoCurrentRow);
        };
        let record_batch = &self.batches[batch];
        if destinations.len() != record_batch.num_columns() {
            return Err(BatchError::ColumnCount {
                expected: record_batch.num_columns(),
                actual: destinations.len(),
            });
        }

        let schema = record_batch.schema();
        for ((destination, column), field) in destinations
            .iter_mut()
            .zip(record_batch.columns())
            .zip(schema.fields().iter())
        {
            if destination.is_discard() {
                continue;
            }
            destination
                .set(value_at(column.as_ref(), row)?)
                .map_err(|source| BatchError::Value {
                    column: field.name().clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

/// Reads the cell at `row` of `array` as a [`Value`]. Nulls of any type become [`Value::Null`].
pub fn value_at(array: &dyn Array, row: usize) -> Result<Value, BatchError> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Null => Value::Null,
        DataType::Boolean => Value::Boolean(array.as_boolean().value(row)),
        DataType::Int8 => Value::Int8(array.as_primitive::<Int8Type>().value(row)),
        DataType::Int16 => Value::Int16(array.as_primitive::<Int16Type>().value(row)),
        DataType::Int32 => Value::Int32(array.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => Value::Int64(array.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::UInt8(array.as_primitive::<UInt8Type>().value(row)),
        DataType::UInt16 => Value::UInt16(array.as_primitive::<UInt16Type>().value(row)),
        DataType::UInt32 => Value::UInt32(array.as_primitive::<UInt32Type>().value(row)),
        DataType::UInt64 => Value::UInt64(array.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => Value::Float32(array.as_primitive::<Float32Type>().value(row)),
        DataType::Float64 => Value::Float64(array.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Value::String(array.as_string::<i32>().value(row).to_owned()),
        DataType::LargeUtf8 => Value::String(array.as_string::<i64>().value(row).to_owned()),
        DataType::Binary => Value::Binary(array.as_binary::<i32>().value(row).to_vec()),
        DataType::LargeBinary => Value::Binary(array.as_binary::<i64>().value(row).to_vec()),
        DataType::Date32 => Value::Date32(array.as_primitive::<Date32Type>().value(row)),
        DataType::Date64 => Value::Date64(array.as_primitive::<Date64Type>().value(row)),
        DataType::Timestamp(unit, _) => {
            let ts = match unit {
                TimeUnit::Second => array.as_primitive::<TimestampSecondType>().value(row),
                TimeUnit::Millisecond => {
                    array.as_primitive::<TimestampMillisecondType>().value(row)
                }
                TimeUnit::Microsecond => {
                    array.as_primitive::<TimestampMicrosecondType>().value(row)
                }
                TimeUnit::Nanosecond => array.as_primitive::<TimestampNanosecondType>().value(row),
            };
            Value::Timestamp(ts, *unit)
        }
        other => return Err(BatchError::UnsupportedType(other.clone())),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{
            ArrayRef, BooleanArray, Decimal128Array, Int32Array, Int64Array, LargeStringArray,
            RecordBatch, StringArray, TimestampMillisecondArray,
        },
        datatypes::{DataType, Field, Schema, TimeUnit},
    };

    use super::{value_at, BatchError, RecordBatchRows};
    use crate::{
        record::test::Post,
        scan::{scan_rows, Rows},
        value::{Destination, Value, ValueError},
    };

    fn post_batch(ids: Vec<i64>, titles: Vec<&str>, authors: Vec<Option<i32>>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("title", DataType::Utf8, false),
            Field::new("user_id", DataType::Int32, true),
            Field::new("flagged", DataType::Boolean, false),
        ]));
        let flagged = vec![false; ids.len()];
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(ids)) as ArrayRef,
                Arc::new(StringArray::from(titles)),
                Arc::new(Int32Array::from(authors)),
                Arc::new(BooleanArray::from(flagged)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_columns_follow_schema() {
        let rows = RecordBatchRows::from(post_batch(vec![1], vec!["a"], vec![Some(1)]));
        assert_eq!(
            rows.columns().unwrap(),
            ["id", "title", "user_id", "flagged"]
        );
        assert!(RecordBatchRows::new(Vec::new())
            .columns()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_scan_across_batches() {
        let mut rows = RecordBatchRows::try_new(vec![
            post_batch(vec![1234], vec!["user_a"], vec![Some(7)]),
            post_batch(Vec::new(), Vec::new(), Vec::new()),
            post_batch(vec![1235, 1236], vec!["user_b", "user_c"], vec![Some(8), Some(9)]),
        ])
        .unwrap();
        assert_eq!(rows.num_rows(), 3);

        let mut posts: Vec<Post> = Vec::new();
        scan_rows(&mut rows, &mut posts).unwrap();

        let scanned = posts
            .iter()
            .map(|post| (post.ID, post.Title.as_str(), post.AuthorID))
            .collect::<Vec<_>>();
        assert_eq!(
            scanned,
            [(1234, "user_a", 7), (1235, "user_b", 8), (1236, "user_c", 9)]
        );
        assert!(!rows.advance());
    }

    #[test]
    fn test_null_into_required_field() {
        let mut rows = RecordBatchRows::from(post_batch(
            vec![1, 2],
            vec!["a", "b"],
            vec![Some(1), None],
        ));
        let mut posts: Vec<Post> = Vec::new();

        let err = scan_rows(&mut rows, &mut posts).unwrap_err();

        assert!(matches!(
            err,
            BatchError::Value {
                ref column,
                source: ValueError::NullNotAllowed,
            } if column == "user_id"
        ));
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_scan_requires_current_row() {
        let mut rows = RecordBatchRows::from(post_batch(vec![1], vec!["a"], vec![None]));
        assert!(matches!(
            rows.scan(&mut []),
            Err(BatchError::NoCurrentRow)
        ));

        assert!(rows.advance());
        assert!(matches!(
            rows.scan(&mut [Destination::Discard]),
            Err(BatchError::ColumnCount {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_discarded_columns_skip_conversion() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("amount", DataType::Decimal128(38, 10), false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![5])) as ArrayRef,
                Arc::new(Decimal128Array::from(vec![100_i128])),
            ],
        )
        .unwrap();

        let mut posts: Vec<Post> = Vec::new();
        scan_rows(&mut RecordBatchRows::from(batch.clone()), &mut posts).unwrap();
        assert_eq!(posts[0].ID, 5);

        assert!(matches!(
            value_at(batch.column(1).as_ref(), 0),
            Err(BatchError::UnsupportedType(DataType::Decimal128(38, 10)))
        ));
    }

    #[test]
    fn test_schema_mismatch() {
        let other = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)])),
            vec![Arc::new(Int64Array::from(vec![1])) as ArrayRef],
        )
        .unwrap();

        let result = RecordBatchRows::try_new(vec![
            post_batch(vec![1], vec!["a"], vec![None]),
            other,
        ]);
        assert!(matches!(result, Err(BatchError::SchemaMismatch { index: 1 })));
    }

    #[test]
    fn test_value_at() {
        let strings: ArrayRef = Arc::new(LargeStringArray::from(vec![Some("x"), None]));
        assert_eq!(value_at(strings.as_ref(), 0).unwrap(), Value::from("x"));
        assert_eq!(value_at(strings.as_ref(), 1).unwrap(), Value::Null);

        let timestamps: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![1_000]));
        assert_eq!(
            value_at(timestamps.as_ref(), 0).unwrap(),
            Value::Timestamp(1_000, TimeUnit::Millisecond)
        );
    }
}
