//! Scan relational result rows into typed records.
//!
//! A record is a flat struct deriving [`Record`](macro@Record). Each column of a result set is
//! matched against the record's fields: an explicit `#[record(column = "...")]` annotation wins,
//! otherwise the field's snake_case name is compared with the column name. Columns without a
//! matching field are discarded.
//!
//! The crate does not run queries. It works on a row cursor implementing [`Rows`] (or any
//! single-row scan function for [`scan_one`]) and fills records from it.
//!
//! ```
//! use std::sync::Arc;
//!
//! use rowscan::{
//!     arrow::{
//!         array::{ArrayRef, Int64Array, RecordBatch, StringArray},
//!         datatypes::{DataType, Field, Schema},
//!     },
//!     scan_rows, Record, RecordBatchRows,
//! };
//!
//! #[derive(Record, Debug, Default)]
//! struct BlogComment {
//!     id: i64,
//!     #[record(column = "post_id")]
//!     blog_post_id: i64,
//!     comment: String,
//! }
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int64, false),
//!     Field::new("post_id", DataType::Int64, false),
//!     Field::new("comment", DataType::Utf8, false),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef,
//!         Arc::new(Int64Array::from(vec![1234, 1234])),
//!         Arc::new(StringArray::from(vec!["first!", "nice post"])),
//!     ],
//! )
//! .unwrap();
//!
//! let mut comments: Vec<BlogComment> = Vec::new();
//! scan_rows(&mut RecordBatchRows::from(batch), &mut comments).unwrap();
//!
//! assert_eq!(comments.len(), 2);
//! assert_eq!(comments[1].comment, "nice post");
//! ```

mod observability;
mod option;
mod scan;

/// [`Rows`] implementation over Arrow record batches.
pub mod batch;
/// Record traits, descriptors and field resolution.
pub mod record;
/// Scanned values and the destinations they are stored into.
pub mod value;

pub use arrow;
#[doc(hidden)]
pub use once_cell;
pub use rowscan_macros::Record;

pub use crate::{
    batch::{BatchError, RecordBatchRows},
    option::ScanOptions,
    record::{
        normalize_field_name, ColumnMapping, Element, FieldDescriptor, RecordCollection,
        RecordDescriptor,
    },
    scan::{records, scan_one, scan_rows, scan_rows_with, RecordIter, Rows, ScanState},
    value::{Date32, Date64, Destination, FromValue, Slot, Timestamp, Value, ValueError},
};
#[doc(no_inline)]
pub use crate::record::Record;
