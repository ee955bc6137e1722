use std::{iter::FusedIterator, marker::PhantomData};

use crate::{
    observability::{log_debug, log_trace},
    option::ScanOptions,
    record::{ColumnMapping, Element, Record, RecordCollection},
    value::Destination,
};

/// A cursor over the rows of a result set, typically backed by a database driver.
pub trait Rows {
    type Error;

    /// Names of the columns in this result set, in row order.
    fn columns(&self) -> Result<Vec<String>, Self::Error>;

    /// Moves to the next row and reports whether there is one.
    ///
    /// `false` is taken as clean exhaustion. A cursor that can fail while advancing has to
    /// report that failure from its next [`Rows::scan`] or keep it for the caller to inspect.
    fn advance(&mut self) -> bool;

    /// Stores the current row into `destinations`, one per column.
    fn scan(&mut self, destinations: &mut [Destination<'_>]) -> Result<(), Self::Error>;
}

impl<R> Rows for &mut R
where
    R: Rows + ?Sized,
{
    type Error = R::Error;

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        (**self).columns()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan(&mut self, destinations: &mut [Destination<'_>]) -> Result<(), Self::Error> {
        (**self).scan(destinations)
    }
}

/// Scans a single row into `record`.
///
/// Every column gets a destination, in column order: the matching field of `record` or a
/// discard sink. `scan` is called once with all of them and its result is returned as is.
pub fn scan_one<R, S, F, E>(scan: F, columns: &[S], record: &mut R) -> Result<(), E>
where
    R: Record,
    S: AsRef<str>,
    F: FnOnce(&mut [Destination<'_>]) -> Result<(), E>,
{
    let mapping = R::descriptor().mapping(columns);
    let mut destinations = mapping.destinations(record);

    scan(&mut destinations)
}

/// Scans every remaining row of `rows`, appending one record per row to `collection`.
///
/// The element type of the collection decides whether records are stored by value (`T`) or
/// behind a pointer (`Box<T>`, `Rc<T>`, `Arc<T>`). Errors from the cursor are returned
/// unchanged. Records appended before a failing row stay in the collection.
///
/// The target must be a mutable reference to a growable collection of records:
///
/// ```compile_fail
/// # use rowscan::{scan_rows, Record, RecordBatchRows};
/// #[derive(Record, Default)]
/// struct User {
///     id: i64,
/// }
///
/// let mut rows = RecordBatchRows::new(Vec::new());
/// let users: Vec<User> = Vec::new();
/// scan_rows(&mut rows, users).unwrap();
/// ```
///
/// ```compile_fail
/// # use rowscan::{scan_rows, Record, RecordBatchRows};
/// #[derive(Record, Default)]
/// struct User {
///     id: i64,
/// }
///
/// let mut rows = RecordBatchRows::new(Vec::new());
/// let mut user = User::default();
/// scan_rows(&mut rows, &mut user).unwrap();
/// ```
///
/// ```compile_fail
/// # use rowscan::{scan_rows, RecordBatchRows};
/// let mut rows = RecordBatchRows::new(Vec::new());
/// let mut names: Vec<String> = Vec::new();
/// scan_rows(&mut rows, &mut names).unwrap();
/// ```
pub fn scan_rows<C, L, E>(rows: &mut C, collection: &mut L) -> Result<(), C::Error>
where
    C: Rows + ?Sized,
    L: RecordCollection<E> + ?Sized,
    E: Element,
{
    scan_rows_with(rows, collection, &ScanOptions::default())
}

/// [`scan_rows`] with [`ScanOptions`].
pub fn scan_rows_with<C, L, E>(
    rows: &mut C,
    collection: &mut L,
    options: &ScanOptions,
) -> Result<(), C::Error>
where
    C: Rows + ?Sized,
    L: RecordCollection<E> + ?Sized,
    E: Element,
{
    let mut records = RecordIter::<C, E::Record>::new(rows);
    if let Some(limit) = options.limit {
        records = records.limit(limit);
    }

    let reserve = options
        .limit
        .map_or(options.capacity_hint, |limit| limit.min(options.capacity_hint));
    if reserve > 0 {
        collection.reserve_records(reserve);
    }

    for record in records.by_ref() {
        collection.push_record(E::from_record(record?));
    }

    log_debug!(
        event = "scan_exhausted",
        record = <E::Record as Record>::descriptor().type_name(),
        rows = records.scanned(),
    );

    Ok(())
}

/// Progress of a multi-row scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Column names have not been read yet.
    AwaitingColumns,
    Scanning,
    /// No more rows, or the configured limit was reached.
    Exhausted,
    Failed,
}

impl ScanState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanState::Exhausted | ScanState::Failed)
    }
}

/// Creates an iterator that scans one `T` per remaining row of `rows`.
pub fn records<T, C>(rows: &mut C) -> RecordIter<'_, C, T>
where
    T: Record,
    C: Rows + ?Sized,
{
    RecordIter::new(rows)
}

/// Iterator over the records of a cursor.
///
/// Yields `Ok` per scanned row. The first error is yielded once, after which the iterator is
/// finished, as it is once the cursor runs out of rows.
pub struct RecordIter<'c, C, T>
where
    C: Rows + ?Sized,
    T: Record,
{
    rows: &'c mut C,
    state: ScanState,
    mapping: Option<ColumnMapping>,
    limit: Option<usize>,
    scanned: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'c, C, T> RecordIter<'c, C, T>
where
    C: Rows + ?Sized,
    T: Record,
{
    pub fn new(rows: &'c mut C) -> Self {
        Self {
            rows,
            state: ScanState::AwaitingColumns,
            mapping: None,
            limit: None,
            scanned: 0,
            _marker: PhantomData,
        }
    }

    /// Stop after `limit` records.
    pub fn limit(self, limit: usize) -> Self {
        RecordIter {
            limit: Some(limit),
            ..self
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of records successfully scanned so far.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Column mapping of the result set, available once the columns have been read.
    pub fn mapping(&self) -> Option<&ColumnMapping> {
        self.mapping.as_ref()
    }

    fn resolve_columns(&mut self) -> Result<(), C::Error> {
        let columns = self.rows.columns()?;
        let descriptor = T::descriptor();
        let mapping = descriptor.mapping(&columns);

        log_debug!(
            event = "columns_resolved",
            record = descriptor.type_name(),
            columns = mapping.len(),
            matched = mapping.matched(),
            discarded = mapping.discarded(),
        );
        self.mapping = Some(mapping);

        Ok(())
    }

    fn exhaust(&mut self) {
        self.state = ScanState::Exhausted;
        log_trace!(
            event = "rows_exhausted",
            record = T::descriptor().type_name(),
            rows = self.scanned,
        );
    }

    fn fail(&mut self, stage: &'static str) {
        self.state = ScanState::Failed;
        log_debug!(
            event = "scan_failed",
            record = T::descriptor().type_name(),
            stage,
            rows = self.scanned,
        );
    }
}

impl<C, T> Iterator for RecordIter<'_, C, T>
where
    C: Rows + ?Sized,
    T: Record,
{
    type Item = Result<T, C::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ScanState::AwaitingColumns {
            if let Err(err) = self.resolve_columns() {
                self.fail("columns");
                return Some(Err(err));
            }
            self.state = ScanState::Scanning;
        }
        if self.state != ScanState::Scanning {
            return None;
        }

        if self.limit.is_some_and(|limit| self.scanned >= limit) || !self.rows.advance() {
            self.exhaust();
            return None;
        }

        let mapping = self.mapping.as_ref()?;
        let mut record = T::default();
        let result = {
            let mut destinations = mapping.destinations(&mut record);
            self.rows.scan(&mut destinations)
        };

        match result {
            Ok(()) => {
                self.scanned += 1;
                log_trace!(event = "row_scanned", row = self.scanned);
                Some(Ok(record))
            }
            Err(err) => {
                self.fail("row");
                Some(Err(err))
            }
        }
    }
}

impl<C, T> FusedIterator for RecordIter<'_, C, T>
where
    C: Rows + ?Sized,
    T: Record,
{
}
