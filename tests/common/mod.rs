//! Common test utilities for integration tests.

#![allow(dead_code)]

use rowscan::{Destination, Rows, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    #[error("columns: {0}")]
    Columns(&'static str),
    #[error("scan: {0}")]
    Scan(&'static str),
    #[error("column {column}: {message}")]
    Value { column: String, message: String },
}

/// In-memory cursor over a fixed set of rows.
#[derive(Debug, Default)]
pub struct MockRows {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
    current: usize,
    pub advances: usize,
    pub scans: usize,
    columns_error: Option<MockError>,
    scan_error: Option<(usize, MockError)>,
}

impl MockRows {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn row<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let row = values.into_iter().map(Into::into).collect::<Vec<_>>();
        assert_eq!(row.len(), self.columns.len(), "row width must match columns");
        self.data.push(row);
        self
    }

    /// Makes [`Rows::columns`] fail.
    pub fn columns_error(self, message: &'static str) -> Self {
        Self {
            columns_error: Some(MockError::Columns(message)),
            ..self
        }
    }

    /// Makes [`Rows::scan`] fail on the given 1-based row.
    pub fn scan_error(self, row: usize, message: &'static str) -> Self {
        Self {
            scan_error: Some((row, MockError::Scan(message))),
            ..self
        }
    }
}

impl Rows for MockRows {
    type Error = MockError;

    fn columns(&self) -> Result<Vec<String>, MockError> {
        match &self.columns_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.columns.clone()),
        }
    }

    fn advance(&mut self) -> bool {
        self.advances += 1;
        if self.current < self.data.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn scan(&mut self, destinations: &mut [Destination<'_>]) -> Result<(), MockError> {
        self.scans += 1;
        if let Some((row, err)) = &self.scan_error {
            if *row == self.current {
                return Err(err.clone());
            }
        }
        assert_eq!(destinations.len(), self.columns.len());

        let row = &self.data[self.current - 1];
        for ((destination, value), column) in destinations.iter_mut().zip(row).zip(&self.columns)
        {
            destination
                .set(value.clone())
                .map_err(|err| MockError::Value {
                    column: column.clone(),
                    message: err.to_string(),
                })?;
        }

        Ok(())
    }
}
