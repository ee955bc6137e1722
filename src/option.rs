/// Tuning knobs for [`crate::scan_rows_with`].
///
/// The default options behave exactly like [`crate::scan_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub(crate) limit: Option<usize>,
    pub(crate) capacity_hint: usize,
}

impl ScanOptions {
    /// Stop after `limit` records. The cursor is not advanced past the last record taken.
    pub fn limit(self, limit: usize) -> Self {
        ScanOptions {
            limit: Some(limit),
            ..self
        }
    }

    /// Reserve room for this many records in the collection before the first row is scanned.
    pub fn capacity_hint(self, capacity_hint: usize) -> Self {
        ScanOptions {
            capacity_hint,
            ..self
        }
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub fn capacity_hint_value(&self) -> usize {
        self.capacity_hint
    }
}
