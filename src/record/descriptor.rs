use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    record::Record,
    value::{Destination, Slot},
};

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new("([a-z])([A-Z])").expect("word boundary pattern is valid"));

/// Converts a field identifier into the column name it matches by default.
///
/// An underscore is inserted wherever a lowercase letter is followed by an uppercase one and the
/// result is lowercased: `ForeignID` becomes `foreign_id`, `ID` becomes `id`. snake_case names
/// are returned unchanged.
pub fn normalize_field_name(name: &str) -> String {
    WORD_BOUNDARY.replace_all(name, "${1}_${2}").to_lowercase()
}

/// One mapped field of a [`RecordDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    column: Option<&'static str>,
    normalized: String,
}

impl FieldDescriptor {
    /// A field matched by its normalized name.
    pub fn new(name: &'static str) -> Self {
        let name = name.strip_prefix("r#").unwrap_or(name);
        Self {
            name,
            column: None,
            normalized: normalize_field_name(name),
        }
    }

    /// A field matched only by the given column name. An empty column counts as no annotation.
    pub fn with_column(name: &'static str, column: &'static str) -> Self {
        let mut field = Self::new(name);
        if !column.is_empty() {
            field.column = Some(column);
        }
        field
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn column(&self) -> Option<&'static str> {
        self.column
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized
    }

    /// Whether this field receives the values of `column`.
    ///
    /// An annotated field never falls back to its normalized name.
    pub fn matches(&self, column: &str) -> bool {
        match self.column {
            Some(annotated) => annotated == column,
            None => self.normalized == column,
        }
    }
}

/// Ordered field layout of a [`Record`] type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Index of the first field, in declaration order, that matches `column`.
    pub fn resolve(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.matches(column))
    }

    /// Resolves every column of a row set at once.
    ///
    /// When several columns resolve to the same field only the last of them keeps it, the
    /// others are discarded. The field ends up holding the last column's value either way.
    pub fn mapping<S>(&self, columns: &[S]) -> ColumnMapping
    where
        S: AsRef<str>,
    {
        let mut targets = columns
            .iter()
            .map(|column| {
                self.resolve(column.as_ref()).map(|index| FieldTarget {
                    index,
                    name: self.fields[index].name,
                })
            })
            .collect::<Vec<_>>();

        let mut claimed = vec![false; self.fields.len()];
        for target in targets.iter_mut().rev() {
            if let Some(FieldTarget { index, .. }) = *target {
                if std::mem::replace(&mut claimed[index], true) {
                    *target = None;
                }
            }
        }

        ColumnMapping { targets }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldTarget {
    index: usize,
    name: &'static str,
}

/// Column position to field index table for one row set.
///
/// Built by [`RecordDescriptor::mapping`] and reusable for every row of that row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    targets: Vec<Option<FieldTarget>>,
}

impl ColumnMapping {
    /// Number of columns, which is also the number of destinations per row.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Field index receiving the column at `position`, `None` when it is discarded.
    pub fn field_index(&self, position: usize) -> Option<usize> {
        self.targets
            .get(position)
            .copied()
            .flatten()
            .map(|target| target.index)
    }

    pub fn matched(&self) -> usize {
        self.targets.iter().filter(|target| target.is_some()).count()
    }

    pub fn discarded(&self) -> usize {
        self.len() - self.matched()
    }

    /// One destination per column, in column order, pointing into `record`.
    ///
    /// `record` must be of the type whose descriptor built this mapping.
    pub fn destinations<'r, R>(&self, record: &'r mut R) -> Vec<Destination<'r>>
    where
        R: Record,
    {
        let mut slots: Vec<Option<&'r mut dyn Slot>> =
            record.slots().into_iter().map(Some).collect();

        self.targets
            .iter()
            .map(|target| match *target {
                Some(FieldTarget { index, name }) => {
                    match slots.get_mut(index).and_then(Option::take) {
                        Some(slot) => Destination::Field { name, slot },
                        None => Destination::Discard,
                    }
                }
                None => Destination::Discard,
            })
            .collect()
    }
}
