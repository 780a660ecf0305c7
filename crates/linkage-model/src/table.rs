use std::collections::{BTreeMap, BTreeSet};

use crate::ColumnName;
use crate::ids::RowId;

/// A single row: a mapping from column name to value. A record has no
/// identity of its own — identity is the [`RowId`] under which it is stored
/// in a [`Table`]. Columns absent from a given record are treated
/// identically to columns present with an empty string (spec §3, §4.A).
pub type Record = BTreeMap<ColumnName, String>;

/// Reads a cell, treating an absent column the same as an empty value.
pub fn cell<'a>(record: &'a Record, col: &ColumnName) -> &'a str {
    record.get(col).map(String::as_str).unwrap_or("")
}

/// Returns true when the cell is present and non-empty.
fn cell_is_present(record: &Record, col: &ColumnName) -> bool {
    !cell(record, col).is_empty()
}

/// An ordered mapping from row id to record (spec §3).
///
/// Row ids are stable within one matching run and iteration always proceeds
/// in ascending row-id order, which is what gives the record-level matcher
/// and the result assembler their deterministic output order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Table {
    rows: BTreeMap<RowId, Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records in iteration order, assigning row ids
    /// `0, 1, 2, ...` by position.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| (RowId::new(i), record))
            .collect();
        Self { rows }
    }

    pub fn insert(&mut self, id: RowId, record: Record) {
        self.rows.insert(id, record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&Record> {
        self.rows.get(&id)
    }

    /// Rows in ascending row-id order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &Record)> {
        self.rows.iter().map(|(id, record)| (*id, record))
    }

    /// The union of keys across all records (spec §4.A `column_names`).
    pub fn column_names(&self) -> BTreeSet<ColumnName> {
        self.rows
            .values()
            .flat_map(|record| record.keys().cloned())
            .collect()
    }

    /// `|{ r[col] : r ∈ T, r[col] non-empty }| / |T|`, or 0 when `T` is empty.
    pub fn uniqueness(&self, col: &ColumnName) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let distinct: BTreeSet<&str> = self
            .rows
            .values()
            .map(|record| cell(record, col))
            .filter(|value| !value.is_empty())
            .collect();
        distinct.len() as f64 / self.rows.len() as f64
    }

    /// Keeps rows (preserving ids) where every `(column, value)` pair in
    /// `predicate` matches the row's cell for that column. An empty
    /// predicate returns every row.
    pub fn group_by(&self, predicate: &BTreeMap<ColumnName, String>) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|(_, record)| {
                predicate
                    .iter()
                    .all(|(col, value)| cell(record, col) == value)
            })
            .map(|(id, record)| (*id, record.clone()))
            .collect();
        Table { rows }
    }

    /// Streams rows whose value in `col` occurs more than once across the
    /// table, excluding rows where the column is empty/absent.
    pub fn duplicated<'a>(&'a self, col: &'a ColumnName) -> impl Iterator<Item = (RowId, &'a Record)> + 'a {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in self.rows.values() {
            let value = cell(record, col);
            if !value.is_empty() {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        self.rows.iter().filter_map(move |(id, record)| {
            let value = cell(record, col);
            if !value.is_empty() && counts.get(value).copied().unwrap_or(0) > 1 {
                Some((*id, record))
            } else {
                None
            }
        })
    }

    /// Whether `col` holds a non-empty value for this row id.
    pub fn has_value(&self, id: RowId, col: &ColumnName) -> bool {
        self.rows
            .get(&id)
            .is_some_and(|record| cell_is_present(record, col))
    }
}

/// Selects `selected_cols` out of `per_col_uniqueness` and normalizes so the
/// values sum to 1, or to 0 when every selected uniqueness is 0 (spec §4.A).
pub fn adjusted_uniqueness(
    selected_cols: &BTreeSet<ColumnName>,
    per_col_uniqueness: &BTreeMap<ColumnName, f64>,
) -> BTreeMap<ColumnName, f64> {
    let selected: Vec<(&ColumnName, f64)> = per_col_uniqueness
        .iter()
        .filter(|(col, _)| selected_cols.contains(*col))
        .map(|(col, u)| (col, *u))
        .collect();

    let sum: f64 = selected.iter().map(|(_, u)| u).sum();
    if sum <= 0.0 {
        return BTreeMap::new();
    }
    selected
        .into_iter()
        .map(|(col, u)| (col.clone(), u / sum))
        .collect()
}
