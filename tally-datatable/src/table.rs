use indexmap::IndexMap;

use crate::{Row, RowKey};

/// An ordered collection of report rows with stable deletion keys.
///
/// Rows keep their insertion order. Deleting a row preserves the order of
/// the remaining rows and never invalidates the keys of other rows, so a
/// filter can snapshot the keys with [`DataTable::row_keys`] and delete
/// while it walks the snapshot.
#[derive(Clone, Debug, Default)]
pub struct DataTable {
    rows: IndexMap<RowKey, Row>,
    next_key: u64,
}

impl DataTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row, returning the key it can later be addressed by.
    pub fn add_row(&mut self, row: Row) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        self.rows.insert(key, row);
        key
    }

    /// Returns the row stored under `key`.
    pub fn row(&self, key: RowKey) -> Option<&Row> {
        self.rows.get(&key)
    }

    /// Returns the row stored under `key` for modification.
    pub fn row_mut(&mut self, key: RowKey) -> Option<&mut Row> {
        self.rows.get_mut(&key)
    }

    /// The rows with their keys, in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = (RowKey, &Row)> {
        self.rows.iter().map(|(&key, row)| (key, row))
    }

    /// A snapshot of the current row keys, in insertion order.
    pub fn row_keys(&self) -> Vec<RowKey> {
        self.rows.keys().copied().collect()
    }

    /// Removes a row, preserving the order of the remaining rows.
    pub fn delete_row(&mut self, key: RowKey) -> Option<Row> {
        self.rows.shift_remove(&key)
    }

    /// The number of rows currently in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
