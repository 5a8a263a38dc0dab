use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{TableId, Value};

/// The key of a row within its table.
///
/// Keys are assigned by the table on insertion and stay valid across
/// deletions of other rows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RowKey(pub(crate) u64);

/// A single row of a report table: named columns plus an optional reference
/// to the child table holding this row's more granular data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    columns: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtable: Option<TableId>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `column`, if the row has it.
    pub fn column(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Sets a column value, replacing an existing one of the same name.
    pub fn set_column(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(name.into(), value.into());
    }

    /// Sets a column value, consuming and returning the row.
    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_column(name, value);
        self
    }

    /// The columns of the row in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The reference to this row's child table, if it has one.
    pub fn subtable(&self) -> Option<TableId> {
        self.subtable
    }

    /// Attaches the reference to this row's child table.
    pub fn set_subtable(&mut self, table: TableId) {
        self.subtable = Some(table);
    }

    /// Attaches a child table reference, consuming and returning the row.
    pub fn with_subtable(mut self, table: TableId) -> Self {
        self.set_subtable(table);
        self
    }
}
