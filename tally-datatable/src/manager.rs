use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DataTable;

/// Identifier of a table within a [`Manager`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TableId(u64);

/// The registry that owns all loaded report tables.
///
/// Rows reference their child tables by [`TableId`]; the registry resolves
/// those references. Resolution returns `None` for ids that were never
/// loaded or whose table has been dropped, and callers treat that as "no
/// child data" rather than an error.
#[derive(Debug, Default)]
pub struct Manager {
    tables: BTreeMap<TableId, DataTable>,
    next_id: u64,
}

impl Manager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table, returning its id.
    pub fn add_table(&mut self, table: DataTable) -> TableId {
        let id = TableId(self.next_id);
        self.next_id += 1;
        self.tables.insert(id, table);
        id
    }

    /// Resolves a table reference.
    pub fn table(&self, id: TableId) -> Option<&DataTable> {
        self.tables.get(&id)
    }

    /// Resolves a table reference for modification.
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut DataTable> {
        self.tables.get_mut(&id)
    }

    /// Drops a table. Rows still referencing it will resolve to no child
    /// data from now on.
    pub fn remove_table(&mut self, id: TableId) -> Option<DataTable> {
        self.tables.remove(&id)
    }

    /// The number of tables currently loaded.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
