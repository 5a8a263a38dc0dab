use crate::{DataTable, Manager, RowKey, TableId, Value};

/// Deletes rows that do not contain a column matching a pattern and whose
/// subtable hierarchy does not contain one either.
///
/// A row survives if its own column value matches, or at least one row at
/// any depth of its subtable tree has a column value that matches.
/// Surviving a match deep down keeps the whole ancestor chain alive, so the
/// report still shows the path to the matching row.
///
/// # Example
///
/// ```
/// use tally_datatable::filter::PatternRecursive;
/// use tally_datatable::{DataTable, Manager, Row};
///
/// let mut manager = Manager::new();
///
/// let mut pages = DataTable::new();
/// pages.add_row(Row::new().with_column("label", "index"));
/// let pages = manager.add_table(pages);
///
/// let mut root = DataTable::new();
/// root.add_row(Row::new().with_column("label", "docs").with_subtable(pages));
/// root.add_row(Row::new().with_column("label", "blog"));
/// let root = manager.add_table(root);
///
/// // "blog" is deleted; "docs" survives through its matching child.
/// let filter = PatternRecursive::new("label", "index").unwrap();
/// assert_eq!(filter.filter(&mut manager, root), 1);
/// ```
#[derive(Clone, Debug)]
pub struct PatternRecursive {
    column: String,
    pattern: tally_pattern::Pattern,
}

impl PatternRecursive {
    /// Compiles the filter. The pattern is matched case-insensitively and
    /// anywhere within the column value.
    pub fn new(column: impl Into<String>, pattern: &str) -> Result<Self, tally_pattern::Error> {
        Ok(Self {
            column: column.into(),
            pattern: tally_pattern::Pattern::new(pattern)?,
        })
    }

    /// Prunes the table tree rooted at `table` in place.
    ///
    /// Returns the row count of `table` after deletion; a return value of 0
    /// signals to the caller that the whole subtree holds no match. An id
    /// that does not resolve counts as an empty subtree.
    pub fn filter(&self, manager: &mut Manager, table: TableId) -> usize {
        // Snapshot key, subtable reference and column value up front: rows
        // are deleted below while the snapshot is walked, and the child
        // lookups need the registry themselves.
        let rows: Vec<(RowKey, Option<TableId>, Option<String>)> = match manager.table(table) {
            Some(table) => table
                .rows()
                .map(|(key, row)| {
                    (
                        key,
                        row.subtable(),
                        row.column(&self.column).map(Value::to_string),
                    )
                })
                .collect(),
            None => return 0,
        };

        for (key, subtable, value) in rows {
            // A row is deleted if its own column does not contain the
            // pattern and the pattern is not found anywhere in its
            // children.
            let found_in_children = match subtable {
                Some(subtable) => self.filter(manager, subtable) > 0,
                None => false,
            };

            if !found_in_children && !self.pattern.matches(value.as_deref(), false) {
                if let Some(table) = manager.table_mut(table) {
                    table.delete_row(key);
                }
            }
        }

        manager.table(table).map_or(0, DataTable::row_count)
    }
}
