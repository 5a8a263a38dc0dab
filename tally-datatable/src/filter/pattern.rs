use crate::{DataTable, Value};

/// Deletes every row of a table whose column value does not match a
/// pattern.
///
/// With [`invert`](Pattern::invert), the matching rows are deleted instead.
/// Rows missing the column count as having an empty value, which only the
/// empty pattern matches.
#[derive(Clone, Debug)]
pub struct Pattern {
    column: String,
    pattern: tally_pattern::Pattern,
    invert: bool,
}

impl Pattern {
    /// Compiles the filter. The pattern is matched case-insensitively and
    /// anywhere within the column value.
    pub fn new(column: impl Into<String>, pattern: &str) -> Result<Self, tally_pattern::Error> {
        Ok(Self {
            column: column.into(),
            pattern: tally_pattern::Pattern::new(pattern)?,
            invert: false,
        })
    }

    /// Inverts the match: matching rows are deleted, the rest are kept.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Applies the filter to `table`.
    pub fn filter(&self, table: &mut DataTable) {
        for key in table.row_keys() {
            let value = table
                .row(key)
                .and_then(|row| row.column(&self.column))
                .map(Value::to_string);

            if !self.pattern.matches(value.as_deref(), self.invert) {
                table.delete_row(key);
            }
        }
    }
}
