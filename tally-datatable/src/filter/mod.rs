//! Filters that mutate a report table in place.
//!
//! Filters are compiled once from user input (the pattern comes from a
//! report's search box) and then applied to one table, or in the recursive
//! variant to a whole table tree.

mod pattern;
mod pattern_recursive;

pub use pattern::Pattern;
pub use pattern_recursive::PatternRecursive;
