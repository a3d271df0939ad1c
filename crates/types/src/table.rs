use itertools::Itertools;
use serde_json::{Map, Value};

/// One row of a table: field name to raw, unserialized value.
pub type Record = Map<String, Value>;

/// A named, header-normalized view over the records found under one key of a result tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Record>) -> Self {
        Self { name: name.into(), rows }
    }

    /// The union of keys across all rows, in first-seen order.
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|row| row.keys())
            .unique()
            .cloned()
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
