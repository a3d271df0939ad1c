use serde_json::{Map, Value};
use tally_types::{Record, ResultTree, Table};

/// Field name given to sequence elements that are not records themselves.
pub const SCALAR_FIELD: &str = "value";

/// Infers one table per top-level key of `tree`, in key order.
///
/// Sequences become multi-row tables, single records become one-row tables and
/// scalars are skipped. A tree that is not a mapping yields no tables.
pub fn extract_tables(tree: &ResultTree) -> Vec<Table> {
    let Some(root) = tree.as_object() else {
        log::debug!("Result tree is not a record; no tables extracted");
        return Vec::new();
    };

    let tables: Vec<Table> = root
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Array(items) => Some(Table::new(key, items.iter().map(to_record).collect())),
            Value::Object(record) => Some(Table::new(key, vec![record.clone()])),
            _ => {
                log::debug!("Skipping scalar field '{}': it cannot form a table", key);
                None
            }
        })
        .collect();

    log::debug!(
        "Extracted {} table(s): {:?}",
        tables.len(),
        tables.iter().map(|t| (&t.name, t.row_count())).collect::<Vec<_>>()
    );
    tables
}

fn to_record(item: &Value) -> Record {
    match item {
        Value::Object(record) => record.clone(),
        other => {
            let mut record = Map::new();
            record.insert(SCALAR_FIELD.to_string(), other.clone());
            record
        }
    }
}
