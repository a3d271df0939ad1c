use crate::ResultTree;
use serde::{Deserialize, Serialize};

/// A single error entry reported by the query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryErrorEntry {
    pub message: String,
}

/// What the query-execution collaborator hands over: either data or a list of errors.
///
/// Mirrors the usual `{ "data": ..., "errors": [...] }` response envelope. Both parts
/// are optional on the wire; an envelope with neither is treated as "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub data: Option<ResultTree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<QueryErrorEntry>,
}

impl QueryResult {
    pub fn from_data(data: ResultTree) -> Self {
        Self { data: Some(data), errors: Vec::new() }
    }

    pub fn from_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: messages
                .into_iter()
                .map(|m| QueryErrorEntry { message: m.into() })
                .collect(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// The data tree, unless it is absent or JSON `null`.
    pub fn data(&self) -> Option<&ResultTree> {
        self.data.as_ref().filter(|d| !d.is_null())
    }
}
