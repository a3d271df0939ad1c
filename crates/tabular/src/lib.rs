//! Turning schema-less result trees into tables of display strings.
//!
//! - [`extract_tables`] infers named tables from the top level of a result tree.
//! - [`ValueSerializer`] renders any single field value as a display string, using
//!   ordered rule lists that are exposed for inspection.
//! - [`text`] holds the clipping helpers the renderers apply afterwards.

mod extract;
mod serialize;
pub mod text;

pub use extract::{extract_tables, SCALAR_FIELD};
pub use serialize::{
    array_element_rules, object_rules, BoolTokens, FieldNames, ObjectRule, SerializerConfig,
    ValueSerializer,
};
