use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tally_types::Record;

const MISSING: &str = "-";
/// Magnitudes outside `[EXPONENT_BELOW, EXPONENT_ABOVE)` print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;
const EMPTY_ARRAY: &str = "[]";
const ELIDED_ARRAY: &str = "[…]";
const ELIDED_OBJECT: &str = "{…}";
const COMPACT_KEYS: usize = 3;

/// Field names the representative rules look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldNames {
    pub display_name: String,
    pub name: String,
    pub id: String,
    pub role: String,
    pub category: String,
    pub price: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            display_name: "nombre".into(),
            name: "name".into(),
            id: "id".into(),
            role: "role".into(),
            category: "categoria".into(),
            price: "precio".into(),
        }
    }
}

/// The locale-dependent token pair booleans render as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolTokens {
    pub yes: String,
    pub no: String,
}

impl Default for BoolTokens {
    fn default() -> Self {
        Self { yes: "yes".into(), no: "no".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializerConfig {
    pub fields: FieldNames,
    pub booleans: BoolTokens,
    /// Containers nested deeper than this render as `[…]` / `{…}`.
    pub max_depth: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            fields: FieldNames::default(),
            booleans: BoolTokens::default(),
            max_depth: 4,
        }
    }
}

/// One entry of an ordered representative-selection list.
///
/// The first rule whose `applies` predicate holds for a record produces its display text.
pub struct ObjectRule {
    pub name: &'static str,
    pub applies: fn(&FieldNames, &Record) -> bool,
    pub render: fn(&ValueSerializer, &Record, usize) -> String,
}

impl std::fmt::Debug for ObjectRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRule").field("name", &self.name).finish()
    }
}

static OBJECT_RULES: [ObjectRule; 4] = [
    ObjectRule { name: "display-name", applies: has_display_name, render: render_display_name },
    ObjectRule { name: "name", applies: has_name, render: render_name },
    ObjectRule { name: "id:category:$price", applies: has_id_category_price, render: render_id_category_price },
    ObjectRule { name: "id", applies: has_id, render: render_id },
];

static ARRAY_ELEMENT_RULES: [ObjectRule; 5] = [
    ObjectRule { name: "display-name", applies: has_display_name, render: render_display_name },
    ObjectRule { name: "name", applies: has_name, render: render_name },
    ObjectRule { name: "id:role", applies: has_id_role, render: render_id_role },
    ObjectRule { name: "id:category", applies: has_id_category, render: render_id_category },
    ObjectRule { name: "id", applies: has_id, render: render_id },
];

/// Rules applied to a record that is itself a field value, in precedence order.
pub fn object_rules() -> &'static [ObjectRule] {
    &OBJECT_RULES
}

/// Rules applied to each record of an all-record array, in precedence order.
pub fn array_element_rules() -> &'static [ObjectRule] {
    &ARRAY_ELEMENT_RULES
}

/// Renders arbitrary field values as display strings. Never fails.
#[derive(Debug, Clone, Default)]
pub struct ValueSerializer {
    config: SerializerConfig,
}

impl ValueSerializer {
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn serialize(&self, value: &Value) -> String {
        self.serialize_at(value, 0)
    }

    /// Serializes `record[field]`, rendering an absent field like `null`.
    pub fn serialize_field(&self, record: &Record, field: &str) -> String {
        match record.get(field) {
            Some(value) => self.serialize(value),
            None => MISSING.to_string(),
        }
    }

    /// Serializes every header of `record`, in header order.
    pub fn serialize_row(&self, record: &Record, headers: &[String]) -> Vec<String> {
        headers.iter().map(|h| self.serialize_field(record, h)).collect()
    }

    fn serialize_at(&self, value: &Value, depth: usize) -> String {
        match value {
            Value::Null => MISSING.to_string(),
            Value::String(s) => s.clone(),
            Value::Number(n) => canonical_number(n).unwrap_or_else(|| MISSING.to_string()),
            Value::Bool(true) => self.config.booleans.yes.clone(),
            Value::Bool(false) => self.config.booleans.no.clone(),
            Value::Array(_) if depth > self.config.max_depth => ELIDED_ARRAY.to_string(),
            Value::Object(_) if depth > self.config.max_depth => ELIDED_OBJECT.to_string(),
            Value::Array(items) => self.serialize_array(items, depth),
            Value::Object(record) => self.apply_rules(object_rules(), record, depth),
        }
    }

    fn serialize_array(&self, items: &[Value], depth: usize) -> String {
        if items.is_empty() {
            return EMPTY_ARRAY.to_string();
        }
        let element_depth = depth + 1;

        if items.iter().all(Value::is_object) {
            return items
                .iter()
                .filter_map(Value::as_object)
                .map(|record| {
                    if element_depth > self.config.max_depth {
                        ELIDED_OBJECT.to_string()
                    } else {
                        self.apply_rules(array_element_rules(), record, element_depth)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
        }

        items
            .iter()
            .map(|item| self.serialize_at(item, element_depth))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn apply_rules(&self, rules: &[ObjectRule], record: &Record, depth: usize) -> String {
        rules
            .iter()
            .find(|rule| (rule.applies)(&self.config.fields, record))
            .map(|rule| (rule.render)(self, record, depth))
            .unwrap_or_else(|| self.compact(record, depth))
    }

    /// `{k:v, k:v, k:v,…}` over the first keys in enumeration order.
    fn compact(&self, record: &Record, depth: usize) -> String {
        let shown = record
            .iter()
            .take(COMPACT_KEYS)
            .map(|(k, v)| format!("{}:{}", k, self.serialize_at(v, depth + 1)))
            .collect::<Vec<_>>()
            .join(", ");
        let more = if record.len() > COMPACT_KEYS { ",…" } else { "" };
        format!("{{{}{}}}", shown, more)
    }

    fn field_text(&self, record: &Record, field: &str, depth: usize) -> String {
        record
            .get(field)
            .map(|v| self.serialize_at(v, depth + 1))
            .unwrap_or_else(|| MISSING.to_string())
    }
}

fn canonical_number(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64().filter(|f| f.is_finite())?;
    if f == 0.0 {
        return Some("0".to_string());
    }
    let magnitude = f.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        return Some(exponent_form(f));
    }
    Some(f.to_string())
}

/// `1.5e+300`, `1e-7`: shortest mantissa with an explicitly signed exponent.
fn exponent_form(f: f64) -> String {
    let sci = format!("{:e}", f);
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => sci,
    }
}

/// Whether a field counts as present: not null, false, zero or the empty string.
fn truthy(record: &Record, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn has_display_name(fields: &FieldNames, record: &Record) -> bool {
    truthy(record, &fields.display_name)
}

fn has_name(fields: &FieldNames, record: &Record) -> bool {
    truthy(record, &fields.name)
}

fn has_id(fields: &FieldNames, record: &Record) -> bool {
    truthy(record, &fields.id)
}

fn has_id_role(fields: &FieldNames, record: &Record) -> bool {
    has_id(fields, record) && truthy(record, &fields.role)
}

fn has_id_category(fields: &FieldNames, record: &Record) -> bool {
    has_id(fields, record) && truthy(record, &fields.category)
}

fn has_id_category_price(fields: &FieldNames, record: &Record) -> bool {
    has_id_category(fields, record) && truthy(record, &fields.price)
}

fn render_display_name(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    s.field_text(record, &s.config.fields.display_name, depth)
}

fn render_name(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    s.field_text(record, &s.config.fields.name, depth)
}

fn render_id(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    s.field_text(record, &s.config.fields.id, depth)
}

fn render_id_role(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    let f = &s.config.fields;
    format!("{}:{}", s.field_text(record, &f.id, depth), s.field_text(record, &f.role, depth))
}

fn render_id_category(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    let f = &s.config.fields;
    format!("{}:{}", s.field_text(record, &f.id, depth), s.field_text(record, &f.category, depth))
}

fn render_id_category_price(s: &ValueSerializer, record: &Record, depth: usize) -> String {
    let f = &s.config.fields;
    format!(
        "{}:{}:${}",
        s.field_text(record, &f.id, depth),
        s.field_text(record, &f.category, depth),
        s.field_text(record, &f.price, depth)
    )
}
