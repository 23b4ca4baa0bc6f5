//! A single API result and its schema-driven projection.
//!
//! # Design
//! vPIC spells the same logical field differently depending on the endpoint
//! (`MakeId`, `Make_ID`, `MakeID`). Rather than one hand-written struct per
//! endpoint, every entity is a `Record` holding the raw JSON object plus a
//! static `Schema`: an ordered list of logical fields, each with its source
//! in the raw object. The named projection is resolved once, at
//! construction, and the raw object is never touched afterwards.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::table::{blank_to_null, cell_text, Table};

/// Where a logical field's value comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// The first of these raw keys present in the object.
    Keys(&'static [&'static str]),
    /// An array of `{"Name": ...}` objects under the first present key,
    /// projected to the list of names.
    Names(&'static [&'static str]),
    /// The record identifier.
    Identifier,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: Source,
}

/// Shorthand for a `Source::Keys` field.
pub(crate) const fn keys(name: &'static str, keys: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        source: Source::Keys(keys),
    }
}

/// Declarative description of one entity kind.
#[derive(Debug)]
pub struct Schema {
    /// Name used when rendering a record, e.g. `Make`.
    pub entity: &'static str,
    /// Raw keys the identifier is taken from, in precedence order. When none
    /// is present the caller-supplied fallback (the request key) is used.
    pub identifier: &'static [&'static str],
    pub fields: &'static [FieldSpec],
}

/// One JSON object from a `Results` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    identifier: String,
    raw: Map<String, Value>,
    named: Map<String, Value>,
    entity: &'static str,
}

impl Record {
    /// Wrap `raw`, resolving the identifier and the named fields of `schema`.
    ///
    /// `fallback_identifier` should be the key the request was made with; it
    /// is used when the schema's identifier keys are all absent. A record
    /// never has a blank identifier.
    pub fn new(
        schema: &'static Schema,
        raw: Map<String, Value>,
        fallback_identifier: &str,
    ) -> Result<Self, ValidationError> {
        let identifier = match first_present(&raw, schema.identifier).and_then(identifier_text) {
            Some(identifier) => identifier,
            None if fallback_identifier.trim().is_empty() => return Err(ValidationError::Empty("identifier")),
            None => fallback_identifier.to_string(),
        };

        let mut named = Map::with_capacity(schema.fields.len());
        for field in schema.fields {
            let value = match field.source {
                Source::Keys(keys) => first_present(&raw, keys).map(blank_to_null).unwrap_or(Value::Null),
                Source::Names(keys) => first_present(&raw, keys).map(names_of).unwrap_or(Value::Null),
                Source::Identifier => Value::String(identifier.clone()),
            };
            named.insert(field.name.to_string(), value);
        }

        Ok(Self {
            identifier,
            raw,
            named,
            entity: schema.entity,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// The JSON object exactly as the API returned it.
    pub fn raw_fields(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Alias of `raw_fields`.
    pub fn get_results(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// The schema's logical fields, blank strings normalized to `Null`.
    /// Fields the response did not carry are present as `Null`.
    pub fn named_fields(&self) -> &Map<String, Value> {
        &self.named
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.named.get(name).filter(|v| !v.is_null())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Integer value of a field, accepting JSON numbers and numeric strings.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.field(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Names of a list field such as `vehicle_types`.
    pub fn names(&self, name: &str) -> Vec<&str> {
        match self.field(name) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Fields used for tabular output.
    pub fn fields(&self, use_raw: bool) -> &Map<String, Value> {
        if use_raw {
            &self.raw
        } else {
            &self.named
        }
    }

    /// A one-row table keyed by this record's identifier.
    pub fn to_table_row(&self, use_raw: bool, drop_na: bool) -> Table {
        let table = Table::from_maps([(self.identifier.as_str(), self.fields(use_raw))]);
        if drop_na {
            table.drop_empty_columns()
        } else {
            table
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.entity)?;
        for (name, value) in &self.named {
            let text = if value.is_null() {
                "None".to_string()
            } else {
                cell_text(value)
            };
            write!(f, "\n{name}: {text}")?;
        }
        Ok(())
    }
}

fn first_present<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| raw.get(*k))
}

fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn names_of(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter_map(|item| item.get("Name").and_then(Value::as_str))
                .map(|name| Value::String(name.to_string()))
                .collect(),
        ),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static TEST_SCHEMA: Schema = Schema {
        entity: "Thing",
        identifier: &["ThingId", "Thing_ID"],
        fields: &[
            keys("thing_id", &["ThingId", "Thing_ID"]),
            keys("label", &["Label", "Name"]),
            keys("note", &["Note"]),
            FieldSpec {
                name: "kinds",
                source: Source::Names(&["Kinds"]),
            },
            FieldSpec {
                name: "key",
                source: Source::Identifier,
            },
        ],
    };

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn raw_fields_are_returned_unmodified() {
        let input = raw(json!({"Thing_ID": 7, "Name": "  ", "Extra": "x"}));
        let record = Record::new(&TEST_SCHEMA, input.clone(), "fallback").unwrap();
        assert_eq!(record.raw_fields(), &input);
        assert_eq!(record.get_results(), &input);
    }

    #[test]
    fn first_present_key_wins() {
        let record = Record::new(
            &TEST_SCHEMA,
            raw(json!({"Thing_ID": 2, "ThingId": 1, "Name": "b", "Label": "a"})),
            "fallback",
        )
        .unwrap();
        assert_eq!(record.integer("thing_id"), Some(1));
        assert_eq!(record.text("label"), Some("a"));
        assert_eq!(record.identifier(), "1");
    }

    #[test]
    fn missing_and_blank_fields_are_null() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"Note": " \t"})), "fallback").unwrap();
        let named = record.named_fields();
        assert_eq!(named["note"], Value::Null);
        assert_eq!(named["label"], Value::Null);
        assert!(record.field("note").is_none());
    }

    #[test]
    fn identifier_falls_back_to_request_key() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"Label": "x"})), "honda").unwrap();
        assert_eq!(record.identifier(), "honda");
        assert_eq!(record.text("key"), Some("honda"));
    }

    #[test]
    fn blank_fallback_without_identifier_key_is_rejected() {
        for fallback in ["", "   "] {
            let err = Record::new(&TEST_SCHEMA, raw(json!({"Label": "x"})), fallback).unwrap_err();
            assert_eq!(err, ValidationError::Empty("identifier"));
        }
        let record = Record::new(&TEST_SCHEMA, raw(json!({"ThingId": 9})), "").unwrap();
        assert_eq!(record.identifier(), "9");
    }

    #[test]
    fn name_lists_are_projected() {
        let record = Record::new(
            &TEST_SCHEMA,
            raw(json!({"ThingId": 3, "Kinds": [{"IsPrimary": true, "Name": "Bus"}, {"Name": "Trailer"}]})),
            "fallback",
        )
        .unwrap();
        assert_eq!(record.names("kinds"), vec!["Bus", "Trailer"]);
    }

    #[test]
    fn integer_parses_numeric_strings() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"ThingId": " 2011 "})), "x").unwrap();
        assert_eq!(record.integer("thing_id"), Some(2011));
    }

    #[test]
    fn named_fields_follow_schema_order() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"Note": "n", "ThingId": 1})), "x").unwrap();
        let names: Vec<&str> = record.named_fields().keys().map(String::as_str).collect();
        assert_eq!(names, ["thing_id", "label", "note", "kinds", "key"]);
    }

    #[test]
    fn table_row_is_keyed_by_identifier() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"ThingId": 5, "Label": "five"})), "x").unwrap();

        let full = record.to_table_row(false, false);
        assert_eq!(full.columns().len(), 5);
        assert_eq!(full.cell("5", "label"), Some(&json!("five")));

        let dense = record.to_table_row(false, true);
        assert_eq!(dense.columns(), ["thing_id", "label", "key"]);

        let raw_row = record.to_table_row(true, false);
        assert_eq!(raw_row.columns(), ["ThingId", "Label"]);
    }

    #[test]
    fn display_lists_named_fields() {
        let record = Record::new(&TEST_SCHEMA, raw(json!({"ThingId": 5, "Label": "five"})), "x").unwrap();
        let text = record.to_string();
        assert!(text.starts_with("Thing:\nthing_id: 5\nlabel: five"));
        assert!(text.contains("note: None"));
    }
}
