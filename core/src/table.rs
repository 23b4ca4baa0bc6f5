//! Tabular projection of records.
//!
//! A `Table` is what `Record::to_table_row` and `Results::to_table` return:
//! named columns, and one row per record keyed by the record identifier.
//! Cells hold the JSON value as received, except that blank strings become
//! `Null` so raw and named projections agree on what "absent" means.

use std::fmt;
use std::io;

use comfy_table::{Cell, ContentArrangement};
use serde_json::{Map, Value};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// One table row: the record identifier and a value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub identifier: String,
    pub values: Vec<Value>,
}

impl Table {
    /// Build a table from `(identifier, fields)` pairs. Columns are the union
    /// of all field names in first-seen order; a row missing a column gets
    /// `Null` there.
    pub fn from_maps<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Map<String, Value>)>,
    {
        let rows: Vec<(&str, &Map<String, Value>)> = rows.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for (_, fields) in &rows {
            for key in fields.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = rows
            .into_iter()
            .map(|(identifier, fields)| Row {
                identifier: identifier.to_string(),
                values: columns
                    .iter()
                    .map(|c| fields.get(c).map(blank_to_null).unwrap_or(Value::Null))
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row with the given identifier.
    pub fn row(&self, identifier: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.identifier == identifier)
    }

    pub fn cell(&self, identifier: &str, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.row(identifier).map(|r| &r.values[idx])
    }

    /// Remove every column that is `Null` in all rows.
    pub fn drop_empty_columns(mut self) -> Self {
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|i| self.rows.iter().any(|r| !r.values[i].is_null()))
            .collect();

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&false));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.values.retain(|_| *flags.next().unwrap_or(&false));
        }
        self
    }

    /// Write the table as CSV: an `identifier` column followed by the table
    /// columns, nulls as empty fields.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ApiError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("identifier");
        header.extend(self.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.values.len() + 1);
            record.push(row.identifier.clone());
            record.extend(row.values.iter().map(cell_text));
            wtr.write_record(&record)?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Blank strings become `Null`; everything else is kept as is.
pub(crate) fn blank_to_null(value: &Value) -> Value {
    match value {
        Value::String(s) if s.trim().is_empty() => Value::Null,
        other => other.clone(),
    }
}

/// Render a cell for display: strings unquoted, nulls empty, lists of names
/// joined with commas.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = comfy_table::Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![Cell::new("")];
        header.extend(self.columns.iter().map(Cell::new));
        table.set_header(header);

        for row in &self.rows {
            let mut cells = vec![row.identifier.clone()];
            cells.extend(row.values.iter().map(cell_text));
            table.add_row(cells);
        }

        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn columns_are_unioned_in_first_seen_order() {
        let a = map(json!({"make": "HONDA", "model": null}));
        let b = map(json!({"model": "Civic", "doors": 4}));
        let table = Table::from_maps([("a", &a), ("b", &b)]);

        assert_eq!(table.columns(), ["make", "model", "doors"]);
        assert_eq!(table.cell("a", "doors"), Some(&Value::Null));
        assert_eq!(table.cell("b", "make"), Some(&Value::Null));
        assert_eq!(table.cell("b", "doors"), Some(&json!(4)));
    }

    #[test]
    fn drop_empty_columns_keeps_partially_filled_ones() {
        let a = map(json!({"make": "HONDA", "trim": null, "series": null}));
        let b = map(json!({"make": "BMW", "trim": "xDrive", "series": null}));
        let table = Table::from_maps([("a", &a), ("b", &b)]).drop_empty_columns();

        assert_eq!(table.columns(), ["make", "trim"]);
        assert_eq!(table.row("a").unwrap().values, vec![json!("HONDA"), Value::Null]);
    }

    #[test]
    fn blank_strings_become_null_cells() {
        let a = map(json!({"make": "HONDA", "note": "  "}));
        let table = Table::from_maps([("a", &a)]);
        assert_eq!(table.cell("a", "note"), Some(&Value::Null));
        assert_eq!(table.drop_empty_columns().columns(), ["make"]);
    }

    #[test]
    fn empty_table_has_no_columns() {
        let table = Table::from_maps(std::iter::empty());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn csv_export_writes_identifier_column() {
        let a = map(json!({"make_id": 474, "make_name": "HONDA", "note": null}));
        let table = Table::from_maps([("474", &a)]);

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "identifier,make_id,make_name,note\n474,474,HONDA,\n"
        );
    }

    #[test]
    fn display_renders_identifier_and_values() {
        let a = map(json!({"vehicle_types": ["Bus", "Trailer"]}));
        let rendered = Table::from_maps([("1178", &a)]).to_string();
        assert!(rendered.contains("1178"));
        assert!(rendered.contains("Bus, Trailer"));
    }
}
