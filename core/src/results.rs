//! Ordered collections of entities returned by list endpoints.
//!
//! # Design
//! `Results<T>` is a plain wrapper over `Vec<T>`. It holds no cursor:
//! `iter()` hands out a fresh slice iterator each time, so nested or
//! repeated iteration always starts from the first element.

use std::fmt;
use std::ops::Index;

use serde_json::{Map, Value};

use crate::config::MAX_DISPLAY;
use crate::entity::Entity;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Results<T> {
    items: Vec<T>,
}

impl<T: Entity> Results<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Raw result objects in response order.
    pub fn get_results(&self) -> Vec<&Map<String, Value>> {
        self.items.iter().map(|item| item.record().raw_fields()).collect()
    }

    /// One row per element, keyed by identifier. With `drop_na`, columns
    /// that are null in every row are removed.
    pub fn to_table(&self, use_raw: bool, drop_na: bool) -> Table {
        let table = Table::from_maps(
            self.items
                .iter()
                .map(|item| (item.record().identifier(), item.record().fields(use_raw))),
        );
        if drop_na {
            table.drop_empty_columns()
        } else {
            table
        }
    }
}

impl<T> Index<usize> for Results<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Results<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Results<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Entity> FromIterator<T> for Results<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Renders the first five elements followed by `...` when there are more.
impl<T: Entity> fmt::Display for Results<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self
            .items
            .iter()
            .take(MAX_DISPLAY)
            .map(|item| item.record().to_string())
            .collect();
        let mut body = shown.join(",\n ");
        if self.items.len() > MAX_DISPLAY {
            body.push_str(",\n...");
        }
        write!(f, "[{body}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Make;
    use serde_json::json;

    fn make(id: i64, name: &str) -> Make {
        let raw = json!({"MakeId": id, "MakeName": name, "Mfr_Name": ""});
        Make::from_raw(raw.as_object().unwrap().clone(), "honda").unwrap()
    }

    fn makes(n: i64) -> Results<Make> {
        (0..n).map(|i| make(i, &format!("MAKE{i}"))).collect()
    }

    #[test]
    fn indexing_and_length() {
        let results = makes(3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].make_id(), Some(1));
        assert!(results.get(3).is_none());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let results = makes(1);
        let _ = &results[1];
    }

    #[test]
    fn iteration_restarts_from_the_first_element() {
        let results = makes(3);

        let partial: Vec<i64> = results.iter().take(1).filter_map(Make::make_id).collect();
        assert_eq!(partial, vec![0]);

        let full: Vec<i64> = results.iter().filter_map(Make::make_id).collect();
        assert_eq!(full, vec![0, 1, 2]);
    }

    #[test]
    fn nested_iteration_is_independent() {
        let results = makes(2);
        let mut pairs = Vec::new();
        for a in &results {
            for b in &results {
                pairs.push((a.make_id().unwrap(), b.make_id().unwrap()));
            }
        }
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn get_results_preserves_order_and_content() {
        let results = makes(2);
        let raw = results.get_results();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["MakeName"], json!("MAKE0"));
        assert_eq!(raw[1]["MakeId"], json!(1));
    }

    #[test]
    fn to_table_has_one_row_per_record() {
        let table = makes(2).to_table(false, false);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].identifier, "0");
        assert_eq!(table.columns().len(), 5);

        let dense = makes(2).to_table(false, true);
        assert_eq!(dense.columns(), ["make_id", "make_name"]);

        let raw = makes(2).to_table(true, true);
        assert_eq!(raw.columns(), ["MakeId", "MakeName"]);

        let raw_full = makes(2).to_table(true, false);
        assert_eq!(raw_full.columns(), ["MakeId", "MakeName", "Mfr_Name"]);
    }

    #[test]
    fn empty_results_are_valid() {
        let results: Results<Make> = Results::new(Vec::new());
        assert!(results.is_empty());
        assert!(results.to_table(false, true).is_empty());
        assert_eq!(results.to_string(), "[]");
    }

    #[test]
    fn display_truncates_after_five() {
        let five = makes(5).to_string();
        assert_eq!(five.matches("Make:").count(), 5);
        assert!(!five.contains("..."));

        let seven = makes(7).to_string();
        assert_eq!(seven.matches("Make:").count(), 5);
        assert!(seven.ends_with(",\n...]"));
    }
}
