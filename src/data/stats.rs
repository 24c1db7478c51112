use std::collections::{HashMap, HashSet};

use super::model::{Column, Dataset};

/// Count records per distinct value of `column` over the given view.
///
/// Sorted by descending count; equal counts keep the order in which the values
/// first appear in the view.
pub fn value_counts(dataset: &Dataset, view: &[usize], column: Column) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for &idx in view {
        let value = dataset.records[idx].get(column);
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    // stable: ties stay in first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Headline numbers for the filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub unique_contaminants: usize,
    pub unique_commodities: usize,
    pub top_contaminant: Option<String>,
    pub top_commodity: Option<String>,
    pub top_level_type: Option<String>,
}

impl Summary {
    pub fn from_view(dataset: &Dataset, view: &[usize]) -> Self {
        // blank cells are missing values, not a category of their own
        let distinct = |column: Column| {
            view.iter()
                .map(|&idx| dataset.records[idx].get(column))
                .filter(|v| !v.is_empty())
                .collect::<HashSet<_>>()
                .len()
        };
        let top = |column: Column| {
            value_counts(dataset, view, column)
                .into_iter()
                .find(|(value, _)| !value.is_empty())
                .map(|(value, _)| value)
        };
        Summary {
            records: view.len(),
            unique_contaminants: distinct(Column::Contaminant),
            unique_commodities: distinct(Column::Commodity),
            top_contaminant: top(Column::Contaminant),
            top_commodity: top(Column::Commodity),
            top_level_type: top(Column::LevelType),
        }
    }

    /// Label / value pairs for display, `N/A` for absent values.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        vec![
            ("Records", self.records.to_string()),
            ("Unique Contaminants", self.unique_contaminants.to_string()),
            ("Unique Commodities", self.unique_commodities.to_string()),
            ("Most Common Contaminant", or_na(&self.top_contaminant)),
            ("Most Common Commodity", or_na(&self.top_commodity)),
            ("Most Common Level Type", or_na(&self.top_level_type)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        let records = rows
            .iter()
            .map(|(c, m)| Record::from_iter([("Contaminant", *c), ("Commodity", *m)]))
            .collect();
        Dataset::new(Vec::new(), records)
    }

    #[test]
    fn counts_sort_descending_with_first_seen_ties() {
        let ds = dataset(&[
            ("Lead", "Rice"),
            ("Arsenic", "Rice"),
            ("Mercury", "Fish"),
            ("Lead", "Fish"),
            ("Mercury", "Tuna"),
            ("Lead", "Tuna"),
            ("Mercury", "Rice"),
        ]);
        let view: Vec<usize> = (0..ds.len()).collect();
        let counts = value_counts(&ds, &view, Column::Contaminant);
        assert_eq!(
            counts,
            vec![
                ("Lead".to_string(), 3),
                ("Mercury".to_string(), 3),
                ("Arsenic".to_string(), 1),
            ]
        );
    }

    #[test]
    fn counts_respect_the_view() {
        let ds = dataset(&[("Lead", "Rice"), ("Arsenic", "Rice"), ("Arsenic", "Fish")]);
        let counts = value_counts(&ds, &[0, 1], Column::Contaminant);
        assert_eq!(
            counts,
            vec![("Lead".to_string(), 1), ("Arsenic".to_string(), 1)]
        );
    }

    #[test]
    fn summary_of_empty_view_reports_na() {
        let ds = dataset(&[("Lead", "Rice")]);
        let summary = Summary::from_view(&ds, &[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.unique_contaminants, 0);
        let rows = summary.rows();
        assert_eq!(rows[3], ("Most Common Contaminant", "N/A".to_string()));
    }

    #[test]
    fn summary_counts_distinct_values() {
        let ds = dataset(&[("Lead", "Rice"), ("Lead", "Fish"), ("Arsenic", "Rice")]);
        let summary = Summary::from_view(&ds, &[0, 1, 2]);
        assert_eq!(summary.unique_contaminants, 2);
        assert_eq!(summary.unique_commodities, 2);
        assert_eq!(summary.top_contaminant.as_deref(), Some("Lead"));
        assert_eq!(summary.top_commodity.as_deref(), Some("Rice"));
    }

    #[test]
    fn summary_skips_blank_cells() {
        let ds = dataset(&[("", "Rice"), ("", "Fish"), ("Lead", ""), ("", "")]);
        let summary = Summary::from_view(&ds, &[0, 1, 2, 3]);
        assert_eq!(summary.records, 4);
        assert_eq!(summary.unique_contaminants, 1);
        assert_eq!(summary.unique_commodities, 2);
        assert_eq!(summary.top_contaminant.as_deref(), Some("Lead"));
        assert_eq!(summary.top_level_type, None);
        assert_eq!(summary.rows()[5], ("Most Common Level Type", "N/A".to_string()));
    }
}
