use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Column – the fixed header layout of the contaminant file
// ---------------------------------------------------------------------------

/// The six columns of `contaminant-levels.csv`, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Contaminant,
    Commodity,
    LevelType,
    Level,
    Reference,
    Link,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Contaminant,
        Column::Commodity,
        Column::LevelType,
        Column::Level,
        Column::Reference,
        Column::Link,
    ];

    /// Columns offered as dropdown filters.
    pub const CATEGORICAL: [Column; 3] =
        [Column::Contaminant, Column::Commodity, Column::LevelType];

    /// Exact header name in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Contaminant => "Contaminant",
            Column::Commodity => "Commodity",
            Column::LevelType => "Contaminant Level Type",
            Column::Level => "Level",
            Column::Reference => "Reference",
            Column::Link => "Link to Reference",
        }
    }

    /// Short label used in table headers and filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            Column::LevelType => "Level Type",
            Column::Link => "Link",
            other => other.header(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the file
// ---------------------------------------------------------------------------

/// A single data row: header name → trimmed cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Build a record by pairing headers with values positionally.
    /// Missing trailing values become `""`, surplus values are dropped.
    pub fn from_row<'a, I>(headers: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = values.into_iter();
        let fields = headers
            .iter()
            .map(|h| (h.clone(), values.next().unwrap_or("").to_string()))
            .collect();
        Record { fields }
    }

    /// Value of a known column, `""` when the file has no such header.
    pub fn get(&self, column: Column) -> &str {
        self.field(column.header())
    }

    /// Value by raw header name.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Every cell value of the record.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – everything loaded at startup
// ---------------------------------------------------------------------------

/// The full, immutable dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Rows in file order.
    pub records: Vec<Record>,
    /// Header names in file order.
    pub columns: Vec<String>,
    /// Modification date of the source (`YYYY-MM-DD`), if known.
    pub last_updated: Option<String>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Dataset {
            records,
            columns,
            last_updated: None,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterOptions – dropdown contents, computed once from the full dataset
// ---------------------------------------------------------------------------

/// A selectable dropdown value and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub count: usize,
}

impl FilterOption {
    /// Display text such as `Lead (12)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.value, self.count)
    }
}

/// Sorted distinct values per categorical column.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    options: BTreeMap<Column, Vec<FilterOption>>,
}

impl FilterOptions {
    /// Collect distinct non-empty values of each categorical column, sorted
    /// lexicographically.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut options = BTreeMap::new();
        for column in Column::CATEGORICAL {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for record in &dataset.records {
                let value = record.get(column);
                if !value.is_empty() {
                    *counts.entry(value).or_insert(0) += 1;
                }
            }
            let values = counts
                .into_iter()
                .map(|(value, count)| FilterOption {
                    value: value.to_string(),
                    count,
                })
                .collect();
            options.insert(column, values);
        }
        FilterOptions { options }
    }

    /// Options for one column; empty for non-categorical columns.
    pub fn for_column(&self, column: Column) -> &[FilterOption] {
        self.options.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        Column::ALL.iter().map(|c| c.header().to_string()).collect()
    }

    #[test]
    fn short_rows_are_padded_with_empty_strings() {
        let record = Record::from_row(&headers(), ["Lead", "Rice"]);
        assert_eq!(record.get(Column::Contaminant), "Lead");
        assert_eq!(record.get(Column::Commodity), "Rice");
        assert_eq!(record.get(Column::Level), "");
        assert_eq!(record.get(Column::Link), "");
        assert_eq!(record.values().count(), 6);
    }

    #[test]
    fn surplus_values_are_dropped() {
        let headers = vec!["Contaminant".to_string()];
        let record = Record::from_row(&headers, ["Lead", "extra"]);
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["Lead"]);
    }

    #[test]
    fn options_are_sorted_counted_and_skip_blanks() {
        let records = vec![
            Record::from_iter([("Contaminant", "Mercury"), ("Commodity", "Fish")]),
            Record::from_iter([("Contaminant", "Arsenic"), ("Commodity", "Rice")]),
            Record::from_iter([("Contaminant", "Mercury"), ("Commodity", "")]),
        ];
        let dataset = Dataset::new(headers(), records);
        let options = FilterOptions::from_dataset(&dataset);

        let contaminants: Vec<String> = options
            .for_column(Column::Contaminant)
            .iter()
            .map(FilterOption::label)
            .collect();
        assert_eq!(contaminants, vec!["Arsenic (1)", "Mercury (2)"]);
        assert_eq!(options.for_column(Column::Commodity).len(), 2);
        assert!(options.for_column(Column::LevelType).is_empty());
        assert!(options.for_column(Column::Level).is_empty());
    }
}
