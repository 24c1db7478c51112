use super::model::{Column, Dataset, Record};

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// A user-settable text criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Contaminant,
    Commodity,
    LevelType,
    Search,
}

impl Criterion {
    /// The categorical column this criterion compares against, if any.
    pub fn column(self) -> Option<Column> {
        match self {
            Criterion::Contaminant => Some(Column::Contaminant),
            Criterion::Commodity => Some(Column::Commodity),
            Criterion::LevelType => Some(Column::LevelType),
            Criterion::Search => None,
        }
    }

    /// Stable identifier of the input control bound to this criterion.
    pub fn control_id(self) -> &'static str {
        match self {
            Criterion::Contaminant => "contaminant-filter",
            Criterion::Commodity => "commodity-filter",
            Criterion::LevelType => "level-type-filter",
            Criterion::Search => "search-input",
        }
    }
}

/// Current filter selections. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub contaminant: Option<String>,
    pub commodity: Option<String>,
    pub level_type: Option<String>,
    pub search: Option<String>,
    pub level_min: Option<f64>,
    pub level_max: Option<f64>,
}

impl FilterCriteria {
    /// Update one text criterion; an empty value unsets it.
    /// Returns whether the criteria changed.
    pub fn set(&mut self, criterion: Criterion, value: impl Into<String>) -> bool {
        let value: String = value.into();
        let value = Some(value).filter(|v| !v.is_empty());
        let slot = match criterion {
            Criterion::Contaminant => &mut self.contaminant,
            Criterion::Commodity => &mut self.commodity,
            Criterion::LevelType => &mut self.level_type,
            Criterion::Search => &mut self.search,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn get(&self, criterion: Criterion) -> Option<&str> {
        match criterion {
            Criterion::Contaminant => self.contaminant.as_deref(),
            Criterion::Commodity => self.commodity.as_deref(),
            Criterion::LevelType => self.level_type.as_deref(),
            Criterion::Search => self.search.as_deref(),
        }
    }

    /// Set the numeric level bounds; non-finite bounds count as unset.
    /// Returns whether they changed.
    pub fn set_level_range(&mut self, min: Option<f64>, max: Option<f64>) -> bool {
        let min = min.filter(|v| v.is_finite());
        let max = max.filter(|v| v.is_finite());
        if self.level_min == min && self.level_max == max {
            return false;
        }
        self.level_min = min;
        self.level_max = max;
        true
    }

    /// True when no criterion is active.
    pub fn is_unset(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether `record` satisfies every active criterion.
    pub fn matches(&self, record: &Record) -> bool {
        let categorical = [
            (Column::Contaminant, &self.contaminant),
            (Column::Commodity, &self.commodity),
            (Column::LevelType, &self.level_type),
        ];
        for (column, wanted) in categorical {
            if let Some(wanted) = wanted {
                if record.get(column) != wanted.as_str() {
                    return false;
                }
            }
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !record.values().any(|v| v.to_lowercase().contains(&term)) {
                return false;
            }
        }

        if self.level_min.is_some() || self.level_max.is_some() {
            let Some(level) = numeric_level(record.get(Column::Level)) else {
                return false;
            };
            if self.level_min.is_some_and(|min| level < min) {
                return false;
            }
            if self.level_max.is_some_and(|max| level > max) {
                return false;
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of records passing `criteria`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(i, _)| i)
        .collect()
}

/// Numeric reading of a `Level` cell: every digit and `.` concatenated.
/// `"0.5 mg/kg"` → `0.5`, `"1-2 ppm"` → `12`, `"none"` → `None`.
pub fn numeric_level(level: &str) -> Option<f64> {
    let digits: String = level
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}
