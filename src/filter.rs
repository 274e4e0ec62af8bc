use std::collections::HashSet;

use tracing::debug;

use crate::record::{Field, Record};

/// Allowed values per categorical field. An empty set leaves that field
/// unconstrained; values within one field are alternatives, fields combine
/// conjunctively.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub categories: HashSet<String>,
    pub periods: HashSet<String>,
    pub districts: HashSet<String>,
}

impl FilterCriteria {
    pub fn new<S: Into<String>>(
        categories: impl IntoIterator<Item = S>,
        periods: impl IntoIterator<Item = S>,
        districts: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            periods: periods.into_iter().map(Into::into).collect(),
            districts: districts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.periods.is_empty() && self.districts.is_empty()
    }

    fn allowed(&self, field: Field) -> &HashSet<String> {
        match field {
            Field::Category => &self.categories,
            Field::Period => &self.periods,
            Field::District => &self.districts,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        [Field::Category, Field::Period, Field::District]
            .into_iter()
            .all(|field| {
                let allowed = self.allowed(field);
                allowed.is_empty() || allowed.contains(record.field(field))
            })
    }
}

/// Keep the records that satisfy `criteria`, preserving input order.
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    criteria: &FilterCriteria,
) -> Vec<&'a Record> {
    let out: Vec<_> = records
        .into_iter()
        .filter(|r| criteria.matches(r))
        .collect();
    debug!(results = out.len(), "filters applied");
    out
}
