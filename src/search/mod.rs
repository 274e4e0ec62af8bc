//! Free-text search over title, description, tags and category.

mod terms;

pub use terms::split_terms;

use tracing::debug;

use crate::record::Record;

/// Records matching at least one query term in at least one searchable field.
///
/// An empty or whitespace-only query returns no records: "no search active"
/// is not the same as "search everything". Matching is case-insensitive
/// substring containment and results keep input order.
pub fn search<'a>(records: impl IntoIterator<Item = &'a Record>, query: &str) -> Vec<&'a Record> {
    let terms = split_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let out: Vec<_> = records
        .into_iter()
        .filter(|r| matches_any(r, &terms))
        .collect();
    debug!(terms = terms.len(), results = out.len(), "search complete");
    out
}

fn matches_any(record: &Record, terms: &[String]) -> bool {
    let fields = [
        record.title.to_lowercase(),
        record.description.to_lowercase(),
        record.category.to_lowercase(),
    ];
    let tags: Vec<_> = record.tags.iter().map(|t| t.to_lowercase()).collect();

    terms.iter().any(|term| {
        fields.iter().any(|f| f.contains(term.as_str()))
            || tags.iter().any(|t| t.contains(term.as_str()))
    })
}
