/// Lower-case, trim and split a query on runs of whitespace.
pub fn split_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
