use serde_json::{Map, Value};

/// Scalar-only CSV projection.
///
/// Columns are the union of non-null scalar keys across all objects, in order of first
/// discovery. Arrays and nested objects never become columns. Header names are
/// written bare; every cell is double-quoted with embedded quotes doubled, and
/// missing or null values become empty cells.
pub(super) fn to_csv(values: &[Value]) -> String {
    let headers = scalar_columns(values);

    let mut out = headers.join(",");
    out.push('\n');

    for value in values {
        let object = value.as_object();
        let row: Vec<_> = headers
            .iter()
            .map(|h| quote(&cell(object, h)))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn scalar_columns(values: &[Value]) -> Vec<&str> {
    let mut headers: Vec<&str> = Vec::new();
    for (key, value) in values.iter().filter_map(Value::as_object).flatten() {
        if is_scalar(value) && !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }
    headers
}

/// Null is not a scalar here: a key that is null everywhere gets no column.
fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Array(_) | Value::Object(_))
}

fn cell(object: Option<&Map<String, Value>>, key: &str) -> String {
    match object.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // A key that is scalar in one record and nested in another.
        Some(_) => String::new(),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heterogeneous_records_use_union_of_columns() {
        let values = vec![
            json!({ "id": 1, "title": "Fisgard", "tags": ["lighthouse"] }),
            json!({ "id": 2, "district": "Esquimalt", "title": "Fort" }),
        ];
        let out = to_csv(&values);
        assert_eq!(
            out,
            "id,title,district\n\"1\",\"Fisgard\",\"\"\n\"2\",\"Fort\",\"Esquimalt\"\n"
        );
    }

    #[test]
    fn null_only_key_gets_no_column() {
        let values = vec![json!({ "id": 1, "note": null })];
        assert_eq!(to_csv(&values), "id\n\"1\"\n");
    }

    #[test]
    fn null_in_discovered_column_renders_empty() {
        let values = vec![
            json!({ "id": 1, "contributor": null }),
            json!({ "id": 2, "contributor": "Parks Canada" }),
        ];
        assert_eq!(
            to_csv(&values),
            "id,contributor\n\"1\",\"\"\n\"2\",\"Parks Canada\"\n"
        );
    }

    #[test]
    fn key_nested_elsewhere_renders_empty() {
        let values = vec![
            json!({ "id": 1, "location": "Esquimalt" }),
            json!({ "id": 2, "location": { "lat": 48.4, "lng": -123.4 } }),
        ];
        assert_eq!(
            to_csv(&values),
            "id,location\n\"1\",\"Esquimalt\"\n\"2\",\"\"\n"
        );
    }

    #[test]
    fn quotes_are_doubled_and_cells_stay_wrapped() {
        let values = vec![json!({ "title": "The \"Old\" Fort, Esquimalt" })];
        assert_eq!(
            to_csv(&values),
            "title\n\"The \"\"Old\"\" Fort, Esquimalt\"\n"
        );
    }

    #[test]
    fn no_records_gives_blank_header_line() {
        assert_eq!(to_csv(&[]), "\n");
    }

    #[test]
    fn false_and_zero_are_kept() {
        let values = vec![json!({ "audio": false, "rating": 0 })];
        assert_eq!(to_csv(&values), "audio,rating\n\"false\",\"0\"\n");
    }
}
