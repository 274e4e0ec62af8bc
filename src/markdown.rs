//! Markdown rendering of query results for the terminal.

use crate::record::{Record, ThematicCollection};

const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Escape characters that break Markdown link or emphasis syntax.
pub(crate) fn escape_md(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '[' | ']' | '(' | ')' | '*' | '_' | '`' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Replaces newlines (which would break heading structure) with spaces.
pub(crate) fn sanitize_heading(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Text safe inside a Markdown table cell: single line, `|` escaped.
fn table_cell(s: &str) -> String {
    escape_md(&sanitize_heading(s)).replace('|', "\\|")
}

fn preview(s: &str) -> String {
    let flat = sanitize_heading(s);
    if flat.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let cut: String = flat.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        flat
    }
}

pub fn format_record_list(heading: &str, records: &[&Record]) -> String {
    let mut out = format!("# {}\n\n", sanitize_heading(heading));
    out.push_str(&format!("results: {}\n\n", records.len()));
    for record in records {
        out.push_str(&format!(
            "- **{}** `#{}` ({}, {}, {})\n",
            escape_md(&record.title),
            record.id,
            escape_md(&record.category),
            escape_md(&record.period),
            escape_md(&record.district)
        ));
    }
    out
}

/// Full view of one record followed by its related records.
pub fn format_record_detail(record: &Record, related: &[&Record], saved: bool) -> String {
    let mut out = format!("# {}\n\n", sanitize_heading(&record.title));
    out.push_str(&format!("{}\n\n", record.description));

    out.push_str("| Attribute | Value |\n|-----------|-------|\n");
    out.push_str(&format!("| Id | {} |\n", record.id));
    out.push_str(&format!("| Category | {} |\n", table_cell(&record.category)));
    out.push_str(&format!("| Period | {} |\n", table_cell(&record.period)));
    out.push_str(&format!("| District | {} |\n", table_cell(&record.district)));
    out.push_str(&format!(
        "| Location | {:.6}, {:.6} |\n",
        record.location.lat, record.location.lng
    ));
    out.push_str(&format!(
        "| Audio | {} |\n",
        if record.has_audio { "yes" } else { "no" }
    ));
    if !record.tags.is_empty() {
        out.push_str(&format!("| Tags | {} |\n", table_cell(&record.tags.join(", "))));
    }
    if !record.contributor.is_empty() {
        out.push_str(&format!("| Contributor | {} |\n", table_cell(&record.contributor)));
    }
    out.push_str(&format!("| Saved | {} |\n\n", if saved { "yes" } else { "no" }));

    if !related.is_empty() {
        out.push_str("## Related\n\n");
        for other in related {
            out.push_str(&format!(
                "- **{}** `#{}`: {}\n",
                escape_md(&other.title),
                other.id,
                preview(&other.description)
            ));
        }
    }

    out
}

pub fn format_themes(themes: &[ThematicCollection]) -> String {
    let mut out = String::from("# Thematic collections\n\n");
    for theme in themes {
        out.push_str(&format!(
            "- **{}** `#{}` ({} sites): {}\n",
            escape_md(&theme.title),
            theme.id,
            theme.items.len(),
            preview(&theme.description)
        ));
    }
    out
}

pub fn format_values(field: &str, values: &[&str]) -> String {
    let mut out = format!("# {field}\n\n");
    for value in values {
        out.push_str(&format!("- {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::make_record;

    #[test]
    fn escapes_special_chars() {
        assert_eq!(escape_md("normal text"), "normal text");
        assert_eq!(escape_md("a[b]c(d)e"), r"a\[b\]c\(d\)e");
        assert_eq!(escape_md("*bold*"), r"\*bold\*");
    }

    #[test]
    fn sanitize_heading_replaces_newlines() {
        assert_eq!(sanitize_heading("line1\nline2\rline3"), "line1 line2 line3");
        assert_eq!(sanitize_heading("no newlines"), "no newlines");
    }

    #[test]
    fn list_shows_count_and_entries() {
        let a = make_record(1, "Military", "Esquimalt", &[]);
        let b = make_record(2, "Museum", "Victoria", &[]);
        let text = format_record_list("Search: fort", &[&a, &b]);
        assert!(text.starts_with("# Search: fort\n\nresults: 2\n"));
        assert!(text.contains("- **Site 1** `#1` (Military, 1850-1880, Esquimalt)"));
        assert!(text.contains("`#2`"));
    }

    #[test]
    fn detail_includes_related_section() {
        let record = make_record(1, "Military", "Esquimalt", &["fort", "defense"]);
        let mut other = make_record(2, "Military", "Victoria", &[]);
        other.description = "x".repeat(300);
        let text = format_record_detail(&record, &[&other], true);
        assert!(text.contains("| Tags | fort, defense |"));
        assert!(text.contains("| Saved | yes |"));
        assert!(text.contains("## Related"));
        assert!(text.contains("..."));
    }

    #[test]
    fn detail_table_cells_escape_pipes() {
        let mut record = make_record(1, "Military | Naval", "Esquimalt\nHarbour", &["a|b"]);
        record.contributor = "User Added".into();
        let text = format_record_detail(&record, &[], false);
        assert!(text.contains(r"| Category | Military \| Naval |"));
        assert!(text.contains("| District | Esquimalt Harbour |"));
        assert!(text.contains(r"| Tags | a\|b |"));
        let table_rows = text.lines().filter(|l| l.starts_with('|')).count();
        assert_eq!(table_rows, 11);
    }

    #[test]
    fn detail_without_related_has_no_section() {
        let record = make_record(1, "Military", "Esquimalt", &[]);
        let text = format_record_detail(&record, &[], false);
        assert!(!text.contains("## Related"));
        assert!(!text.contains("| Tags |"));
    }

    #[test]
    fn themes_list_counts_sites() {
        let themes = vec![ThematicCollection {
            id: 4,
            title: "National Historic Sites".into(),
            description: "Federally recognized".into(),
            image: None,
            items: vec![1, 2],
        }];
        let text = format_themes(&themes);
        assert!(text.contains("**National Historic Sites** `#4` (2 sites)"));
    }
}
