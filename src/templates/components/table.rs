use std::cmp::Ordering;

use maud::{html, Markup};
use serde_json::Value;

use crate::gateway::Row;

const TH_STYLE: &str = "padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;";
const TD_STYLE: &str = "padding: 8px; border-bottom: 1px solid #f3f4f6;";

/// Plain-text rendering of a cell.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "Yes".into(),
        Some(Value::Bool(false)) => "No".into(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Stable sort on one column. Missing values come first, then numbers in
/// numeric order, then everything else by its displayed text.
pub fn sort_rows(rows: &mut [Row], column: &str, descending: bool) {
    rows.sort_by(|a, b| {
        let ord = compare(a.get(column), b.get(column));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let missing = |v: Option<&Value>| matches!(v, None | Some(Value::Null));
    match (a, b) {
        (a, b) if missing(a) || missing(b) => missing(b).cmp(&missing(a)),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or_default(), y.as_f64().unwrap_or_default());
            x.total_cmp(&y)
        }
        (Some(Value::Number(_)), _) => Ordering::Less,
        (_, Some(Value::Number(_))) => Ordering::Greater,
        _ => cell_text(a).to_lowercase().cmp(&cell_text(b).to_lowercase()),
    }
}

/// Table whose headers link back to `base` with `sort`/`dir` set. Clicking
/// the active column flips its direction.
pub fn sortable_table(
    base: &str,
    columns: &[(&str, &str)],
    rows: &[Row],
    sorted_by: Option<(&str, bool)>,
    extra: &dyn Fn(&Row) -> Markup,
    extra_headers: &[&str],
) -> Markup {
    html! {
        div style="overflow-x: auto;" {
            table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                thead {
                    tr {
                        @for (column, header) in columns {
                            @let flip = matches!(sorted_by, Some((c, false)) if c == *column);
                            th style=(TH_STYLE) {
                                a href=(format!("{base}?sort={column}&dir={}", if flip { "desc" } else { "asc" })) {
                                    (header)
                                    @match sorted_by {
                                        Some((c, false)) if c == *column => " ▲",
                                        Some((c, true)) if c == *column => " ▼",
                                        _ => "",
                                    }
                                }
                            }
                        }
                        @for header in extra_headers {
                            th style=(TH_STYLE) { (header) }
                        }
                    }
                }
                tbody {
                    @if rows.is_empty() {
                        tr {
                            td colspan=(columns.len() + extra_headers.len()) style="padding: 16px; text-align: center; color: #6b7280;" {
                                "Nothing here yet."
                            }
                        }
                    }
                    @for row in rows {
                        tr {
                            @for (column, _) in columns {
                                td style=(TD_STYLE) { (cell_text(row.get(*column))) }
                            }
                            (extra(row))
                        }
                    }
                }
            }
        }
    }
}
