use maud::{html, Markup};

pub mod error;
pub mod table;

pub use error::html_error_response;
pub use table::{cell_text, sort_rows, sortable_table};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn status_badge(label: &str, color: &str) -> Markup {
    html! {
        span style=(format!("background: {color}; color: white; padding: 2px 8px; border-radius: 9999px; font-size: 0.85em;")) {
            (label)
        }
    }
}
