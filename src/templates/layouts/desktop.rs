use crate::domain::entity::ENTITIES;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Camp Housing" }
                style { (maud::PreEscaped(BASE_CSS)) }
            }
            body {
                header {
                    a href="/" class="brand" { "Camp Housing" }
                    nav {
                        ul {
                            @for kind in ENTITIES {
                                li { a href=(format!("/{}", kind.route)) { (kind.title) } }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}

const BASE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #111827; background: #f9fafb; }
header { display: flex; align-items: center; justify-content: space-between; padding: 12px 24px; background: #1f2937; }
header a { color: #f9fafb; text-decoration: none; }
.brand { font-weight: 700; font-size: 1.1rem; }
nav ul { display: flex; gap: 16px; list-style: none; margin: 0; padding: 0; }
.container { max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
.card { background: white; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; }
.btn { padding: 6px 12px; background: #3b82f6; color: white; border: none; border-radius: 4px; cursor: pointer; text-decoration: none; }
.alert { background: #fee2e2; color: #991b1b; padding: 8px 12px; border-radius: 4px; margin-bottom: 1rem; }
"#;
