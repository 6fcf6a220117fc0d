use crate::domain::entity::ENTITIES;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Camp Housing" }
                p class="lead" {
                    "Manage camps, buildings, rooms and who is staying in them."
                }

                @for kind in ENTITIES {
                    (card(kind.title, html! {
                        a class="btn" href=(format!("/{}", kind.route)) { "View " (kind.plural) }
                        " "
                        a href=(format!("/{}/new", kind.route)) { "Add " (kind.singular) }
                    }))
                }
            }
        },
    )
}
