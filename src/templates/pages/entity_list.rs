use chrono::NaiveDate;
use maud::{html, Markup};

use crate::domain::entity::{EntityKind, BOOKING};
use crate::domain::Booking;
use crate::gateway::Row;
use crate::templates::components::{cell_text, sortable_table, status_badge};
use crate::templates::desktop_layout;

pub struct ListVm<'a> {
    pub kind: &'a EntityKind,
    pub rows: Vec<Row>,
    pub sorted_by: Option<(&'a str, bool)>,
    /// Day used for booking status badges.
    pub today: NaiveDate,
}

pub fn entity_list_page(vm: &ListVm) -> Markup {
    let kind = vm.kind;
    let base = format!("/{}", kind.route);
    let is_booking = kind.route == BOOKING.route;

    let actions = |row: &Row| -> Markup {
        let id = cell_text(row.get(kind.id_field));
        html! {
            @if is_booking {
                td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                    @match Booking::from_row(row) {
                        Ok(booking) => {
                            @let status = booking.status_on(vm.today);
                            (status_badge(status.label(), status.color()))
                        }
                        Err(_) => {}
                    }
                }
            }
            td style="padding: 8px; border-bottom: 1px solid #f3f4f6; white-space: nowrap;" {
                a href=(format!("{base}/edit?{}={}", kind.id_field, id)) style="margin-right: 8px;" { "Edit" }
                form action=(format!("{base}/delete")) method="post" style="display: inline; margin: 0;" {
                    input type="hidden" name=(kind.id_field) value=(id);
                    button type="submit" style="padding: 4px 8px; background: #ef4444; color: white; border: none; border-radius: 4px; cursor: pointer;" { "Delete" }
                }
            }
        }
    };

    let extra_headers: &[&str] = if is_booking {
        &["Status", "Actions"]
    } else {
        &["Actions"]
    };

    desktop_layout(
        kind.title,
        html! {
            main class="container" {
                div style="display: flex; justify-content: space-between; align-items: center;" {
                    h1 { (kind.title) }
                    a class="btn" href=(format!("{base}/new")) { "Add " (kind.singular) }
                }
                div class="card" {
                    (sortable_table(&base, kind.columns, &vm.rows, vm.sorted_by, &actions, extra_headers))
                }
            }
        },
    )
}
