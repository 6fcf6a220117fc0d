use maud::{html, Markup};

use crate::domain::entity::{EntityKind, FieldKind};
use crate::gateway::Row;
use crate::templates::components::cell_text;
use crate::templates::desktop_layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

pub struct FormVm<'a> {
    pub kind: &'a EntityKind,
    pub mode: FormMode,
    /// Current values, keyed by field name.
    pub values: Row,
    /// Selector options per reference field: (field name, [(id, label)]).
    pub options: Vec<(&'a str, Vec<(String, String)>)>,
    pub error: Option<String>,
}

const INPUT_STYLE: &str = "padding: 8px; width: 100%; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box;";

pub fn entity_form_page(vm: &FormVm) -> Markup {
    let kind = vm.kind;
    let (title, action) = match vm.mode {
        FormMode::Create => (format!("New {}", kind.singular), format!("/{}/new", kind.route)),
        FormMode::Edit => (format!("Edit {}", kind.singular), format!("/{}/edit", kind.route)),
    };

    desktop_layout(
        &title,
        html! {
            main class="container narrow" {
                h1 { (title) }

                @if let Some(err) = &vm.error {
                    div class="alert" role="alert" { (err) }
                }

                form action=(action) method="post" class="card" {
                    @if vm.mode == FormMode::Edit {
                        input type="hidden" name=(kind.id_field) value=(cell_text(vm.values.get(kind.id_field)));
                    }

                    @for field in kind.fields {
                        @let current = cell_text(vm.values.get(field.name));
                        div style="margin-bottom: 1rem;" {
                            label for=(field.name) style="display: block; font-weight: 600; margin-bottom: 4px;" { (field.label) }
                            @match field.kind {
                                FieldKind::Ref(_) => {
                                    select id=(field.name) name=(field.name) style=(INPUT_STYLE) required[vm.mode == FormMode::Create] {
                                        option value="" { "Select " (field.label) "..." }
                                        @for (id, label) in options_for(vm, field.name) {
                                            option value=(id) selected[*id == current] { (label) }
                                        }
                                    }
                                }
                                FieldKind::Date => {
                                    input type="date" id=(field.name) name=(field.name) value=(current) style=(INPUT_STYLE) required[vm.mode == FormMode::Create];
                                }
                                FieldKind::Int | FieldKind::Count => {
                                    input type="number" min=(if field.kind == FieldKind::Count { "0" } else { "1" }) step="1" id=(field.name) name=(field.name) value=(current) style=(INPUT_STYLE) required[vm.mode == FormMode::Create];
                                }
                                FieldKind::Decimal => {
                                    input type="number" min="0" step="0.01" id=(field.name) name=(field.name) value=(current) style=(INPUT_STYLE) required[vm.mode == FormMode::Create];
                                }
                                FieldKind::Text => {
                                    input type="text" id=(field.name) name=(field.name) value=(current) style=(INPUT_STYLE) required[vm.mode == FormMode::Create];
                                }
                            }
                        }
                    }

                    div style="display: flex; gap: 10px; align-items: center;" {
                        button type="submit" class="btn" {
                            @match vm.mode {
                                FormMode::Create => "Create",
                                FormMode::Edit => "Save",
                            }
                        }
                        a href=(format!("/{}", kind.route)) { "Cancel" }
                    }
                }
            }
        },
    )
}

fn options_for<'v>(vm: &'v FormVm, field: &str) -> &'v [(String, String)] {
    vm.options
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, opts)| opts.as_slice())
        .unwrap_or(&[])
}
