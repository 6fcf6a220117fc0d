use astra::Request;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

use crate::api;
use crate::domain::booking::validate_window;
use crate::domain::dates::{self, parse_date};
use crate::domain::entity::{self, EntityKind, FieldKind, BOOKING};
use crate::domain::validation::require_id;
use crate::errors::ServerError;
use crate::gateway::{PersistenceGateway, Row};
use crate::handlers::crud;
use crate::request::{parse_query, read_form};
use crate::responses::{html_response, html_response_with_status, redirect_response, ResultResp};
use crate::templates::components::{cell_text, sort_rows};
use crate::templates::pages::{
    entity_form_page, entity_list_page, home_page, FormMode, FormVm, ListVm,
};

pub fn handle(req: Request, gw: &dyn PersistenceGateway) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    if path == "/api" || path.starts_with("/api/") {
        return Ok(api::handle(req, gw));
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => html_response(home_page()),
        ("GET", [route]) => list_page(&req, find(route)?, gw),
        ("GET", [route, "new"]) => {
            let kind = find(route)?;
            form_page(kind, FormMode::Create, Row::new(), None, gw)
        }
        ("POST", [route, "new"]) => {
            let kind = find(route)?;
            let form = read_form(req)?;
            let result = check_new_booking(kind, &form, dates::today())
                .and_then(|_| crud::create(gw, kind, &form));
            after_submit(kind, FormMode::Create, form, result.map(drop), gw)
        }
        ("GET", [route, "edit"]) => {
            let kind = find(route)?;
            let id = require_id(&parse_query(&req), kind.id_field)?;
            let values = crud::get_one(gw, kind, id)?;
            form_page(kind, FormMode::Edit, values, None, gw)
        }
        ("POST", [route, "edit"]) => {
            let kind = find(route)?;
            let form = read_form(req)?;
            let result = crud::update(gw, kind, &form);
            after_submit(kind, FormMode::Edit, form, result.map(drop), gw)
        }
        ("POST", [route, "delete"]) => {
            let kind = find(route)?;
            let id = require_id(&read_form(req)?, kind.id_field)?;
            crud::delete(gw, kind, id)?;
            redirect_response(&format!("/{}", kind.route))
        }
        _ => Err(ServerError::NotFound),
    }
}

fn find(route: &str) -> Result<&'static EntityKind, ServerError> {
    entity::find(route).ok_or(ServerError::NotFound)
}

fn list_page(req: &Request, kind: &EntityKind, gw: &dyn PersistenceGateway) -> ResultResp {
    let query = parse_query(req);
    let mut rows = crud::list(gw, kind)?;

    let sort = query
        .get("sort")
        .and_then(Value::as_str)
        .and_then(|s| kind.columns.iter().find(|(c, _)| *c == s))
        .map(|(c, _)| *c);
    let descending = query.get("dir").and_then(Value::as_str) == Some("desc");
    if let Some(column) = sort {
        sort_rows(&mut rows, column, descending);
    }

    html_response(entity_list_page(&ListVm {
        kind,
        rows,
        sorted_by: sort.map(|c| (c, descending)),
        today: dates::today(),
    }))
}

/// New bookings may not start in the past. Edits are not held to this.
fn check_new_booking(
    kind: &EntityKind,
    form: &Map<String, Value>,
    today: NaiveDate,
) -> Result<(), ServerError> {
    if kind.route != BOOKING.route {
        return Ok(());
    }
    let day = |name: &str| form.get(name).and_then(Value::as_str).and_then(parse_date);
    match (day("StartDate"), day("EndDate")) {
        (Some(start), Some(end)) => {
            validate_window(start, end, Some(today)).map_err(|m| ServerError::BadRequest(m.into()))
        }
        // Missing or malformed dates are reported by the create validation.
        _ => Ok(()),
    }
}

/// Redirects to the list on success; a rejected or failed submission
/// re-renders the form with the submitted values and the message.
fn after_submit(
    kind: &EntityKind,
    mode: FormMode,
    form: Map<String, Value>,
    result: Result<(), ServerError>,
    gw: &dyn PersistenceGateway,
) -> ResultResp {
    match result {
        Ok(()) => redirect_response(&format!("/{}", kind.route)),
        Err(err @ (ServerError::BadRequest(_) | ServerError::Operation { .. })) => {
            warn!(entity = kind.route, error = %err, "form submission failed");
            let status = err.status();
            let page = form_markup(kind, mode, form, Some(err.to_string()), gw)?;
            html_response_with_status(status, page)
        }
        Err(err) => Err(err),
    }
}

fn form_page(
    kind: &EntityKind,
    mode: FormMode,
    values: Row,
    error: Option<String>,
    gw: &dyn PersistenceGateway,
) -> ResultResp {
    html_response(form_markup(kind, mode, values, error, gw)?)
}

fn form_markup(
    kind: &EntityKind,
    mode: FormMode,
    mut values: Row,
    error: Option<String>,
    gw: &dyn PersistenceGateway,
) -> Result<maud::Markup, ServerError> {
    let mut options = Vec::new();
    for field in kind.fields {
        match field.kind {
            FieldKind::Ref(target) => {
                options.push((field.name, selector_options(find(target)?, gw)?));
            }
            FieldKind::Date => {
                // Date inputs only accept YYYY-MM-DD.
                if let Some(day) = values
                    .get(field.name)
                    .and_then(Value::as_str)
                    .and_then(dates::normalize_date)
                {
                    values.insert(field.name.to_string(), Value::String(day));
                }
            }
            _ => {}
        }
    }

    Ok(entity_form_page(&FormVm {
        kind,
        mode,
        values,
        options,
        error,
    }))
}

/// (id, label) pairs for a reference selector.
fn selector_options(
    kind: &EntityKind,
    gw: &dyn PersistenceGateway,
) -> Result<Vec<(String, String)>, ServerError> {
    Ok(crud::list(gw, kind)?
        .iter()
        .map(|row| {
            let label = kind
                .label_fields
                .iter()
                .map(|f| cell_text(row.get(*f)))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (cell_text(row.get(kind.id_field)), label)
        })
        .collect())
}
