// src/api.rs
use astra::{Request, Response};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::domain::dates;
use crate::domain::entity::{self, EntityKind};
use crate::domain::validation::require_id;
use crate::errors::{ResultResp, ServerError};
use crate::gateway::PersistenceGateway;
use crate::handlers::{booking, crud, employee, room};
use crate::request::{parse_query, read_json};
use crate::responses::{json_error_response, json_response};

/// JSON API. Every failure is answered here as `{ error, details? }`.
pub fn handle(req: Request, gw: &dyn PersistenceGateway) -> Response {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match dispatch(req, &method, &path, gw) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                error!(%method, %path, error = %err, "api request failed");
            } else {
                warn!(%method, %path, error = %err, "api request rejected");
            }
            json_error_response(&err)
        }
    }
}

fn dispatch(req: Request, method: &str, path: &str, gw: &dyn PersistenceGateway) -> ResultResp {
    let segments: Vec<&str> = path
        .trim_start_matches("/api")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let query = parse_query(&req);

    match (method, segments.as_slice()) {
        ("GET", ["booking", "active"]) => ok(&booking::active(gw)?),
        ("GET", ["booking", "by-employee"]) => ok(&booking::by_employee(gw, &query)?),
        ("GET", ["booking", "by-room"]) => ok(&booking::by_room(gw, &query)?),
        ("GET", ["booking", "available-rooms"]) => ok(&booking::available_rooms(gw, &query)?),
        ("GET", ["booking", "statuses"]) => {
            let today = booking::today_from(&query)?.unwrap_or_else(dates::today);
            ok(&booking::with_statuses(gw, today)?)
        }
        ("POST", ["booking", "cancel"]) => ok(&booking::cancel(gw, &read_json(req)?)?),
        ("POST", ["booking", "extend"]) => ok(&booking::extend(gw, &read_json(req)?)?),
        ("POST", ["booking", "kick"]) => ok(&booking::kick(gw, &read_json(req)?)?),
        ("PUT", ["booking", "status"]) => ok(&booking::update_status(gw, &read_json(req)?)?),
        ("POST", ["employee", "discount"]) => {
            ok(&employee::calculate_discount(gw, &read_json(req)?)?)
        }
        ("POST", ["employee", "discounts"]) => ok(&employee::calculate_all_discounts(gw)?),
        ("PUT", ["room", "beds"]) => ok(&room::update_beds(gw, &read_json(req)?)?),
        (_, [route]) => {
            let kind = entity::find(route).ok_or(ServerError::NotFound)?;
            entity_route(req, method, kind, &query, gw)
        }
        _ => Err(ServerError::NotFound),
    }
}

/// GET/POST/PUT/DELETE on `/api/<entity>`.
fn entity_route(
    req: Request,
    method: &str,
    kind: &EntityKind,
    query: &Map<String, Value>,
    gw: &dyn PersistenceGateway,
) -> ResultResp {
    match method {
        "GET" if query.contains_key(kind.id_field) => {
            let id = require_id(query, kind.id_field)?;
            ok(&crud::get_one(gw, kind, id)?)
        }
        "GET" => ok(&crud::list(gw, kind)?),
        "POST" => ok(&crud::create(gw, kind, &read_json(req)?)?),
        "PUT" => ok(&crud::update(gw, kind, &read_json(req)?)?),
        "DELETE" => {
            let id = require_id(query, kind.id_field)?;
            ok(&crud::delete(gw, kind, id)?)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn ok<T: serde::Serialize>(value: &T) -> ResultResp {
    json_response(200, value)
}
