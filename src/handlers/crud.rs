// src/handlers/crud.rs
use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::validation::{for_create, for_update};
use crate::domain::EntityKind;
use crate::errors::ServerError;
use crate::gateway::{PersistenceGateway, Row, RowSet};
use crate::handlers::call;

pub fn list(gw: &dyn PersistenceGateway, kind: &EntityKind) -> Result<RowSet, ServerError> {
    call(
        gw,
        kind.procedures.list,
        &[],
        &format!("Failed to fetch {}", kind.plural),
    )
}

pub fn get_one(gw: &dyn PersistenceGateway, kind: &EntityKind, id: i64) -> Result<Row, ServerError> {
    call(
        gw,
        kind.procedures.by_id,
        &[(kind.id_field, Value::from(id))],
        &format!("Failed to fetch {}", kind.singular),
    )?
    .into_iter()
    .next()
    .ok_or(ServerError::NotFound)
}

/// Returns the gateway's row, or the submitted payload merged with the
/// entity's defaults when the procedure returns none.
pub fn create(
    gw: &dyn PersistenceGateway,
    kind: &EntityKind,
    body: &Map<String, Value>,
) -> Result<Value, ServerError> {
    let payload = for_create(kind, body)?;
    let rows = call(
        gw,
        kind.procedures.create,
        &payload.params,
        &format!("Failed to create {}", kind.singular),
    )?;
    info!(entity = kind.route, "created");
    Ok(Value::Object(rows.into_iter().next().unwrap_or(payload.echo)))
}

pub fn update(
    gw: &dyn PersistenceGateway,
    kind: &EntityKind,
    body: &Map<String, Value>,
) -> Result<Value, ServerError> {
    let payload = for_update(kind, body)?;
    let rows = call(
        gw,
        kind.procedures.update,
        &payload.params,
        &format!("Failed to update {}", kind.singular),
    )?;
    info!(entity = kind.route, "updated");
    Ok(Value::Object(rows.into_iter().next().unwrap_or(payload.echo)))
}

pub fn delete(gw: &dyn PersistenceGateway, kind: &EntityKind, id: i64) -> Result<Value, ServerError> {
    call(
        gw,
        kind.procedures.delete,
        &[(kind.id_field, Value::from(id))],
        &format!("Failed to delete {}", kind.singular),
    )?;
    info!(entity = kind.route, id, "deleted");
    Ok(json!({ "message": format!("{} deleted successfully", kind.name) }))
}
