use serde_json::{Map, Value};
use tracing::info;

use crate::domain::validation::require_id;
use crate::errors::ServerError;
use crate::gateway::PersistenceGateway;
use crate::handlers::{call, first_or_message};

/// Resizes a room. Free beds follow the capacity change on the gateway side.
pub fn update_beds(gw: &dyn PersistenceGateway, body: &Map<String, Value>) -> Result<Value, ServerError> {
    let room_id = require_id(body, "RoomID")?;
    let capacity = require_id(body, "Capacity")?;
    let rows = call(
        gw,
        "UpdateRoomBeds",
        &[
            ("RoomID", Value::from(room_id)),
            ("Capacity", Value::from(capacity)),
        ],
        "Failed to update room beds",
    )?;
    info!(room_id, capacity, "room beds updated");
    Ok(first_or_message(rows, "Room beds updated successfully"))
}
