//! Request handlers. Each one turns validated input into exactly one stored
//! procedure call; none of them hold state between requests.

pub mod booking;
pub mod crud;
pub mod employee;
pub mod room;

use serde_json::{json, Value};

use crate::errors::ServerError;
use crate::gateway::{Param, PersistenceGateway, RowSet};

/// Runs a procedure, turning any gateway failure into an operation error
/// carrying `failure` as its stable message.
pub fn call(
    gw: &dyn PersistenceGateway,
    procedure: &str,
    params: &[Param<'_>],
    failure: &str,
) -> Result<RowSet, ServerError> {
    gw.execute(procedure, params)
        .map_err(|e| ServerError::operation(failure, e))
}

/// First returned row, or a confirmation message when the procedure
/// returned nothing.
pub fn first_or_message(rows: RowSet, message: &str) -> Value {
    rows.into_iter()
        .next()
        .map(Value::Object)
        .unwrap_or_else(|| json!({ "message": message }))
}
