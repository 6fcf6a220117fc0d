use serde_json::{Map, Value};
use tracing::info;

use crate::domain::validation::require_id;
use crate::errors::ServerError;
use crate::gateway::{PersistenceGateway, RowSet};
use crate::handlers::{call, first_or_message};

/// Discount and net salary are computed by the procedure; the handler only
/// passes the identifier through.
pub fn calculate_discount(
    gw: &dyn PersistenceGateway,
    body: &Map<String, Value>,
) -> Result<Value, ServerError> {
    let employee_id = require_id(body, "EmployeeID")?;
    let rows = call(
        gw,
        "Employee_Calculate_Discount",
        &[("EmployeeID", Value::from(employee_id))],
        "Failed to calculate employee discount",
    )?;
    info!(employee_id, "employee discount recalculated");
    Ok(first_or_message(rows, "Employee discount calculated"))
}

pub fn calculate_all_discounts(gw: &dyn PersistenceGateway) -> Result<RowSet, ServerError> {
    let rows = call(
        gw,
        "Employee_Calculate_All_Discounts",
        &[],
        "Failed to calculate employee discounts",
    )?;
    info!(employees = rows.len(), "all employee discounts recalculated");
    Ok(rows)
}
