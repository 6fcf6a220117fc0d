// src/handlers/booking.rs
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::info;

use crate::domain::dates::parse_date;
use crate::domain::entity::BOOKING;
use crate::domain::validation::{optional_bool, require_bool, require_date, require_id};
use crate::domain::Booking;
use crate::errors::ServerError;
use crate::gateway::{PersistenceGateway, RowSet};
use crate::handlers::{call, crud, first_or_message};

pub fn active(gw: &dyn PersistenceGateway) -> Result<RowSet, ServerError> {
    call(gw, "Booking_ReadActive", &[], "Failed to fetch active bookings")
}

pub fn by_employee(gw: &dyn PersistenceGateway, query: &Map<String, Value>) -> Result<RowSet, ServerError> {
    let employee_id = require_id(query, "EmployeeID")?;
    let include_past = optional_bool(query, "includePastBookings")?.unwrap_or(true);
    call(
        gw,
        "Booking_Read_ByEmployee",
        &[
            ("EmployeeID", Value::from(employee_id)),
            ("includePastBookings", Value::Bool(include_past)),
        ],
        "Failed to fetch bookings",
    )
}

pub fn by_room(gw: &dyn PersistenceGateway, query: &Map<String, Value>) -> Result<RowSet, ServerError> {
    let room_id = require_id(query, "RoomID")?;
    let start = require_date(query, "searchStartDate")?;
    let end = require_date(query, "searchEndDate")?;
    call(
        gw,
        "Booking_Read_ByRoomAndPeriod",
        &[
            ("RoomID", Value::from(room_id)),
            ("searchStartDate", Value::String(start)),
            ("searchEndDate", Value::String(end)),
        ],
        "Failed to fetch bookings",
    )
}

pub fn available_rooms(
    gw: &dyn PersistenceGateway,
    query: &Map<String, Value>,
) -> Result<RowSet, ServerError> {
    let start = require_date(query, "proposedStartDate")?;
    let end = require_date(query, "proposedEndDate")?;
    if end <= start {
        return Err(ServerError::BadRequest(
            "proposedEndDate must be after proposedStartDate".into(),
        ));
    }
    call(
        gw,
        "Booking_Read_AvailableRooms",
        &[
            ("proposedStartDate", Value::String(start)),
            ("proposedEndDate", Value::String(end)),
        ],
        "Failed to fetch available rooms",
    )
}

pub fn cancel(gw: &dyn PersistenceGateway, body: &Map<String, Value>) -> Result<Value, ServerError> {
    let booking_id = require_id(body, "BookingID")?;
    let rows = call(
        gw,
        "Booking_Cancel",
        &[("BookingID", Value::from(booking_id))],
        "Failed to cancel booking",
    )?;
    info!(booking_id, "booking cancelled");
    Ok(first_or_message(rows, "Booking cancelled successfully"))
}

pub fn extend(gw: &dyn PersistenceGateway, body: &Map<String, Value>) -> Result<Value, ServerError> {
    let booking_id = require_id(body, "BookingID")?;
    let new_end = require_date(body, "newEndDate")?;
    let rows = call(
        gw,
        "Booking_Extend",
        &[
            ("BookingID", Value::from(booking_id)),
            ("newEndDate", Value::String(new_end)),
        ],
        "Failed to extend booking",
    )?;
    info!(booking_id, "booking extended");
    Ok(first_or_message(rows, "Booking extended successfully"))
}

pub fn kick(gw: &dyn PersistenceGateway, body: &Map<String, Value>) -> Result<Value, ServerError> {
    let employee_id = require_id(body, "EmployeeID")?;
    let room_id = require_id(body, "RoomID")?;
    let rows = call(
        gw,
        "Booking_Kick_Employee_From_Room",
        &[
            ("EmployeeID", Value::from(employee_id)),
            ("RoomID", Value::from(room_id)),
        ],
        "Failed to remove employee from room",
    )?;
    info!(employee_id, room_id, "employee removed from room");
    Ok(first_or_message(rows, "Employee removed from room"))
}

/// Writes the stored Active/Finished flags. This is the only path that
/// changes them; the derived status never does.
pub fn update_status(gw: &dyn PersistenceGateway, body: &Map<String, Value>) -> Result<Value, ServerError> {
    let booking_id = require_id(body, "BookingID")?;
    let active = require_bool(body, "Active")?;
    let finished = require_bool(body, "Finished")?;
    let rows = call(
        gw,
        "UpdateBookingStatus",
        &[
            ("BookingID", Value::from(booking_id)),
            ("Active", Value::Bool(active)),
            ("Finished", Value::Bool(finished)),
        ],
        "Failed to update booking status",
    )?;
    info!(booking_id, active, finished, "booking status updated");
    Ok(first_or_message(rows, "Booking status updated successfully"))
}

/// All bookings with their derived `Status` attached. Rows that do not
/// describe a complete booking get a null status.
pub fn with_statuses(gw: &dyn PersistenceGateway, today: NaiveDate) -> Result<RowSet, ServerError> {
    let mut rows = crud::list(gw, &BOOKING)?;
    for row in &mut rows {
        let status = Booking::from_row(row)
            .map(|b| Value::String(b.status_on(today).label().to_string()))
            .unwrap_or(Value::Null);
        row.insert("Status".to_string(), status);
    }
    Ok(rows)
}

/// `today` override for status views, e.g. `?today=2024-01-15`.
pub fn today_from(query: &Map<String, Value>) -> Result<Option<NaiveDate>, ServerError> {
    match query.get("today").and_then(Value::as_str) {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest("Invalid date for today".into())),
    }
}
