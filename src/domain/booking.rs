// src/domain/booking.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gateway::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    Upcoming,
    Ongoing,
    Overdue,
    Finished,
    Inactive,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "Upcoming",
            BookingStatus::Ongoing => "Ongoing",
            BookingStatus::Overdue => "Overdue",
            BookingStatus::Finished => "Finished",
            BookingStatus::Inactive => "Inactive",
        }
    }

    /// Badge colour used by the booking table.
    pub fn color(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "#2563eb",
            BookingStatus::Ongoing => "#059669",
            BookingStatus::Overdue => "#dc2626",
            BookingStatus::Finished => "#6b7280",
            BookingStatus::Inactive => "#9ca3af",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derives the display status of a booking. The order of checks is the
/// precedence: a finished booking is always `Finished`, and the booking
/// window `[start, end]` is inclusive on both ends.
///
/// Nothing is written back. A booking still flagged active after its window
/// has lapsed is reported `Overdue`; moving it to finished is done by the
/// status-update procedure.
pub fn derive_status(
    active: bool,
    finished: bool,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> BookingStatus {
    if finished {
        return BookingStatus::Finished;
    }
    if !active {
        return BookingStatus::Inactive;
    }
    if today < start {
        BookingStatus::Upcoming
    } else if today > end {
        BookingStatus::Overdue
    } else {
        BookingStatus::Ongoing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "BookingID")]
    pub booking_id: i64,
    #[serde(rename = "RoomID")]
    pub room_id: i64,
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "Active", default)]
    pub active: bool,
    #[serde(rename = "Finished", default)]
    pub finished: bool,
}

impl Booking {
    pub fn from_row(row: &Row) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(row.clone()))
    }

    pub fn status_on(&self, today: NaiveDate) -> BookingStatus {
        derive_status(
            self.active,
            self.finished,
            self.start_date,
            self.end_date,
            today,
        )
    }
}

/// Checks a proposed booking window. `not_before` additionally rejects a
/// start date earlier than the given day.
pub fn validate_window(
    start: NaiveDate,
    end: NaiveDate,
    not_before: Option<NaiveDate>,
) -> Result<(), &'static str> {
    if let Some(today) = not_before {
        if start < today {
            return Err("Start date cannot be in the past");
        }
    }
    if end <= start {
        return Err("End date must be after start date");
    }
    Ok(())
}
