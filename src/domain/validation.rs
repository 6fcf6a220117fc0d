// src/domain/validation.rs

use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::domain::dates::{normalize_date, parse_date};
use crate::domain::entity::{EntityKind, FieldKind};
use crate::errors::ServerError;
use crate::gateway::{Param, Row};

/// Parameters bound for the gateway, plus what to answer with when the
/// gateway returns no row.
#[derive(Debug)]
pub struct Payload {
    pub params: Vec<Param<'static>>,
    pub echo: Row,
}

/// Coerces one field. `Ok(None)` means blank: absent, null, empty, or zero
/// where zero is not a meaningful value.
pub fn coerce(name: &str, kind: FieldKind, value: Option<&Value>) -> Result<Option<Value>, String> {
    let invalid = || format!("Invalid value for {name}");

    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(v) => v,
    };

    match kind {
        FieldKind::Ref(_) | FieldKind::Int | FieldKind::Count => {
            let n = integer(value).ok_or_else(invalid)?;
            match n {
                n if n < 0 => Err(invalid()),
                0 if kind != FieldKind::Count => Ok(None),
                n => Ok(Some(Value::from(n))),
            }
        }
        FieldKind::Decimal => {
            let n = decimal(value).ok_or_else(invalid)?;
            if n < 0.0 {
                Err(invalid())
            } else if n == 0.0 {
                Ok(None)
            } else {
                Number::from_f64(n).map(|n| Some(Value::Number(n))).ok_or_else(invalid)
            }
        }
        FieldKind::Text => match value {
            Value::String(s) => Ok(Some(Value::String(s.trim().to_string()))),
            Value::Number(n) => Ok(Some(Value::String(n.to_string()))),
            _ => Err(invalid()),
        },
        FieldKind::Date => match value {
            Value::String(s) => normalize_date(s)
                .map(|d| (!d.is_empty()).then_some(Value::String(d)))
                .ok_or_else(|| format!("Invalid date for {name}")),
            _ => Err(format!("Invalid date for {name}")),
        },
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// A required positive identifier or integer.
pub fn require_id(body: &Map<String, Value>, name: &str) -> Result<i64, ServerError> {
    match coerce(name, FieldKind::Int, body.get(name)).map_err(ServerError::BadRequest)? {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ServerError::BadRequest(format!("Invalid value for {name}"))),
        _ => Err(ServerError::BadRequest(format!("{name} is required"))),
    }
}

/// A required calendar day, returned normalized.
pub fn require_date(body: &Map<String, Value>, name: &str) -> Result<String, ServerError> {
    match coerce(name, FieldKind::Date, body.get(name)).map_err(ServerError::BadRequest)? {
        Some(Value::String(day)) => Ok(day),
        _ => Err(ServerError::BadRequest(format!("{name} is required"))),
    }
}

/// A required boolean. Accepts JSON booleans, 0/1 and "true"/"false".
pub fn require_bool(body: &Map<String, Value>, name: &str) -> Result<bool, ServerError> {
    optional_bool(body, name)?.ok_or_else(|| ServerError::BadRequest(format!("{name} is required")))
}

pub fn optional_bool(body: &Map<String, Value>, name: &str) -> Result<Option<bool>, ServerError> {
    let invalid = || ServerError::BadRequest(format!("Invalid value for {name}"));
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) => match s.trim() {
            "" => Ok(None),
            "true" | "1" | "on" => Ok(Some(true)),
            "false" | "0" | "off" => Ok(Some(false)),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Validates a create payload: every field is required, dates are
/// normalized, and entity-level invariants that need no lookup are checked.
pub fn for_create(kind: &EntityKind, body: &Map<String, Value>) -> Result<Payload, ServerError> {
    let mut missing = Vec::new();
    let mut params = Vec::with_capacity(kind.fields.len());
    let mut echo = Row::new();

    for field in kind.fields {
        match coerce(field.name, field.kind, body.get(field.name)).map_err(ServerError::BadRequest)? {
            Some(value) => {
                echo.insert(field.name.to_string(), value.clone());
                params.push((field.name, value));
            }
            None => missing.push(field.name),
        }
    }

    if !missing.is_empty() {
        let msg = format!("Missing required fields: {}", missing.join(", "));
        warn!(entity = kind.route, %msg, "rejected create");
        return Err(ServerError::BadRequest(msg));
    }

    check_invariants(kind, &echo)?;

    for (name, value) in kind.create_defaults {
        echo.insert(name.to_string(), Value::Bool(*value));
    }

    Ok(Payload { params, echo })
}

/// Validates an update payload: only the identifier is required. Absent
/// fields are sent as NULL, absent dates as an empty string.
pub fn for_update(kind: &EntityKind, body: &Map<String, Value>) -> Result<Payload, ServerError> {
    let id = require_id(body, kind.id_field).map_err(|e| {
        warn!(entity = kind.route, error = %e, "rejected update");
        e
    })?;

    let mut params = Vec::with_capacity(kind.fields.len() + 1);
    let mut echo = Row::new();
    params.push((kind.id_field, Value::from(id)));
    echo.insert(kind.id_field.to_string(), Value::from(id));

    for field in kind.fields {
        let value = coerce(field.name, field.kind, body.get(field.name)).map_err(ServerError::BadRequest)?;
        echo.insert(field.name.to_string(), value.clone().unwrap_or(Value::Null));
        let bound = match (value, field.kind) {
            (Some(v), _) => v,
            (None, FieldKind::Date) => Value::String(String::new()),
            (None, _) => Value::Null,
        };
        params.push((field.name, bound));
    }

    Ok(Payload { params, echo })
}

fn check_invariants(kind: &EntityKind, values: &Row) -> Result<(), ServerError> {
    let int = |name: &str| values.get(name).and_then(Value::as_i64);
    let day = |name: &str| values.get(name).and_then(Value::as_str).and_then(parse_date);

    if let (Some(start), Some(end)) = (day("StartDate"), day("EndDate")) {
        if end <= start {
            return Err(ServerError::BadRequest(
                "End date must be after start date".into(),
            ));
        }
    }
    if let (Some(free), Some(capacity)) = (int("FreeBeds"), int("Capacity")) {
        if free > capacity {
            return Err(ServerError::BadRequest(format!(
                "FreeBeds must be between 0 and Capacity for a {}",
                kind.singular
            )));
        }
    }
    Ok(())
}
