// src/request.rs
use astra::Request;
use serde_json::{Map, Value};
use std::io::Read;
use url::form_urlencoded;

use crate::errors::ServerError;

/// Query string as a JSON object of strings, so it can go through the same
/// validation as a request body.
pub fn parse_query(req: &Request) -> Map<String, Value> {
    req.uri()
        .query()
        .map(|q| pairs(q.as_bytes()))
        .unwrap_or_default()
}

pub fn read_json(req: Request) -> Result<Map<String, Value>, ServerError> {
    let bytes = read_body(req)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ServerError::BadRequest(
            "Request body must be a JSON object".into(),
        )),
        Err(e) => Err(ServerError::BadRequest(format!("Invalid JSON body: {e}"))),
    }
}

/// `application/x-www-form-urlencoded` body.
pub fn read_form(req: Request) -> Result<Map<String, Value>, ServerError> {
    let bytes = read_body(req)?;
    Ok(pairs(&bytes))
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;
    Ok(buf)
}

fn pairs(raw: &[u8]) -> Map<String, Value> {
    form_urlencoded::parse(raw)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}
