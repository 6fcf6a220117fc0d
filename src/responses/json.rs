// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value)
        .map_err(|e| ServerError::Internal(format!("serialize response failed: {e}")))?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}

/// `{ error, details? }` with the status matching the error kind.
pub fn json_error_response(err: &ServerError) -> Response {
    let body = match err {
        ServerError::Operation { error, details } => json!({ "error": error, "details": details }),
        ServerError::NotFound => json!({ "error": "Not Found" }),
        ServerError::BadRequest(msg) => json!({ "error": msg }),
        ServerError::Internal(msg) => json!({ "error": "Internal Server Error", "details": msg }),
    };

    ResponseBuilder::new()
        .status(err.status())
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("{\"error\":\"Internal Server Error\"}")))
}
