use crate::gateway::{init_db, GatewayError, Param, PersistenceGateway, RowSet, SqliteGateway};
use astra::{Body, Request, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Mutex;

/// Fresh in-memory database with the production schema and procedures.
pub fn sqlite_gateway() -> SqliteGateway {
    let gw = SqliteGateway::new(":memory:");
    init_db(&gw, "sql/schema.sql", "sql/procedures.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    gw
}

/// Gateway double: records every call and answers from canned replies.
/// Procedures without a reply return an empty row set.
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<(String, Vec<(String, Value)>)>>,
    replies: Mutex<HashMap<String, Result<RowSet, String>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, procedure: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(row) => row,
                other => panic!("reply rows must be objects, got {other}"),
            })
            .collect();
        self.replies
            .lock()
            .unwrap()
            .insert(procedure.to_string(), Ok(rows));
        self
    }

    pub fn fail(self, procedure: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(procedure.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, Value)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn procedures(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

impl PersistenceGateway for RecordingGateway {
    fn execute(&self, procedure: &str, params: &[Param<'_>]) -> Result<RowSet, GatewayError> {
        self.calls.lock().unwrap().push((
            procedure.to_string(),
            params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        match self.replies.lock().unwrap().get(procedure) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => Err(GatewayError::Procedure {
                procedure: procedure.to_string(),
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn shutdown(&self) {}
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn read_body(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .expect("Failed to read body");
    body
}

pub fn read_json(resp: Response) -> Value {
    serde_json::from_str(&read_body(resp)).expect("Response is not JSON")
}
