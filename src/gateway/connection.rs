use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, Connection, Statement};
use serde_json::{Number, Value};
use std::fs;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, warn};

use super::{GatewayError, Param, PersistenceGateway, Row, RowSet};

/// SQLite-backed gateway. Stored procedures are rows of the `Procedures`
/// table; each one is a list of steps run in a single transaction.
pub struct SqliteGateway {
    path: String,
    conn: Mutex<Option<Connection>>,
}

struct Step {
    kind: String,
    body: String,
    message: Option<String>,
}

impl SqliteGateway {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            conn: Mutex::new(None),
        }
    }

    /// Opens the connection on first use and hands it to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, GatewayError>
    where
        F: FnOnce(&mut Connection) -> Result<T, GatewayError>,
    {
        let mut slot = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(self.open()?);
        }
        let conn = slot
            .as_mut()
            .ok_or_else(|| GatewayError::Connection("connection unavailable".into()))?;
        f(conn)
    }

    fn open(&self) -> Result<Connection, GatewayError> {
        if self.path.trim().is_empty() {
            return Err(GatewayError::Config);
        }
        let conn = Connection::open(&self.path)
            .map_err(|e| GatewayError::Connection(format!("open {} failed: {e}", self.path)))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        info!(path = %self.path, "database connection opened");
        Ok(conn)
    }
}

impl PersistenceGateway for SqliteGateway {
    fn execute(&self, procedure: &str, params: &[Param<'_>]) -> Result<RowSet, GatewayError> {
        debug!(procedure, params = params.len(), "executing stored procedure");
        self.with_conn(|conn| run_procedure(conn, procedure, params))
            .map_err(|e| {
                error!(procedure, error = %e, "error executing stored procedure");
                e
            })
    }

    fn shutdown(&self) {
        let mut slot = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(conn) = slot.take() {
            match conn.close() {
                Ok(()) => info!(path = %self.path, "database connection closed"),
                Err((_, e)) => warn!(error = %e, "database connection did not close cleanly"),
            }
        }
    }
}

/// Apply the schema and (re)install the stored procedures.
pub fn init_db(
    gateway: &SqliteGateway,
    schema_path: &str,
    procedures_path: &str,
) -> Result<(), GatewayError> {
    let schema_sql = read_script(schema_path)?;
    let procedures_sql = read_script(procedures_path)?;

    gateway.with_conn(|conn| {
        conn.execute_batch(&schema_sql)?;
        conn.execute_batch(&procedures_sql)?;
        Ok(())
    })?;

    info!(schema_path, procedures_path, "database initialized");
    Ok(())
}

fn read_script(path: &str) -> Result<String, GatewayError> {
    fs::read_to_string(path)
        .map_err(|e| GatewayError::Connection(format!("failed to read {path}: {e}")))
}

fn load_steps(conn: &Connection, procedure: &str) -> Result<Vec<Step>, GatewayError> {
    let mut stmt =
        conn.prepare("select Kind, Body, Message from Procedures where Name = ?1 order by Step")?;
    let steps = stmt
        .query_map(params![procedure], |row| {
            Ok(Step {
                kind: row.get(0)?,
                body: row.get(1)?,
                message: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(steps)
}

fn run_procedure(
    conn: &mut Connection,
    procedure: &str,
    params: &[Param<'_>],
) -> Result<RowSet, GatewayError> {
    let steps = load_steps(conn, procedure)?;
    if steps.is_empty() {
        return Err(GatewayError::UnknownProcedure(procedure.to_string()));
    }

    // Dropping the transaction on an early return rolls every step back.
    let tx = conn.transaction()?;
    let mut result = RowSet::new();

    for step in &steps {
        if step.kind == "guard" {
            if !guard_holds(&tx, &step.body, params)? {
                return Err(GatewayError::Procedure {
                    procedure: procedure.to_string(),
                    message: step
                        .message
                        .clone()
                        .unwrap_or_else(|| "procedure rejected the call".to_string()),
                });
            }
        } else if let Some(rows) = run_step(&tx, &step.body, params)? {
            result = rows;
        }
    }

    tx.commit()?;
    Ok(result)
}

fn guard_holds(conn: &Connection, sql: &str, params: &[Param<'_>]) -> Result<bool, GatewayError> {
    let rows = run_step(conn, sql, params)?.unwrap_or_default();
    let verdict = rows
        .first()
        .and_then(|row| row.values().next())
        .map(|value| match value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
            _ => true,
        })
        .unwrap_or(false);
    Ok(verdict)
}

/// Runs one statement. Returns `None` for statements that produce no columns.
fn run_step(
    conn: &Connection,
    sql: &str,
    params: &[Param<'_>],
) -> Result<Option<RowSet>, GatewayError> {
    let mut stmt = conn.prepare(sql)?;
    bind_named(&mut stmt, params)?;

    if stmt.column_count() == 0 {
        stmt.raw_execute()?;
        return Ok(None);
    }

    let columns: Vec<(String, bool)> = stmt
        .columns()
        .iter()
        .map(|c| {
            let is_bool = c
                .decl_type()
                .is_some_and(|t| t.eq_ignore_ascii_case("BOOLEAN"));
            (c.name().to_string(), is_bool)
        })
        .collect();

    let mut rows = stmt.raw_query();
    let mut out = RowSet::new();
    while let Some(row) = rows.next()? {
        let mut record = Row::new();
        for (idx, (name, is_bool)) in columns.iter().enumerate() {
            record.insert(name.clone(), to_json(row.get_ref(idx)?, *is_bool));
        }
        out.push(record);
    }
    Ok(Some(out))
}

/// Binds every `:Name` the statement references. Names the caller did not
/// pass are bound as NULL.
fn bind_named(stmt: &mut Statement<'_>, params: &[Param<'_>]) -> Result<(), GatewayError> {
    for idx in 1..=stmt.parameter_count() {
        let value = stmt
            .parameter_name(idx)
            .map(|name| name.trim_start_matches(|c| matches!(c, ':' | '@' | '$')))
            .and_then(|key| params.iter().find(|(n, _)| *n == key))
            .map(|(_, v)| to_sql(v))
            .unwrap_or(SqlValue::Null);
        stmt.raw_bind_parameter(idx, value)?;
    }
    Ok(())
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn to_json(value: ValueRef<'_>, is_bool: bool) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) if is_bool => Value::Bool(i != 0),
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::from(b.to_vec()),
    }
}
