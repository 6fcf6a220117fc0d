pub mod connection;

use serde_json::{Map, Value};
use thiserror::Error;

pub use connection::{init_db, SqliteGateway};

/// One result row, keyed by column name.
pub type Row = Map<String, Value>;

/// The sole result channel of a procedure call. May be empty.
pub type RowSet = Vec<Row>;

/// A named procedure parameter.
pub type Param<'a> = (&'a str, Value);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Database configuration is incomplete or invalid.")]
    Config,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("unknown stored procedure {0}")]
    UnknownProcedure(String),

    /// The procedure itself refused the call.
    #[error("{procedure}: {message}")]
    Procedure { procedure: String, message: String },

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Everything the application knows about persistence: call a stored
/// procedure by name with named parameters and get a row set back.
pub trait PersistenceGateway: Send + Sync {
    fn execute(&self, procedure: &str, params: &[Param<'_>]) -> Result<RowSet, GatewayError>;

    /// Release the underlying connection. The next `execute` reacquires it.
    fn shutdown(&self);
}
