use crate::config::Config;
use crate::gateway::{init_db, PersistenceGateway, SqliteGateway};
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod domain;
mod errors;
mod gateway;
mod handlers;
mod request;
mod responses;
mod router;
mod templates;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration failed");
            std::process::exit(1);
        }
    };

    // Connection is opened lazily on the first procedure call.
    let gateway = Arc::new(SqliteGateway::new(&config.database.path));

    if let Err(e) = init_db(
        &gateway,
        &config.database.schema_path,
        &config.database.procedures_path,
    ) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let addr: SocketAddr = match config.server.bind_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(address = %config.server.bind_address, error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };
    info!(%addr, workers = config.server.max_workers, "starting server");

    let server = Server::bind(&addr).max_workers(config.server.max_workers);

    let gw = Arc::clone(&gateway);
    let result = server.serve(move |req, _info| match handle(req, gw.as_ref()) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    gateway.shutdown();
    info!("server shut down cleanly");
}
