use crate::config::Config;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scraper;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.bind_addr,
        registry = %config.registry_url,
        "Starting server"
    );

    let server = Server::bind(config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &config) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
