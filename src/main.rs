//! # File Server - Entry Point
//! src/main.rs
//!
//! Instala el logging, lee la configuración y corre el accept loop para
//! siempre.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use file_server::config::Config;
use file_server::server::Server;

fn main() {
    // Antes de parsear la configuración para ver sus warnings
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::parse();
    let port = config.port;

    tracing::info!("....Starting application on {}....", config.host_label());

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(error) => {
            tracing::error!(
                port,
                %error,
                "Failed to initialize server, check if this port is used by another application"
            );
            std::process::exit(1);
        }
    };

    if let Err(error) = server.run() {
        tracing::error!(%error, "Fatal error");
        std::process::exit(1);
    }
}
