mod files;
mod logger;
mod server;
#[cfg(test)]
mod testutil;

use clap::Parser;
use log::{error, info};
use server::AssetServer;
use server::config::ServerConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    logger::init();

    let config = ServerConfig::parse();
    server::signal::install();

    let server = match AssetServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Serving {:?} on port {}",
        server.root(),
        server.local_addr().port()
    );
    server.run();

    ExitCode::SUCCESS
}
