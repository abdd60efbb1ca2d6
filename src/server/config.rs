use clap::Parser;
use std::path::PathBuf;

/// Serve a directory of offline assets (packages, images) over HTTP so other
/// cluster nodes can fetch them without manual copying.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Root directory containing the assets to serve
    #[arg(short, long, default_value = "/opt/offline")]
    pub directory: PathBuf,

    /// Port to listen on (0 picks an ephemeral port)
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Number of worker threads handling requests
    #[arg(short, long, default_value_t = 8)]
    pub threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/opt/offline"),
            port: 8080,
            host: "0.0.0.0".to_string(),
            threads: 8,
        }
    }
}
