use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup failures. Both terminate the process with a non-zero exit
/// code before the accept loop starts; per-request failures never surface
/// here.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot serve directory {path:?}: {source}")]
    Configuration { path: PathBuf, source: io::Error },

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },
}
