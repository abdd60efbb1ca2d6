pub mod config;
pub mod error;
mod handler;
pub mod http_status;
mod request;
mod response;
pub mod signal;

use log::{debug, error, info};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use threadpool::ThreadPool;

use config::ServerConfig;
use error::StartupError;

const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// The server owns its serving root, listening socket and worker pool
/// explicitly; nothing is routed through process-global state apart from the
/// signal flag.
pub struct AssetServer {
    root: PathBuf,
    listener: TcpListener,
    local_addr: SocketAddr,
    thread_pool: ThreadPool,
    stop: Arc<AtomicBool>,
}

impl AssetServer {
    pub fn new(config: &ServerConfig) -> Result<Self, StartupError> {
        let root = config
            .directory
            .canonicalize()
            .map_err(|source| StartupError::Configuration {
                path: config.directory.clone(),
                source,
            })?;
        if !root.is_dir() {
            return Err(StartupError::Configuration {
                path: config.directory.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| StartupError::Bind {
                addr: addr.clone(),
                source,
            })?;
        listener
            .set_nonblocking(true)
            .map_err(|source| StartupError::Bind { addr, source })?;

        info!("Server started on {}", local_addr);

        Ok(Self {
            root,
            listener,
            local_addr,
            thread_pool: ThreadPool::new(config.threads),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Flag that ends the accept loop; used by tests in place of a signal.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Accept connections until an interrupt (or the stop handle) is raised,
    /// then drain in-flight requests and release the socket.
    pub fn run(self) {
        info!(
            "Serving {:?} with {} worker threads",
            self.root,
            self.thread_pool.max_count()
        );

        while !self.should_stop() {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    debug!("New connection from {}", addr);
                    let root = self.root.clone();
                    self.thread_pool
                        .execute(move || handler::handle_client(stream, &root));
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }

        info!("Shutdown requested, draining {} active requests", self.thread_pool.active_count());
        self.thread_pool.join();
        drop(self.listener);
        info!("Listener on {} closed", self.local_addr);
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst) || signal::shutdown_requested()
    }
}
