use log::{debug, error, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::net::TcpStream;
use std::path::Path;
use std::time::Duration;

use super::http_status::HttpStatus;
use super::{request, response};
use crate::files::{self, listing, mime, Resolved};

const REQUEST_BUFFER_SIZE: usize = 8192;

// An idle client must not pin a pool worker forever, and shutdown joins the
// pool, so reads and writes carry a timeout.
const IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Serve one request on an accepted connection, then close it.
pub fn handle_client(mut stream: TcpStream, root: &Path) {
    let peer_addr = match stream.peer_addr() {
        Ok(addr) => addr.to_string(),
        Err(_) => "unknown".to_string(),
    };

    debug!("Handling request from {}", peer_addr);

    // Accepted sockets can inherit the listener's non-blocking flag on some
    // platforms; this handler works in blocking mode with timeouts.
    if let Err(e) = stream
        .set_nonblocking(false)
        .and_then(|()| stream.set_read_timeout(Some(IO_TIMEOUT)))
        .and_then(|()| stream.set_write_timeout(Some(IO_TIMEOUT)))
    {
        error!("Failed to set socket timeouts for {}: {}", peer_addr, e);
        return;
    }

    let raw = match read_request(&mut stream) {
        Ok(RawRequest::Complete(raw)) => raw,
        Ok(RawRequest::Closed) => {
            debug!("Connection closed by client {}", peer_addr);
            return;
        }
        Ok(RawRequest::Overflow) => {
            warn!("Header block from {} exceeds {} bytes", peer_addr, REQUEST_BUFFER_SIZE);
            send_error(&mut stream, HttpStatus::BadRequest, false, &peer_addr);
            return;
        }
        Err(e) => {
            error!("Error reading from {}: {}", peer_addr, e);
            return;
        }
    };

    let request = match request::parse(&raw) {
        Ok(request) => request,
        Err(status) => {
            warn!("Rejected request from {}: {}", peer_addr, status.code());
            send_error(&mut stream, status, false, &peer_addr);
            return;
        }
    };

    let is_head = request.is_head();
    match files::resolve(root, &request.target) {
        Ok(Resolved::File(path)) => serve_file(&mut stream, &path, is_head, &peer_addr),
        Ok(Resolved::Directory(path)) => {
            let index = path.join("index.html");
            if index.is_file() {
                serve_file(&mut stream, &index, is_head, &peer_addr);
            } else {
                serve_listing(&mut stream, &path, &request.target, is_head, &peer_addr);
            }
        }
        Ok(Resolved::Redirect(location)) => {
            info!("Redirecting {} to {}", peer_addr, location);
            let mut writer = BufWriter::new(&mut stream);
            if let Err(e) = response::send_redirect(&mut writer, &location, is_head) {
                error!("Error sending redirect to {}: {}", peer_addr, e);
            }
        }
        Err(status) => {
            info!(
                "Request from {} for {} answered with {}",
                peer_addr,
                request.target,
                status.code()
            );
            send_error(&mut stream, status, is_head, &peer_addr);
        }
    }
}

enum RawRequest {
    Complete(Vec<u8>),
    Closed,
    Overflow,
}

/// Read until the header terminator. A header block that fills the buffer
/// without terminating is malformed (answered with 400 by the caller).
fn read_request(stream: &mut TcpStream) -> io::Result<RawRequest> {
    let mut buffer = vec![0u8; REQUEST_BUFFER_SIZE];
    let mut filled = 0;

    loop {
        if filled == buffer.len() {
            return Ok(RawRequest::Overflow);
        }
        match stream.read(&mut buffer[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(RawRequest::Closed);
                }
                buffer.truncate(filled);
                return Ok(RawRequest::Complete(buffer));
            }
            Ok(n) => {
                filled += n;
                if request::headers_complete(&buffer[..filled]) {
                    buffer.truncate(filled);
                    return Ok(RawRequest::Complete(buffer));
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn serve_file(stream: &mut TcpStream, path: &Path, is_head: bool, peer_addr: &str) {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Error opening file {:?} for {}: {}", path, peer_addr, e);
            send_error(stream, HttpStatus::InternalServerError, is_head, peer_addr);
            return;
        }
    };

    let size = match file.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            error!("Error getting metadata for {:?}: {}", path, e);
            send_error(stream, HttpStatus::InternalServerError, is_head, peer_addr);
            return;
        }
    };

    let content_type = mime::content_type_for(path);
    let mut writer = BufWriter::new(&mut *stream);
    match response::send_file(&mut writer, &mut file, size, content_type, is_head) {
        Ok(()) => info!("Served {:?} to {} ({} bytes)", path, peer_addr, size),
        Err(e) => error!("Error sending {:?} to {}: {}", path, peer_addr, e),
    }
}

fn serve_listing(
    stream: &mut TcpStream,
    path: &Path,
    target: &str,
    is_head: bool,
    peer_addr: &str,
) {
    let display_path = target
        .split(['?', '#'])
        .next()
        .map(|p| files::resolve::percent_decode(p).unwrap_or_else(|| p.to_string()))
        .unwrap_or_else(|| target.to_string());

    match listing::render(path, &display_path) {
        Ok(html) => {
            let mut writer = BufWriter::new(&mut *stream);
            match response::send_html(&mut writer, HttpStatus::Ok, &html, is_head) {
                Ok(()) => info!("Served listing of {:?} to {}", path, peer_addr),
                Err(e) => error!("Error sending listing to {}: {}", peer_addr, e),
            }
        }
        Err(e) => {
            error!("Error reading directory {:?}: {}", path, e);
            send_error(stream, HttpStatus::InternalServerError, is_head, peer_addr);
        }
    }
}

fn send_error(stream: &mut TcpStream, status: HttpStatus, is_head: bool, peer_addr: &str) {
    let mut writer = BufWriter::new(stream);
    if let Err(e) = response::send_error(&mut writer, status, is_head) {
        error!("Error sending {} response to {}: {}", status.code(), peer_addr, e);
    }
}
