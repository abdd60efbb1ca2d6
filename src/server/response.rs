use chrono::Utc;
use std::io::{self, Read, Write};

use super::http_status::HttpStatus;

const SERVER_NAME: &str = concat!("asset-server/", env!("CARGO_PKG_VERSION"));
const FILE_CHUNK_SIZE: usize = 8192;

fn write_headers<W: Write>(
    writer: &mut W,
    status: HttpStatus,
    content_type: &str,
    content_length: u64,
    extra: &[(&str, &str)],
) -> io::Result<()> {
    write!(writer, "{}", status.as_response_line())?;
    write!(writer, "Server: {}\r\n", SERVER_NAME)?;
    write!(
        writer,
        "Date: {}\r\n",
        Utc::now().format("%a, %d %b %Y %H:%M:%S GMT")
    )?;
    write!(writer, "Content-Type: {}\r\n", content_type)?;
    write!(writer, "Content-Length: {}\r\n", content_length)?;
    for (name, value) in extra {
        write!(writer, "{}: {}\r\n", name, value)?;
    }
    write!(writer, "Connection: close\r\n\r\n")?;
    Ok(())
}

/// Send headers for a file response, then stream up to `size` bytes from
/// `reader`. The transfer is bounded by the size captured at open time, so a
/// file growing mid-response cannot hold the connection open.
pub fn send_file<W: Write, R: Read>(
    writer: &mut W,
    reader: &mut R,
    size: u64,
    content_type: &str,
    is_head: bool,
) -> io::Result<()> {
    write_headers(writer, HttpStatus::Ok, content_type, size, &[])?;
    if is_head {
        return writer.flush();
    }

    let mut buffer = [0u8; FILE_CHUNK_SIZE];
    let mut remaining = size;
    while remaining > 0 {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        // Compared in u64 so sizes past 4 GiB survive 32-bit targets.
        let take = (n as u64).min(remaining) as usize;
        writer.write_all(&buffer[..take])?;
        remaining -= take as u64;
    }
    writer.flush()
}

pub fn send_html<W: Write>(
    writer: &mut W,
    status: HttpStatus,
    body: &str,
    is_head: bool,
) -> io::Result<()> {
    write_headers(writer, status, "text/html", body.len() as u64, &[])?;
    if !is_head {
        writer.write_all(body.as_bytes())?;
    }
    writer.flush()
}

pub fn send_redirect<W: Write>(writer: &mut W, location: &str, is_head: bool) -> io::Result<()> {
    let body = format!(
        "<html><body><h1>301 Moved Permanently</h1><a href=\"{0}\">{0}</a></body></html>",
        location
    );
    write_headers(
        writer,
        HttpStatus::MovedPermanently,
        "text/html",
        body.len() as u64,
        &[("Location", location)],
    )?;
    if !is_head {
        writer.write_all(body.as_bytes())?;
    }
    writer.flush()
}

pub fn send_error<W: Write>(writer: &mut W, status: HttpStatus, is_head: bool) -> io::Result<()> {
    let body = format!(
        "<html><body><h1>{} {}</h1></body></html>",
        status.code(),
        status.text()
    );
    send_html(writer, status, &body, is_head)
}
