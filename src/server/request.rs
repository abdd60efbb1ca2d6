use super::http_status::HttpStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub target: String,
}

impl Request {
    pub fn is_head(&self) -> bool {
        self.method == Method::Head
    }
}

/// Parse the request line out of a raw request buffer. Only GET and HEAD are
/// served; everything else is answered with 405 without looking at the target.
pub fn parse(raw: &[u8]) -> Result<Request, HttpStatus> {
    let text = String::from_utf8_lossy(raw);
    let first_line = text.lines().next().ok_or(HttpStatus::BadRequest)?;

    let mut tokens = first_line.split_whitespace();
    let method = tokens.next().ok_or(HttpStatus::BadRequest)?;
    let target = tokens.next().ok_or(HttpStatus::BadRequest)?;

    let method = match method {
        "GET" => Method::Get,
        "HEAD" => Method::Head,
        _ => return Err(HttpStatus::MethodNotAllowed),
    };

    Ok(Request {
        method,
        target: target.to_string(),
    })
}

/// A request is complete once the header block terminator has arrived.
/// Bare-LF requests (e.g. from netcat) are accepted alongside CRLF.
pub fn headers_complete(buffer: &[u8]) -> bool {
    if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        return true;
    }
    buffer.windows(2).any(|w| w == b"\n\n")
}

#[cfg(test)]
mod tests {
    use super::{headers_complete, parse, Method};
    use crate::server::http_status::HttpStatus;

    #[test]
    fn parses_get_and_head() {
        let req = parse(b"GET /pkgs/foo.tar.gz HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.target, "/pkgs/foo.tar.gz");

        let req = parse(b"HEAD / HTTP/1.1\r\n\r\n").unwrap();
        assert!(req.is_head());
        assert_eq!(req.target, "/");
    }

    #[test]
    fn rejects_other_methods() {
        assert_eq!(
            parse(b"POST /upload HTTP/1.1\r\n\r\n"),
            Err(HttpStatus::MethodNotAllowed)
        );
        assert_eq!(
            parse(b"DELETE /x HTTP/1.1\r\n\r\n"),
            Err(HttpStatus::MethodNotAllowed)
        );
    }

    #[test]
    fn rejects_malformed_request_lines() {
        assert_eq!(parse(b"\r\n\r\n"), Err(HttpStatus::BadRequest));
        assert_eq!(parse(b"GET\r\n\r\n"), Err(HttpStatus::BadRequest));
    }

    #[test]
    fn detects_header_terminator() {
        assert!(headers_complete(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
        assert!(headers_complete(b"GET / HTTP/1.0\n\n"));
        assert!(!headers_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
    }
}
