use log::warn;
use std::path::{Path, PathBuf};

use crate::server::http_status::HttpStatus;

/// Outcome of mapping a request target onto the served tree.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    /// Directory requested without a trailing slash; client should retry at
    /// the slash-terminated location.
    Redirect(String),
}

/// Map a raw request target to a filesystem path under `root`.
///
/// `root` must already be canonical. Traversal segments are rejected before
/// the filesystem is consulted; after canonicalization the result must still
/// sit under `root`, which rejects symlinks pointing outside the served tree.
pub fn resolve(root: &Path, target: &str) -> Result<Resolved, HttpStatus> {
    let path_part = target
        .split(['?', '#'])
        .next()
        .unwrap_or(target);

    if !path_part.starts_with('/') {
        return Err(HttpStatus::BadRequest);
    }

    let decoded = percent_decode(path_part).ok_or(HttpStatus::BadRequest)?;
    if decoded.contains('\0') {
        return Err(HttpStatus::BadRequest);
    }

    let mut fs_path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                warn!("Path traversal attempt rejected: {}", target);
                return Err(HttpStatus::Forbidden);
            }
            _ => fs_path.push(segment),
        }
    }

    let canonical = fs_path.canonicalize().map_err(|_| HttpStatus::NotFound)?;
    if !canonical.starts_with(root) {
        warn!(
            "Request escapes served root via symlink: {} -> {}",
            target,
            canonical.display()
        );
        return Err(HttpStatus::Forbidden);
    }

    if canonical.is_dir() {
        if path_part.ends_with('/') {
            Ok(Resolved::Directory(canonical))
        } else {
            Ok(Resolved::Redirect(format!("{}/", path_part)))
        }
    } else if canonical.is_file() {
        Ok(Resolved::File(canonical))
    } else {
        Err(HttpStatus::NotFound)
    }
}

/// Decode %XX escapes. Returns None on truncated or non-hex escapes and on
/// sequences that do not form valid UTF-8.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return None;
            }
            let hi = hex_value(bytes[i + 1])?;
            let lo = hex_value(bytes[i + 2])?;
            out.push(hi * 16 + lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
