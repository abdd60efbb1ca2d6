use std::fs;
use std::io;
use std::path::Path;

/// Render an HTML index for `dir`, shown when a directory has no index.html.
/// `request_path` is the decoded URL path, used for the page title and so
/// that relative hrefs resolve against the slash-terminated location.
pub fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let title = html_escape(request_path);
    let mut page = String::with_capacity(512 + entries.len() * 64);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>Index of {}</title>\n", title));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>Index of {}</h1>\n<hr>\n<ul>\n", title));

    for (name, is_dir) in &entries {
        let display = if *is_dir {
            format!("{}/", html_escape(name))
        } else {
            html_escape(name)
        };
        let href = if *is_dir {
            format!("{}/", percent_encode(name))
        } else {
            percent_encode(name)
        };
        page.push_str(&format!("<li><a href=\"{}\">{}</a></li>\n", href, display));
    }

    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(page)
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(b as char),
            b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
