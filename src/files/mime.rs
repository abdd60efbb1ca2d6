use std::path::Path;

/// Extension to content-type table, covering the asset types an offline
/// mirror typically holds (archives, machine images, package formats)
/// alongside the usual web types.
static MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("xml", "application/xml"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("gz", "application/gzip"),
    ("tgz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("zip", "application/zip"),
    ("xz", "application/x-xz"),
    ("bz2", "application/x-bzip2"),
    ("zst", "application/zstd"),
    ("rpm", "application/x-rpm"),
    ("deb", "application/vnd.debian.binary-package"),
    ("whl", "application/zip"),
    ("iso", "application/x-iso9660-image"),
    ("img", "application/octet-stream"),
    ("qcow2", "application/octet-stream"),
    ("sh", "text/x-shellscript"),
];

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::content_type_for;
    use std::path::Path;

    #[test]
    fn known_extensions() {
        assert_eq!(content_type_for(Path::new("pkgs/foo.tar.gz")), "application/gzip");
        assert_eq!(content_type_for(Path::new("a/b/index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("repo.rpm")), "application/x-rpm");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(content_type_for(Path::new("README.TXT")), "text/plain");
    }

    #[test]
    fn unknown_or_missing_extension_is_octet_stream() {
        assert_eq!(content_type_for(Path::new("vmlinuz")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("data.xyz123")), "application/octet-stream");
    }
}
