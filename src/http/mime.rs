//! MIME type detection module
//!
//! Returns the Content-Type for a file extension. Two tables exist: a broad one
//! for the front-end build output and an image-only whitelist for uploads, so
//! user-supplied files are never served as HTML or script.

use std::path::Path;

/// Content-Type for anything not in a table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Which Content-Type table to consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeTable {
    /// Front-end build assets (HTML, scripts, styles, fonts, images)
    Public,
    /// Uploaded files (images only)
    Uploads,
}

impl MimeTable {
    /// Resolve an extension (with leading dot, e.g. `".png"`) to a MIME type.
    ///
    /// Matching is case-insensitive. Unknown extensions, and the empty string,
    /// resolve to [`DEFAULT_CONTENT_TYPE`].
    ///
    /// # Examples
    /// ```
    /// use frontdoor::http::mime::MimeTable;
    /// assert_eq!(MimeTable::Public.resolve(".html"), "text/html");
    /// assert_eq!(MimeTable::Uploads.resolve(".html"), "application/octet-stream");
    /// assert_eq!(MimeTable::Uploads.resolve(".PNG"), "image/png");
    /// ```
    pub fn resolve(self, extension: &str) -> &'static str {
        let ext = extension.to_ascii_lowercase();
        let found = match self {
            Self::Public => public_type(&ext),
            Self::Uploads => upload_type(&ext),
        };
        found.unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Resolve the Content-Type of a filesystem path by its extension.
    pub fn resolve_path(self, path: &Path) -> &'static str {
        self.resolve(&extension_of(path))
    }
}

/// Lowercase extension of `path` including the leading dot, or `""`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or_else(String::new, |e| format!(".{}", e.to_ascii_lowercase()))
}

fn public_type(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Text
        ".html" => "text/html",
        ".css" => "text/css",

        // JavaScript / data
        ".js" => "application/javascript",
        ".json" => "application/json",

        // Fonts
        ".woff" => "font/woff",
        ".woff2" => "font/woff2",
        ".ttf" => "font/ttf",
        ".eot" => "application/vnd.ms-fontobject",

        // Images
        ".ico" => "image/x-icon",
        _ => return upload_type(ext),
    };
    Some(mime)
}

fn upload_type(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}
