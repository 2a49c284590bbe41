//! Uploaded file serving
//!
//! The least trusted path in the dispatcher: the URL suffix goes straight to
//! the filesystem, so it is always resolved through [`read_asset_within`].
//! Only image types are ever advertised.

use std::path::PathBuf;

use crate::handler::assets::read_asset_within;
use crate::http::{self, MimeTable, Response};

/// URL prefix under which uploads are exposed
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Serves files from the uploads directory
#[derive(Debug, Clone)]
pub struct UploadsServer {
    dir: PathBuf,
}

impl UploadsServer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Serve `path`, a full request path starting with `/uploads/`.
    ///
    /// Any failure, traversal attempts included, yields the generic 404.
    pub async fn serve(&self, path: &str) -> Response {
        let relative = path.strip_prefix(UPLOADS_PREFIX).unwrap_or(path);
        match read_asset_within(&self.dir, relative).await {
            Ok((file, data)) => {
                http::build_asset_response(data, MimeTable::Uploads.resolve_path(&file))
            }
            Err(_) => http::build_404_response(),
        }
    }
}
