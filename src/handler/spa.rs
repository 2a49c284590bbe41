//! Single-page application serving
//!
//! Real files under the public directory are served as-is. Every other path
//! gets `index.html` so the client-side router can render it; only a missing
//! `index.html` is a hard 404.

use std::path::PathBuf;

use crate::handler::assets::{read_asset, read_asset_within};
use crate::http::{self, MimeTable, Response};
use crate::logger;

/// Entry document of the front-end build
pub const INDEX_DOCUMENT: &str = "index.html";

/// Serves the front-end build with index fallback
#[derive(Debug, Clone)]
pub struct SpaServer {
    public_dir: PathBuf,
}

impl SpaServer {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub async fn serve(&self, path: &str) -> Response {
        if path != "/" {
            if let Ok((file, data)) = read_asset_within(&self.public_dir, path).await {
                return http::build_asset_response(data, MimeTable::Public.resolve_path(&file));
            }
        }
        self.serve_index().await
    }

    async fn serve_index(&self) -> Response {
        let index = self.public_dir.join(INDEX_DOCUMENT);
        match read_asset(&index).await {
            Ok(data) => http::build_asset_response(data, MimeTable::Public.resolve_path(&index)),
            Err(_) => {
                logger::log_error(&format!(
                    "Front-end build missing: {} not readable",
                    index.display()
                ));
                http::build_build_missing_response()
            }
        }
    }
}
