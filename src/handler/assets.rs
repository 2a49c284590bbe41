//! Asset reading module
//!
//! Resolves untrusted request paths under a trusted base directory and reads
//! files without blocking the runtime.

use crate::error::AssetError;
use crate::logger;
use hyper::body::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Join `request_path` onto `base`, rejecting anything that could climb out.
///
/// Empty and `.` segments are skipped. Returns `None` for `..`, backslashes,
/// NUL bytes, or a segment the platform would treat as a root or prefix.
pub fn resolve_within(base: &Path, request_path: &str) -> Option<PathBuf> {
    let mut resolved = base.to_path_buf();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['\\', '\0']) => return None,
            s => {
                let mut components = Path::new(s).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(part)), None) => resolved.push(part),
                    _ => return None,
                }
            }
        }
    }
    Some(resolved)
}

/// Read a whole file into memory.
///
/// Every failure (missing, unreadable, directory) is reported as
/// [`AssetError::NotFound`].
pub async fn read_asset(path: &Path) -> Result<Bytes, AssetError> {
    match fs::read(path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) => {
            logger::log_debug(&format!("Asset read failed '{}': {e}", path.display()));
            Err(AssetError::NotFound)
        }
    }
}

/// Resolve `request_path` under `base`, confirm the file really lives there
/// (symlinks included), then read it.
///
/// Returns the resolved path alongside the contents so callers can pick a
/// Content-Type from its extension.
pub async fn read_asset_within(
    base: &Path,
    request_path: &str,
) -> Result<(PathBuf, Bytes), AssetError> {
    let Some(candidate) = resolve_within(base, request_path) else {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return Err(AssetError::OutsideBase);
    };

    // Missing base or file is an ordinary 404
    let base_canonical = fs::canonicalize(base)
        .await
        .map_err(|_| AssetError::NotFound)?;
    let file_canonical = fs::canonicalize(&candidate)
        .await
        .map_err(|_| AssetError::NotFound)?;

    if !file_canonical.starts_with(&base_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_canonical.display()
        ));
        return Err(AssetError::OutsideBase);
    }

    let data = read_asset(&file_canonical).await?;
    Ok((candidate, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_paths() {
        let base = Path::new("/srv/public");
        assert_eq!(
            resolve_within(base, "/static/js/main.js"),
            Some(PathBuf::from("/srv/public/static/js/main.js"))
        );
        assert_eq!(
            resolve_within(base, "logo.png"),
            Some(PathBuf::from("/srv/public/logo.png"))
        );
        assert_eq!(
            resolve_within(base, "//a/./b//"),
            Some(PathBuf::from("/srv/public/a/b"))
        );
        assert_eq!(resolve_within(base, "/"), Some(PathBuf::from("/srv/public")));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let base = Path::new("/srv/uploads");
        assert_eq!(resolve_within(base, "../../etc/passwd"), None);
        assert_eq!(resolve_within(base, "/a/../../b"), None);
        assert_eq!(resolve_within(base, "a/.."), None);
        assert_eq!(resolve_within(base, "..\\..\\secret"), None);
        assert_eq!(resolve_within(base, "a\0b"), None);
    }

    #[test]
    fn test_resolve_keeps_dotted_names() {
        let base = Path::new("/srv");
        assert_eq!(
            resolve_within(base, "/..hidden/file...png"),
            Some(PathBuf::from("/srv/..hidden/file...png"))
        );
    }

    #[tokio::test]
    async fn test_read_asset() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"hello").unwrap();

        assert_eq!(read_asset(&file).await.unwrap(), Bytes::from_static(b"hello"));
        assert_eq!(
            read_asset(&dir.path().join("missing")).await,
            Err(AssetError::NotFound)
        );
        // Directories are not assets
        assert_eq!(read_asset(dir.path()).await, Err(AssetError::NotFound));
    }

    #[tokio::test]
    async fn test_read_within_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        std::fs::write(dir.path().join("img/cat.png"), b"png").unwrap();

        let (path, data) = read_asset_within(dir.path(), "/img/cat.png").await.unwrap();
        assert!(path.ends_with("img/cat.png"));
        assert_eq!(data, Bytes::from_static(b"png"));

        assert_eq!(
            read_asset_within(dir.path(), "/img/dog.png").await,
            Err(AssetError::NotFound)
        );
        assert_eq!(
            read_asset_within(dir.path(), "/../img/cat.png").await,
            Err(AssetError::OutsideBase)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_blocked() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), b"secret").unwrap();

        let base = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), base.path().join("link")).unwrap();

        assert_eq!(
            read_asset_within(base.path(), "/link/secret.txt").await,
            Err(AssetError::OutsideBase)
        );
    }
}
