//! Media store - image objects keyed by path

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::store::StoreError;

/// A stored object with its HTTP metadata
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
}

/// Object storage for site images
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Fetch an object by key, `None` when nothing is stored there
    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StoreError>;
}

/// Media store backed by a directory tree; keys are paths below the root
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a file path, refusing anything that escapes the root
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !safe {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StoreError> {
        let Some(path) = self.resolve(key) else {
            return Ok(None);
        };

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if path.is_dir() => {
                tracing::debug!("Media key {} is a directory: {}", key, e);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some(MediaObject {
            content_type: content_type_for(&path).map(String::from),
            etag: Some(etag_for(&body)),
            body,
        }))
    }
}

/// Content type recorded for a stored file, judged by its extension
fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "avif" => Some("image/avif"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        _ => None,
    }
}

/// Quoted entity tag derived from the object body
fn etag_for(body: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with(files: &[(&str, &[u8])]) -> (tempfile::TempDir, FsMediaStore) {
        let dir = tempfile::tempdir().unwrap();
        for (key, body) in files {
            let path = dir.path().join(key);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let store = FsMediaStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_get_existing_object() {
        let (_dir, store) = store_with(&[("images/services/heater.png", b"png-bytes")]);
        let object = store.get("images/services/heater.png").await.unwrap().unwrap();
        assert_eq!(object.body, b"png-bytes");
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert!(object.etag.unwrap().starts_with('"'));
    }

    #[tokio::test]
    async fn test_unknown_extension_has_no_content_type() {
        let (_dir, store) = store_with(&[("images/logo", b"raw")]);
        let object = store.get("images/logo").await.unwrap().unwrap();
        assert!(object.content_type.is_none());
    }

    #[tokio::test]
    async fn test_missing_object() {
        let (_dir, store) = store_with(&[]);
        assert!(store.get("images/foo.jpg").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_directory_and_traversal_keys_are_absent() {
        let (_dir, store) = store_with(&[("images/a/b.jpg", b"x")]);
        assert!(store.get("images/a").await.unwrap().is_none());
        assert!(store.get("images/../../etc/passwd").await.unwrap().is_none());
        assert!(store.get("").await.unwrap().is_none());
    }

    #[test]
    fn test_same_body_same_etag() {
        assert_eq!(etag_for(b"abc"), etag_for(b"abc"));
        assert_ne!(etag_for(b"abc"), etag_for(b"abd"));
    }

    #[test]
    fn test_keys_listing() {
        let (_dir, store) = store_with(&[("images/b.jpg", b"1"), ("images/a.jpg", b"2")]);
        assert_eq!(store.keys(), vec!["images/a.jpg", "images/b.jpg"]);
    }
}
