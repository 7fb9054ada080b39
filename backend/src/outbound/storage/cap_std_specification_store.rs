//! Specification documents stored as plain files in one directory.
//!
//! Access goes through a capability handle on the configured folder, so a
//! path recorded in the database can only address a direct child of it.

use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use tracing::debug;
use uuid::Uuid;

use crate::domain::TraceId;
use crate::domain::ports::{SpecificationStore, SpecificationStoreError};

/// Prefix of every generated document name.
pub const SPECIFICATION_FILE_PREFIX: &str = "specification_";

/// Document store rooted at the configured specifications folder.
#[derive(Debug, Clone)]
pub struct CapStdSpecificationStore {
    dir: Arc<Dir>,
    root: PathBuf,
}

impl CapStdSpecificationStore {
    /// Open `folder`, creating it and any missing parents first.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the folder cannot be created or opened, or
    /// when its absolute form cannot be resolved.
    pub fn open(folder: impl AsRef<Path>) -> io::Result<Self> {
        let folder = folder.as_ref();
        Dir::create_ambient_dir_all(folder, ambient_authority())?;
        let dir = Dir::open_ambient_dir(folder, ambient_authority())?;
        let root = std::path::absolute(folder)?;
        Ok(Self {
            dir: Arc::new(dir),
            root,
        })
    }

    /// Absolute location of the specifications folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_name(&self, path: &Path) -> Result<PathBuf, SpecificationStoreError> {
        let outside = || {
            SpecificationStoreError::io(format!(
                "{} is not a document of {}",
                path.display(),
                self.root.display()
            ))
        };
        let relative = path.strip_prefix(&self.root).map_err(|_| outside())?;
        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(PathBuf::from(name)),
            _ => Err(outside()),
        }
    }
}

fn map_io_error(path: &Path, error: io::Error) -> SpecificationStoreError {
    if error.kind() == io::ErrorKind::NotFound {
        SpecificationStoreError::missing(path.display().to_string())
    } else {
        SpecificationStoreError::io(format!("{}: {error}", path.display()))
    }
}

/// Run blocking file work off the async runtime, keeping the caller's trace
/// id visible to any logs emitted inside.
async fn run_blocking<T, F>(work: F) -> Result<T, SpecificationStoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, SpecificationStoreError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
    .map_err(|error| SpecificationStoreError::io(format!("blocking task failed: {error}")))?
}

#[async_trait]
impl SpecificationStore for CapStdSpecificationStore {
    async fn place(&self, bytes: Vec<u8>) -> Result<PathBuf, SpecificationStoreError> {
        let dir = Arc::clone(&self.dir);
        let name = format!("{SPECIFICATION_FILE_PREFIX}{}", Uuid::new_v4());
        let path = self.root.join(&name);
        let target = path.clone();

        run_blocking(move || {
            let mut options = OpenOptions::new();
            options.write(true).create_new(true);
            let mut file = dir
                .open_with(&name, &options)
                .map_err(|error| map_io_error(&target, error))?;
            file.write_all(&bytes)
                .and_then(|()| file.flush())
                .map_err(|error| map_io_error(&target, error))?;
            debug!(path = %target.display(), size = bytes.len(), "placed specification file");
            Ok(())
        })
        .await?;

        Ok(path)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, SpecificationStoreError> {
        let name = self.relative_name(path)?;
        let dir = Arc::clone(&self.dir);
        let target = path.to_path_buf();

        run_blocking(move || {
            let mut file = dir.open(&name).map_err(|error| map_io_error(&target, error))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|error| map_io_error(&target, error))?;
            Ok(bytes)
        })
        .await
    }

    async fn remove(&self, path: &Path) -> Result<(), SpecificationStoreError> {
        let name = self.relative_name(path)?;
        let dir = Arc::clone(&self.dir);
        let target = path.to_path_buf();

        run_blocking(move || {
            dir.remove_file(&name)
                .map_err(|error| map_io_error(&target, error))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn folder() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn store_in(folder: &TempDir) -> CapStdSpecificationStore {
        CapStdSpecificationStore::open(folder.path().join("specifications")).expect("store opens")
    }

    #[rstest]
    fn open_creates_missing_folder(folder: TempDir) {
        let store = store_in(&folder);

        assert!(store.root().is_absolute());
        assert!(folder.path().join("specifications").is_dir());
    }

    #[rstest]
    #[tokio::test]
    async fn place_writes_bytes_verbatim_under_generated_name(folder: TempDir) {
        let store = store_in(&folder);

        let path = store
            .place(b"openapi: 3.0.0".to_vec())
            .await
            .expect("place succeeds");

        assert!(path.starts_with(store.root()));
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("utf-8 file name");
        assert!(file_name.starts_with(SPECIFICATION_FILE_PREFIX));
        assert!(Path::new(file_name).extension().is_none());
        assert_eq!(std::fs::read(&path).expect("file exists"), b"openapi: 3.0.0");
    }

    #[rstest]
    #[tokio::test]
    async fn each_placement_gets_a_fresh_name(folder: TempDir) {
        let store = store_in(&folder);

        let first = store.place(b"a".to_vec()).await.expect("place succeeds");
        let second = store.place(b"a".to_vec()).await.expect("place succeeds");

        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn read_returns_placed_bytes(folder: TempDir) {
        let store = store_in(&folder);
        let path = store.place(b"content".to_vec()).await.expect("place succeeds");

        let bytes = store.read(&path).await.expect("read succeeds");

        assert_eq!(bytes, b"content");
    }

    #[rstest]
    #[tokio::test]
    async fn removed_documents_are_reported_missing(folder: TempDir) {
        let store = store_in(&folder);
        let path = store.place(b"content".to_vec()).await.expect("place succeeds");

        store.remove(&path).await.expect("remove succeeds");
        let error = store.read(&path).await.expect_err("document is gone");

        assert!(matches!(error, SpecificationStoreError::Missing { .. }));
        assert!(!path.exists());
    }

    #[rstest]
    #[case("/etc/passwd")]
    #[case("relative/specification_x")]
    #[tokio::test]
    async fn paths_outside_the_folder_are_rejected(folder: TempDir, #[case] raw: &str) {
        let store = store_in(&folder);

        let error = store
            .read(Path::new(raw))
            .await
            .expect_err("outside path rejected");

        assert!(matches!(error, SpecificationStoreError::Io { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn nested_paths_inside_the_folder_are_rejected(folder: TempDir) {
        let store = store_in(&folder);
        let nested = store.root().join("nested").join("specification_x");

        let error = store.remove(&nested).await.expect_err("nested path rejected");

        assert!(matches!(error, SpecificationStoreError::Io { .. }));
    }
}
