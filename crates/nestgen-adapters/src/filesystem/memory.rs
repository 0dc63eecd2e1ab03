//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use nestgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::NestgenResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same state, so a test can keep a handle while the
/// service owns a boxed copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn insert_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.write_lock();
        if let Some(parent) = path.parent() {
            inner.add_dir_chain(parent);
        }
        inner.files.insert(path, content.into());
    }

    /// Read a file's content (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_lock().files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_lock().files.keys().cloned().collect()
    }

    /// All directory paths, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.read_lock().directories.iter().cloned().collect()
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => parent.as_os_str().is_empty() || self.directories.contains(parent),
            None => true,
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> NestgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.add_dir_chain(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> NestgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if !inner.parent_exists(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> NestgenResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> NestgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if !inner.parent_exists(to) {
            return Err(ApplicationError::FilesystemError {
                path: to.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        let content = inner.files.remove(from).ok_or_else(|| ApplicationError::FilesystemError {
            path: from.to_path_buf(),
            reason: "No such file".into(),
        })?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> NestgenResult<()> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "No such file".into(),
                }
                .into()
            })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_lock();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("a/b.ts"), "x").is_err());

        fs.create_dir_all(Path::new("a")).unwrap();
        fs.write_file(Path::new("a/b.ts"), "x").unwrap();
        assert_eq!(fs.contents("a/b.ts").as_deref(), Some("x"));
    }

    #[test]
    fn create_dir_all_registers_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("src/user/dto")).unwrap();
        assert!(fs.exists(Path::new("src")));
        assert!(fs.exists(Path::new("src/user")));
        assert!(fs.exists(Path::new("src/user/dto")));
    }

    #[test]
    fn rename_moves_content() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("src/user/user.service.ts", "svc");
        fs.create_dir_all(Path::new("src/user/services")).unwrap();

        fs.rename(
            Path::new("src/user/user.service.ts"),
            Path::new("src/user/services/user.service.ts"),
        )
        .unwrap();

        assert!(!fs.exists(Path::new("src/user/user.service.ts")));
        assert_eq!(
            fs.contents("src/user/services/user.service.ts").as_deref(),
            Some("svc")
        );
    }

    #[test]
    fn rename_missing_source_fails() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("b")).unwrap();
        assert!(fs.rename(Path::new("a.ts"), Path::new("b/a.ts")).is_err());
    }

    #[test]
    fn remove_file_keeps_directory() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/a/b.txt", "x");
        fs.remove_file(Path::new("/a/b.txt")).unwrap();
        assert!(!fs.exists(Path::new("/a/b.txt")));
        assert!(fs.exists(Path::new("/a")));
        assert!(fs.remove_file(Path::new("/a/b.txt")).is_err());
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.insert_file("x/y.ts", "1");
        assert!(handle.exists(Path::new("x/y.ts")));
    }
}
