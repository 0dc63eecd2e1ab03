//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use nestgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{NestgenError, NestgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> NestgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> NestgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> NestgenResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> NestgenResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "move file"))
    }

    fn remove_file(&self, path: &Path) -> NestgenResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> NestgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_read_and_rename() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        let dir = tmp.path().join("src/user/services");
        fs.create_dir_all(&dir).unwrap();
        assert!(fs.exists(&dir));

        let from = tmp.path().join("src/user/user.service.ts");
        fs.write_file(&from, "export class UserService {}").unwrap();

        let to = dir.join("user.service.ts");
        fs.rename(&from, &to).unwrap();
        assert!(!fs.exists(&from));
        assert_eq!(fs.read_file(&to).unwrap(), "export class UserService {}");
    }

    #[test]
    fn remove_file_deletes_only_the_file() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = tmp.path().join("user.service.spec.ts");
        fs.write_file(&file, "spec").unwrap();

        fs.remove_file(&file).unwrap();
        assert!(!fs.exists(&file));
        assert!(fs.exists(tmp.path()));
        assert!(fs.remove_file(&file).is_err());
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.ts");
        let err = LocalFilesystem::new().read_file(&missing).unwrap_err();
        match err {
            NestgenError::Application(ApplicationError::FilesystemError { path, reason }) => {
                assert_eq!(path, missing);
                assert!(reason.starts_with("Failed to read file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
