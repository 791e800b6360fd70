//! File system seam used by the extractor and locator

use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Raw file operations the partial commands need.
///
/// Editor integrations that keep unsaved buffers in memory can provide their
/// own implementation; `LocalFs` goes straight to disk.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!(?path, "LocalFs::create_dir_all: called");
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        debug!(?path, "LocalFs::read_to_string: called");
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents.as_bytes())?;
        info!(?path, bytes = contents.len(), "Wrote file");
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)?;
        info!(?path, "Removed file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_read_remove() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("_colors.scss");
        let fs = LocalFs;

        assert!(!fs.exists(&path));
        fs.write(&path, "color: red;").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "color: red;");

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }

    #[test]
    fn test_directories_are_not_files() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested/dir");
        let fs = LocalFs;

        fs.create_dir_all(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(!fs.exists(&dir));
    }
}
