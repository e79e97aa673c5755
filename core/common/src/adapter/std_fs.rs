//! std::fs による FileSystem

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

fn io_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::io_msg(format!("{} '{}': {}", action, path.display(), e))
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| io_error("cannot read", path, e))
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| io_error("cannot write", path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to).map_err(|e| io_error(&format!("cannot move to '{}' from", to.display()), from, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_file(path).map_err(|e| io_error("cannot remove", path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| io_error("cannot create directory", path, e))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| io_error("cannot open for append", path, e))?;
        Ok(Box::new(file))
    }
}
