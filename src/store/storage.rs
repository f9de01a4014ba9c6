//! Key/value persistence behind the entity store.

use std::fs;
use std::io;
use std::path::PathBuf;

/// String-keyed snapshot storage the store writes through to.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Storage backed by one JSON file per key under a cache directory.
pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FsStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::write(self.key_path(key), value)
    }
}
