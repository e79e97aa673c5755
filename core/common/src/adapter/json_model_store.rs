//! models.json を読み書きする ModelStore 実装
//!
//! 書き込みは一時ファイルへ書いてから rename する（途中で落ちても元ファイルは残る）。

use crate::domain::{ModelRecord, StoreDocument};
use crate::error::Error;
use crate::ports::outbound::{FileSystem, ModelStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct JsonModelStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonModelStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_exists(&self) -> Result<(), Error> {
        if !self.fs.exists(&self.path) {
            return Err(Error::missing_file(format!(
                "{} (run `arview init` to create it)",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), Error> {
        let mut text = serde_json::to_string_pretty(document)
            .map_err(|e| Error::json(format!("serialize {}: {}", self.path.display(), e)))?;
        text.push('\n');
        self.fs.write_atomic(&self.path, &text)
    }
}

impl ModelStore for JsonModelStore {
    fn load(&self) -> Result<StoreDocument, Error> {
        self.ensure_exists()?;
        let text = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::json(format!("parse {}: {}", self.path.display(), e)))
    }

    fn append(&self, record: &ModelRecord) -> Result<(), Error> {
        let mut document = self.load()?;
        document.upsert(record.clone());
        self.write_document(&document)
    }

    fn initialize(&self, document: &StoreDocument, force: bool) -> Result<bool, Error> {
        if self.fs.exists(&self.path) && !force {
            return Ok(false);
        }
        self.write_document(document)?;
        Ok(true)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
