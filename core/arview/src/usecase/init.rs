//! モデルストアとページ設定の雛形を書き出す（arview init）

use common::domain::{ArConfig, StoreDocument};
use common::error::Error;
use common::ports::outbound::{FileSystem, ModelStore};
use std::path::PathBuf;
use std::sync::Arc;

/// 初期化の結果（main で表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResult {
    pub store_location: String,
    pub store_written: bool,
    pub ar_config_path: PathBuf,
    pub ar_config_written: bool,
}

pub struct InitUseCase {
    store: Arc<dyn ModelStore>,
    fs: Arc<dyn FileSystem>,
    /// config ディレクトリが解決できなければ None
    ar_config_path: Option<PathBuf>,
}

impl InitUseCase {
    pub fn new(store: Arc<dyn ModelStore>, fs: Arc<dyn FileSystem>, ar_config_path: Option<PathBuf>) -> Self {
        Self {
            store,
            fs,
            ar_config_path,
        }
    }

    /// 既存ファイルは `force` のときだけ上書きする
    pub fn run(&self, force: bool) -> Result<InitResult, Error> {
        // どちらも書けることを確かめてから書き始める
        let ar_config_path = self.ar_config_path.clone().ok_or_else(|| {
            Error::env("cannot resolve the config directory: set ARVIEW_HOME, XDG_CONFIG_HOME or HOME")
        })?;
        let store_written = self.store.initialize(&StoreDocument::starter(), force)?;

        let ar_config_written = if self.fs.exists(&ar_config_path) && !force {
            false
        } else {
            let mut text = serde_json::to_string_pretty(&ArConfig::default())?;
            text.push('\n');
            self.fs.write_atomic(&ar_config_path, &text)?;
            true
        };

        Ok(InitResult {
            store_location: self.store.location(),
            store_written,
            ar_config_path,
            ar_config_written,
        })
    }
}
