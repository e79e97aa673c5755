//! ページ設定（ArConfig）を読み、ビューア属性とテキスト要素へ射影する

use common::domain::{ArConfig, PageProjection};
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

pub struct PageConfigUseCase {
    fs: Arc<dyn FileSystem>,
    /// config ディレクトリが解決できなければ None（組み込みの設定を使う）
    path: Option<PathBuf>,
}

impl PageConfigUseCase {
    pub fn new(fs: Arc<dyn FileSystem>, path: Option<PathBuf>) -> Self {
        Self { fs, path }
    }

    /// ファイルが無ければ組み込みの設定を使う
    pub fn load(&self) -> Result<ArConfig, Error> {
        let Some(path) = self.path.as_deref().filter(|p| self.fs.exists(p)) else {
            return Ok(ArConfig::default());
        };
        let text = self.fs.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::json(format!("parse {}: {}", path.display(), e)))
    }

    pub fn project(&self) -> Result<PageProjection, Error> {
        Ok(self.load()?.project())
    }
}
