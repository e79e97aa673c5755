//! 実行時ディレクトリ（XDG / ARVIEW_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、モデルストア・ログのパス計算に使う。

use std::path::PathBuf;

/// 解決済みの config / state ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// 既定のモデルストア（config/models.json）
    pub fn models_path(&self) -> PathBuf {
        self.config_dir.join("models.json")
    }

    /// ページ設定（config/ar_config.json）
    pub fn ar_config_path(&self) -> PathBuf {
        self.config_dir.join("ar_config.json")
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.logs_dir().join("arview.jsonl")
    }
}
