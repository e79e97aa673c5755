//! 環境変数解決 Outbound ポート
//!
//! ディレクトリ・モデルストア・ベース URL を環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::Dirs;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// config / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. ARVIEW_HOME（config/, state/ をその下に置く）
    /// 2. $XDG_CONFIG_HOME/arview, $XDG_STATE_HOME/arview
    /// 3. $HOME/.config/arview, $HOME/.local/state/arview
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// ARVIEW_MODELS（モデルストアのパス）
    fn models_path_from_env(&self) -> Option<PathBuf>;

    /// ARVIEW_BASE_URL（モデルページのベース URL）
    fn base_url_from_env(&self) -> Option<String>;
}
