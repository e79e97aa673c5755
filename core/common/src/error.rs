//! エラーハンドリング
//!
//! 終了コードは sysexits.h に合わせる。モデル未登録（NotFound）はエラーではなく
//! `Option::None` で表すため、ここには含めない。

use thiserror::Error as ThisError;

/// arview 共通のエラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),

    /// URL として解析できない入力（QR 出力前に弾く）
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// 画像エンコード失敗（不正なオプション・書き出し失敗を含む）
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// モデルストア等の必須ファイルが無い
    #[error("required file not found: {0}")]
    MissingRequiredFile(String),

    #[error("{0}")]
    Io(String),

    #[error("json: {0}")]
    Json(String),

    /// 環境変数・ディレクトリ解決の失敗
    #[error("{0}")]
    Env(String),

    #[error("{0}")]
    System(String),
}

impl Error {
    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn invalid_url(input: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidUrl {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    pub fn missing_file(path: impl Into<String>) -> Self {
        Error::MissingRequiredFile(path.into())
    }

    /// I/O エラー（メッセージのみ）
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    /// システムエラー
    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::InvalidUrl { .. } | Error::Json(_) => 65,
            Error::MissingRequiredFile(_) => 66,
            Error::Encoding(_) | Error::System(_) => 70,
            Error::Io(_) => 74,
            Error::Env(_) => 78,
        }
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
