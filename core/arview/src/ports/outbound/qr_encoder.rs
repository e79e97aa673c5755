//! QR エンコード Outbound ポート
//!
//! usecase からは `(text, options) → 画像` の純粋な関数として扱う。

use crate::domain::QrOptions;
use common::error::Error;

/// エンコード結果（ファイルへの書き出しは usecase の責務）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImages {
    pub png: Vec<u8>,
    pub svg: String,
    /// 1 辺のモジュール数（余白除く）
    pub modules: usize,
    /// PNG の 1 辺のピクセル数
    pub pixel_size: u32,
}

pub trait QrEncoder: Send + Sync {
    /// 失敗は `Error::Encoding`
    fn encode(&self, text: &str, options: &QrOptions) -> Result<QrImages, Error>;
}
