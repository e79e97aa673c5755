//! モデルストア Outbound ポート
//!
//! レジストリの永続化先。追加は「メモリ上の add → ストアへの追記」の順で行うため、
//! ここが失敗してもメモリ上のレジストリは壊れない。

use crate::domain::{ModelRecord, StoreDocument};
use crate::error::Error;

pub trait ModelStore: Send + Sync {
    /// 文書全体を読む。ファイルが無ければ `Error::MissingRequiredFile`。
    fn load(&self) -> Result<StoreDocument, Error>;

    /// レコードを追記（同じ ID は置き換え）。ファイルが無ければ `Error::MissingRequiredFile`。
    fn append(&self, record: &ModelRecord) -> Result<(), Error>;

    /// 雛形を書き出す。既存ファイルがあり `force` でなければ何もせず false。
    fn initialize(&self, document: &StoreDocument, force: bool) -> Result<bool, Error>;

    /// 表示用の所在（パス等）
    fn location(&self) -> String;
}
