//! パスを決められなかった ModelStore
//!
//! ディレクトリ解決に失敗しても、ストアを使わないコマンド（generate-qr, scale 等）は動かす。
//! ストアに触れた時点で解決時のエラーを返す。

use crate::domain::{ModelRecord, StoreDocument};
use crate::error::Error;
use crate::ports::outbound::ModelStore;

pub struct UnresolvedModelStore {
    reason: Error,
}

impl UnresolvedModelStore {
    pub fn new(reason: Error) -> Self {
        Self { reason }
    }
}

impl ModelStore for UnresolvedModelStore {
    fn load(&self) -> Result<StoreDocument, Error> {
        Err(self.reason.clone())
    }

    fn append(&self, _record: &ModelRecord) -> Result<(), Error> {
        Err(self.reason.clone())
    }

    fn initialize(&self, _document: &StoreDocument, _force: bool) -> Result<bool, Error> {
        Err(self.reason.clone())
    }

    fn location(&self) -> String {
        "(unresolved)".to_string()
    }
}
