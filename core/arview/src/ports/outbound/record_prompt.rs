//! add-model の入力収集 Outbound ポート

use common::builder::RecordInputs;
use common::error::Error;

pub trait RecordPrompt: Send + Sync {
    /// `seed` に無い項目を問い合わせ、確認まで行う。取り消されたら None。
    fn collect(&self, seed: &RecordInputs) -> Result<Option<RecordInputs>, Error>;
}
