//! モデルストア文書（models.json）の形

use super::model::{DisplaySettings, ModelRecord};
use super::TEMPLATE_MODEL_ID;
use serde::{Deserialize, Serialize};

/// models.json 全体
///
/// `defaults` が無ければ組み込みの既定値を使う。`models` は上書き値だけを持つ。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DisplaySettings>,
    #[serde(default)]
    pub models: Vec<ModelRecord>,
}

impl StoreDocument {
    /// `init` で書き出す雛形（既定値とテンプレートレコードのみ）
    pub fn starter() -> Self {
        let mut template = ModelRecord::new(TEMPLATE_MODEL_ID);
        template.name = "Client Model Template".to_string();
        template.description = "Copy this entry when adding a new client model".to_string();
        template.client = "Client Name".to_string();
        template.src = "models/client-model.glb".to_string();
        Self {
            base_url: None,
            defaults: Some(DisplaySettings::default()),
            models: vec![template],
        }
    }

    /// 同じ ID があれば置き換え、無ければ末尾に追加する
    pub fn upsert(&mut self, record: ModelRecord) {
        match self.models.iter_mut().find(|m| m.id == record.id) {
            Some(existing) => *existing = record,
            None => self.models.push(record),
        }
    }
}
