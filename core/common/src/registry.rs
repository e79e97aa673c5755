//! モデルレジストリ
//!
//! 既定値はコンストラクタで受け取り以後変えない。レコードは上書き値だけを保持し、
//! `get` / `get_all` のたびに `defaults ⊕ record` を組み立てる（取得時マージ）。
//! 複数スレッドから共有する場合は呼び出し側で RwLock 等に包むこと。

use crate::domain::{DisplaySettings, EffectiveConfig, ModelId, ModelRecord, StoreDocument};
use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// モデルページのパス（QR 生成側と共有する外部契約）
pub const MODEL_PAGE: &str = "model.html";

/// `<base>model.html?id=<id>`（ID はクエリ値としてエンコードする）
pub fn model_url(id: &str, base_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    let sep = if base_url.is_empty() || base_url.ends_with('/') { "" } else { "/" };
    format!("{}{}{}?id={}", base_url, sep, MODEL_PAGE, encoded)
}

pub struct ModelRegistry {
    defaults: DisplaySettings,
    /// 挿入順を保つ（一覧の順序を安定させる）
    models: Vec<ModelRecord>,
    logger: Arc<dyn Log>,
}

impl ModelRegistry {
    pub fn new(defaults: DisplaySettings) -> Self {
        Self {
            defaults,
            models: Vec::new(),
            logger: Arc::new(crate::adapter::NoopLog),
        }
    }

    /// 文書の既定値（無ければ組み込み値）とレコードから組み立てる
    pub fn from_document(document: StoreDocument) -> Self {
        let mut registry = Self::new(document.defaults.unwrap_or_default());
        for record in document.models {
            registry.insert(record);
        }
        registry
    }

    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }

    pub fn defaults(&self) -> &DisplaySettings {
        &self.defaults
    }

    /// 実効設定を返す。未登録なら警告ログを出して None。
    pub fn get(&self, id: &str) -> Option<EffectiveConfig> {
        match self.find(id) {
            Some(record) => Some(record.merge(&self.defaults)),
            None => {
                let _ = self.logger.log(
                    &LogRecord::new(LogLevel::Warn, "model not found")
                        .layer("registry")
                        .kind("lookup")
                        .field("id", id),
                );
                None
            }
        }
    }

    /// テンプレートを除く全モデルの実効設定（挿入順）
    pub fn get_all(&self) -> Vec<EffectiveConfig> {
        self.models
            .iter()
            .filter(|r| !r.id.is_template())
            .map(|r| r.merge(&self.defaults))
            .collect()
    }

    /// レコードを登録し、その時点の実効設定を返す。同じ ID は黙って上書きする。
    pub fn add(&mut self, record: ModelRecord) -> Result<EffectiveConfig, Error> {
        if record.id.trim().is_empty() {
            return Err(Error::invalid_argument("model id must not be empty"));
        }
        let effective = record.merge(&self.defaults);
        let replaced = self.insert(record);
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Debug, "model added")
                .layer("registry")
                .kind("store")
                .field("id", effective.id.to_string())
                .field("replaced", replaced),
        );
        Ok(effective)
    }

    /// ID の一覧（テンプレートを含む）
    pub fn ids(&self) -> impl Iterator<Item = &ModelId> {
        self.models.iter().map(|r| &r.id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn model_url(&self, id: &str, base_url: &str) -> String {
        model_url(id, base_url)
    }

    fn find(&self, id: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|r| r.id.as_ref() == id)
    }

    // 置き換えたら true
    fn insert(&mut self, record: ModelRecord) -> bool {
        match self.models.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.models.push(record);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Placement, TEMPLATE_MODEL_ID};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        records: Mutex<Vec<LogRecord>>,
    }

    impl Log for RecordingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn scenario_defaults() -> DisplaySettings {
        DisplaySettings {
            ar_scale: "1 1 1".to_string(),
            ar_placement: Placement::Floor,
            ..DisplaySettings::default()
        }
    }

    fn record(id: &str) -> ModelRecord {
        ModelRecord::new(id)
    }

    #[test]
    fn test_scenario_chair_gets_defaults() {
        let mut reg = ModelRegistry::new(scenario_defaults());
        let mut chair = record("chair");
        chair.src = "chair.glb".to_string();
        reg.add(chair).unwrap();

        let eff = reg.get("chair").unwrap();
        assert_eq!(eff.id.as_ref(), "chair");
        assert_eq!(eff.src, "chair.glb");
        assert_eq!(eff.display.ar_scale, "1 1 1");
        assert_eq!(eff.display.ar_placement, Placement::Floor);
    }

    #[test]
    fn test_scenario_site_overrides_scale_only() {
        let mut reg = ModelRegistry::new(scenario_defaults());
        let mut site = record("site");
        site.display.ar_scale = Some("0.1 0.1 0.1".to_string());
        reg.add(site).unwrap();

        let eff = reg.get("site").unwrap();
        let expected = DisplaySettings {
            ar_scale: "0.1 0.1 0.1".to_string(),
            ..scenario_defaults()
        };
        assert_eq!(eff.display, expected);
    }

    #[test]
    fn test_add_result_matches_get() {
        let mut reg = ModelRegistry::new(DisplaySettings::default());
        let mut rec = record("x");
        rec.display.exposure = Some(0.8);
        let added = reg.add(rec).unwrap();
        assert_eq!(reg.get("x"), Some(added));
    }

    #[test]
    fn test_unknown_lookup_returns_none_and_warns() {
        let log = Arc::new(RecordingLog::default());
        let reg = ModelRegistry::new(DisplaySettings::default()).with_logger(log.clone());
        assert_eq!(reg.get("nonexistent-id"), None);

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].fields.as_ref().unwrap()["id"], "nonexistent-id");
    }

    #[test]
    fn test_get_all_excludes_template_and_keeps_order() {
        let mut reg = ModelRegistry::new(DisplaySettings::default());
        reg.add(record("b")).unwrap();
        reg.add(record(TEMPLATE_MODEL_ID)).unwrap();
        reg.add(record("a")).unwrap();

        let ids: Vec<String> = reg.get_all().into_iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(
            reg.get_all().into_iter().map(|e| e.id).collect::<Vec<_>>(),
            reg.get_all().into_iter().map(|e| e.id).collect::<Vec<_>>()
        );
        assert!(reg.get(TEMPLATE_MODEL_ID).is_some());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_add_overwrites_silently() {
        let mut reg = ModelRegistry::new(DisplaySettings::default());
        let mut first = record("chair");
        first.src = "old.glb".to_string();
        reg.add(first).unwrap();
        let mut second = record("chair");
        second.src = "new.glb".to_string();
        reg.add(second).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("chair").unwrap().src, "new.glb");
    }

    #[test]
    fn test_add_rejects_empty_id() {
        let mut reg = ModelRegistry::new(DisplaySettings::default());
        assert!(matches!(reg.add(record("  ")), Err(Error::InvalidArgument(_))));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_add_without_src_is_accepted() {
        let mut reg = ModelRegistry::new(DisplaySettings::default());
        let eff = reg.add(record("no-asset")).unwrap();
        assert!(eff.src.is_empty());
        assert!(reg.contains("no-asset"));
    }

    #[test]
    fn test_from_document_uses_document_defaults() {
        let mut doc = StoreDocument::starter();
        doc.defaults = Some(DisplaySettings {
            exposure: 2.0,
            ..DisplaySettings::default()
        });
        doc.models.push(record("chair"));
        let reg = ModelRegistry::from_document(doc);
        assert_eq!(reg.get("chair").unwrap().display.exposure, 2.0);
        assert_eq!(reg.get_all().len(), 1);
    }

    #[test]
    fn test_from_document_without_defaults_uses_builtin() {
        let doc = StoreDocument {
            models: vec![record("chair")],
            ..StoreDocument::default()
        };
        let reg = ModelRegistry::from_document(doc);
        assert_eq!(reg.defaults(), &DisplaySettings::default());
    }

    #[test]
    fn test_model_url() {
        assert_eq!(
            model_url("terraced-scene", "https://example.com/"),
            "https://example.com/model.html?id=terraced-scene"
        );
        assert_eq!(
            model_url("a b&c", "https://example.com/"),
            "https://example.com/model.html?id=a+b%26c"
        );
        assert_eq!(
            model_url("x", "https://example.com/ar"),
            "https://example.com/ar/model.html?id=x"
        );
        let reg = ModelRegistry::new(DisplaySettings::default());
        assert_eq!(reg.model_url("x", ""), "model.html?id=x");
    }
}
