//! モデルストアからレジストリを組み立て、一覧・取得・URL 生成を行うユースケース

use common::domain::EffectiveConfig;
use common::error::Error;
use common::ports::outbound::{Log, ModelStore};
use common::registry::ModelRegistry;
use std::sync::Arc;

/// ベース URL が何も指定されていないときの値
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// 読み込み済みのレジストリとベース URL
pub struct Catalog {
    pub registry: ModelRegistry,
    pub base_url: String,
}

impl Catalog {
    /// テンプレートを除く全モデル
    pub fn list(&self) -> Vec<EffectiveConfig> {
        self.registry.get_all()
    }

    /// 未登録なら None（呼び出し側で「見つからない」を扱う）
    pub fn get(&self, id: &str) -> Option<EffectiveConfig> {
        self.registry.get(id)
    }

    /// 登録済みモデルのページ URL（未登録なら get と同じく warn を残す）
    pub fn url(&self, id: &str) -> Option<String> {
        self.registry
            .get(id)
            .map(|effective| self.registry.model_url(&effective.id, &self.base_url))
    }
}

pub struct CatalogUseCase {
    store: Arc<dyn ModelStore>,
    logger: Arc<dyn Log>,
    /// --base-url / ARVIEW_BASE_URL（文書の baseUrl より優先）
    base_url_override: Option<String>,
}

impl CatalogUseCase {
    pub fn new(store: Arc<dyn ModelStore>, logger: Arc<dyn Log>, base_url_override: Option<String>) -> Self {
        Self {
            store,
            logger,
            base_url_override,
        }
    }

    pub fn load(&self) -> Result<Catalog, Error> {
        let mut document = self.store.load()?;
        let base_url = self
            .base_url_override
            .clone()
            .or_else(|| document.base_url.take())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let registry = ModelRegistry::from_document(document).with_logger(Arc::clone(&self.logger));
        Ok(Catalog { registry, base_url })
    }
}
