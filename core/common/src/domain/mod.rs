//! ドメイン型
//!
//! String を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod ar_config;
pub mod dirs;
pub mod model;
pub mod scale;
pub mod store;
pub mod viewer;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub use ar_config::{ArConfig, PageProjection, PageTexts};
pub use dirs::Dirs;
pub use model::{DisplayOverrides, DisplaySettings, EffectiveConfig, ModelRecord, Placement, ProjectInfo, Theme};
pub use scale::ScalePreset;
pub use store::StoreDocument;
pub use viewer::{escape_html, AttributeValue, ViewerAttributes};

/// 一覧から除外するオーサリング用テンプレートの ID
pub const TEMPLATE_MODEL_ID: &str = "client-model-template";

/// モデル ID（URL の `id` クエリに載る安定キー）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// テンプレート用の予約 ID か
    pub fn is_template(&self) -> bool {
        self.0 == TEMPLATE_MODEL_ID
    }

    /// 小文字英数字をハイフンで区切った慣習的な形か（強制はしない）
    pub fn is_conventional(&self) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("static pattern")
        });
        re.is_match(&self.0)
    }
}

impl std::ops::Deref for ModelId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
