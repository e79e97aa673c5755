//! 単一モデルのページ設定（ArConfig）とページ要素への射影
//!
//! ページ読み込み時に一度だけ、設定値をビューア属性とテキスト要素へ写す。

use super::model::Placement;
use super::viewer::{format_number, ViewerAttributes, DEFAULT_AR_MODES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArModelConfig {
    pub src: String,
    #[serde(default)]
    pub poster: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArModeConfig {
    pub modes: Vec<String>,
    pub scale: String,
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArDisplayConfig {
    pub auto_rotate: bool,
    pub auto_rotate_delay: u32,
    pub rotation_speed: String,
    pub camera_controls: bool,
    pub exposure: f64,
    pub shadow_intensity: f64,
    pub environment_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArUiConfig {
    pub title: String,
    pub subtitle: String,
    pub ar_button_text: String,
    pub instructions: Vec<String>,
}

/// ページ設定一式（config/ar_config.json、無ければ組み込み値）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArConfig {
    pub model: ArModelConfig,
    pub ar: ArModeConfig,
    pub display: ArDisplayConfig,
    pub ui: ArUiConfig,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            model: ArModelConfig {
                src: "models/terraced-scene.glb".to_string(),
                poster: String::new(),
                alt: "Terraced landscape 3D model".to_string(),
            },
            ar: ArModeConfig {
                modes: DEFAULT_AR_MODES.iter().map(|m| m.to_string()).collect(),
                scale: "0.1 0.1 0.1".to_string(),
                placement: Placement::Floor,
            },
            display: ArDisplayConfig {
                auto_rotate: true,
                auto_rotate_delay: 3000,
                rotation_speed: "30deg".to_string(),
                camera_controls: true,
                exposure: 1.0,
                shadow_intensity: 1.0,
                environment_image: "neutral".to_string(),
            },
            ui: ArUiConfig {
                title: "AR Model Viewer".to_string(),
                subtitle: "View the model in your space".to_string(),
                ar_button_text: "View in AR".to_string(),
                instructions: vec![
                    "Tap \"View in AR\" to launch augmented reality".to_string(),
                    "Point your camera at a flat surface".to_string(),
                    "Move your device slowly to detect the floor".to_string(),
                    "Tap to place the model, pinch to resize".to_string(),
                ],
            },
        }
    }
}

/// テキスト要素へ写す値
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageTexts {
    pub title: String,
    pub subtitle: String,
    pub ar_button: String,
    /// "1. ..." 形式の番号付き行
    pub instructions: Vec<String>,
}

/// 射影結果（ビューア属性 + テキスト要素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageProjection {
    pub viewer: ViewerAttributes,
    pub texts: PageTexts,
}

impl ArConfig {
    /// 設定値をビューア属性とテキスト要素へ写す
    pub fn project(&self) -> PageProjection {
        let mut viewer = ViewerAttributes::new();
        viewer.set_text("src", &self.model.src);
        if !self.model.poster.is_empty() {
            viewer.set_text("poster", &self.model.poster);
        }
        viewer.set_text("alt", &self.model.alt);
        viewer.set_flag("ar", true);
        viewer.set_text("ar-modes", self.ar.modes.join(" "));
        viewer.set_text("ar-scale", &self.ar.scale);
        viewer.set_text("ar-placement", self.ar.placement.as_str());
        viewer.set_flag("camera-controls", self.display.camera_controls);
        viewer.set_flag("auto-rotate", self.display.auto_rotate);
        viewer.set_text("auto-rotate-delay", self.display.auto_rotate_delay.to_string());
        viewer.set_text("rotation-per-second", &self.display.rotation_speed);
        viewer.set_text("environment-image", &self.display.environment_image);
        viewer.set_text("exposure", format_number(self.display.exposure));
        viewer.set_text("shadow-intensity", format_number(self.display.shadow_intensity));

        let texts = PageTexts {
            title: self.ui.title.clone(),
            subtitle: self.ui.subtitle.clone(),
            ar_button: self.ui.ar_button_text.clone(),
            instructions: self
                .ui
                .instructions
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{}. {}", i + 1, line))
                .collect(),
        };
        PageProjection { viewer, texts }
    }
}
