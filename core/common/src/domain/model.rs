//! モデルレコードと既定値のマージ
//!
//! 実効設定は常に `defaults ⊕ record`（浅いマージ）。レコード側に値があれば
//! それが勝ち、無ければ既定値が残る。`projectInfo` / `theme` は既定値側に
//! 対応物が無いので、レコードのものをそのまま採用する。

use super::ModelId;
use serde::{Deserialize, Serialize};

/// AR 配置面
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Floor,
    Wall,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Floor => "floor",
            Placement::Wall => "wall",
        }
    }

    /// "floor" / "wall"（大文字小文字は無視）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor" => Some(Placement::Floor),
            "wall" => Some(Placement::Wall),
            _ => None,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表示・AR 設定一式
///
/// 既定値レコードとして使うほか、マージ後の実効値もこの型で持つ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// "x y z"
    pub ar_scale: String,
    pub ar_placement: Placement,
    pub auto_rotate: bool,
    /// ミリ秒
    pub auto_rotate_delay: u32,
    /// 角度文字列（例: "30deg"）
    pub rotation_speed: String,
    pub camera_controls: bool,
    pub shadow_intensity: f64,
    pub exposure: f64,
    pub environment_image: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ar_scale: "1 1 1".to_string(),
            ar_placement: Placement::Floor,
            auto_rotate: true,
            auto_rotate_delay: 3000,
            rotation_speed: "30deg".to_string(),
            camera_controls: true,
            shadow_intensity: 1.0,
            exposure: 1.0,
            environment_image: "neutral".to_string(),
        }
    }
}

/// レコード側の上書き値（存在するキーだけが既定値に勝つ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_placement: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_rotate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_rotate_delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_controls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_image: Option<String>,
}

impl DisplayOverrides {
    /// 既定値に上書きを重ねた実効値を返す（`base` は変更しない）
    pub fn apply(&self, base: &DisplaySettings) -> DisplaySettings {
        DisplaySettings {
            ar_scale: self.ar_scale.clone().unwrap_or_else(|| base.ar_scale.clone()),
            ar_placement: self.ar_placement.unwrap_or(base.ar_placement),
            auto_rotate: self.auto_rotate.unwrap_or(base.auto_rotate),
            auto_rotate_delay: self.auto_rotate_delay.unwrap_or(base.auto_rotate_delay),
            rotation_speed: self
                .rotation_speed
                .clone()
                .unwrap_or_else(|| base.rotation_speed.clone()),
            camera_controls: self.camera_controls.unwrap_or(base.camera_controls),
            shadow_intensity: self.shadow_intensity.unwrap_or(base.shadow_intensity),
            exposure: self.exposure.unwrap_or(base.exposure),
            environment_image: self
                .environment_image
                .clone()
                .unwrap_or_else(|| base.environment_image.clone()),
        }
    }

    /// 全キーを埋めた上書き（実効値をレコードへ戻すときに使う）
    pub fn from_settings(s: &DisplaySettings) -> Self {
        Self {
            ar_scale: Some(s.ar_scale.clone()),
            ar_placement: Some(s.ar_placement),
            auto_rotate: Some(s.auto_rotate),
            auto_rotate_delay: Some(s.auto_rotate_delay),
            rotation_speed: Some(s.rotation_speed.clone()),
            camera_controls: Some(s.camera_controls),
            shadow_intensity: Some(s.shadow_intensity),
            exposure: Some(s.exposure),
            environment_image: Some(s.environment_image.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// プロジェクト情報（表示用の説明のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

/// ページのテーマ（表示層が使う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub background_color: String,
    pub title: String,
}

/// 1 つの 3D アセットとその表示ポリシー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: ModelId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client: String,
    /// GLB / GLTF のパスまたは URL
    #[serde(default)]
    pub src: String,
    /// 空文字はポスター無し
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub poster: String,
    #[serde(flatten)]
    pub display: DisplayOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_orbit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_info: Option<ProjectInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl ModelRecord {
    /// ID だけを持つ空のレコード
    pub fn new(id: impl Into<ModelId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            client: String::new(),
            src: String::new(),
            poster: String::new(),
            display: DisplayOverrides::default(),
            camera_orbit: None,
            project_info: None,
            theme: None,
        }
    }

    /// `defaults ⊕ self`
    pub fn merge(&self, defaults: &DisplaySettings) -> EffectiveConfig {
        EffectiveConfig {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            client: self.client.clone(),
            src: self.src.clone(),
            poster: self.poster.clone(),
            display: self.display.apply(defaults),
            camera_orbit: self.camera_orbit.clone(),
            project_info: self.project_info.clone(),
            theme: self.theme.clone(),
        }
    }
}

/// 既定値とレコードをマージした実効設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub id: ModelId,
    pub name: String,
    pub description: String,
    pub client: String,
    pub src: String,
    pub poster: String,
    #[serde(flatten)]
    pub display: DisplaySettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_orbit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_info: Option<ProjectInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl EffectiveConfig {
    /// 全キーを上書きとして持つレコードに戻す
    pub fn to_record(&self) -> ModelRecord {
        ModelRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            client: self.client.clone(),
            src: self.src.clone(),
            poster: self.poster.clone(),
            display: DisplayOverrides::from_settings(&self.display),
            camera_orbit: self.camera_orbit.clone(),
            project_info: self.project_info.clone(),
            theme: self.theme.clone(),
        }
    }

    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DisplaySettings {
        DisplaySettings::default()
    }

    #[test]
    fn test_merge_keeps_defaults_for_absent_keys() {
        let mut rec = ModelRecord::new("chair");
        rec.src = "chair.glb".to_string();
        let eff = rec.merge(&defaults());
        assert_eq!(eff.id, ModelId::new("chair"));
        assert_eq!(eff.src, "chair.glb");
        assert_eq!(eff.display, defaults());
    }

    #[test]
    fn test_merge_record_wins_on_conflict() {
        let mut rec = ModelRecord::new("site");
        rec.display.ar_scale = Some("0.1 0.1 0.1".to_string());
        rec.display.ar_placement = Some(Placement::Wall);
        rec.display.auto_rotate = Some(false);
        let eff = rec.merge(&defaults());
        assert_eq!(eff.display.ar_scale, "0.1 0.1 0.1");
        assert_eq!(eff.display.ar_placement, Placement::Wall);
        assert!(!eff.display.auto_rotate);
        assert_eq!(eff.display.exposure, defaults().exposure);
        assert_eq!(eff.display.rotation_speed, defaults().rotation_speed);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut rec = ModelRecord::new("site");
        rec.display.exposure = Some(1.4);
        rec.camera_orbit = Some("0deg 75deg 2m".to_string());
        let once = rec.merge(&defaults());
        let twice = once.to_record().merge(&defaults());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_does_not_touch_defaults() {
        let d = defaults();
        let mut rec = ModelRecord::new("x");
        rec.display.ar_scale = Some("2 2 2".to_string());
        let _ = rec.merge(&d);
        assert_eq!(d, defaults());
    }

    #[test]
    fn test_nested_objects_taken_wholesale() {
        let mut rec = ModelRecord::new("x");
        rec.theme = Some(Theme {
            primary_color: "#123456".to_string(),
            background_color: "#ffffff".to_string(),
            title: "X".to_string(),
        });
        let eff = rec.merge(&defaults());
        assert_eq!(eff.theme, rec.theme);
        assert_eq!(eff.project_info, None);
    }

    #[test]
    fn test_record_json_uses_camel_case_and_skips_absent() {
        let mut rec = ModelRecord::new("site");
        rec.display.ar_scale = Some("0.1 0.1 0.1".to_string());
        rec.project_info = Some(ProjectInfo {
            date: "2024".to_string(),
            kind: "Architecture".to_string(),
            status: "Completed".to_string(),
        });
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["arScale"], "0.1 0.1 0.1");
        assert_eq!(v["projectInfo"]["type"], "Architecture");
        assert!(v.get("autoRotate").is_none());
        assert!(v.get("poster").is_none());
    }

    #[test]
    fn test_record_parses_partial_json() {
        let rec: ModelRecord =
            serde_json::from_str(r#"{"id":"chair","src":"chair.glb","arPlacement":"wall"}"#).unwrap();
        assert_eq!(rec.src, "chair.glb");
        assert_eq!(rec.display.ar_placement, Some(Placement::Wall));
        assert_eq!(rec.display.ar_scale, None);
        assert!(rec.poster.is_empty());
    }

    #[test]
    fn test_placement_parse() {
        assert_eq!(Placement::parse("Floor"), Some(Placement::Floor));
        assert_eq!(Placement::parse(" wall "), Some(Placement::Wall));
        assert_eq!(Placement::parse("ceiling"), None);
        assert_eq!(Placement::Wall.to_string(), "wall");
    }
}
