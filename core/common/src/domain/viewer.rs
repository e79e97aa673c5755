//! ビューアコンポーネントへ渡す属性セット
//!
//! 真偽値は型として bool のまま持ち、存在/不在の属性に変えるのはこの境界だけ。

use super::model::EffectiveConfig;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// 既定の AR モード（WebXR → Scene Viewer → Quick Look の順に試す）
pub const DEFAULT_AR_MODES: [&str; 3] = ["webxr", "scene-viewer", "quick-look"];

/// 属性値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// 値を持たない存在のみの属性
    Flag,
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Flag => None,
            AttributeValue::Text(s) => Some(s),
        }
    }
}

/// 順序付きの属性名 → 値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerAttributes {
    entries: Vec<(String, AttributeValue)>,
}

impl ViewerAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同名があれば置き換える
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, AttributeValue::Text(value.into()));
    }

    /// true なら属性を置き、false なら取り除く
    pub fn set_flag(&mut self, name: &str, on: bool) {
        if on {
            self.set(name, AttributeValue::Flag);
        } else {
            self.entries.retain(|(n, _)| n != name);
        }
    }

    fn set(&mut self, name: &str, value: AttributeValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_text)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// HTML 属性列（`src="a.glb" ar camera-controls`）
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| match value {
                AttributeValue::Flag => name.clone(),
                AttributeValue::Text(v) => format!("{}=\"{}\"", name, escape_html(v)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// JSON では存在のみの属性を空文字で表す
impl Serialize for ViewerAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value.as_text().unwrap_or(""))?;
        }
        map.end()
    }
}

/// 数値属性の表記（1.0 は "1"）
pub(crate) fn format_number(v: f64) -> String {
    format!("{}", v)
}

/// HTML テキスト・属性値のエスケープ
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl EffectiveConfig {
    /// モデルページ用の属性セット
    pub fn viewer_attributes(&self) -> ViewerAttributes {
        let d = &self.display;
        let mut attrs = ViewerAttributes::new();
        attrs.set_text("src", &self.src);
        if self.has_poster() {
            attrs.set_text("poster", &self.poster);
        }
        let alt = if self.name.is_empty() { self.id.to_string() } else { self.name.clone() };
        attrs.set_text("alt", alt);
        attrs.set_flag("ar", true);
        attrs.set_text("ar-modes", DEFAULT_AR_MODES.join(" "));
        attrs.set_text("ar-scale", &d.ar_scale);
        attrs.set_text("ar-placement", d.ar_placement.as_str());
        attrs.set_flag("camera-controls", d.camera_controls);
        if let Some(orbit) = &self.camera_orbit {
            attrs.set_text("camera-orbit", orbit);
        }
        attrs.set_flag("auto-rotate", d.auto_rotate);
        attrs.set_text("auto-rotate-delay", d.auto_rotate_delay.to_string());
        attrs.set_text("rotation-per-second", &d.rotation_speed);
        attrs.set_text("environment-image", &d.environment_image);
        attrs.set_text("exposure", format_number(d.exposure));
        attrs.set_text("shadow-intensity", format_number(d.shadow_intensity));
        attrs
    }
}
