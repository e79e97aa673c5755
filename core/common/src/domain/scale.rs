//! 実寸から AR スケール文字列（"x y z"）への変換と名前付きプリセット

use std::str::FromStr;

const CENTIMETERS_PER_METER: f64 = 100.0;
const METERS_PER_FOOT: f64 = 0.3048;

/// メートル値を 3 軸同一のスケール文字列にする
pub fn from_meters(m: f64) -> String {
    let axis = format_axis(m);
    format!("{axis} {axis} {axis}")
}

pub fn from_centimeters(cm: f64) -> String {
    from_meters(cm / CENTIMETERS_PER_METER)
}

pub fn from_feet(ft: f64) -> String {
    from_meters(ft * METERS_PER_FOOT)
}

// f64 の Display は往復可能な最短表記（1.0 は "1"）
fn format_axis(v: f64) -> String {
    format!("{}", v)
}

/// "x y z" を 3 つの数値に分解する。要素数や数値でない要素があれば None。
pub fn parse_scale(s: &str) -> Option<[f64; 3]> {
    let mut parts = s.split_whitespace().map(|p| p.parse::<f64>().ok());
    let x = parts.next()??;
    let y = parts.next()??;
    let z = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some([x, y, z])
}

/// 実寸クラスごとのスケールプリセット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePreset {
    Architectural,
    Furniture,
    Product,
    Building,
    Landscape,
}

impl ScalePreset {
    /// メニュー表示順
    pub const ALL: [ScalePreset; 5] = [
        ScalePreset::Architectural,
        ScalePreset::Furniture,
        ScalePreset::Product,
        ScalePreset::Building,
        ScalePreset::Landscape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalePreset::Architectural => "architectural",
            ScalePreset::Furniture => "furniture",
            ScalePreset::Product => "product",
            ScalePreset::Building => "building",
            ScalePreset::Landscape => "landscape",
        }
    }

    pub fn scale(&self) -> &'static str {
        match self {
            ScalePreset::Architectural => "0.1 0.1 0.1",
            ScalePreset::Furniture => "1 1 1",
            ScalePreset::Product => "1 1 1",
            ScalePreset::Building => "0.01 0.01 0.01",
            ScalePreset::Landscape => "0.001 0.001 0.001",
        }
    }

    /// メニュー用の説明
    pub fn description(&self) -> &'static str {
        match self {
            ScalePreset::Architectural => "Architectural model (1:10)",
            ScalePreset::Furniture => "Furniture / real size (1:1)",
            ScalePreset::Product => "Product / real size (1:1)",
            ScalePreset::Building => "Building (1:100)",
            ScalePreset::Landscape => "Landscape / site (1:1000)",
        }
    }
}

impl FromStr for ScalePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ScalePreset::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| format!("unknown scale preset: {}", s))
    }
}

impl std::fmt::Display for ScalePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
