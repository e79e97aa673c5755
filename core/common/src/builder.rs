//! 新規モデルレコードの組み立て
//!
//! 対話入力でもフラグ指定でも同じ RecordInputs を通す。ここで作ったレコードを
//! ModelRegistry::add に渡し、その後 ModelStore に追記する。

use crate::domain::scale::{parse_scale, ScalePreset};
use crate::domain::{ModelId, ModelRecord, Placement, ProjectInfo, Theme};
use crate::error::Error;

pub const DEFAULT_PROJECT_DATE: &str = "2024";
pub const DEFAULT_PROJECT_TYPE: &str = "3D Model";
pub const DEFAULT_PROJECT_STATUS: &str = "Completed";
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f8fafc";

const MODELS_DIR: &str = "models/";
const POSTERS_DIR: &str = "posters/";

/// スケールの選び方（プリセットか手入力）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleChoice {
    Preset(ScalePreset),
    Custom(String),
}

impl Default for ScaleChoice {
    fn default() -> Self {
        ScaleChoice::Preset(ScalePreset::Furniture)
    }
}

impl ScaleChoice {
    /// プリセット名なら Preset、それ以外は Custom として受け取る
    pub fn parse(s: &str) -> Self {
        match s.parse::<ScalePreset>() {
            Ok(p) => ScaleChoice::Preset(p),
            Err(_) => ScaleChoice::Custom(s.trim().to_string()),
        }
    }

    /// "x y z" を返す。手入力は 3 つの正の数であること。
    pub fn resolve(&self) -> Result<String, Error> {
        match self {
            ScaleChoice::Preset(p) => Ok(p.scale().to_string()),
            ScaleChoice::Custom(s) => match parse_scale(s) {
                Some(axes) if axes.iter().all(|v| v.is_finite() && *v > 0.0) => {
                    Ok(s.split_whitespace().collect::<Vec<_>>().join(" "))
                }
                _ => Err(Error::invalid_argument(format!(
                    "invalid scale '{}': expected three positive numbers like \"0.5 0.5 0.5\"",
                    s
                ))),
            },
        }
    }
}

/// 収集した入力値（未入力は None / 空文字）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInputs {
    pub id: String,
    pub name: String,
    pub description: String,
    pub client: String,
    /// アセットのファイル名またはパス
    pub src: String,
    pub poster: Option<String>,
    pub scale: ScaleChoice,
    pub placement: Option<String>,
    pub project_date: Option<String>,
    pub project_type: Option<String>,
    pub project_status: Option<String>,
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub theme_title: Option<String>,
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// ファイル名だけならディレクトリを前置する（パスや URL はそのまま）
fn asset_path(value: &str, dir: &str) -> String {
    if value.contains('/') || value.contains("://") {
        value.to_string()
    } else {
        format!("{}{}", dir, value)
    }
}

/// 入力からレコードを作る。`id` と `src` が空ならエラー。
pub fn build(inputs: &RecordInputs) -> Result<ModelRecord, Error> {
    let id = inputs.id.trim();
    if id.is_empty() {
        return Err(Error::invalid_argument("model id is required"));
    }
    let src = inputs.src.trim();
    if src.is_empty() {
        return Err(Error::invalid_argument("model file (src) is required"));
    }

    let placement = match inputs.placement.as_deref().map(str::trim) {
        None | Some("") => Placement::default(),
        Some(p) => Placement::parse(p).ok_or_else(|| {
            Error::invalid_argument(format!("invalid placement '{}': expected floor or wall", p))
        })?,
    };
    let ar_scale = inputs.scale.resolve()?;
    let name = inputs.name.trim().to_string();

    let mut record = ModelRecord::new(ModelId::new(id));
    record.name = name.clone();
    record.description = inputs.description.trim().to_string();
    record.client = inputs.client.trim().to_string();
    record.src = asset_path(src, MODELS_DIR);
    record.poster = inputs
        .poster
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| asset_path(p, POSTERS_DIR))
        .unwrap_or_default();
    record.display.ar_scale = Some(ar_scale);
    record.display.ar_placement = Some(placement);
    record.project_info = Some(ProjectInfo {
        date: or_default(&inputs.project_date, DEFAULT_PROJECT_DATE),
        kind: or_default(&inputs.project_type, DEFAULT_PROJECT_TYPE),
        status: or_default(&inputs.project_status, DEFAULT_PROJECT_STATUS),
    });
    record.theme = Some(Theme {
        primary_color: or_default(&inputs.primary_color, DEFAULT_PRIMARY_COLOR),
        background_color: or_default(&inputs.background_color, DEFAULT_BACKGROUND_COLOR),
        title: or_default(&inputs.theme_title, &name),
    });
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RecordInputs {
        RecordInputs {
            id: "terraced-scene".to_string(),
            name: "Terraced Scene".to_string(),
            description: "Hillside terraces".to_string(),
            client: "Acme".to_string(),
            src: "terraced-scene.glb".to_string(),
            ..RecordInputs::default()
        }
    }

    #[test]
    fn test_build_fills_defaults() {
        let rec = build(&inputs()).unwrap();
        assert_eq!(rec.id.as_ref(), "terraced-scene");
        assert_eq!(rec.src, "models/terraced-scene.glb");
        assert!(rec.poster.is_empty());
        assert_eq!(rec.display.ar_scale.as_deref(), Some("1 1 1"));
        assert_eq!(rec.display.ar_placement, Some(Placement::Floor));
        let info = rec.project_info.unwrap();
        assert_eq!(info.date, "2024");
        assert_eq!(info.kind, "3D Model");
        let theme = rec.theme.unwrap();
        assert_eq!(theme.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(theme.title, "Terraced Scene");
    }

    #[test]
    fn test_build_requires_id_and_src() {
        let mut i = inputs();
        i.id = "  ".to_string();
        assert!(matches!(build(&i), Err(Error::InvalidArgument(_))));

        let mut i = inputs();
        i.src = String::new();
        assert!(matches!(build(&i), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_build_with_preset_poster_and_wall() {
        let mut i = inputs();
        i.scale = ScaleChoice::Preset(ScalePreset::Architectural);
        i.poster = Some("terraced.webp".to_string());
        i.placement = Some("wall".to_string());
        i.project_date = Some("2025".to_string());
        let rec = build(&i).unwrap();
        assert_eq!(rec.display.ar_scale.as_deref(), Some("0.1 0.1 0.1"));
        assert_eq!(rec.poster, "posters/terraced.webp");
        assert_eq!(rec.display.ar_placement, Some(Placement::Wall));
        assert_eq!(rec.project_info.unwrap().date, "2025");
    }

    #[test]
    fn test_paths_and_urls_are_kept() {
        let mut i = inputs();
        i.src = "https://cdn.example.com/a.glb".to_string();
        i.poster = Some("img/a.png".to_string());
        let rec = build(&i).unwrap();
        assert_eq!(rec.src, "https://cdn.example.com/a.glb");
        assert_eq!(rec.poster, "img/a.png");
    }

    #[test]
    fn test_invalid_placement_rejected() {
        let mut i = inputs();
        i.placement = Some("ceiling".to_string());
        assert!(matches!(build(&i), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_custom_scale() {
        assert_eq!(ScaleChoice::parse("landscape"), ScaleChoice::Preset(ScalePreset::Landscape));
        assert_eq!(
            ScaleChoice::parse(" 0.5  0.5 0.5").resolve().unwrap(),
            "0.5 0.5 0.5"
        );
        assert!(ScaleChoice::parse("0 1 1").resolve().is_err());
        assert!(ScaleChoice::parse("big").resolve().is_err());
    }

    #[test]
    fn test_built_record_is_accepted_by_registry() {
        let mut reg = crate::registry::ModelRegistry::new(Default::default());
        let eff = reg.add(build(&inputs()).unwrap()).unwrap();
        assert_eq!(eff.display.ar_scale, "1 1 1");
        assert!(reg.get("terraced-scene").is_some());
    }
}
