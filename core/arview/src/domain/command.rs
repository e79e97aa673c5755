//! arview コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の match でディスパッチする。

use super::qr::QrOptions;
use common::builder::RecordInputs;
use std::path::PathBuf;

/// add-model の入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddModelArgs {
    /// フラグで渡された値（対話時は未入力の項目だけ問い合わせる）
    pub inputs: RecordInputs,
    /// --yes: 問い合わせず確認も省く
    pub assume_yes: bool,
}

/// scale コマンドの入力
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleRequest {
    Meters(f64),
    Centimeters(f64),
    Feet(f64),
    Preset(String),
    /// プリセット一覧
    ListPresets,
}

/// arview のサブコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// ヘルプ表示（サブコマンド未指定時も）
    Help,

    /// モデルストアの雛形を書き出す
    Init { force: bool },

    /// モデル一覧（テンプレート除外）
    List,

    /// 実効設定を JSON で表示
    Show { id: String },

    /// ビューア属性を表示
    Attrs { id: String, json: bool },

    /// モデルページ URL
    Url { id: String },

    /// レコードを組み立てて追加・保存
    AddModel(AddModelArgs),

    /// URL から QR を出力
    GenerateQr {
        url: String,
        output: Option<PathBuf>,
        options: QrOptions,
    },

    /// モデル ID のページ URL から QR を出力
    Qr {
        id: String,
        output: Option<PathBuf>,
        options: QrOptions,
    },

    /// ページ設定（ArConfig）の射影を JSON で表示
    PageConfig,

    /// 実寸からスケール文字列へ変換
    Scale(ScaleRequest),
}

impl Command {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Init { .. } => "init",
            Command::List => "list",
            Command::Show { .. } => "show",
            Command::Attrs { .. } => "attrs",
            Command::Url { .. } => "url",
            Command::AddModel(_) => "add-model",
            Command::GenerateQr { .. } => "generate-qr",
            Command::Qr { .. } => "qr",
            Command::PageConfig => "page-config",
            Command::Scale(_) => "scale",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(Command::List.name(), "list");
        assert_eq!(Command::AddModel(AddModelArgs::default()).name(), "add-model");
        assert_eq!(
            Command::GenerateQr {
                url: "https://example.com".to_string(),
                output: None,
                options: QrOptions::default(),
            }
            .name(),
            "generate-qr"
        );
    }
}
