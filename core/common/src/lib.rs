//! arview 共通ライブラリ
//!
//! モデル設定のマージ・レジストリ・レコード組み立てと、CLI が使う ports / adapters を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（モデルレコード・既定値・スケール・ビューア属性・ページ設定）
pub mod domain;

/// モデルレジストリ（既定値 ⊕ レコード）
pub mod registry;

/// 新規レコードの組み立て
pub mod builder;

pub mod ports;

pub mod adapter;
