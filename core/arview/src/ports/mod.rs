//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: 対話入力・QR エンコード等の trait（common の FileSystem / ModelStore / Log も利用）

pub mod inbound;
pub mod outbound;
