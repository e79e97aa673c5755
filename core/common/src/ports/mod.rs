//! ポート定義
//!
//! common は outbound（FS・環境変数・ログ・モデルストア）のみを持つ。
//! 入り口（inbound）は各バイナリ側で定義する。

pub mod outbound;
