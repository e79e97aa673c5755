//! arview 固有のアダプター（対話入力・QR エンコード）
//!
//! FileSystem / ModelStore / Log の標準実装は common::adapter を使う。

pub mod cli_prompt;
pub mod qrcode_encoder;

pub use cli_prompt::CliRecordPrompt;
pub use qrcode_encoder::QrcodeEncoder;
