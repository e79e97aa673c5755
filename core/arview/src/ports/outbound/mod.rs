//! Outbound ポート（arview 固有）

pub mod qr_encoder;
pub mod record_prompt;

pub use qr_encoder::{QrEncoder, QrImages};
pub use record_prompt::RecordPrompt;
