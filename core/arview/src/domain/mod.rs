//! arview CLI のドメイン型

pub mod command;
pub mod qr;

pub use command::{AddModelArgs, Command, ScaleRequest};
pub use qr::{ErrorCorrection, QrFormat, QrOptions, Rgb, MAX_QR_MARGIN, MAX_QR_WIDTH};
