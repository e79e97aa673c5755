//! QR 出力のオプション

use common::error::Error;
use std::str::FromStr;

/// プレビューページに埋め込む主画像の形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

impl FromStr for QrFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(QrFormat::Png),
            "svg" => Ok(QrFormat::Svg),
            _ => Err(format!("unsupported format '{}': expected png or svg", s)),
        }
    }
}

/// 誤り訂正レベル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(format!("invalid error correction level '{}': expected L, M, Q or H", s)),
        }
    }
}

/// "#rrggbb" / "#rgb"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([0xff, 0xff, 0xff]);

    pub fn parse(s: &str) -> Result<Self, Error> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || Error::encoding(format!("invalid color '{}': expected #rrggbb", s));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(bad()),
        };
        let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| bad());
        Ok(Rgb([byte(0)?, byte(2)?, byte(4)?]))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// 画像幅の上限（px）
pub const MAX_QR_WIDTH: u32 = 4096;
/// 余白の上限（モジュール数）
pub const MAX_QR_MARGIN: u32 = 64;

/// QR 出力オプション。色は文字列のまま持ち、エンコード時に検証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    pub format: QrFormat,
    /// 目標の画像幅（px）。モジュール単位の整数倍に切り下げる。1..=MAX_QR_WIDTH
    pub width: u32,
    /// 余白（モジュール数）。0..=MAX_QR_MARGIN
    pub margin: u32,
    pub dark: String,
    pub light: String,
    pub error_correction: ErrorCorrection,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            format: QrFormat::Png,
            width: 512,
            margin: 2,
            dark: Rgb::BLACK.to_hex(),
            light: Rgb::WHITE.to_hex(),
            error_correction: ErrorCorrection::H,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Rgb::parse("#2563eb").unwrap(), Rgb([0x25, 0x63, 0xeb]));
        assert_eq!(Rgb::parse("fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("#000").unwrap().to_hex(), "#000000");
        assert!(matches!(Rgb::parse("#12345"), Err(Error::Encoding(_))));
        assert!(matches!(Rgb::parse("#gggggg"), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_levels_and_formats() {
        assert_eq!("q".parse::<ErrorCorrection>(), Ok(ErrorCorrection::Q));
        assert!("X".parse::<ErrorCorrection>().is_err());
        assert_eq!("SVG".parse::<QrFormat>(), Ok(QrFormat::Svg));
        assert!("gif".parse::<QrFormat>().is_err());
    }

    #[test]
    fn test_default_options() {
        let o = QrOptions::default();
        assert_eq!(o.width, 512);
        assert_eq!(o.error_correction, ErrorCorrection::H);
        assert_eq!(o.dark, "#000000");
    }
}
