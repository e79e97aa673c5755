//! QR 画像（PNG / SVG）とプレビューページの出力
//!
//! URL を検証してからエンコードし、3 つとも揃ってから書き出す。

use crate::domain::{QrFormat, QrOptions};
use crate::ports::outbound::{QrEncoder, QrImages};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::domain::escape_html;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_OUTPUT_STEM: &str = "qr-code";

/// 書き出したファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub url: String,
    pub png_path: PathBuf,
    pub svg_path: PathBuf,
    pub html_path: PathBuf,
    pub pixel_size: u32,
}

pub struct ExportQrUseCase {
    encoder: Arc<dyn QrEncoder>,
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Log>,
}

/// 出力先の拡張子を除いた部分（未指定なら ./qr-code）
fn output_stem(output: Option<&Path>) -> PathBuf {
    match output {
        Some(p) => p.with_extension(""),
        None => PathBuf::from(DEFAULT_OUTPUT_STEM),
    }
}

/// 標準の URL 構文として解析できること（相対 URL は不可）
pub fn validate_url(input: &str) -> Result<url::Url, Error> {
    url::Url::parse(input.trim()).map_err(|e| Error::invalid_url(input, e))
}

impl ExportQrUseCase {
    pub fn new(encoder: Arc<dyn QrEncoder>, fs: Arc<dyn FileSystem>, logger: Arc<dyn Log>) -> Self {
        Self { encoder, fs, logger }
    }

    pub fn run(&self, input: &str, output: Option<&Path>, options: &QrOptions) -> Result<ExportResult, Error> {
        let url = validate_url(input)?;
        let target = url.as_str().to_string();
        let images = self.encoder.encode(&target, options)?;
        let html = render_preview_page(&target, &images, options.format);

        let stem = output_stem(output);
        let result = ExportResult {
            url: target,
            png_path: stem.with_extension("png"),
            svg_path: stem.with_extension("svg"),
            html_path: stem.with_extension("html"),
            pixel_size: images.pixel_size,
        };
        self.fs.ensure_parent(&stem)?;
        let encoding_io = |e: Error| Error::encoding(e.to_string());
        self.fs.write_bytes(&result.png_path, &images.png).map_err(encoding_io)?;
        self.fs.write(&result.svg_path, &images.svg).map_err(encoding_io)?;
        self.fs.write(&result.html_path, &html).map_err(encoding_io)?;

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "qr exported")
                .layer("usecase")
                .kind("export")
                .field("url", result.url.clone())
                .field("png", result.png_path.display().to_string())
                .field("modules", images.modules as u64),
        );
        Ok(result)
    }
}

const INSTRUCTIONS: [&str; 4] = [
    "Open the camera app on your phone or tablet.",
    "Point the camera at the QR code.",
    "Tap the link that appears to open the 3D model.",
    "Tap \"View in AR\" to place the model in your space.",
];

/// 画像をインラインで埋め込んだ単体の HTML ページ
pub fn render_preview_page(url: &str, images: &QrImages, format: QrFormat) -> String {
    let image = match format {
        QrFormat::Png => format!(
            "<img src=\"data:image/png;base64,{}\" width=\"{}\" height=\"{}\" alt=\"QR code\">",
            STANDARD.encode(&images.png),
            images.pixel_size,
            images.pixel_size
        ),
        QrFormat::Svg => images.svg.trim_end().to_string(),
    };
    let steps: String = INSTRUCTIONS
        .iter()
        .map(|s| format!("      <li>{}</li>\n", escape_html(s)))
        .collect();
    let url = escape_html(url);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>AR Model QR Code</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; text-align: center; }}
    .qr {{ display: inline-block; padding: 1rem; border: 1px solid #e2e8f0; border-radius: 0.5rem; }}
    ol {{ text-align: left; }}
  </style>
</head>
<body>
  <h1>Scan to view in AR</h1>
  <div class="qr">{image}</div>
  <p><a href="{url}">{url}</a></p>
  <section>
    <h2>How to use</h2>
    <ol>
{steps}    </ol>
  </section>
</body>
</html>
"#,
        image = image,
        url = url,
        steps = steps,
    )
}
