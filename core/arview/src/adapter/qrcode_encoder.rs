//! qrcode クレートでモジュール行列を作り、PNG（image）と SVG に描く QrEncoder 実装

use crate::domain::{ErrorCorrection, QrOptions, Rgb, MAX_QR_MARGIN, MAX_QR_WIDTH};
use crate::ports::outbound::{QrEncoder, QrImages};
use common::error::Error;
use image::{ImageFormat, RgbImage};
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;
use std::io::Cursor;

#[derive(Debug, Clone, Default)]
pub struct QrcodeEncoder;

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

/// 余白込みの 1 辺のモジュール数と、モジュールあたりのピクセル数
fn layout(modules: usize, options: &QrOptions) -> Result<(u32, u32), Error> {
    let overflow = || Error::encoding("qr image size overflows");
    let total = u32::try_from(modules)
        .ok()
        .and_then(|m| options.margin.checked_mul(2).and_then(|pad| m.checked_add(pad)))
        .ok_or_else(overflow)?;
    let scale = (options.width / total).max(1);
    total.checked_mul(scale).ok_or_else(overflow)?;
    Ok((total, scale))
}

fn render_png(colors: &[Color], modules: usize, options: &QrOptions, dark: Rgb, light: Rgb) -> Result<(Vec<u8>, u32), Error> {
    let (total, scale) = layout(modules, options)?;
    let size = total * scale;
    let mut img = RgbImage::from_pixel(size, size, image::Rgb(light.0));
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = (i % modules) as u32 + options.margin;
        let my = (i / modules) as u32 + options.margin;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(mx * scale + dx, my * scale + dy, image::Rgb(dark.0));
            }
        }
    }
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| Error::encoding(format!("png: {}", e)))?;
    Ok((buf, size))
}

fn render_svg(colors: &[Color], modules: usize, options: &QrOptions, dark: Rgb, light: Rgb) -> Result<String, Error> {
    let (total, scale) = layout(modules, options)?;
    let size = total * scale;
    let mut path = String::new();
    for (i, color) in colors.iter().enumerate() {
        if *color == Color::Dark {
            let x = (i % modules) as u32 + options.margin;
            let y = (i / modules) as u32 + options.margin;
            let _ = write!(path, "M{} {}h1v1h-1z", x, y);
        }
    }
    Ok(format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" ",
            "viewBox=\"0 0 {total} {total}\" shape-rendering=\"crispEdges\">",
            "<rect width=\"{total}\" height=\"{total}\" fill=\"{light}\"/>",
            "<path d=\"{path}\" fill=\"{dark}\"/></svg>\n"
        ),
        size = size,
        total = total,
        light = light.to_hex(),
        dark = dark.to_hex(),
        path = path,
    ))
}

impl QrEncoder for QrcodeEncoder {
    fn encode(&self, text: &str, options: &QrOptions) -> Result<QrImages, Error> {
        if options.width == 0 || options.width > MAX_QR_WIDTH {
            return Err(Error::encoding(format!("width must be between 1 and {}", MAX_QR_WIDTH)));
        }
        if options.margin > MAX_QR_MARGIN {
            return Err(Error::encoding(format!("margin must be at most {}", MAX_QR_MARGIN)));
        }
        let dark = Rgb::parse(&options.dark)?;
        let light = Rgb::parse(&options.light)?;
        let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level(options.error_correction))
            .map_err(|e| Error::encoding(format!("qr: {}", e)))?;
        let modules = code.width();
        let colors = code.to_colors();
        let (png, pixel_size) = render_png(&colors, modules, options, dark, light)?;
        let svg = render_svg(&colors, modules, options, dark, light)?;
        Ok(QrImages {
            png,
            svg,
            modules,
            pixel_size,
        })
    }
}
