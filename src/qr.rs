use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::config::QrConfig;
use crate::error::QrError;

pub fn parse_ec_level(level: &str) -> Result<EcLevel, QrError> {
    match level.trim().to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(QrError::EcLevel(other.to_string())),
    }
}

/// Renders `text` as an SVG document of `cfg.size` × `cfg.size` pixels.
///
/// The module grid is scaled to the largest whole size that fits; the SVG
/// viewport is stretched to the configured size so the image is exact.
pub fn render_svg(text: &str, cfg: &QrConfig) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), parse_ec_level(&cfg.ec_level)?)?;
    let image = code
        .render::<svg::Color>()
        .max_dimensions(cfg.size, cfg.size)
        .dark_color(svg::Color(&cfg.dark))
        .light_color(svg::Color(&cfg.light))
        .build();
    Ok(fit_viewport(&image, cfg.size))
}

// Drop the XML prolog, replace the pixel width/height of the root element with
// the target size and add a viewBox so the browser scales the drawing.
fn fit_viewport(svg: &str, size: u32) -> String {
    let Some(start) = svg.find("<svg") else { return svg.to_string() };
    let Some(end) = svg[start..].find('>').map(|i| start + i) else { return svg.to_string() };
    let head = &svg[start..end];
    let (Some(w), Some(h)) = (attr(head, "width"), attr(head, "height")) else {
        return svg.to_string();
    };
    let new_head = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {w} {h}\" shape-rendering=\"crispEdges\""
    );
    format!("{}{}", new_head, &svg[end..])
}

fn attr<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    let key = format!(" {}=\"", name);
    let from = head.find(&key)? + key.len();
    let len = head[from..].find('"')?;
    Some(&head[from..from + len])
}
