use anyhow::{anyhow, Result};
use resvg::render;
use tiny_skia::{Pixmap, Transform};
use usvg::{Options, Tree};

use crate::utils::generate_qr_code;

/// QR code for `data` as PNG bytes, ready to send as a photo.
pub fn qr_code_png(data: &str) -> Result<Vec<u8>> {
    let svg = generate_qr_code(data)?;
    convert_svg_to_png(&svg)
}

/// Converts SVG (as bytes) to PNG.
pub fn convert_svg_to_png(svg_data: &[u8]) -> Result<Vec<u8>> {
    let tree = Tree::from_data(svg_data, &Options::default())
        .map_err(|e| anyhow!("Error parsing SVG: {}", e))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("Failed to create Pixmap"))?;
    render(&tree, Transform::default(), &mut pixmap.as_mut());

    // Encode Pixmap (RGBA) to PNG
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }

    Ok(png_data)
}
