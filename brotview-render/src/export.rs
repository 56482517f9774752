//! PNG export with embedded view metadata (tEXt chunks).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use brotview_core::{FractalKind, Window};

use crate::buffer::PixelBuffer;

/// View state to embed in an exported PNG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportMetadata {
    pub kind: FractalKind,
    pub window: Window,
    pub zoomed: f64,
    pub max_iterations: u32,
}

/// Write a buffer as an RGBA PNG file with embedded metadata.
///
/// Uses the `png` crate directly so custom tEXt chunks can be added; they
/// are readable by exiftool and most image viewers.
pub fn export_png(buffer: &PixelBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_png(buffer, &mut writer, metadata)?;
    writer.flush()?;
    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

/// Encode a buffer as PNG into any writer.
pub fn encode_png<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Brotview".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - Window: {}, Zoom: {}, Iterations: {}",
        meta.kind.label(),
        meta.window,
        meta.zoomed,
        meta.max_iterations,
    );
    if let Some(c) = meta.kind.julia_c() {
        desc.push_str(&format!(", Julia C: {c}"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let w = &meta.window;
    let mut pairs = vec![
        ("Brotview.Fractal".into(), meta.kind.label().to_string()),
        (
            "Brotview.Window".into(),
            format!("{} {} {} {}", w.x_min, w.x_max, w.y_min, w.y_max),
        ),
        ("Brotview.Zoom".into(), meta.zoomed.to_string()),
        (
            "Brotview.MaxIterations".into(),
            meta.max_iterations.to_string(),
        ),
    ];
    if let Some(c) = meta.kind.julia_c() {
        pairs.push(("Brotview.JuliaC".into(), format!("{} {}", c.re, c.im)));
    }
    pairs
}
