//! PNG export with embedded render parameters (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use mandeltime_core::{IterationBound, PlaneWindow};

use crate::buffer::RgbBuffer;

/// Render parameters to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub title: String,
    pub window: PlaneWindow,
    pub max_iterations: IterationBound,
    /// Size of the escape-value grid, before any upscaling.
    pub grid_width: u32,
    pub grid_height: u32,
    pub palette_name: String,
    pub scale: u32,
}

/// Write an RGB buffer as an 8-bit PNG with the render parameters attached.
///
/// Uses the `png` crate directly so custom tEXt chunks can be injected;
/// they are readable by exiftool and most image viewers.
pub fn export_png(
    buffer: &RgbBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "mandeltime".to_string())?;
    encoder.add_text_chunk("Title".to_string(), metadata.title.clone())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        width = buffer.width,
        height = buffer.height,
        path = %path.display(),
        "Exported PNG"
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let w = &meta.window;
    format!(
        "Mandelbrot escape time - Re: [{}, {}], Im: [{}, {}], Iterations: {}, Grid: {}x{}",
        w.min_x(),
        w.max_x(),
        w.min_y(),
        w.max_y(),
        meta.max_iterations,
        meta.grid_width,
        meta.grid_height,
    )
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let w = &meta.window;
    vec![
        ("mandeltime.MinX".into(), w.min_x().to_string()),
        ("mandeltime.MaxX".into(), w.max_x().to_string()),
        ("mandeltime.MinY".into(), w.min_y().to_string()),
        ("mandeltime.MaxY".into(), w.max_y().to_string()),
        ("mandeltime.MaxIterations".into(), meta.max_iterations.to_string()),
        (
            "mandeltime.Grid".into(),
            format!("{}x{}", meta.grid_width, meta.grid_height),
        ),
        ("mandeltime.Palette".into(), meta.palette_name.clone()),
        ("mandeltime.Scale".into(), meta.scale.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn meta(width: u32, height: u32) -> ExportMetadata {
        ExportMetadata {
            title: "Mandelbrot fractal".into(),
            window: PlaneWindow::REFERENCE,
            max_iterations: IterationBound::DEFAULT,
            grid_width: width,
            grid_height: height,
            palette_name: "viridis".into(),
            scale: 1,
        }
    }

    #[test]
    fn export_creates_valid_png() {
        let buf = RgbBuffer::new(4, 4);
        let dir = std::env::temp_dir().join("mandeltime_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&buf, &path, &meta(4, 4)).expect("export should succeed");

        let mut file = File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let mut buf = RgbBuffer::new(2, 2);
        buf.pixels[0] = 200;
        let dir = std::env::temp_dir().join("mandeltime_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        export_png(&buf, &path, &meta(2, 2)).expect("export should succeed");

        let decoder = png::Decoder::new(File::open(&path).expect("file should exist"));
        let mut reader = decoder.read_info().expect("should read info");
        {
            let info = reader.info();
            assert_eq!((info.width, info.height), (2, 2));
            assert_eq!(info.color_type, png::ColorType::Rgb);
            let texts = &info.uncompressed_latin1_text;
            assert!(
                texts.iter().any(|t| t.keyword == "Software" && t.text == "mandeltime"),
                "Should contain Software text chunk"
            );
            assert!(
                texts.iter().any(|t| t.keyword == "Title" && t.text == "Mandelbrot fractal"),
                "Should contain Title text chunk"
            );
            assert!(
                texts
                    .iter()
                    .any(|t| t.keyword == "mandeltime.MaxIterations" && t.text == "100"),
                "Should contain iteration chunk"
            );
        }

        let mut data = vec![0u8; reader.output_buffer_size()];
        reader.next_frame(&mut data).expect("should decode frame");
        assert_eq!(&data[..12], &buf.pixels[..]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("mandeltime_no_such_dir")
            .join("nested")
            .join("out.png");
        let result = export_png(&RgbBuffer::new(1, 1), &path, &meta(1, 1));
        assert!(matches!(result, Err(crate::RenderError::Io(_))));
    }
}
