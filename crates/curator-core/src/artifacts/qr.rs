//! QR code encoding

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use curator_shared::constants::DEFAULT_QR_MIN_SIZE;

use crate::error::DomainError;

/// Encodes text into a greyscale PNG QR code.
///
/// Equal input yields an equal symbol; pixel output may change across
/// encoder versions, only decodability is stable.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    min_size: u32,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self { min_size: DEFAULT_QR_MIN_SIZE }
    }
}

impl QrEncoder {
    pub fn new(min_size: u32) -> Self {
        Self { min_size: min_size.max(21) }
    }

    /// Encode the lines joined with `\n`.
    pub fn encode_png(&self, lines: &[&str]) -> Result<Vec<u8>, DomainError> {
        let text = lines.join("\n");
        let code = QrCode::new(text.as_bytes())
            .map_err(|e| DomainError::RenderError(format!("QR encoding failed: {}", e)))?;

        let rendered = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(rendered)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| DomainError::RenderError(format!("PNG encoding failed: {}", e)))?;
        Ok(bytes)
    }

    /// Base64 of the PNG, for embedding in JSON responses.
    pub fn encode_base64(&self, lines: &[&str]) -> Result<String, DomainError> {
        Ok(STANDARD.encode(self.encode_png(lines)?))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn decode_png(png: &[u8]) -> String {
        let img = image::load_from_memory(png).unwrap().to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            img.width() as usize,
            img.height() as usize,
            |x, y| img.get_pixel(x as u32, y as u32)[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
        let (_, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn test_png_decodes_to_input() {
        let url = "https://curator.example.com/personalized-list/5f0c6f1e-8a43-4d36-9c53-0d6b1a3f2e10";
        let png = QrEncoder::default().encode_png(&[url]).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_png(&png), url);
    }

    #[test]
    fn test_multiple_lines_are_joined() {
        let png = QrEncoder::default()
            .encode_png(&["https://a.example/1", "https://b.example/2"])
            .unwrap();
        assert_eq!(decode_png(&png), "https://a.example/1\nhttps://b.example/2");
    }

    #[test]
    fn test_same_input_same_content() {
        let encoder = QrEncoder::new(128);
        let first = encoder.encode_base64(&["https://curator.example.com/x"]).unwrap();
        let second = encoder.encode_base64(&["https://curator.example.com/x"]).unwrap();

        let decode = |b64: &str| decode_png(&STANDARD.decode(b64).unwrap());
        assert_eq!(decode(&first), decode(&second));
    }
}
