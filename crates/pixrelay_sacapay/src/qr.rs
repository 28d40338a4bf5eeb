// --- File: crates/pixrelay_sacapay/src/qr.rs ---
//! Renders a textual PIX payment code as a base64-encoded PNG QR image.
//!
//! Rendering failures never fail the surrounding payment operation: callers
//! get `None` and must treat it as "no visual code available".

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use image::Luma;
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;
use tracing::warn;

// Pixel width/height of one QR module
const MODULE_SIZE: u32 = 10;

#[derive(Error, Debug)]
enum QrRenderError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("PNG serialization failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Renders `pix_code` as a black-on-white QR code and returns the PNG bytes
/// base64-encoded for embedding in JSON.
///
/// Error-correction level L, 10x10 pixel modules, standard quiet zone.
/// Deterministic: the same input always produces identical output.
/// Returns `None` for empty input and on any rendering failure.
pub fn render_base64_png(pix_code: &str) -> Option<String> {
    if pix_code.is_empty() {
        warn!("Refusing to render QR code for empty PIX code");
        return None;
    }
    match render_png(pix_code) {
        Ok(png_bytes) => Some(base64_engine.encode(png_bytes)),
        Err(e) => {
            warn!("Failed to render PIX QR code: {}", e);
            None
        }
    }
}

fn render_png(pix_code: &str) -> Result<Vec<u8>, QrRenderError> {
    let code = QrCode::with_error_correction_level(pix_code, EcLevel::L)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .quiet_zone(true)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PIX: &str =
        "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-4266554400005204000053039865802BR";

    #[test]
    fn renders_a_non_empty_base64_string() {
        let encoded = render_base64_png(SAMPLE_PIX).expect("rendering should succeed");
        assert!(!encoded.is_empty());
    }

    #[test]
    fn output_decodes_to_a_png_image() {
        let encoded = render_base64_png(SAMPLE_PIX).unwrap();
        let bytes = base64_engine.decode(encoded).expect("valid base64");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_base64_png(SAMPLE_PIX).unwrap();
        let second = render_base64_png(SAMPLE_PIX).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_image() {
        assert!(render_base64_png("").is_none());
    }

    #[test]
    fn different_codes_produce_different_images() {
        let a = render_base64_png("payment-code-a").unwrap();
        let b = render_base64_png("payment-code-b").unwrap();
        assert_ne!(a, b);
    }
}
