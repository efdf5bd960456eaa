//! Scanned-document cleanup
//!
//! Grayscale conversion plus hard-threshold binarization. Produces a clean
//! black-and-white PNG suitable for archival or OCR downstream.

use std::io::Cursor;

use image::ImageFormat;

use crate::error::ProcessError;

const BINARIZE_THRESHOLD: u8 = 160;

/// Clean up a scanned page image: grayscale, binarize, re-encode as PNG.
pub fn cleanup_scan(data: &[u8]) -> Result<Vec<u8>, ProcessError> {
    if data.is_empty() {
        return Err(ProcessError::EmptyInput);
    }

    let img = image::load_from_memory(data)
        .map_err(|e| ProcessError::ImageDecode(e.to_string()))?;

    let mut gray = img.to_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > BINARIZE_THRESHOLD { 255 } else { 0 };
    }

    let mut out = Vec::new();
    gray.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| ProcessError::ImageEncode(e.to_string()))?;

    Ok(out)
}

/// Decode an image to validate it, returning (width, height, format name).
pub fn probe_image(data: &[u8]) -> Result<(u32, u32, String), ProcessError> {
    if data.is_empty() {
        return Err(ProcessError::EmptyInput);
    }
    let format = image::guess_format(data)
        .map(|f| format!("{:?}", f).to_lowercase())
        .unwrap_or_else(|_| "unknown".to_string());
    let img = image::load_from_memory(data)
        .map_err(|e| ProcessError::ImageDecode(e.to_string()))?;
    Ok((img.width(), img.height(), format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn sample_png() -> Vec<u8> {
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(0, 0, Luma([10]));
        img.put_pixel(1, 0, Luma([200]));
        img.put_pixel(2, 2, Luma([160]));
        img.put_pixel(3, 3, Luma([161]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_cleanup_binarizes_to_black_and_white() {
        let cleaned = cleanup_scan(&sample_png()).unwrap();
        let img = image::load_from_memory(&cleaned).unwrap().to_luma8();
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 255);
        // At the threshold stays black, just above goes white.
        assert_eq!(img.get_pixel(2, 2).0[0], 0);
        assert_eq!(img.get_pixel(3, 3).0[0], 255);
    }

    #[test]
    fn test_cleanup_rejects_non_image() {
        assert!(matches!(
            cleanup_scan(b"not an image"),
            Err(ProcessError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_probe_image_reports_dimensions() {
        let (w, h, format) = probe_image(&sample_png()).unwrap();
        assert_eq!((w, h), (4, 4));
        assert_eq!(format, "png");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(cleanup_scan(&[]), Err(ProcessError::EmptyInput)));
        assert!(matches!(probe_image(&[]), Err(ProcessError::EmptyInput)));
    }
}
