//! Image decoding and binarization ahead of OCR.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, Limits, Luma};

use super::OcrError;

/// Largest accepted width or height, checked before any pixel is decoded.
pub const MAX_INPUT_DIMENSION: u32 = 4096;

/// Window is `2 * THRESHOLD_RADIUS + 1` pixels square.
const THRESHOLD_RADIUS: u32 = 5;
/// Subtracted from the local mean before comparing.
const THRESHOLD_OFFSET: i64 = 2;

/// Decodes a base64 payload, accepting an optional `data:<mime>;base64,` prefix.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, OcrError> {
    let trimmed = payload.trim();
    let body = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Base64 payload to the binarized PNG handed to the OCR engine.
/// CPU-bound; callers on the runtime go through `spawn_blocking`.
pub fn prepare(payload: &str) -> Result<Vec<u8>, OcrError> {
    let encoded = decode_base64(payload)?;
    let binary = binarize(&encoded)?;
    encode_png(&binary)
}

/// Decodes an encoded image and returns it as a black-and-white bitmap.
pub fn binarize(encoded: &[u8]) -> Result<GrayImage, OcrError> {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_INPUT_DIMENSION);
    limits.max_image_height = Some(MAX_INPUT_DIMENSION);

    let mut reader = ImageReader::new(Cursor::new(encoded)).with_guessed_format()?;
    reader.limits(limits);
    let gray = reader.decode()?.to_luma8();
    Ok(adaptive_threshold(&gray, THRESHOLD_RADIUS, THRESHOLD_OFFSET))
}

/// Local-mean thresholding: a pixel turns white when it is brighter than the
/// mean of its window minus `offset`, black otherwise. Windows are clipped at
/// the image border.
pub fn adaptive_threshold(image: &GrayImage, radius: u32, offset: i64) -> GrayImage {
    let (width, height) = image.dimensions();
    let stride = width as usize + 1;

    // integral[(y + 1) * stride + (x + 1)] = sum of pixels in [0..=x] x [0..=y]
    let mut integral = vec![0u64; stride * (height as usize + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += image.get_pixel(x, y)[0] as u64;
            let idx = (y as usize + 1) * stride + x as usize + 1;
            integral[idx] = integral[idx - stride] + row_sum;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let x0 = x.saturating_sub(radius) as usize;
        let y0 = y.saturating_sub(radius) as usize;
        let x1 = (x + radius).min(width - 1) as usize + 1;
        let y1 = (y + radius).min(height - 1) as usize + 1;

        let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
            - integral[y0 * stride + x1]
            - integral[y1 * stride + x0];
        let area = ((x1 - x0) * (y1 - y0)) as u64;
        let mean = (sum / area) as i64;

        let value = image.get_pixel(x, y)[0] as i64;
        if value > mean - offset {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image.clone()).write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
