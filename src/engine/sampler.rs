use image::imageops::{self, FilterType};
use image::DynamicImage;
use log::debug;

use crate::error::EnvironmentError;

/// An owned RGBA pixel surface at sampling resolution. The rest of the
/// pipeline only ever sees one of these, so it can be driven without any
/// decoding capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Builds a buffer from raw RGBA bytes. `data.len()` must equal
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if data.len() != expected {
            return None;
        }
        Some(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes, pixel-major RGBA.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterates pixels as `[r, g, b, a]` groups in buffer order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(4)
    }
}

/// Downsamples a decoded image to an aspect-preserving surface whose longer
/// side equals `sample_size`; the shorter side rounds, with a floor of 1.
pub fn sample(image: &DynamicImage, sample_size: u32) -> Result<RgbaBuffer, EnvironmentError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(EnvironmentError::EmptySurface { width, height });
    }

    let (out_w, out_h) = sample_dimensions(width, height, sample_size);
    (out_w as usize)
        .checked_mul(out_h as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(EnvironmentError::SurfaceTooLarge {
            width: out_w,
            height: out_h,
        })?;

    debug!("sampling {width}x{height} image at {out_w}x{out_h}");
    let resized = imageops::resize(&rgba, out_w, out_h, FilterType::Triangle);
    let data = resized.into_raw();

    // resize always hands back a buffer of exactly out_w * out_h pixels.
    RgbaBuffer::from_raw(out_w, out_h, data).ok_or(EnvironmentError::SurfaceTooLarge {
        width: out_w,
        height: out_h,
    })
}

fn sample_dimensions(width: u32, height: u32, sample_size: u32) -> (u32, u32) {
    if width >= height {
        let short = (height as f64 * sample_size as f64 / width as f64)
            .round()
            .max(1.0) as u32;
        (sample_size, short)
    } else {
        let short = (width as f64 * sample_size as f64 / height as f64)
            .round()
            .max(1.0) as u32;
        (short, sample_size)
    }
}
