pub mod classify;
pub mod histogram;
pub mod sampler;

use log::debug;

use crate::error::{ExtractError, LoadError};
use crate::options::ExtractOptions;
use crate::palette::Palette;
use crate::source::ImageSource;
use sampler::RgbaBuffer;

/// Runs the full pipeline for one image reference: load, decode, sample,
/// bucket, classify. Fails only at the load/sample boundary; everything
/// downstream always completes.
pub fn extract(source: &ImageSource, options: &ExtractOptions) -> Result<Palette, ExtractError> {
    let (sample_size, step) = options.clamped();

    let bytes = source.load()?;
    let image = image::load_from_memory(&bytes).map_err(LoadError::Decode)?;
    let buffer = sampler::sample(&image, sample_size)?;

    Ok(classify_buffer(&buffer, step))
}

/// The capability-agnostic tail of the pipeline: any RGBA buffer in, a
/// complete palette out. Cannot fail.
pub fn extract_from_rgba(buffer: &RgbaBuffer, options: &ExtractOptions) -> Palette {
    let (_, step) = options.clamped();
    classify_buffer(buffer, step)
}

fn classify_buffer(buffer: &RgbaBuffer, step: u32) -> Palette {
    let histogram = histogram::accumulate(buffer, step);
    let palette = classify::classify(&histogram);
    debug!("palette ready: dominant {}", palette.dominant);
    palette
}
