use std::collections::BTreeMap;

use log::debug;

use crate::color::Rgb;
use crate::engine::sampler::RgbaBuffer;

/// Pixels with alpha below this are excluded from the histogram and the
/// global average.
pub const ALPHA_MIN: u8 = 16;

/// One quantization bin: how many pixels landed in it and their channel sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
    pub count: u32,
    pub r_sum: f64,
    pub g_sum: f64,
    pub b_sum: f64,
}

impl Bucket {
    /// Average color of the pixels in this bucket.
    pub fn mean(&self) -> Rgb {
        if self.count == 0 {
            return Rgb::BLACK;
        }
        let n = f64::from(self.count);
        Rgb::new(self.r_sum / n, self.g_sum / n, self.b_sum / n)
    }
}

/// The full bucket map plus the running global sums for `average`. Keys are
/// the three quantized channels packed as `0xRRGGBB`, so map order is also a
/// stable total order over buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    buckets: BTreeMap<u32, Bucket>,
    total_count: u32,
    r_total: f64,
    g_total: f64,
    b_total: f64,
}

impl Histogram {
    pub fn buckets(&self) -> impl Iterator<Item = (u32, &Bucket)> + '_ {
        self.buckets.iter().map(|(k, b)| (*k, b))
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Pixels that passed the alpha filter.
    pub fn pixel_count(&self) -> u32 {
        self.total_count
    }

    /// Unweighted mean over every qualifying pixel; the zero vector when
    /// nothing qualified.
    pub fn average(&self) -> Rgb {
        if self.total_count == 0 {
            return Rgb::BLACK;
        }
        let n = f64::from(self.total_count);
        Rgb::new(self.r_total / n, self.g_total / n, self.b_total / n)
    }
}

fn bucket_key(r: u8, g: u8, b: u8, step: u32) -> u32 {
    let q = |c: u8| (u32::from(c) / step) * step;
    (q(r) << 16) | (q(g) << 8) | q(b)
}

/// Buckets every qualifying pixel of `buffer` by coarse channel quantization.
/// Accumulation is commutative, so buffer order never affects the result.
pub fn accumulate(buffer: &RgbaBuffer, step: u32) -> Histogram {
    let mut histogram = Histogram::default();

    for px in buffer.pixels() {
        let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
        if a < ALPHA_MIN {
            continue;
        }

        histogram.total_count = histogram.total_count.saturating_add(1);
        histogram.r_total += f64::from(r);
        histogram.g_total += f64::from(g);
        histogram.b_total += f64::from(b);

        let bucket = histogram.buckets.entry(bucket_key(r, g, b, step)).or_default();
        bucket.count = bucket.count.saturating_add(1);
        bucket.r_sum += f64::from(r);
        bucket.g_sum += f64::from(g);
        bucket.b_sum += f64::from(b);
    }

    debug!(
        "histogram: {} qualifying pixels in {} buckets (step {step})",
        histogram.total_count,
        histogram.buckets.len(),
    );
    histogram
}
