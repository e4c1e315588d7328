use log::{debug, trace};

use crate::color::{Hsl, Rgb};
use crate::engine::histogram::Histogram;
use crate::palette::Palette;

/// Classification only ever looks at this many of the highest-count buckets.
pub const MAX_CANDIDATES: usize = 24;

/// A ranked bucket: its averaged color, derived HSL, and pixel count.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    key: u32,
    rgb: Rgb,
    hsl: Hsl,
    count: u32,
}

/// The six scored categories. Each carries its own HSL admission band and
/// score function so selection can iterate them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Vibrant,
    DarkVibrant,
    LightVibrant,
    Muted,
    DarkMuted,
    LightMuted,
}

impl Category {
    const ALL: [Category; 6] = [
        Category::Vibrant,
        Category::DarkVibrant,
        Category::LightVibrant,
        Category::Muted,
        Category::DarkMuted,
        Category::LightMuted,
    ];

    fn name(self) -> &'static str {
        match self {
            Category::Vibrant => "vibrant",
            Category::DarkVibrant => "darkVibrant",
            Category::LightVibrant => "lightVibrant",
            Category::Muted => "muted",
            Category::DarkMuted => "darkMuted",
            Category::LightMuted => "lightMuted",
        }
    }

    /// Whether `hsl` sits inside this category's target band.
    fn admits(self, hsl: Hsl) -> bool {
        let Hsl { s, l, .. } = hsl;
        match self {
            Category::Vibrant => (0.30..=0.80).contains(&l),
            Category::DarkVibrant => l <= 0.45,
            Category::LightVibrant => l >= 0.55,
            Category::Muted => s <= 0.5 && (0.25..=0.80).contains(&l),
            Category::DarkMuted => l <= 0.5 && s <= 0.5,
            Category::LightMuted => l >= 0.5 && s <= 0.5,
        }
    }

    fn score(self, hsl: Hsl, count: u32) -> f64 {
        let n = f64::from(count);
        let Hsl { s, l, .. } = hsl;
        match self {
            Category::Vibrant => n * (0.6 + s),
            Category::DarkVibrant => n * (0.5 + s) * (1.0 - l),
            Category::LightVibrant => n * (0.5 + s) * l,
            Category::Muted => n * (0.9 - s),
            Category::DarkMuted => n * (0.9 - s) * (1.0 - l),
            Category::LightMuted => n * (0.9 - s) * l,
        }
    }
}

/// Ranks buckets and runs the per-category heuristics; the fallback chain
/// guarantees a complete palette for any histogram, including an empty one.
pub fn classify(histogram: &Histogram) -> Palette {
    let candidates = rank(histogram);
    let average = histogram.average();

    let dominant = candidates.first().map_or(average, |c| c.rgb);
    debug!(
        "classifying {} candidates, dominant {}",
        candidates.len(),
        dominant.to_hex(),
    );

    let mut picks = [average; 6];
    for (slot, category) in picks.iter_mut().zip(Category::ALL) {
        *slot = select(category, &candidates, average);
    }
    let [vibrant, dark_vibrant, light_vibrant, muted, dark_muted, light_muted] = picks;

    Palette {
        dominant: dominant.to_hex(),
        vibrant: vibrant.to_hex(),
        dark_vibrant: dark_vibrant.to_hex(),
        light_vibrant: light_vibrant.to_hex(),
        muted: muted.to_hex(),
        dark_muted: dark_muted.to_hex(),
        light_muted: light_muted.to_hex(),
        average: average.to_hex(),
    }
}

/// Top buckets by descending count; the packed key breaks count ties so the
/// ordering is reproducible for any accumulation order.
fn rank(histogram: &Histogram) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = histogram
        .buckets()
        .map(|(key, bucket)| {
            let rgb = bucket.mean();
            Candidate {
                key,
                rgb,
                hsl: rgb.to_hsl(),
                count: bucket.count,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

fn select(category: Category, candidates: &[Candidate], average: Rgb) -> Rgb {
    let mut best: Option<(f64, Rgb)> = None;
    for candidate in candidates {
        if !category.admits(candidate.hsl) {
            continue;
        }
        let score = category.score(candidate.hsl, candidate.count);
        // Strict comparison keeps the earlier candidate on a tie.
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, candidate.rgb));
        }
    }

    match best {
        Some((score, rgb)) => {
            trace!("{}: {} (score {score:.2})", category.name(), rgb.to_hex());
            rgb
        }
        // Every candidate excluded: first in sorted order. No candidates at
        // all: the global average.
        None => candidates.first().map_or(average, |c| {
            trace!("{}: fallback to top candidate", category.name());
            c.rgb
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::is_hex_color;
    use crate::engine::histogram::accumulate;
    use crate::engine::sampler::RgbaBuffer;

    fn buffer_of(pixels: &[[u8; 4]]) -> RgbaBuffer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        RgbaBuffer::from_raw(pixels.len() as u32, 1, data).unwrap()
    }

    fn classify_pixels(pixels: &[[u8; 4]]) -> Palette {
        classify(&accumulate(&buffer_of(pixels), 24))
    }

    #[test]
    fn single_color_input_selects_it_everywhere() {
        let palette = classify_pixels(&[[200, 40, 40, 255]; 9]);
        let expected = Rgb::new(200.0, 40.0, 40.0).to_hex();
        assert_eq!(palette.dominant, expected);
        assert_eq!(palette.average, expected);
    }

    #[test]
    fn empty_histogram_falls_back_to_black_average() {
        let palette = classify_pixels(&[[255, 0, 0, 0], [0, 255, 0, 7]]);
        for field in palette.fields() {
            assert_eq!(field, "#000000");
        }
    }

    #[test]
    fn dominant_is_the_highest_count_bucket() {
        let mut pixels = vec![[10, 10, 200, 255]; 5];
        pixels.extend([[200, 10, 10, 255]; 3]);
        let palette = classify_pixels(&pixels);
        assert_eq!(palette.dominant, Rgb::new(10.0, 10.0, 200.0).to_hex());
    }

    #[test]
    fn equal_count_buckets_rank_by_packed_key() {
        // Same count; the blue bucket's packed key is the smaller one, so it
        // ranks first.
        let pixels = vec![
            [200, 10, 10, 255],
            [10, 10, 200, 255],
            [200, 10, 10, 255],
            [10, 10, 200, 255],
        ];
        let palette = classify_pixels(&pixels);
        assert_eq!(palette.dominant, Rgb::new(10.0, 10.0, 200.0).to_hex());
    }

    #[test]
    fn vibrant_prefers_saturation_at_equal_count() {
        // Both mid-lightness, counts equal; the saturated red must win over
        // the washed-out gray-red.
        let pixels = vec![
            [230, 25, 25, 255],
            [150, 110, 110, 255],
            [230, 25, 25, 255],
            [150, 110, 110, 255],
        ];
        let palette = classify_pixels(&pixels);
        assert_eq!(palette.vibrant, Rgb::new(230.0, 25.0, 25.0).to_hex());
    }

    #[test]
    fn dark_and_light_bands_separate_candidates() {
        let dark = [60, 5, 5, 255]; // l ~ 0.13
        let light = [250, 160, 160, 255]; // l ~ 0.80
        let pixels = vec![dark, light, dark, light];
        let palette = classify_pixels(&pixels);
        assert_eq!(palette.dark_vibrant, Rgb::new(60.0, 5.0, 5.0).to_hex());
        assert_eq!(
            palette.light_vibrant,
            Rgb::new(250.0, 160.0, 160.0).to_hex()
        );
    }

    #[test]
    fn all_excluded_categories_fall_back_to_top_candidate() {
        // Every candidate is saturated and light (s > 0.5, l > 0.5), which
        // disqualifies the muted family and darkVibrant outright.
        let pixels = vec![
            [255, 128, 128, 255],
            [128, 255, 128, 255],
            [255, 128, 128, 255],
        ];
        let palette = classify_pixels(&pixels);
        for field in [&palette.muted, &palette.dark_muted, &palette.light_muted] {
            assert!(is_hex_color(field));
            assert_eq!(*field, palette.dominant);
        }
        assert_eq!(palette.dark_vibrant, palette.dominant);
    }

    #[test]
    fn every_field_is_a_valid_hex_color() {
        // Deterministic pseudo-noise, no rand dependency needed.
        let mut state = 0x2545_F491u32;
        let mut pixels = Vec::new();
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, a] = state.to_le_bytes();
            pixels.push([r, g, b, a]);
        }
        let palette = classify_pixels(&pixels);
        for field in palette.fields() {
            assert!(is_hex_color(field), "bad field {field}");
        }
    }

    #[test]
    fn candidate_cap_ignores_low_frequency_buckets() {
        // 27 distinct buckets at step 1: 26 singletons plus one heavy one.
        // Only the top 24 are eligible for selection.
        let mut pixels = Vec::new();
        for i in 0..26u32 {
            let c = (i * 9) as u8;
            pixels.push([c, 255 - c, c / 2, 255]);
        }
        for _ in 0..10 {
            pixels.push([200, 40, 40, 255]);
        }
        let histogram = accumulate(&buffer_of(&pixels), 1);
        assert!(histogram.bucket_count() > MAX_CANDIDATES);
        let palette = classify(&histogram);
        assert_eq!(palette.dominant, Rgb::new(200.0, 40.0, 40.0).to_hex());
    }
}
