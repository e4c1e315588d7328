//! Dynamic palette extraction from backdrop artwork.
//!
//! Given an image reference, derives the eight named colors (dominant,
//! vibrant/muted with dark and light variants, plus the global average) used
//! to retheme a media-browsing interface at runtime. Everything past image
//! decoding is pure, synchronous, per-call state.

pub mod cache;
pub mod color;
pub mod engine;
pub mod error;
pub mod options;
pub mod palette;
pub mod source;

pub use cache::{source_hash, PaletteCache, PaletteKey};
pub use color::{hex_with_alpha, is_hex_color, Hsl, Rgb};
pub use engine::sampler::RgbaBuffer;
pub use engine::{extract, extract_from_rgba};
pub use error::{EnvironmentError, ExtractError, LoadError};
pub use options::ExtractOptions;
pub use palette::Palette;
pub use source::ImageSource;
