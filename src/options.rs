use serde::{Deserialize, Serialize};

/// Tuning knobs for one extraction. Embeds into a host application's TOML
/// config; missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Bounding dimension of the sampled surface; the longer image side is
    /// scaled to this.
    #[serde(default = "default_sample_size")]
    pub sample_size: u32,

    /// Channel quantization bin width, out of 256 levels.
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_sample_size() -> u32 {
    120
}

fn default_step() -> u32 {
    24
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            step: default_step(),
        }
    }
}

impl ExtractOptions {
    /// Out-of-range values are clamped rather than rejected.
    pub(crate) fn clamped(self) -> (u32, u32) {
        (self.sample_size.max(1), self.step.clamp(1, 256))
    }
}
