use serde::{Deserialize, Serialize};

/// The result of one extraction: eight named hex colors, immutable once
/// produced. Field names serialize in camelCase for the theming layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub dominant: String,
    pub vibrant: String,
    pub dark_vibrant: String,
    pub light_vibrant: String,
    pub muted: String,
    pub dark_muted: String,
    pub light_muted: String,
    pub average: String,
}

impl Palette {
    /// The eight fields in declaration order.
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.dominant,
            &self.vibrant,
            &self.dark_vibrant,
            &self.light_vibrant,
            &self.muted,
            &self.dark_muted,
            &self.light_muted,
            &self.average,
        ]
    }
}
