use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use crate::options::ExtractOptions;
use crate::palette::Palette;

/// Cache key: a hash of the source bytes plus the options in effect, since
/// the same image yields different palettes under different options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteKey {
    pub source: u64,
    pub sample_size: u32,
    pub step: u32,
}

impl PaletteKey {
    pub fn new(source: u64, options: &ExtractOptions) -> Self {
        Self {
            source,
            sample_size: options.sample_size,
            step: options.step,
        }
    }
}

/// Content hash for raw source bytes.
pub fn source_hash(bytes: &[u8]) -> u64 {
    let mut h = DefaultHasher::new();
    bytes.hash(&mut h);
    h.finish()
}

/// Bounded LRU of finished palettes, owned by the theming consumer. The
/// engine itself never reads it; every `extract` call computes fresh.
#[derive(Debug, Default)]
pub struct PaletteCache {
    cap: usize,
    order: VecDeque<PaletteKey>,
    map: HashMap<PaletteKey, Palette>,
}

impl PaletteCache {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            order: VecDeque::new(),
            map: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: PaletteKey) -> bool {
        self.map.contains_key(&key)
    }

    pub fn get(&mut self, key: PaletteKey) -> Option<Palette> {
        let palette = self.map.get(&key)?.clone();
        self.touch(key);
        Some(palette)
    }

    pub fn put(&mut self, key: PaletteKey, palette: Palette) {
        if self.map.insert(key, palette).is_some() {
            self.touch(key);
            return;
        }

        self.order.push_back(key);
        while self.order.len() > self.cap {
            if let Some(old) = self.order.pop_front() {
                self.map.remove(&old);
            }
        }
    }

    fn touch(&mut self, key: PaletteKey) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
            self.order.push_back(key);
        }
    }
}
