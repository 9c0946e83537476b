//! Placeholder card art.
//!
//! Placeholder keys have no file behind them, so their faces are drawn as
//! small SVG documents: a diagonal gradient picked from a fixed palette,
//! a scatter of translucent circles and the 1-based placeholder number.
//! Art is deterministic per index and cached after the first render.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::cards::ImageKey;
use crate::core::DeckRng;

/// Gradient colours, cycled by placeholder index.
pub const PALETTE: [&str; 6] = ["#0b3c68", "#145d99", "#1e7fc8", "#2696e8", "#34b2ff", "#0d2f4e"];

/// Width and height of the generated art.
pub const PLACEHOLDER_SIZE: u32 = 256;

const CIRCLE_COUNT: usize = 8;

/// Where the face image of a card comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk.
    File(PathBuf),
    /// Generated SVG markup.
    InlineSvg(String),
}

/// Renders and caches placeholder art.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderArt {
    cache: FxHashMap<u32, String>,
}

impl PlaceholderArt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// SVG markup for placeholder `index`.
    pub fn svg(&mut self, index: u32) -> &str {
        self.cache.entry(index).or_insert_with(|| render(index))
    }

    /// Number of rendered placeholders held.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Face image for `key`, with files resolved against `image_dir`.
    pub fn source_for(&mut self, key: &ImageKey, image_dir: &Path) -> ImageSource {
        match key {
            ImageKey::File(name) => ImageSource::File(image_dir.join(name)),
            ImageKey::Placeholder(idx) => ImageSource::InlineSvg(self.svg(*idx).to_string()),
        }
    }
}

fn render(index: u32) -> String {
    let size = PLACEHOLDER_SIZE;
    let idx = index as usize;
    let from = PALETTE[idx % PALETTE.len()];
    let to = PALETTE[(idx + 2) % PALETTE.len()];
    let mut rng = DeckRng::new(u64::from(index));

    let mut svg = String::with_capacity(1024);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\
         <defs><linearGradient id=\"g\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\
         <stop offset=\"0\" stop-color=\"{from}\"/><stop offset=\"1\" stop-color=\"{to}\"/>\
         </linearGradient></defs>\
         <rect width=\"{size}\" height=\"{size}\" fill=\"url(#g)\"/>"
    );

    for _ in 0..CIRCLE_COUNT {
        let cx = rng.unit() * size as f32;
        let cy = rng.unit() * size as f32;
        let r = 20.0 + rng.unit() * 40.0;
        let _ = write!(
            svg,
            "<circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"rgba(255,255,255,0.15)\"/>"
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{half}\" y=\"140\" fill=\"#fff\" font-family=\"sans-serif\" font-size=\"120\" \
         font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\">{label}</text></svg>",
        half = size / 2,
        label = u64::from(index) + 1,
    );

    svg
}
