//! Image name resolution.
//!
//! Configured image names may lack an extension or carry the wrong one. Each
//! name is checked once against an `AssetProbe` under an ordered list of
//! candidate file names: the name as given first, then the base name with each
//! configured extension. The first candidate that exists wins.
//!
//! Names that resolve to nothing are replaced by placeholder keys so the round
//! can still be dealt. Only when every name in a non-empty pool fails is the
//! whole pool reported as an error.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::ImageKey;
use crate::core::AssetError;

/// Candidate file names for one image; four variants is the common case.
pub type Candidates = SmallVec<[String; 4]>;

/// Answers whether an image file is available.
pub trait AssetProbe {
    /// Does `file_name`, relative to the image directory, exist?
    fn exists(&self, file_name: &str) -> bool;
}

/// Probe that checks for regular files under a directory.
#[derive(Clone, Debug)]
pub struct DirectoryProbe {
    root: PathBuf,
}

impl DirectoryProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProbe for DirectoryProbe {
    fn exists(&self, file_name: &str) -> bool {
        self.root.join(file_name).is_file()
    }
}

/// Declarative list of available image files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetManifest {
    files: FxHashSet<String>,
}

impl AssetManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder pattern).
    #[must_use]
    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.files.insert(file_name.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AssetManifest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetProbe for AssetManifest {
    fn exists(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }
}

impl<P: AssetProbe + ?Sized> AssetProbe for &P {
    fn exists(&self, file_name: &str) -> bool {
        (**self).exists(file_name)
    }
}

/// Split `name` into base and extension.
///
/// An extension is a trailing `.` followed by 2 to 5 ASCII alphanumerics;
/// anything else leaves the name whole.
#[must_use]
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if (2..=5).contains(&ext.len()) && ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
                (&name[..dot], Some(&name[dot..]))
            } else {
                (name, None)
            }
        }
        None => (name, None),
    }
}

/// Ordered candidate file names for `name`.
#[must_use]
pub fn candidate_names(name: &str, variants: &[String]) -> Candidates {
    let (base, ext) = split_extension(name);
    let mut candidates = Candidates::new();

    if let Some(ext) = ext {
        candidates.push(format!("{base}{ext}"));
    }
    for variant in variants {
        if ext != Some(variant.as_str()) {
            candidates.push(format!("{base}{variant}"));
        }
    }

    candidates
}

/// Image pool after resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPool {
    /// One key per configured name, in configured order.
    pub keys: Vec<ImageKey>,
    /// Configured names that were replaced by placeholders.
    pub substituted: Vec<String>,
}

impl ResolvedPool {
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.keys.len() - self.substituted.len()
    }
}

/// Resolves configured image names through a probe.
#[derive(Clone, Debug)]
pub struct AssetResolver<P> {
    probe: P,
    variants: Vec<String>,
}

impl<P: AssetProbe> AssetResolver<P> {
    pub fn new(probe: P, variants: Vec<String>) -> Self {
        Self { probe, variants }
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// File name that exists for `name`, if any.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        candidate_names(name, &self.variants)
            .into_iter()
            .find(|candidate| self.probe.exists(candidate))
    }

    /// Resolve a whole pool.
    ///
    /// Placeholder names pass through unprobed. Unresolvable names become
    /// placeholder keys not otherwise present in the pool.
    pub fn resolve_pool(&self, names: &[String]) -> Result<ResolvedPool, AssetError> {
        let mut outcomes = Vec::with_capacity(names.len());
        let mut taken = FxHashSet::default();

        for name in names {
            let outcome = match ImageKey::parse(name) {
                key @ ImageKey::Placeholder(idx) => {
                    taken.insert(idx);
                    Some(key)
                }
                ImageKey::File(_) => self.resolve(name).map(ImageKey::File),
            };
            outcomes.push(outcome);
        }

        let file_names = names.iter().filter(|n| !ImageKey::parse(n).is_placeholder()).count();
        let resolved_files = outcomes
            .iter()
            .filter(|o| matches!(o, Some(ImageKey::File(_))))
            .count();
        if file_names > 0 && resolved_files == 0 {
            tracing::error!(attempted = file_names, "no configured image could be resolved");
            return Err(AssetError::NothingResolved { attempted: file_names });
        }

        let mut pool = ResolvedPool::default();
        let mut next_placeholder = 0u32;
        for (name, outcome) in names.iter().zip(outcomes) {
            let key = match outcome {
                Some(key) => key,
                None => {
                    while taken.contains(&next_placeholder) {
                        next_placeholder += 1;
                    }
                    taken.insert(next_placeholder);
                    tracing::warn!(image = %name, placeholder = next_placeholder, "image not found, using placeholder");
                    pool.substituted.push(name.clone());
                    ImageKey::Placeholder(next_placeholder)
                }
            };
            pool.keys.push(key);
        }

        Ok(pool)
    }
}
