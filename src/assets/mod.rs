//! Asset pipeline collaborators.
//!
//! - `AssetResolver`: Maps configured image names to files that exist,
//!   trying extension variants, through an `AssetProbe`
//! - `DirectoryProbe` / `AssetManifest`: Filesystem and declarative probes
//! - `PlaceholderArt`: Generated faces for placeholder keys
//!
//! The match engine never touches assets; sessions resolve the pool once per
//! round before dealing.

pub mod placeholder;
pub mod resolver;

pub use placeholder::{ImageSource, PlaceholderArt, PALETTE, PLACEHOLDER_SIZE};
pub use resolver::{
    candidate_names, split_extension, AssetManifest, AssetProbe, AssetResolver, Candidates, DirectoryProbe,
    ResolvedPool,
};
