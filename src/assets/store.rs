use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::assets::decode;
use crate::foundation::error::{StampError, StampResult};
use crate::foundation::naming::FilenameVariants;

/// Resolves and decodes overlay and card images for one run.
///
/// Overlays are decoded once and cached; callers get an owned copy per layer. Card images are
/// looked up under every filename variant in order and are never cached.
#[derive(Debug)]
pub struct AssetStore {
    overlay_root: PathBuf,
    variants: FilenameVariants,
    overlays: HashMap<PathBuf, RgbaImage>,
}

impl AssetStore {
    /// Create a store reading overlays below `overlay_root`.
    pub fn new(overlay_root: impl Into<PathBuf>, variants: FilenameVariants) -> Self {
        Self {
            overlay_root: overlay_root.into(),
            variants,
            overlays: HashMap::new(),
        }
    }

    /// Root directory overlay paths are resolved against.
    pub fn overlay_root(&self) -> &Path {
        &self.overlay_root
    }

    /// Filename variants tried when resolving card images.
    pub fn variants(&self) -> &FilenameVariants {
        &self.variants
    }

    /// Number of decoded overlays currently cached.
    pub fn cached_overlays(&self) -> usize {
        self.overlays.len()
    }

    /// Load the overlay at `rel_path` (relative to the overlay root).
    pub fn overlay(&mut self, rel_path: &Path) -> StampResult<RgbaImage> {
        let path = self.overlay_root.join(rel_path);
        if let Some(img) = self.overlays.get(&path) {
            return Ok(img.clone());
        }

        let img = decode::load_rgba(&path)?;
        tracing::debug!(path = %path.display(), "decoded overlay");
        self.overlays.insert(path, img.clone());
        Ok(img)
    }

    /// Find `{dir}/{file_name}.png` under the first filename variant that exists.
    pub fn resolve_card(&self, dir: &Path, file_name: &str) -> Option<PathBuf> {
        if file_name.is_empty() {
            return None;
        }
        self.variants
            .candidates(file_name)
            .into_iter()
            .map(|stem| dir.join(format!("{stem}.png")))
            .find(|path| path.is_file())
    }

    /// Load the card image `{dir}/{file_name}.png`, trying every filename variant.
    ///
    /// Returns `Ok(None)` when no variant exists; a file that exists but cannot be decoded is an
    /// error.
    pub fn open_card(&self, dir: &Path, file_name: &str) -> StampResult<Option<RgbaImage>> {
        match self.resolve_card(dir, file_name) {
            Some(path) => match decode::load_rgba(&path) {
                Ok(img) => Ok(Some(img)),
                Err(StampError::MissingAsset { .. }) => Ok(None),
                Err(err) => Err(err),
            },
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
