//! Loads and caches renderable images keyed by identifier.

use anyhow::{Context as _, Result};
use graphics::{ImageHandle, Renderer};
use std::{
    collections::HashMap,
    path::Path,
};


#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<String, ImageHandle>,
}

impl ImageCache {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, key: &str) -> Option<&ImageHandle> {
        self.images.get(key)
    }

    /// Register an already-uploaded image under `key`.
    pub fn insert(&mut self, key: impl Into<String>, handle: ImageHandle) {
        self.images.insert(key.into(), handle);
    }

    /// Decode the file at `path` and upload it, or return the cached handle
    /// if `key` was loaded before.
    pub fn load(
        &mut self,
        renderer: &mut dyn Renderer,
        key: &str,
        path: &Path,
    ) -> Result<ImageHandle> {
        if let Some(handle) = self.images.get(key) {
            return Ok(handle.clone());
        }
        let image = image::open(path)
            .with_context(|| format!("unable to load image {:?}", path))?
            .to_rgba8();
        let handle = renderer.upload_image(&image);
        debug!("loaded image {:?} as {:?}", path, key);
        self.images.insert(key.to_owned(), handle.clone());
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use graphics::RecordingRenderer;
    use vek::*;

    #[test]
    fn insert_then_get() {
        let mut renderer = RecordingRenderer::new(Extent2 { w: 64, h: 64 });
        let mut cache = ImageCache::new();
        let handle = renderer.upload_image(&image::RgbaImage::new(8, 8));
        cache.insert("unit", handle.clone());
        assert_eq!(cache.get("unit"), Some(&handle));
        assert_eq!(cache.get("building"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let mut renderer = RecordingRenderer::new(Extent2 { w: 64, h: 64 });
        let mut cache = ImageCache::new();
        let result = cache.load(
            &mut renderer,
            "unit",
            Path::new("/nonexistent/unit.png"),
        );
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
