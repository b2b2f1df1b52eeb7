use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::AssetError;
use crate::handle::{AssetHandle, AssetId};
use crate::source::{Asset, AssetSource};
use crate::texture::{self, TextureAsset};

/// Central asset registry. Reads through an [`AssetSource`] and caches
/// decoded textures by logical name.
pub struct AssetServer<S> {
    source: S,
    textures: Vec<TextureAsset>,
    name_to_texture: HashMap<String, AssetHandle<TextureAsset>>,
    placeholder: Option<AssetHandle<TextureAsset>>,
}

impl<S: AssetSource> AssetServer<S> {
    /// Create a new AssetServer reading from the given source.
    pub fn new(source: S) -> Self {
        info!("AssetServer created");
        Self {
            source,
            textures: Vec::new(),
            name_to_texture: HashMap::new(),
            placeholder: None,
        }
    }

    /// Read raw bytes for a logical name, bypassing the cache.
    pub fn open(&self, name: &str) -> Result<Asset, AssetError> {
        self.source.open(name)
    }

    /// Load and decode an image as a texture.
    /// Subsequent loads of the same name return the cached handle.
    pub fn load_texture(&mut self, name: &str) -> Result<AssetHandle<TextureAsset>, AssetError> {
        if let Some(&handle) = self.name_to_texture.get(name) {
            return Ok(handle);
        }

        let asset = self.source.open(name)?;
        let tex = texture::decode_texture(asset.name(), asset.bytes())?;
        debug!("Decoded texture '{}' ({}x{})", name, tex.width, tex.height);

        let handle = self.insert(tex);
        self.name_to_texture.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Handle to the shared 1x1 placeholder texture, created on first use.
    pub fn placeholder_texture(&mut self) -> AssetHandle<TextureAsset> {
        if let Some(handle) = self.placeholder {
            return handle;
        }
        let handle = self.insert(TextureAsset::placeholder());
        self.placeholder = Some(handle);
        handle
    }

    fn insert(&mut self, tex: TextureAsset) -> AssetHandle<TextureAsset> {
        let id = self.textures.len() as AssetId;
        self.textures.push(tex);
        AssetHandle::new(id)
    }

    /// Get a reference to a loaded texture by its handle.
    pub fn get_texture(&self, handle: AssetHandle<TextureAsset>) -> Option<&TextureAsset> {
        self.textures.get(handle.index())
    }

    /// Check if a texture handle refers to a loaded asset.
    pub fn is_texture_loaded(&self, handle: AssetHandle<TextureAsset>) -> bool {
        handle.index() < self.textures.len()
    }

    /// Number of textures held, the placeholder included.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// The source this server reads from.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::texture::png_bytes;

    fn server() -> AssetServer<MemorySource> {
        let source = MemorySource::new()
            .with("red.png", png_bytes(1, 1, [255, 0, 0, 255]))
            .with("broken.png", b"not a png".to_vec());
        AssetServer::new(source)
    }

    #[test]
    fn missing_texture_returns_error() {
        let mut server = server();
        match server.load_texture("does_not_exist.png").unwrap_err() {
            AssetError::NotFound(_) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
        assert_eq!(server.texture_count(), 0);
    }

    #[test]
    fn undecodable_texture_returns_error() {
        let mut server = server();
        assert!(matches!(
            server.load_texture("broken.png"),
            Err(AssetError::ImageDecode(..))
        ));
    }

    #[test]
    fn textures_are_cached_by_name() {
        let mut server = server();
        let a = server.load_texture("red.png").unwrap();
        let b = server.load_texture("red.png").unwrap();
        assert_eq!(a, b);
        assert_eq!(server.texture_count(), 1);
        assert!(server.is_texture_loaded(a));
        assert_eq!(&server.get_texture(a).unwrap().data[..], &[255, 0, 0, 255]);
    }

    #[test]
    fn placeholder_is_shared() {
        let mut server = server();
        let a = server.placeholder_texture();
        let b = server.placeholder_texture();
        assert_eq!(a, b);
        assert_eq!(server.get_texture(a), Some(&TextureAsset::placeholder()));
    }

    #[test]
    fn open_reads_raw_bytes() {
        let server = server();
        assert_eq!(server.open("broken.png").unwrap().bytes(), b"not a png");
    }
}
