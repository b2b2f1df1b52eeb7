//! Material bindings and the texture-backed material sink

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use meshport_assets::{AssetHandle, AssetServer, AssetSource, TextureAsset};

use crate::error::RenderError;

/// Settings for [`MaterialLibrary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Texture bound when a material has no diffuse texture. `None` binds a
    /// 1x1 white placeholder.
    pub default_texture: Option<String>,
    /// Fail when a referenced texture cannot be loaded. When off, the default
    /// texture is bound instead and a warning is logged.
    pub strict_textures: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            default_texture: None,
            strict_textures: true,
        }
    }
}

/// A resolved material: the diffuse texture it samples and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    diffuse: AssetHandle<TextureAsset>,
    diffuse_path: Option<String>,
    fallback: bool,
}

impl Material {
    pub fn diffuse(&self) -> AssetHandle<TextureAsset> {
        self.diffuse
    }

    /// Path of the diffuse texture the source material asked for, if any,
    /// as handed to [`MaterialSink::bind`].
    pub fn diffuse_path(&self) -> Option<&str> {
        self.diffuse_path.as_deref()
    }

    /// Whether the bound texture is the default rather than the requested one.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Turns a resolved diffuse texture reference into a material binding.
pub trait MaterialSink {
    type Material;

    /// `diffuse` is `None` when the source material has no diffuse texture.
    /// A relative reference has already been joined to the scene's
    /// directory, so it can differ from the string stored in the scene file.
    fn bind(&mut self, diffuse: Option<&str>) -> Result<Self::Material, RenderError>;
}

impl<M: MaterialSink + ?Sized> MaterialSink for &mut M {
    type Material = M::Material;

    fn bind(&mut self, diffuse: Option<&str>) -> Result<Self::Material, RenderError> {
        (**self).bind(diffuse)
    }
}

/// Material sink that loads diffuse textures through an [`AssetServer`].
pub struct MaterialLibrary<S> {
    server: AssetServer<S>,
    config: MaterialConfig,
}

impl<S: AssetSource> MaterialLibrary<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, MaterialConfig::default())
    }

    pub fn with_config(source: S, config: MaterialConfig) -> Self {
        Self {
            server: AssetServer::new(source),
            config,
        }
    }

    pub fn config(&self) -> &MaterialConfig {
        &self.config
    }

    /// The server holding every texture bound so far.
    pub fn server(&self) -> &AssetServer<S> {
        &self.server
    }

    pub fn texture(&self, material: &Material) -> Option<&TextureAsset> {
        self.server.get_texture(material.diffuse)
    }

    fn default_texture(&mut self) -> Result<AssetHandle<TextureAsset>, RenderError> {
        match self.config.default_texture.clone() {
            Some(name) => Ok(self.server.load_texture(&name)?),
            None => Ok(self.server.placeholder_texture()),
        }
    }
}

impl<S: AssetSource> MaterialSink for MaterialLibrary<S> {
    type Material = Material;

    fn bind(&mut self, diffuse: Option<&str>) -> Result<Material, RenderError> {
        let Some(path) = diffuse else {
            return Ok(Material {
                diffuse: self.default_texture()?,
                diffuse_path: None,
                fallback: true,
            });
        };

        match self.server.load_texture(path) {
            Ok(handle) => {
                debug!("Bound diffuse texture '{}'", path);
                Ok(Material {
                    diffuse: handle,
                    diffuse_path: Some(path.to_string()),
                    fallback: false,
                })
            }
            Err(e) if !self.config.strict_textures => {
                warn!("Texture '{}' unavailable ({}), using default", path, e);
                Ok(Material {
                    diffuse: self.default_texture()?,
                    diffuse_path: Some(path.to_string()),
                    fallback: true,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
