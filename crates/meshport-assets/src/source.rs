//! Byte sources for scenes and textures, addressed by logical name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::AssetError;

/// Raw content of one asset together with the logical name it was opened by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    bytes: Vec<u8>,
}

impl Asset {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Logical name, used for diagnostics and for resolving sibling assets.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Anything that can hand out asset bytes by logical name.
pub trait AssetSource {
    fn open(&self, name: &str) -> Result<Asset, AssetError>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn open(&self, name: &str) -> Result<Asset, AssetError> {
        (**self).open(name)
    }
}

/// Reads assets from the filesystem below a base directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_path: PathBuf,
}

impl FileSource {
    /// Create a source rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("FileSource rooted at {}", base_path.display());
        Self { base_path }
    }

    /// Resolve a logical name against the base path.
    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// The base path relative names are resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl AssetSource for FileSource {
    fn open(&self, name: &str) -> Result<Asset, AssetError> {
        let full_path = self.resolve(name);
        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path));
        }
        let bytes = fs::read(&full_path).map_err(|e| AssetError::Io(full_path.clone(), e))?;
        debug!("Read {} bytes from {}", bytes.len(), full_path.display());
        Ok(Asset::new(name, bytes))
    }
}

/// In-memory assets keyed by logical name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for MemorySource {
    fn open(&self, name: &str) -> Result<Asset, AssetError> {
        self.assets
            .get(name)
            .map(|bytes| Asset::new(name, bytes.clone()))
            .ok_or_else(|| AssetError::NotFound(PathBuf::from(name)))
    }
}

/// Resolve a reference found inside `scene_name` (such as a texture URI)
/// against the scene's directory. Absolute references are returned unchanged.
pub fn resolve_sibling(scene_name: &str, reference: &str) -> String {
    let reference_path = Path::new(reference);
    if reference_path.is_absolute() {
        return reference.to_string();
    }
    match Path::new(scene_name).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(reference_path).to_string_lossy().into_owned()
        }
        _ => reference.to_string(),
    }
}
