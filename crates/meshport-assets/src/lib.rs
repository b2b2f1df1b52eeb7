//! Meshport Assets - Asset sources, scene model and parsing
//!
//! Provides named byte sources, a format-independent scene model, glTF 2.0
//! scene parsing with the usual post-processing steps, and texture decoding
//! and caching.

mod error;
mod gltf_loader;
mod handle;
pub mod postprocess;
mod scene;
mod server;
mod source;
mod texture;

pub use error::{AssetError, ParseError};
pub use gltf_loader::GltfParser;
pub use handle::{AssetHandle, AssetId};
pub use scene::{Face, ImportFlags, Scene, SceneMaterial, SceneMesh, SceneParser};
pub use server::AssetServer;
pub use source::{resolve_sibling, Asset, AssetSource, FileSource, MemorySource};
pub use texture::{decode_texture, TextureAsset, TextureFormat};
