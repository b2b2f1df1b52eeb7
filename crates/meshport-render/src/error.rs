use meshport_assets::AssetError;

/// Errors raised while turning imported data into render resources.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to load texture: {0}")]
    Texture(#[from] AssetError),

    #[error("geometry has no vertices")]
    EmptyGeometry,
}
