use crate::error::AssetError;

/// Pixel format of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// A decoded texture with raw pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: TextureFormat,
}

impl TextureAsset {
    /// 1x1 opaque white, bound when a material has no usable diffuse texture.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            data: vec![255, 255, 255, 255],
            format: TextureFormat::Rgba8,
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA8 texture.
/// `name` is only used for error reporting.
pub fn decode_texture(name: &str, bytes: &[u8]) -> Result<TextureAsset, AssetError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AssetError::ImageDecode(name.to_string(), e.to_string()))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureAsset {
        width,
        height,
        data: rgba.into_raw(),
        format: TextureFormat::Rgba8,
    })
}

/// Encoded PNG images for tests.
#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
