use std::fmt;

use meshport_assets::{AssetError, ParseError};
use meshport_render::RenderError;

/// Per-vertex attribute arrays of a submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Positions,
    Normals,
    Tangents,
    TexCoords,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Positions => "positions",
            Attribute::Normals => "normals",
            Attribute::Tangents => "tangents",
            Attribute::TexCoords => "texture coordinates",
        };
        f.write_str(name)
    }
}

/// A submesh whose arrays cannot form valid geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmeshError {
    #[error("{attribute} has {len} entries, expected at least {expected}")]
    ShortAttribute {
        attribute: Attribute,
        len: usize,
        expected: usize,
    },

    #[error("face {face} has {arity} indices, expected 3")]
    NonTriangularFace { face: usize, arity: usize },

    #[error("face {face} references vertex {index} of {vertex_count}")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Errors raised while importing a scene into an entity.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to parse scene '{name}': {source}")]
    SceneParse {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("submesh {mesh} ('{name}') is malformed: {source}")]
    MalformedSubmesh {
        mesh: usize,
        name: String,
        #[source]
        source: SubmeshError,
    },

    #[error("submesh {mesh} references missing material {index}")]
    MissingMaterial { mesh: usize, index: usize },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("failed to build submesh {mesh}: {source}")]
    Render {
        mesh: usize,
        #[source]
        source: RenderError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SubmeshError::ShortAttribute {
            attribute: Attribute::TexCoords,
            len: 2,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "texture coordinates has 2 entries, expected at least 4"
        );

        let err = ImportError::MalformedSubmesh {
            mesh: 1,
            name: "crate/1".into(),
            source: SubmeshError::NonTriangularFace { face: 7, arity: 4 },
        };
        assert_eq!(
            err.to_string(),
            "submesh 1 ('crate/1') is malformed: face 7 has 4 indices, expected 3"
        );
    }

    #[test]
    fn source_chain_is_kept() {
        use std::error::Error;

        let err = ImportError::SceneParse {
            name: "broken.glb".into(),
            source: ParseError::Gltf("bad magic".into()),
        };
        assert!(err.source().is_some());
    }
}
