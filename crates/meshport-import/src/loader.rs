//! Scene-to-entity translation.

use meshport_assets::{
    resolve_sibling, Asset, AssetSource, ImportFlags, Scene, SceneMaterial, SceneParser,
};
use meshport_core::{Diagnostics, TracingDiagnostics};
use meshport_render::{Entity, GeometrySink, MaterialSink, MeshRenderer};

use crate::assembler::assemble;
use crate::error::ImportError;

/// Loads scenes and turns every submesh into a renderable unit of one entity.
///
/// The loader owns a scene parser, a geometry sink and a material sink. It
/// keeps no reference to the entities it returns.
pub struct MeshLoader<P, G, M> {
    parser: P,
    geometry: G,
    materials: M,
    diagnostics: Box<dyn Diagnostics + Send + Sync>,
}

impl<P, G, M> MeshLoader<P, G, M>
where
    P: SceneParser,
    G: GeometrySink,
    M: MaterialSink,
{
    /// Create a loader that reports through `tracing`.
    pub fn new(parser: P, geometry: G, materials: M) -> Self {
        Self {
            parser,
            geometry,
            materials,
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    /// Report through `diagnostics` instead of `tracing`.
    pub fn with_diagnostics(
        mut self,
        diagnostics: impl Diagnostics + Send + Sync + 'static,
    ) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn geometry_sink(&self) -> &G {
        &self.geometry
    }

    pub fn material_sink(&self) -> &M {
        &self.materials
    }

    pub fn into_sinks(self) -> (G, M) {
        (self.geometry, self.materials)
    }

    /// Open `name` from `source` and load it.
    pub fn load_from<S: AssetSource + ?Sized>(
        &mut self,
        source: &S,
        name: &str,
    ) -> Result<Entity<G::Geometry, M::Material>, ImportError> {
        let asset = source.open(name).map_err(|e| {
            self.diagnostics
                .error(&format!("Failed to load mesh: {} ({})", name, e));
            ImportError::from(e)
        })?;
        self.load(&asset)
    }

    /// Parse `asset` with [`ImportFlags::REQUIRED`] and translate the scene.
    pub fn load(&mut self, asset: &Asset) -> Result<Entity<G::Geometry, M::Material>, ImportError> {
        self.diagnostics
            .info(&format!("Loading mesh: {}", asset.name()));

        let scene = match self.parser.parse(asset.bytes(), ImportFlags::REQUIRED) {
            Ok(scene) => scene,
            Err(source) => {
                self.diagnostics
                    .error(&format!("Failed to load mesh: {} ({})", asset.name(), source));
                return Err(ImportError::SceneParse {
                    name: asset.name().to_string(),
                    source,
                });
            }
        };

        self.translate(&scene, asset.name())
    }

    /// Translate an already parsed scene. `name` is the scene's logical name;
    /// relative texture paths are resolved against its directory.
    ///
    /// Submeshes become renderable units in scene order. The first malformed
    /// submesh aborts the whole translation.
    pub fn translate(
        &mut self,
        scene: &Scene,
        name: &str,
    ) -> Result<Entity<G::Geometry, M::Material>, ImportError> {
        let mut entity = Entity::new(name);

        for (index, mesh) in scene.meshes.iter().enumerate() {
            let geometry = assemble(mesh).map_err(|source| ImportError::MalformedSubmesh {
                mesh: index,
                name: mesh.name.clone(),
                source,
            })?;

            let material = scene
                .material_of(mesh)
                .ok_or(ImportError::MissingMaterial {
                    mesh: index,
                    index: mesh.material_index,
                })?;
            let diffuse = self.diffuse_path(material, name);

            self.diagnostics.debug(&format!(
                "Submesh {} '{}': {} vertices, {} triangles",
                index,
                mesh.name,
                geometry.vertices.len(),
                geometry.triangle_count()
            ));

            let built = self
                .geometry
                .build(geometry.vertices, geometry.indices)
                .map_err(|source| ImportError::Render { mesh: index, source })?;
            let bound = self
                .materials
                .bind(diffuse.as_deref())
                .map_err(|source| ImportError::Render { mesh: index, source })?;

            entity.add_renderer(MeshRenderer::new(built, bound));
        }

        self.diagnostics.info(&format!(
            "Loaded mesh: {} ({} submeshes)",
            name,
            entity.len()
        ));
        Ok(entity)
    }

    // Only diffuse slot 0 is used. An empty path counts as no texture.
    fn diffuse_path(&self, material: &SceneMaterial, scene_name: &str) -> Option<String> {
        let count = material.diffuse_texture_count();
        self.diagnostics
            .debug(&format!("Diffuse textures: {}", count));

        let reference = material.diffuse_texture(0).filter(|p| !p.is_empty())?;
        let path = resolve_sibling(scene_name, reference);
        self.diagnostics.info(&format!("Found texture: {}", path));
        Some(path)
    }
}
