//! Renderable entities assembled from imported scenes

use crate::material::Material;
use crate::mesh::Mesh;

/// One submesh's geometry paired with its material. Immutable once built.
#[derive(Debug, Clone)]
pub struct MeshRenderer<G = Mesh, M = Material> {
    geometry: G,
    material: M,
}

impl<G, M> MeshRenderer<G, M> {
    pub fn new(geometry: G, material: M) -> Self {
        Self { geometry, material }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn material(&self) -> &M {
        &self.material
    }

    pub fn into_parts(self) -> (G, M) {
        (self.geometry, self.material)
    }
}

/// The product of one import: a named collection of renderable units in
/// source order.
#[derive(Debug, Clone)]
pub struct Entity<G = Mesh, M = Material> {
    name: String,
    renderers: Vec<MeshRenderer<G, M>>,
}

impl<G, M> Entity<G, M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            renderers: Vec::new(),
        }
    }

    /// Name of the asset this entity was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_renderer(&mut self, renderer: MeshRenderer<G, M>) {
        self.renderers.push(renderer);
    }

    pub fn renderers(&self) -> &[MeshRenderer<G, M>] {
        &self.renderers
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeshRenderer<G, M>> {
        self.renderers.iter()
    }

    pub fn into_renderers(self) -> Vec<MeshRenderer<G, M>> {
        self.renderers
    }
}

impl<'a, G, M> IntoIterator for &'a Entity<G, M> {
    type Item = &'a MeshRenderer<G, M>;
    type IntoIter = std::slice::Iter<'a, MeshRenderer<G, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.renderers.iter()
    }
}

impl<G, M> IntoIterator for Entity<G, M> {
    type Item = MeshRenderer<G, M>;
    type IntoIter = std::vec::IntoIter<MeshRenderer<G, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.renderers.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderers_keep_insertion_order() {
        let mut entity: Entity<&str, u32> = Entity::new("crate.glb");
        entity.add_renderer(MeshRenderer::new("lid", 0));
        entity.add_renderer(MeshRenderer::new("body", 1));

        assert_eq!(entity.name(), "crate.glb");
        assert_eq!(entity.len(), 2);
        let names: Vec<&str> = entity.iter().map(|r| *r.geometry()).collect();
        assert_eq!(names, vec!["lid", "body"]);
    }

    #[test]
    fn parts_are_handed_back() {
        let mut entity: Entity<Vec<u8>, String> = Entity::new("a");
        entity.add_renderer(MeshRenderer::new(vec![1, 2], "mat".to_string()));
        let (geometry, material) = entity.into_iter().next().unwrap().into_parts();
        assert_eq!(geometry, vec![1, 2]);
        assert_eq!(material, "mat");
    }

    #[test]
    fn new_entity_is_empty() {
        let entity: Entity = Entity::new("empty");
        assert!(entity.is_empty());
    }
}
