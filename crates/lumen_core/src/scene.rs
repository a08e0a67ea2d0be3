//! Scene storage.
//!
//! A scene is an ordered list of triangles, each paired with a material
//! registered with the same scene. It is built once and then shared read-only
//! by every render thread.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{SceneError, SceneResult};
use crate::material::{Material, MaterialId, MaterialTable};
use crate::triangle::Triangle;

static NEXT_SCENE_KEY: AtomicU64 = AtomicU64::new(0);

/// Identity of one scene, stamped into every handle it issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SceneKey(u64);

impl SceneKey {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Index of a triangle in a [`Scene`].
///
/// Only a scene hands these out and each one is tied to the scene that issued
/// it. Looking one up in a different scene panics instead of returning some
/// other triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId {
    scene: SceneKey,
    index: usize,
}

impl TriangleId {
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "triangle #{}", self.index)
    }
}

/// Triangles plus the materials they reference.
#[derive(Debug)]
pub struct Scene {
    /// Scene name, used in logs
    pub name: String,

    key: SceneKey,
    materials: MaterialTable,
    triangles: Vec<Triangle>,
    triangle_materials: Vec<MaterialId>,
}

impl Scene {
    /// Create an empty scene with no materials.
    pub fn new(name: impl Into<String>) -> Self {
        let key = SceneKey::next();
        Self {
            name: name.into(),
            key,
            materials: MaterialTable::new(key),
            triangles: Vec::new(),
            triangle_materials: Vec::new(),
        }
    }

    /// Validate a material and register it with this scene.
    pub fn add_material(&mut self, material: Material) -> SceneResult<MaterialId> {
        self.materials.add(material)
    }

    /// Add a triangle and return its ID.
    ///
    /// The material must have been registered with this scene. Zero-area
    /// triangles are kept (they simply never get hit) but logged.
    pub fn add_triangle(
        &mut self,
        triangle: Triangle,
        material: MaterialId,
    ) -> SceneResult<TriangleId> {
        if self.materials.get(material).is_none() {
            return Err(SceneError::UnknownMaterial(material));
        }

        let id = TriangleId {
            scene: self.key,
            index: self.triangles.len(),
        };
        if triangle.is_degenerate() {
            log::warn!("Scene '{}': {} has zero area and will never be hit", self.name, id);
        }

        self.triangles.push(triangle);
        self.triangle_materials.push(material);
        Ok(id)
    }

    /// Add several triangles sharing one material.
    pub fn add_triangles(
        &mut self,
        triangles: impl IntoIterator<Item = Triangle>,
        material: MaterialId,
    ) -> SceneResult<()> {
        for triangle in triangles {
            self.add_triangle(triangle, material)?;
        }
        Ok(())
    }

    /// Position of `id` in this scene's storage.
    ///
    /// # Panics
    ///
    /// If `id` was issued by another scene.
    #[inline]
    fn slot(&self, id: TriangleId) -> usize {
        assert!(id.scene == self.key, "{} belongs to a different scene", id);
        id.index
    }

    /// Get a triangle's vertices.
    ///
    /// # Panics
    ///
    /// If `id` was issued by another scene.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[self.slot(id)]
    }

    /// Get the material assigned to a triangle.
    ///
    /// # Panics
    ///
    /// If `id` was issued by another scene.
    #[inline]
    pub fn material_of(&self, id: TriangleId) -> &Material {
        let material = self.triangle_materials[self.slot(id)];
        // Checked against the table in add_triangle.
        &self.materials[material]
    }

    /// Iterate over all triangles in insertion order.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> {
        let scene = self.key;
        self.triangles
            .iter()
            .enumerate()
            .map(move |(index, tri)| (TriangleId { scene, index }, tri))
    }

    /// Get total triangle count.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles whose material emits light.
    pub fn emissive_triangle_count(&self) -> usize {
        self.triangles()
            .filter(|(id, _)| self.material_of(*id).is_emissive())
            .count()
    }
}
