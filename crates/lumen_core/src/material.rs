//! Surface materials and the table that owns them.

use std::fmt;
use std::ops::Index;

use lumen_math::Color;

use crate::error::{SceneError, SceneResult};
use crate::scene::SceneKey;

/// Surface description for a triangle.
///
/// Every surface is treated as fully diffuse. `roughness` is validated and
/// carried through to the sampler, but it does not narrow the sampling lobe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Surface roughness in [0, 1]. Currently not used for sampling.
    pub roughness: f32,

    /// Emission strength. Zero means the surface does not emit.
    pub emission: f32,

    /// Diffuse reflectance. For emitters this is also the light's tint.
    pub diffuse: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            emission: 0.0,
            diffuse: Color::WHITE,
        }
    }
}

impl Material {
    /// A non-emissive diffuse surface.
    pub fn diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// A light source tinted by `diffuse`, radiating `diffuse * emission`.
    pub fn emissive(diffuse: Color, emission: f32) -> Self {
        Self {
            emission,
            diffuse,
            ..Default::default()
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.emission > 0.0
    }

    /// Radiance seen when looking straight at this surface.
    pub fn radiance(&self) -> Color {
        self.diffuse * self.emission
    }

    fn validate(&self) -> SceneResult<()> {
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(SceneError::InvalidMaterial {
                reason: format!("roughness {} is outside [0, 1]", self.roughness),
            });
        }
        if !self.emission.is_finite() || self.emission < 0.0 {
            return Err(SceneError::InvalidMaterial {
                reason: format!("emission {} must be finite and non-negative", self.emission),
            });
        }
        if !self.diffuse.is_finite() || self.diffuse.min_channel() < 0.0 {
            return Err(SceneError::InvalidMaterial {
                reason: format!("diffuse {:?} must be finite and non-negative", self.diffuse),
            });
        }
        Ok(())
    }
}

/// Handle to a material registered with a [`Scene`](crate::Scene).
///
/// The handle remembers which scene issued it, so it cannot be used to pick a
/// material out of a different scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId {
    pub(crate) scene: SceneKey,
    pub(crate) index: usize,
}

impl MaterialId {
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material #{}", self.index)
    }
}

/// Ordered set of validated materials owned by one scene.
#[derive(Debug)]
pub(crate) struct MaterialTable {
    scene: SceneKey,
    materials: Vec<Material>,
}

impl MaterialTable {
    pub(crate) fn new(scene: SceneKey) -> Self {
        Self {
            scene,
            materials: Vec::new(),
        }
    }

    /// Validate and append a material, returning its id.
    pub(crate) fn add(&mut self, material: Material) -> SceneResult<MaterialId> {
        material.validate()?;
        let id = MaterialId {
            scene: self.scene,
            index: self.materials.len(),
        };
        self.materials.push(material);
        Ok(id)
    }

    pub(crate) fn get(&self, id: MaterialId) -> Option<&Material> {
        if id.scene != self.scene {
            return None;
        }
        self.materials.get(id.index)
    }

    pub(crate) fn len(&self) -> usize {
        self.materials.len()
    }
}

impl Index<MaterialId> for MaterialTable {
    type Output = Material;

    fn index(&self, id: MaterialId) -> &Material {
        &self.materials[id.index]
    }
}
