//! lumen core - scene storage for the path tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Triangle` and the `quad` helper
//! - **Materials**: `Material`, validated when registered with a scene
//! - **Scene**: triangles paired with material ids, read-only once built
//! - **Built-in scenes**: `scenes::cornell_box`
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::scenes::cornell_box;
//!
//! let scene = cornell_box()?;
//! println!("Loaded {} triangles", scene.triangle_count());
//! ```

pub mod error;
pub mod material;
pub mod scene;
pub mod scenes;
pub mod triangle;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use material::{Material, MaterialId};
pub use scene::{Scene, TriangleId};
pub use triangle::{quad, Triangle};
