//! Built-in scenes.

use lumen_math::{Color, Vec3};

use crate::error::SceneResult;
use crate::material::Material;
use crate::scene::Scene;
use crate::triangle::{quad, Triangle};

/// An open box lit by two emissive panels.
///
/// The box spans `[-0.5, 0.5]` in x and y and `[0, 1]` in z, open towards the
/// camera at `z = 0`. A warm panel hangs just under the ceiling, a bright blue
/// strip runs along the left wall, and three upright quads cast shadows. 20
/// triangles over 6 materials.
pub fn cornell_box() -> SceneResult<Scene> {
    let mut scene = Scene::new("cornell_box");

    let white = scene.add_material(Material::diffuse(Color::WHITE))?;
    let red = scene.add_material(Material::diffuse(Color::new(1.0, 0.05, 0.05)))?;
    let green =
        scene.add_material(Material::diffuse(Color::new(0.0, 1.0, 0.5)).with_roughness(0.0))?;
    let warm_light = scene.add_material(Material::emissive(Color::new(1.0, 0.05, 0.01), 2.0))?;
    let blue_light = scene.add_material(Material::emissive(Color::new(0.1, 0.02, 1.0), 4.0))?;
    let blue = scene.add_material(Material::diffuse(Color::new(0.05, 0.05, 1.0)))?;

    // Corners: [L|R][B|T][F|B] = left/right, bottom/top, front/back.
    let lbf = Vec3::new(-0.5, -0.5, 0.0);
    let lbb = Vec3::new(-0.5, -0.5, 1.0);
    let ltf = Vec3::new(-0.5, 0.5, 0.0);
    let ltb = Vec3::new(-0.5, 0.5, 1.0);
    let rbf = Vec3::new(0.5, -0.5, 0.0);
    let rbb = Vec3::new(0.5, -0.5, 1.0);
    let rtf = Vec3::new(0.5, 0.5, 0.0);
    let rtb = Vec3::new(0.5, 0.5, 1.0);

    // Walls
    scene.add_triangles(quad(lbb, ltb, rtb, rbb), white)?; // back
    scene.add_triangles(quad(lbb, rbb, rbf, lbf), white)?; // ground
    scene.add_triangles(quad(lbf, ltf, ltb, lbb), red)?; // left
    scene.add_triangles(quad(rbb, rtb, rtf, rbf), green)?; // right
    scene.add_triangles(quad(ltb, ltf, rtf, rtb), white)?; // top

    // Lights
    scene.add_triangles(
        [
            Triangle::new(
                Vec3::new(-0.1, 0.499, 0.6),
                Vec3::new(-0.1, 0.499, 0.4),
                Vec3::new(0.1, 0.499, 0.4),
            ),
            Triangle::new(
                Vec3::new(-0.1, 0.499, 0.6),
                Vec3::new(0.1, 0.499, 0.4),
                Vec3::new(0.1, 0.499, 0.6),
            ),
        ],
        warm_light,
    )?;
    scene.add_triangles(
        [
            Triangle::new(
                Vec3::new(-0.499, 0.2, 0.2),
                Vec3::new(-0.499, 0.25, 0.2),
                Vec3::new(-0.499, 0.25, 0.8),
            ),
            Triangle::new(
                Vec3::new(-0.499, 0.25, 0.8),
                Vec3::new(-0.499, 0.2, 0.8),
                Vec3::new(-0.499, 0.2, 0.2),
            ),
        ],
        blue_light,
    )?;

    // Shadow casters
    scene.add_triangles(
        quad(
            Vec3::new(0.25, -0.45, 1.0),
            Vec3::new(0.25, 0.45, 1.0),
            Vec3::new(0.25, 0.45, 0.3),
            Vec3::new(0.25, -0.45, 0.3),
        ),
        white,
    )?;
    scene.add_triangles(
        quad(
            Vec3::new(0.15, 0.05, 0.7),
            Vec3::new(0.15, 0.15, 0.7),
            Vec3::new(0.15, 0.15, 0.5),
            Vec3::new(0.15, 0.05, 0.5),
        ),
        blue,
    )?;
    scene.add_triangles(
        quad(
            Vec3::new(0.1, -0.15, 0.7),
            Vec3::new(0.1, 0.1, 0.7),
            Vec3::new(0.1, 0.1, 0.5),
            Vec3::new(0.1, -0.15, 0.5),
        ),
        green,
    )?;

    log::info!(
        "Built scene '{}': {} triangles ({} emissive), {} materials",
        scene.name,
        scene.triangle_count(),
        scene.emissive_triangle_count(),
        scene.material_count()
    );

    Ok(scene)
}
