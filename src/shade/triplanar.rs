//! Triplanar projection blending
//!
//! Projects three color fields along the principal axes and blends them by
//! normal alignment, avoiding UV-unwrap seams on arbitrary slopes: steep
//! faces automatically favor their best-aligned projection.

use crate::core::types::{Vec2, Vec3, Vec4};
use crate::field::ColorField;

/// Scale on the xy-plane projection coordinates, decorrelating its tiling
/// from the side projections.
pub const XY_PLANE_SCALE: f32 = 1.6;

/// Fixed 45° rotation used to decorrelate repeated projections of the same
/// texture.
pub fn rotate45(p: Vec2) -> Vec2 {
    const INV_SQRT2: f32 = std::f32::consts::FRAC_1_SQRT_2;
    Vec2::new((p.x - p.y) * INV_SQRT2, (p.x + p.y) * INV_SQRT2)
}

/// Per-axis blend weights from a unit normal.
///
/// Componentwise `|N|^sharpness`, normalized to sum to exactly 1 for any
/// non-degenerate normal. Higher sharpness concentrates weight on the most
/// axis-aligned plane; 8 is the typical value.
pub fn triplanar_weights(normal: Vec3, sharpness: f32) -> Vec3 {
    let w = normal.abs().powf(sharpness);
    w / (w.x + w.y + w.z)
}

/// The three projected color fields, keyed to their principal plane.
#[derive(Clone, Copy)]
pub struct TriplanarMaps<'a> {
    pub xy: &'a ColorField,
    pub xz: &'a ColorField,
    pub yz: &'a ColorField,
}

/// Sample the two side projections at the world position.
pub(crate) fn side_colors(
    world: Vec3,
    xz: &ColorField,
    yz: &ColorField,
    lod: f32,
) -> (Vec4, Vec4) {
    (
        xz.sample(Vec2::new(world.x, world.z), lod),
        yz.sample(Vec2::new(world.y, world.z), lod),
    )
}

/// Weighted combination: the xy projection is weighted by the normal's z
/// alignment, xz by y, yz by x.
pub(crate) fn combine(weights: Vec3, xy: Vec4, xz: Vec4, yz: Vec4) -> Vec4 {
    xy * weights.z + xz * weights.y + yz * weights.x
}

/// Blend the three projections at a world position under a unit normal.
pub fn triplanar_color(
    world: Vec3,
    normal: Vec3,
    maps: &TriplanarMaps<'_>,
    sharpness: f32,
    lod: f32,
) -> Vec4 {
    let weights = triplanar_weights(normal, sharpness);
    let xy = maps
        .xy
        .sample(rotate45(world.truncate() * XY_PLANE_SCALE), lod);
    let (xz, yz) = side_colors(world, maps.xz, maps.yz, lod);
    combine(weights, xy, xz, yz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_normals() -> Vec<Vec3> {
        let mut normals = vec![Vec3::X, Vec3::Y, Vec3::Z, -Vec3::Z];
        for i in 0..32 {
            let a = i as f32 * 0.41;
            let b = i as f32 * 0.73;
            normals.push(
                Vec3::new(a.sin() * b.cos(), a.sin() * b.sin(), a.cos()).normalize(),
            );
        }
        normals
    }

    #[test]
    fn test_weights_sum_to_one() {
        for n in unit_normals() {
            let w = triplanar_weights(n, 8.0);
            assert!(
                (w.x + w.y + w.z - 1.0).abs() < 1e-5,
                "weights {w:?} for normal {n:?}"
            );
        }
    }

    #[test]
    fn test_axis_aligned_normal_selects_its_plane() {
        let w = triplanar_weights(Vec3::Z, 8.0);
        assert!((w.z - 1.0).abs() < 1e-6);
        let w = triplanar_weights(Vec3::X, 8.0);
        assert!((w.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sharpness_concentrates_weight() {
        let n = Vec3::new(0.3, 0.2, 1.0).normalize();
        let soft = triplanar_weights(n, 1.0);
        let sharp = triplanar_weights(n, 8.0);
        assert!(sharp.z > soft.z);
    }

    #[test]
    fn test_rotate45_preserves_length() {
        let p = Vec2::new(3.0, -1.5);
        assert!((rotate45(p).length() - p.length()).abs() < 1e-5);
    }

    #[test]
    fn test_up_facing_surface_takes_the_xy_projection() {
        let red = ColorField::solid(Vec4::new(1.0, 0.0, 0.0, 1.0));
        let blue = ColorField::solid(Vec4::new(0.0, 0.0, 1.0, 1.0));
        let maps = TriplanarMaps {
            xy: &red,
            xz: &blue,
            yz: &blue,
        };
        let c = triplanar_color(Vec3::new(0.5, 0.5, 0.0), Vec3::Z, &maps, 8.0, 0.0);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!(c.z < 1e-6);
    }

    #[test]
    fn test_steep_face_takes_a_side_projection() {
        let red = ColorField::solid(Vec4::new(1.0, 0.0, 0.0, 1.0));
        let blue = ColorField::solid(Vec4::new(0.0, 0.0, 1.0, 1.0));
        let maps = TriplanarMaps {
            xy: &red,
            xz: &blue,
            yz: &blue,
        };
        let c = triplanar_color(Vec3::ZERO, Vec3::X, &maps, 8.0, 0.0);
        assert!((c.z - 1.0).abs() < 1e-6);
    }
}
