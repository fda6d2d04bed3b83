//! Dual-variant blending for the xy plane
//!
//! Two alternates of the ground texture are sampled under different
//! transforms and mixed by a spatial variant scalar, breaking up visible
//! texture repetition at large scales.

use crate::core::types::{Vec2, Vec4};
use crate::field::ColorField;
use super::triplanar::rotate45;

/// Coordinate scale for variant A (plain axes).
pub const VARIANT_A_SCALE: f32 = 1.6;
/// Coordinate scale for variant B (rotated 45°).
pub const VARIANT_B_SCALE: f32 = 1.5;

/// Quintic ease `t³(t(6t − 15) + 10)`.
///
/// C²-continuous at both ends, so blend boundaries carry no visible seam
/// the way a linear mix would. Input is clamped to [0, 1]; the output then
/// stays in [0, 1].
pub fn quintic_smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (6.0 * t - 15.0) + 10.0)
}

/// The two alternate color fields for one plane.
#[derive(Clone, Copy)]
pub struct VariantMaps<'a> {
    pub a: &'a ColorField,
    pub b: &'a ColorField,
}

/// Blend the variants at a world-space xy position by the smoothed scalar.
pub fn variant_color(world_xy: Vec2, t: f32, maps: &VariantMaps<'_>, lod: f32) -> Vec4 {
    let a = maps.a.sample(world_xy * VARIANT_A_SCALE, lod);
    let b = maps.b.sample(rotate45(world_xy) * VARIANT_B_SCALE, lod);
    a.lerp(b, quintic_smooth(t))
}
