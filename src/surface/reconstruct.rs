//! Displaced surface reconstruction via finite differences

use crate::core::types::{Mat3, Vec2, Vec3};
use crate::field::ScalarField;
use crate::instance::InstanceRecord;
use super::depression::DepressionControl;

/// Finite-difference step for full terrain tiles.
pub const TERRAIN_STEP: f32 = 0.05;
/// Finite-difference step for fine surface patches.
pub const PATCH_STEP: f32 = 0.01;

/// Below this squared gradient magnitude the surface is treated as flat and
/// the reconstructor returns the exact up normal instead of normalizing.
const FLAT_GRADIENT_EPSILON: f32 = 1e-12;

/// Sign convention of the finite difference feeding the normal.
///
/// Both conventions appear among the displacement passes; the difference only
/// flips the tangent-plane orientation of the renormalized result, so each
/// use site keeps its own convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffConvention {
    /// du = (z - z_u) / dx
    CenterMinusForward,
    /// du = (z_u - z) / dx
    ForwardMinusCenter,
}

/// Where the height offset is applied relative to the instance transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplacementMode {
    /// Displace the local position along local z before the model transform,
    /// so the displacement follows the object's orientation. Used for
    /// undulating meshes.
    ObjectSpace,
    /// Offset the transformed position vertically in world space. Used for
    /// terrain tiles.
    WorldVertical,
}

/// The per-vertex result: ephemeral, consumed within the same invocation.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    pub position: Vec3,
    /// Unit length by construction.
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Reconstructs displaced positions and unit normals from a height field.
///
/// The world→uv mapping is an affine 3x3 matrix acting on homogeneous xy
/// and must be invertible (the inverse locates the finite-difference taps
/// in world space for the depression deformer).
#[derive(Clone, Debug)]
pub struct SurfaceReconstructor {
    world_to_uv: Mat3,
    uv_to_world: Mat3,
    /// Finite-difference step in uv units.
    pub step: f32,
    pub convention: DiffConvention,
    pub mode: DisplacementMode,
}

impl SurfaceReconstructor {
    pub fn new(
        world_to_uv: Mat3,
        step: f32,
        convention: DiffConvention,
        mode: DisplacementMode,
    ) -> Self {
        Self {
            world_to_uv,
            uv_to_world: world_to_uv.inverse(),
            step,
            convention,
            mode,
        }
    }

    /// The uv coordinate a world-space xy position maps to.
    pub fn uv_at(&self, world_xy: Vec2) -> Vec2 {
        (self.world_to_uv * world_xy.extend(1.0)).truncate()
    }

    fn world_at(&self, uv: Vec2) -> Vec2 {
        (self.uv_to_world * uv.extend(1.0)).truncate()
    }

    /// Height at a uv coordinate with the depression folded in, so all
    /// finite-difference taps see the deformed surface and the dent shades.
    fn height_at(
        &self,
        height: &ScalarField,
        depression: Option<&DepressionControl>,
        uv: Vec2,
    ) -> f32 {
        let mut h = height.sample(uv);
        if let Some(dep) = depression {
            h -= dep.falloff(self.world_at(uv));
        }
        h
    }

    /// Sample the height and derive the unit surface normal at `uv`.
    fn probe(
        &self,
        height: &ScalarField,
        depression: Option<&DepressionControl>,
        uv: Vec2,
    ) -> (f32, Vec3) {
        let z = self.height_at(height, depression, uv);
        let zu = self.height_at(height, depression, uv + Vec2::new(self.step, 0.0));
        let zv = self.height_at(height, depression, uv + Vec2::new(0.0, self.step));

        let (du, dv) = match self.convention {
            DiffConvention::CenterMinusForward => ((z - zu) / self.step, (z - zv) / self.step),
            DiffConvention::ForwardMinusCenter => ((zu - z) / self.step, (zv - z) / self.step),
        };

        // A flat sample leaves a zero gradient; return the exact up vector
        // rather than normalizing a vector we know the answer for.
        let normal = if du * du + dv * dv < FLAT_GRADIENT_EPSILON {
            Vec3::Z
        } else {
            Vec3::new(du, dv, 1.0).normalize()
        };

        (z, normal)
    }

    /// Reconstruct the displaced surface sample for a base vertex.
    ///
    /// The vertex is given in local space together with its instance
    /// transform pair; non-instanced draws pass [`InstanceRecord::IDENTITY`]
    /// or a per-draw record. The uv always derives from the undisplaced
    /// world position.
    pub fn reconstruct(
        &self,
        height: &ScalarField,
        depression: Option<&DepressionControl>,
        local: Vec3,
        record: &InstanceRecord,
    ) -> SurfaceSample {
        let base_world = record.transform_point(local);
        let uv = self.uv_at(base_world.truncate());
        let (h, normal) = self.probe(height, depression, uv);

        match self.mode {
            DisplacementMode::WorldVertical => SurfaceSample {
                position: base_world + Vec3::Z * h,
                normal,
                uv,
            },
            DisplacementMode::ObjectSpace => {
                let position = record.transform_point(local + Vec3::Z * h);
                let normal = record
                    .transform_normal(normal)
                    .try_normalize()
                    .unwrap_or(Vec3::Z);
                SurfaceSample {
                    position,
                    normal,
                    uv,
                }
            }
        }
    }
}
