//! Batch evaluation of the vertex and fragment stages
//!
//! Every invocation is a pure function of its inputs with no shared
//! mutable state or ordering, so batches parallelize freely with rayon.
//! Depth testing and compositing of the resulting fragments belong to the
//! surrounding frame pipeline.

pub mod mesh;

pub use mesh::Mesh;

use rayon::prelude::*;

use crate::core::types::{Vec2, Vec3};
use crate::field::ScalarField;
use crate::instance::{InstanceRecord, InstanceSet};
use crate::shade::{BlendMode, ShadedFragment, ShadingConfig, shade_surface};
use crate::surface::{DepressionControl, SurfaceReconstructor, SurfaceSample};

/// Vertex stage for a displaced surface: reconstruct every vertex of the
/// mesh under one transform record.
pub fn reconstruct_mesh(
    mesh: &Mesh,
    reconstructor: &SurfaceReconstructor,
    height: &ScalarField,
    depression: Option<&DepressionControl>,
    record: &InstanceRecord,
) -> Vec<SurfaceSample> {
    mesh.positions
        .par_iter()
        .map(|&local| reconstructor.reconstruct(height, depression, local, record))
        .collect()
}

/// Vertex stage for an instanced batch: apply each instance's transform
/// pair to the base mesh. Output is grouped by instance, `mesh.vertex_count()`
/// samples per instance, `instances.len() * mesh.vertex_count()` total.
pub fn transform_instanced(mesh: &Mesh, instances: &InstanceSet) -> Vec<SurfaceSample> {
    instances
        .records()
        .par_iter()
        .flat_map_iter(|record| {
            (0..mesh.vertex_count()).map(move |i| {
                let normal = mesh.normals.get(i).copied().unwrap_or(Vec3::Z);
                SurfaceSample {
                    position: record.transform_point(mesh.positions[i]),
                    normal: record
                        .transform_normal(normal)
                        .try_normalize()
                        .unwrap_or(Vec3::Z),
                    uv: mesh.uvs.get(i).copied().unwrap_or(Vec2::ZERO),
                }
            })
        })
        .collect()
}

/// Fragment stage: shade a batch of surface samples under one blend mode
/// and configuration.
pub fn shade_samples(
    samples: &[SurfaceSample],
    mode: &BlendMode<'_>,
    cfg: &ShadingConfig,
) -> Vec<ShadedFragment> {
    samples
        .par_iter()
        .map(|sample| shade_surface(sample, mode, cfg))
        .collect()
}
