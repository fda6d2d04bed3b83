//! Density-driven foliage scatter
//!
//! Places instances over a rectangle according to a low-frequency noise
//! density, hugging a height field, with randomized rotation and scale.
//! All randomness comes from seeded integer hashing, so a given seed and
//! configuration always reproduce the same instance set.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::core::types::{Mat4, Vec2, Vec3};
use crate::field::ScalarField;
use super::record::InstanceRecord;
use super::set::InstanceSet;

/// Integer hash producing a value in [0, 1].
fn hash_2d(ix: i32, iy: i32, seed: u32) -> f32 {
    let mut h = (ix as u32)
        .wrapping_mul(374761393)
        .wrapping_add((iy as u32).wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1274126177));
    h = (h ^ (h >> 13)).wrapping_mul(1103515245);
    h = h ^ (h >> 16);
    (h & 0x7FFFFFFF) as f32 / 0x7FFFFFFF_u32 as f32
}

/// Decorrelated draw within a cell: `salt` picks the stream, `k` the point.
fn cell_hash(cx: i32, cy: i32, k: u32, salt: u32, seed: u32) -> f32 {
    hash_2d(
        cx,
        cy,
        seed.wrapping_add(salt.wrapping_mul(0x9E3779B9))
            .wrapping_add(k.wrapping_mul(0x85EBCA6B)),
    )
}

fn lerp(range: (f32, f32), t: f32) -> f32 {
    range.0 + (range.1 - range.0) * t
}

/// Builder for a scattered instance population.
///
/// The density is a rough scale in instances per unit area, not an exact
/// average: large-scale noise variation dominates the realized count.
#[derive(Clone, Debug)]
pub struct ScatterBuilder<'a> {
    density: f32,
    limit: usize,
    scale_range: (f32, f32),
    z_scale_range: (f32, f32),
    height: Option<&'a ScalarField>,
    extent: (f32, f32, f32, f32),
    resolution: usize,
}

impl<'a> ScatterBuilder<'a> {
    pub fn new() -> Self {
        Self {
            density: 0.0,
            limit: usize::MAX,
            scale_range: (1.0, 1.0),
            z_scale_range: (1.0, 1.0),
            height: None,
            extent: (0.0, 1.0, 0.0, 1.0),
            resolution: 100,
        }
    }

    /// Approximate instances per unit area.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Hard cap on the instance count, enforced by deterministic
    /// subsampling.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Uniform scale range applied in all directions.
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.scale_range = (min, max);
        self
    }

    /// Extra stretch range along local z (height).
    pub fn with_z_scale_range(mut self, min: f32, max: f32) -> Self {
        self.z_scale_range = (min, max);
        self
    }

    /// Height field the instances sit on. Without one they sit at z = 0.
    pub fn on_height_field(mut self, height: &'a ScalarField) -> Self {
        self.height = Some(height);
        self
    }

    /// World-space rectangle (x_min, x_max, y_min, y_max) to populate. The
    /// height field, if any, is assumed to span the same rectangle.
    pub fn over_extent(mut self, extent: (f32, f32, f32, f32)) -> Self {
        self.extent = extent;
        self
    }

    pub fn build(self, seed: u32) -> InstanceSet {
        let (x_min, x_max, y_min, y_max) = self.extent;
        let dx = (x_max - x_min) / self.resolution as f32;
        let dy = (y_max - y_min) / self.resolution as f32;
        let area = dx * dy;

        let distribution = density_distribution(self.density, seed);

        let mut records = Vec::new();
        for cx in 0..self.resolution as i32 {
            for cy in 0..self.resolution as i32 {
                let fx = x_min + dx * cx as f32;
                let fy = y_min + dy * cy as f32;

                let expected = distribution
                    .get([(fx + dx / 2.0) as f64, (fy + dy / 2.0) as f64])
                    as f32
                    * area;
                if expected <= 0.0 {
                    continue;
                }
                let count = (expected + cell_hash(cx, cy, 0, 0, seed)).floor() as usize;

                for k in 0..count as u32 {
                    let p = Vec2::new(
                        fx + dx * cell_hash(cx, cy, k, 1, seed),
                        fy + dy * cell_hash(cx, cy, k, 2, seed),
                    );
                    records.push(self.place(p, cx, cy, k, seed));
                }
            }
        }

        if records.len() > self.limit {
            // Deterministic subsample: rank by hash, keep the first `limit`.
            let mut keyed: Vec<(f32, InstanceRecord)> = records
                .into_iter()
                .enumerate()
                .map(|(i, r)| (hash_2d(i as i32, 0, seed ^ 0x51AF_E2D1), r))
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            keyed.truncate(self.limit);
            records = keyed.into_iter().map(|(_, r)| r).collect();
        }

        log::info!("scattered {} instances", records.len());
        InstanceSet::new(records)
    }

    fn place(&self, p: Vec2, cx: i32, cy: i32, k: u32, seed: u32) -> InstanceRecord {
        let (x_min, x_max, y_min, y_max) = self.extent;
        let z = match self.height {
            Some(field) => field.sample(Vec2::new(
                (p.x - x_min) / (x_max - x_min),
                (p.y - y_min) / (y_max - y_min),
            )),
            None => 0.0,
        };

        let rotation = std::f32::consts::TAU * cell_hash(cx, cy, k, 3, seed);
        let scale = lerp(self.scale_range, cell_hash(cx, cy, k, 4, seed));
        let z_scale = lerp(self.z_scale_range, cell_hash(cx, cy, k, 5, seed));

        InstanceRecord::from_model(
            Mat4::from_translation(Vec3::new(p.x, p.y, z))
                * Mat4::from_rotation_z(rotation)
                * Mat4::from_scale(Vec3::new(scale, scale, scale * z_scale)),
        )
    }
}

impl Default for ScatterBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-frequency density distribution in instances per unit area.
///
/// Fbm mapped from [-1, 1] to [0, density]; features span roughly five
/// units, so clumps and clearings emerge at a natural scale. The [0,
/// density] mapping means the configured density is the mean instance
/// count per unit area, at the cost of true clearings where the noise
/// bottoms out.
fn density_distribution(density: f32, seed: u32) -> impl NoiseFn<f64, 2> {
    let base = Fbm::<Perlin>::new(seed).set_octaves(4).set_frequency(0.2);
    noise::ScaleBias::new(base)
        .set_scale(density as f64 / 2.0)
        .set_bias(density as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_builder(height: &ScalarField) -> ScatterBuilder<'_> {
        ScatterBuilder::new()
            .with_density(5.0)
            .over_extent((0.0, 10.0, 0.0, 10.0))
            .on_height_field(height)
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let height = ScalarField::constant(0.0, 8);
        let a = populated_builder(&height).build(7);
        let b = populated_builder(&height).build(7);
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.records().iter().zip(b.records()) {
            assert_eq!(ra.model, rb.model);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let height = ScalarField::constant(0.0, 8);
        let a = populated_builder(&height).build(1);
        let b = populated_builder(&height).build(2);
        // Counts almost surely differ; if not, some transform must.
        let same = a.len() == b.len()
            && a.records()
                .iter()
                .zip(b.records())
                .all(|(ra, rb)| ra.model == rb.model);
        assert!(!same);
    }

    #[test]
    fn test_limit_is_enforced() {
        let height = ScalarField::constant(0.0, 8);
        let set = populated_builder(&height).with_limit(10).build(3);
        assert!(set.len() <= 10);
    }

    #[test]
    fn test_zero_density_scatters_nothing() {
        let height = ScalarField::constant(0.0, 8);
        let set = ScatterBuilder::new()
            .over_extent((0.0, 10.0, 0.0, 10.0))
            .on_height_field(&height)
            .build(3);
        assert!(set.is_empty());
    }

    #[test]
    fn test_instances_sit_on_the_height_field() {
        let height = ScalarField::constant(2.5, 8);
        let set = populated_builder(&height).build(11);
        assert!(!set.is_empty());
        for record in set.records() {
            // Translation column carries the sampled height.
            let z = record.model.w_axis.z;
            assert!((z - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_positions_stay_inside_extent() {
        let height = ScalarField::constant(0.0, 8);
        let set = populated_builder(&height).build(23);
        for record in set.records() {
            let t = record.model.w_axis;
            assert!((0.0..=10.0).contains(&t.x));
            assert!((0.0..=10.0).contains(&t.y));
        }
    }
}
