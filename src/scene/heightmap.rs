//! Layered procedural height and variant maps
//!
//! Composes the noise stack for a rocky undergrowth scene: a flattened Fbm
//! "rockyness" mask gating Manhattan-distance Worley ridges, layered over
//! rolling Fbm hills, optionally on top of an image-derived base layer.
//! Baked into [`ScalarField`]s for the reconstruction pipeline.

use noise::{MultiFractal, NoiseFn, ScaleBias, Seedable};
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::field::ScalarField;

/// Parameters for the layered height map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightMapParams {
    pub seed: u32,
    /// Texels per side of the baked field.
    pub resolution: usize,
    /// Overall amplitude of the ridge layer.
    pub rock_scale: f64,
    /// Amplitude of the rolling-hill layer.
    pub hill_scale: f64,
}

impl Default for HeightMapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            resolution: 256,
            rock_scale: 0.8,
            hill_scale: 0.3,
        }
    }
}

/// Derive an independent seed stream from a base seed.
fn mix_seed(seed: u32, salt: u32) -> u32 {
    let mut h = seed
        .wrapping_mul(747796405)
        .wrapping_add(salt.wrapping_mul(2891336453));
    h = (h ^ (h >> 15)).wrapping_mul(0x2C1B_3C6D);
    h ^ (h >> 12)
}

/// Sharp rock ridges: a flattened large-scale mask multiplied with
/// Manhattan-distance Worley cells.
///
/// Nameable so it can feed `Fbm<RockRidges>`; fractal layering of the
/// ridges themselves is what breaks up their cell structure.
pub struct RockRidges {
    f: Box<dyn NoiseFn<f64, 2>>,
    seed: u32,
}

impl RockRidges {
    pub fn new(seed: u32) -> Self {
        // Large scale features, not much detail; flatten everything below
        // the threshold so rocks appear in patches.
        let rockyness = noise::Fbm::<noise::Value>::new(mix_seed(seed, 1))
            .set_octaves(4)
            .set_frequency(0.5);
        let rockyness = ScaleBias::new(rockyness).set_bias(-0.5);
        let rockyness = noise::Max::new(rockyness, noise::Constant::new(0.0));
        let rockyness = ScaleBias::new(rockyness).set_scale(3.0);
        let rockyness = noise::Min::new(rockyness, noise::Constant::new(1.0));

        // Manhattan distance gives hard, faceted ridge lines.
        let ridges = noise::Worley::new(mix_seed(seed, 2))
            .set_frequency(1.0)
            .set_distance_function(&noise::core::worley::distance_functions::manhattan)
            .set_return_type(noise::core::worley::ReturnType::Distance);
        let ridges = Slice4d { inner: ridges };

        let rocks = noise::Multiply::new(rockyness, ridges);
        let rocks = ScaleBias::new(rocks).set_scale(0.2);

        Self {
            f: Box::new(rocks),
            seed,
        }
    }
}

impl Default for RockRidges {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseFn<f64, 2> for RockRidges {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.f.get(point)
    }
}

impl Seedable for RockRidges {
    fn set_seed(self, seed: u32) -> Self {
        Self::new(seed)
    }

    fn seed(&self) -> u32 {
        self.seed
    }
}

/// Skews a 4D noise function into a 2D slice, shearing the Worley cell
/// lattice so its axis alignment stops being visible.
struct Slice4d<F: NoiseFn<f64, 4>> {
    inner: F,
}

impl<F> NoiseFn<f64, 2> for Slice4d<F>
where
    F: NoiseFn<f64, 4>,
{
    fn get(&self, point: [f64; 2]) -> f64 {
        self.inner.get([
            0.5 * point[0] + point[1],
            point[1],
            point[0],
            2.0 * point[1],
        ])
    }
}

/// The full height function over world xy, before baking.
pub fn height_noise(params: &HeightMapParams) -> impl NoiseFn<f64, 2> + use<> {
    let rocks = noise::Fbm::<RockRidges>::new(mix_seed(params.seed, 3))
        .set_octaves(3)
        .set_lacunarity(3.0)
        .set_persistence(0.3)
        .set_frequency(0.8);
    let rocks = ScaleBias::new(rocks).set_scale(params.rock_scale);

    let hills = noise::Fbm::<noise::Value>::new(mix_seed(params.seed, 4))
        .set_octaves(6)
        .set_frequency(0.2);
    let hills = ScaleBias::new(hills)
        .set_scale(params.hill_scale)
        .set_bias(params.hill_scale);

    noise::Add::new(rocks, hills)
}

/// Adapts a baked scalar field into a noise source over world xy.
struct FieldNoise<'a> {
    field: &'a ScalarField,
    extent: (f32, f32, f32, f32),
}

impl NoiseFn<f64, 2> for FieldNoise<'_> {
    fn get(&self, point: [f64; 2]) -> f64 {
        let (x_min, x_max, y_min, y_max) = self.extent;
        let u = (point[0] as f32 - x_min) / (x_max - x_min);
        let v = (point[1] as f32 - y_min) / (y_max - y_min);
        f64::from(self.field.sample(Vec2::new(u, v)))
    }
}

/// The height function layered on top of a base field, typically loaded
/// from an image. The base value is squared before scaling, so dark
/// regions stay near flat while bright regions lift the terrain.
pub fn height_noise_over_base<'a>(
    params: &HeightMapParams,
    base: &'a ScalarField,
    extent: (f32, f32, f32, f32),
    base_scale: f64,
) -> impl NoiseFn<f64, 2> + use<'a> {
    let squared = noise::Multiply::new(
        FieldNoise { field: base, extent },
        FieldNoise { field: base, extent },
    );
    let scaled = ScaleBias::new(squared).set_scale(base_scale);
    noise::Add::new(height_noise(params), scaled)
}

/// Bake the height function over a world rectangle.
pub fn bake_height_field(
    params: &HeightMapParams,
    extent: (f32, f32, f32, f32),
) -> ScalarField {
    let start = std::time::Instant::now();
    let field = ScalarField::bake(&height_noise(params), extent, params.resolution);
    log::debug!(
        "baked {0}x{0} height field in {1}ms",
        params.resolution,
        start.elapsed().as_millis()
    );
    field
}

/// Bake the variant mask in [0, 1] used for dual-variant blending.
pub fn bake_variant_field(
    seed: u32,
    extent: (f32, f32, f32, f32),
    resolution: usize,
) -> ScalarField {
    let base = noise::Fbm::<noise::Perlin>::new(mix_seed(seed, 5))
        .set_octaves(2)
        .set_frequency(0.3);
    // Map [-1, 1] to [0, 1].
    let mask = ScaleBias::new(base).set_scale(0.5).set_bias(0.5);
    ScalarField::bake(&mask, extent, resolution)
}
