//! Scene assembly: baked fields plus scattered foliage populations
//!
//! A seeded, deterministic composition of one terrain tile and the
//! shrub/bush/tree instance sets sitting on it. The surrounding frame loop
//! owns cameras, draw submission and frame-boundary synchronization.

pub mod heightmap;

pub use heightmap::{
    bake_height_field, bake_variant_field, height_noise, height_noise_over_base, HeightMapParams,
};

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat3, Vec2};
use crate::core::{Error, Result};
use crate::field::ScalarField;
use crate::instance::{InstanceSet, ScatterBuilder};
use crate::surface::{
    DiffConvention, DisplacementMode, SurfaceReconstructor, TERRAIN_STEP,
};

/// Side length of the square scene tile in world units.
pub const SCENE_SIZE: f32 = 10.0;

/// Scale ranges for one scattered population.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationParams {
    pub density: f32,
    pub limit: Option<usize>,
    pub scale_range: (f32, f32),
    pub z_scale_range: (f32, f32),
}

/// User-facing scene configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    pub seed: u32,
    pub size: f32,
    pub height_map: HeightMapParams,
    pub shrubs: PopulationParams,
    pub bushes: PopulationParams,
    pub trees: PopulationParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            seed: 0,
            size: SCENE_SIZE,
            height_map: HeightMapParams::default(),
            shrubs: PopulationParams {
                density: 50.0,
                limit: None,
                scale_range: (1.0, 1.0),
                z_scale_range: (0.4, 1.2),
            },
            bushes: PopulationParams {
                density: 30.0,
                limit: None,
                scale_range: (1.0, 1.0),
                z_scale_range: (0.9, 1.0),
            },
            trees: PopulationParams {
                density: 1.0,
                limit: Some(7),
                scale_range: (0.5, 1.0),
                z_scale_range: (1.0, 1.0),
            },
        }
    }
}

impl SceneParams {
    /// Save as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file written by [`SceneParams::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::Config(e.to_string()))
    }
}

/// A generated scene: read-only fields, reconstructor and instance sets.
pub struct Scene {
    pub height: ScalarField,
    pub variant: ScalarField,
    pub reconstructor: SurfaceReconstructor,
    pub shrubs: InstanceSet,
    pub bushes: InstanceSet,
    pub trees: InstanceSet,
}

impl Scene {
    /// Generate the scene deterministically from its parameters.
    pub fn generate(params: &SceneParams) -> Self {
        let start = Instant::now();
        let extent = (0.0, params.size, 0.0, params.size);

        let height_map = HeightMapParams {
            seed: params.seed,
            ..params.height_map
        };
        let height = bake_height_field(&height_map, extent);
        let variant = bake_variant_field(params.seed, extent, height_map.resolution);

        let reconstructor = SurfaceReconstructor::new(
            Mat3::from_scale(Vec2::splat(1.0 / params.size)),
            TERRAIN_STEP,
            DiffConvention::CenterMinusForward,
            DisplacementMode::WorldVertical,
        );

        let scatter = |pop: &PopulationParams, salt: u32| {
            let mut builder = ScatterBuilder::new()
                .with_density(pop.density)
                .with_scale_range(pop.scale_range.0, pop.scale_range.1)
                .with_z_scale_range(pop.z_scale_range.0, pop.z_scale_range.1)
                .on_height_field(&height)
                .over_extent(extent);
            if let Some(limit) = pop.limit {
                builder = builder.with_limit(limit);
            }
            builder.build(params.seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9)))
        };

        let shrubs = scatter(&params.shrubs, 1);
        let bushes = scatter(&params.bushes, 2);
        let trees = scatter(&params.trees, 3);

        log::info!(
            "generated scene seed={} ({} shrubs, {} bushes, {} trees) in {}ms",
            params.seed,
            shrubs.len(),
            bushes.len(),
            trees.len(),
            start.elapsed().as_millis()
        );

        Scene {
            height,
            variant,
            reconstructor,
            shrubs,
            bushes,
            trees,
        }
    }
}
