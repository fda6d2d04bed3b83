//! Shading configuration
//!
//! One immutable value collects the scene constants the shading passes
//! used to hardcode: light direction, alpha threshold and its comparison
//! operator, height darkening, LOD bias and triplanar sharpness.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Which side of the alpha threshold a fragment is rejected on.
///
/// The two cutout uses take different comparison operators and the
/// boundary behavior is deliberately asymmetric: foliage rejects alpha
/// exactly at the threshold, terrain keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdTest {
    /// Reject when `alpha <= threshold` (foliage cutout, θ = 0.5).
    RejectAtOrBelow,
    /// Reject when `alpha < threshold` (terrain blend, θ = 0.6).
    RejectBelow,
}

impl ThresholdTest {
    pub fn rejects(self, alpha: f32, threshold: f32) -> bool {
        match self {
            ThresholdTest::RejectAtOrBelow => alpha <= threshold,
            ThresholdTest::RejectBelow => alpha < threshold,
        }
    }
}

/// Contact-shadow approximation darkening low-lying areas:
/// `clamp(offset + slope * z, 0, 1)` multiplied into the lit color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightDarkening {
    pub offset: f32,
    pub slope: f32,
}

impl HeightDarkening {
    /// Coefficients of the terrain pass.
    pub const TERRAIN: Self = Self {
        offset: 0.3,
        slope: 2.0,
    };
    /// Stronger darkening used for ground-hugging undergrowth.
    pub const UNDERGROWTH: Self = Self {
        offset: 0.1,
        slope: 2.5,
    };

    pub fn factor(self, z: f32) -> f32 {
        (self.offset + self.slope * z).clamp(0.0, 1.0)
    }
}

/// Immutable shading constants passed into the shading routine per draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadingConfig {
    /// Unit light direction.
    pub light_dir: Vec3,
    pub alpha_threshold: f32,
    pub threshold_test: ThresholdTest,
    pub height_darkening: Option<HeightDarkening>,
    /// LOD applied to all color-field lookups. Negative values sharpen.
    pub lod_bias: f32,
    /// Exponent on |N| for the triplanar weights.
    pub triplanar_sharpness: f32,
}

impl ShadingConfig {
    pub fn default_light_dir() -> Vec3 {
        Vec3::new(0.5, 0.5, 1.0).normalize()
    }

    /// Cutout foliage: albedo textures with binary transparency.
    pub fn foliage() -> Self {
        Self {
            light_dir: Self::default_light_dir(),
            alpha_threshold: 0.5,
            threshold_test: ThresholdTest::RejectAtOrBelow,
            height_darkening: None,
            lod_bias: -1.5,
            triplanar_sharpness: 8.0,
        }
    }

    /// Multi-sampled terrain blends with height darkening.
    pub fn terrain() -> Self {
        Self {
            light_dir: Self::default_light_dir(),
            alpha_threshold: 0.6,
            threshold_test: ThresholdTest::RejectBelow,
            height_darkening: Some(HeightDarkening::TERRAIN),
            lod_bias: -1.5,
            triplanar_sharpness: 8.0,
        }
    }
}
