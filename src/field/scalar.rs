//! Single-channel fields: height maps and variant masks

use noise::NoiseFn;

use crate::core::Result;
use crate::core::types::Vec2;
use super::grid::Grid;

/// A 2D grid of scalar values over [0, 1]², sampled bilinearly.
///
/// Values are finite but otherwise unconstrained in sign and magnitude.
#[derive(Clone, Debug)]
pub struct ScalarField {
    grid: Grid<f32>,
}

impl ScalarField {
    pub fn new(grid: Grid<f32>) -> Self {
        Self { grid }
    }

    /// Field with the same value everywhere.
    pub fn constant(value: f32, resolution: usize) -> Self {
        Self {
            grid: Grid::from_fn(resolution, resolution, |_, _| value),
        }
    }

    /// Create a field from row-major values.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        Ok(Self {
            grid: Grid::from_vec(width, height, values)?,
        })
    }

    /// Create a field by evaluating `f` at every texel center (uv space).
    pub fn from_fn(resolution: usize, mut f: impl FnMut(Vec2) -> f32) -> Self {
        let grid = Grid::from_fn(resolution, resolution, |x, y| {
            f(Vec2::new(
                (x as f32 + 0.5) / resolution as f32,
                (y as f32 + 0.5) / resolution as f32,
            ))
        });
        Self { grid }
    }

    /// Bake a noise function over a world-space rectangle into a field.
    ///
    /// Texel (x, y) holds the noise value at the matching world position in
    /// `(x_min, x_max, y_min, y_max)`; sampling the baked field with the
    /// scene's world→uv map then reproduces the noise up to grid resolution.
    pub fn bake(
        noise: &(impl NoiseFn<f64, 2> + ?Sized),
        (x_min, x_max, y_min, y_max): (f32, f32, f32, f32),
        resolution: usize,
    ) -> Self {
        Self::from_fn(resolution, |uv| {
            let wx = x_min + uv.x * (x_max - x_min);
            let wy = y_min + uv.y * (y_max - y_min);
            noise.get([wx as f64, wy as f64]) as f32
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Bilinear sample; out-of-domain coordinates clamp to the field edge.
    pub fn sample(&self, coord: Vec2) -> f32 {
        self.grid.sample_bilinear(coord)
    }
}
