//! RGBA fields with a box-filtered mip pyramid and LOD-biased sampling

use crate::core::Result;
use crate::core::types::{Vec2, Vec4};
use super::grid::Grid;

/// A 2D grid of RGBA texels, sampled bilinearly with an explicit LOD.
///
/// A mip pyramid is built at construction by repeated 2x2 box filtering.
/// Sampling takes a level-of-detail value: fractional levels blend the two
/// neighboring mips, values below zero clamp to the finest level. A negative
/// LOD bias therefore sharpens the lookup versus the caller's base level.
#[derive(Clone, Debug)]
pub struct ColorField {
    levels: Vec<Grid<Vec4>>,
}

impl ColorField {
    /// Build the field and its mip pyramid from a base grid.
    pub fn new(base: Grid<Vec4>) -> Self {
        let mut levels = vec![base];
        while levels[levels.len() - 1].width() > 1 || levels[levels.len() - 1].height() > 1 {
            let next = downsample(&levels[levels.len() - 1]);
            levels.push(next);
        }
        Self { levels }
    }

    /// A 1x1 field of a single color.
    pub fn solid(color: Vec4) -> Self {
        Self {
            levels: vec![Grid::from_fn(1, 1, |_, _| color)],
        }
    }

    /// Build a field from 8-bit RGBA data (row-major, 4 bytes per texel).
    pub fn from_rgba8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        let texels = data
            .chunks_exact(4)
            .map(|px| {
                Vec4::new(
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                    px[3] as f32 / 255.0,
                )
            })
            .collect();
        Ok(Self::new(Grid::from_vec(width, height, texels)?))
    }

    pub fn width(&self) -> usize {
        self.levels[0].width()
    }

    pub fn height(&self) -> usize {
        self.levels[0].height()
    }

    /// Number of mip levels, including the base.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Coarsest addressable LOD.
    pub fn max_lod(&self) -> f32 {
        (self.levels.len() - 1) as f32
    }

    /// Bilinear sample at the given LOD (base level plus any bias).
    ///
    /// Fractional LODs blend the two enclosing mip levels; the value is
    /// clamped to the pyramid, so any negative bias lands on the base level.
    pub fn sample(&self, coord: Vec2, lod: f32) -> Vec4 {
        let lod = lod.clamp(0.0, self.max_lod());
        let lower = lod.floor() as usize;
        let frac = lod - lod.floor();

        let fine = self.levels[lower].sample_bilinear(coord);
        if frac <= f32::EPSILON {
            return fine;
        }
        let coarse = self.levels[lower + 1].sample_bilinear(coord);
        fine.lerp(coarse, frac)
    }
}

/// Halve a grid with a 2x2 box filter, clamping the footprint at the edges.
fn downsample(src: &Grid<Vec4>) -> Grid<Vec4> {
    let width = (src.width() / 2).max(1);
    let height = (src.height() / 2).max(1);
    Grid::from_fn(width, height, |x, y| {
        let (sx, sy) = (2 * x as i64, 2 * y as i64);
        let sum = src.texel_clamped(sx, sy)
            + src.texel_clamped(sx + 1, sy)
            + src.texel_clamped(sx, sy + 1)
            + src.texel_clamped(sx + 1, sy + 1);
        sum * 0.25
    })
}
