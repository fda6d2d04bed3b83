//! Dense 2D grid storage with bilinear, edge-clamped sampling

use crate::core::types::{Vec2, Vec4};
use crate::core::{Error, Result};

/// Texel types that can be blended by a bilinear filter.
pub trait Lerp: Copy {
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec4 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Row-major 2D grid of texels over the unit square.
///
/// Coordinates map [0, 1]² onto the texel centers; anything outside clamps
/// to the border texel.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid from row-major texel data.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Field("grid dimensions must be non-zero".into()));
        }
        if data.len() != width * height {
            return Err(Error::Field(format!(
                "grid data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a grid by evaluating `f` at every texel index.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fetch the texel at integer coordinates, clamped to the grid edge.
    pub fn texel_clamped(&self, x: i64, y: i64) -> T {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[y * self.width + x]
    }

    pub fn texels(&self) -> &[T] {
        &self.data
    }
}

impl<T: Lerp> Grid<T> {
    /// Bilinear sample at a continuous coordinate in [0, 1]².
    ///
    /// Out-of-domain coordinates clamp to the edge; there is no failure mode.
    pub fn sample_bilinear(&self, coord: Vec2) -> T {
        // Texel-center convention: coord 0.5/width hits the center of texel 0.
        let fx = coord.x * self.width as f32 - 0.5;
        let fy = coord.y * self.height as f32 - 0.5;

        let ix = fx.floor();
        let iy = fy.floor();
        let tx = fx - ix;
        let ty = fy - iy;
        let (ix, iy) = (ix as i64, iy as i64);

        let t00 = self.texel_clamped(ix, iy);
        let t10 = self.texel_clamped(ix + 1, iy);
        let t01 = self.texel_clamped(ix, iy + 1);
        let t11 = self.texel_clamped(ix + 1, iy + 1);

        let top = t00.lerp_to(t10, tx);
        let bottom = t01.lerp_to(t11, tx);
        top.lerp_to(bottom, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert!(Grid::from_vec(2, 2, vec![0.0f32; 3]).is_err());
        assert!(Grid::from_vec(0, 2, Vec::<f32>::new()).is_err());
    }

    #[test]
    fn test_constant_grid_samples_constant() {
        let grid = Grid::from_fn(8, 8, |_, _| 0.75f32);
        for &uv in &[
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 1.0),
            Vec2::new(-3.0, 7.0),
        ] {
            assert!((grid.sample_bilinear(uv) - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bilinear_midpoint_between_texels() {
        // 2x1 grid, values 0 and 1. The midpoint of the domain lies exactly
        // between the two texel centers.
        let grid = Grid::from_vec(2, 1, vec![0.0f32, 1.0]).unwrap();
        let mid = grid.sample_bilinear(Vec2::new(0.5, 0.5));
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_edge_clamp_addressing() {
        let grid = Grid::from_vec(2, 1, vec![0.0f32, 1.0]).unwrap();
        // Far outside the domain on either side clamps to the border texel.
        assert!((grid.sample_bilinear(Vec2::new(-10.0, 0.5)) - 0.0).abs() < 1e-6);
        assert!((grid.sample_bilinear(Vec2::new(10.0, 0.5)) - 1.0).abs() < 1e-6);
    }
}
