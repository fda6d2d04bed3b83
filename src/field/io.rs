//! Loading fields from image files

use std::path::Path;
use std::time::Instant;

use crate::core::Result;
use super::{ColorField, Grid, ScalarField};

/// Load an RGBA color field (with mip pyramid) from an image file.
pub fn load_color(path: impl AsRef<Path>) -> Result<ColorField> {
    let path = path.as_ref();
    let start = Instant::now();
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    let field = ColorField::from_rgba8(width as usize, height as usize, img.as_raw())?;
    log::debug!(
        "loaded color field {} ({}x{}, {} mips) in {}ms",
        path.display(),
        width,
        height,
        field.level_count(),
        start.elapsed().as_millis()
    );
    Ok(field)
}

/// Load a scalar field from the red channel of an image file, mapped to [0, 1].
pub fn load_scalar(path: impl AsRef<Path>) -> Result<ScalarField> {
    let path = path.as_ref();
    let start = Instant::now();
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    let grid = Grid::from_vec(
        width as usize,
        height as usize,
        img.pixels().map(|px| px.0[0] as f32 / 255.0).collect(),
    )?;
    log::debug!(
        "loaded scalar field {} ({}x{}) in {}ms",
        path.display(),
        width,
        height,
        start.elapsed().as_millis()
    );
    Ok(ScalarField::new(grid))
}
