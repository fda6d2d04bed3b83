//! Sampled 2D fields: bilinear lookup over scalar and RGBA grids
//!
//! All addressing is edge clamped; out-of-domain coordinates degrade to the
//! nearest border texel instead of being rejected. Fields are read-only for
//! the duration of a frame.

pub mod color;
pub mod grid;
pub mod io;
pub mod scalar;

pub use color::ColorField;
pub use grid::Grid;
pub use scalar::ScalarField;
