//! Surface reconstruction from height fields
//!
//! Turns a sampled height field into displaced positions and unit normals
//! via finite differences, optionally deformed by a localized depression.

pub mod depression;
pub mod reconstruct;

pub use depression::DepressionControl;
pub use reconstruct::{
    DiffConvention, DisplacementMode, SurfaceReconstructor, SurfaceSample, PATCH_STEP,
    TERRAIN_STEP,
};
