//! Groundcover - CPU shading core for displaced terrain and batched foliage
//!
//! Reconstructs a displaced ground surface from sampled height fields,
//! shades it with triplanar and dual-variant texture blending plus alpha
//! cutout, and drives large instanced foliage populations through a
//! per-instance transform contract. Window/context setup, draw submission
//! and view-projection construction live outside this crate.

pub mod core;
pub mod field;
pub mod surface;
pub mod shade;
pub mod instance;
pub mod pipeline;
pub mod scene;
