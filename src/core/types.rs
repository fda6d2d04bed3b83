//! Shared math type aliases and re-exports

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
