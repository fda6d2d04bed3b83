//! Alpha cutout and the ambient + directional lighting model

use crate::core::types::{Vec3, Vec4};
use super::config::ShadingConfig;

/// The per-fragment result. Invisible fragments contribute neither color
/// nor depth; visible fragments always carry alpha exactly 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedFragment {
    pub color: Vec4,
    pub visible: bool,
}

impl ShadedFragment {
    pub const HIDDEN: Self = Self {
        color: Vec4::ZERO,
        visible: false,
    };
}

/// Threshold-test the blended color, then light it.
///
/// Rejection is an intended outcome, not an error: it is the binary
/// stand-in for order-independent transparency. Visible fragments get
/// half-Lambert lighting against the configured direction, optional height
/// darkening for low-lying areas, and forced opaque alpha.
pub fn cutout_shade(color: Vec4, normal: Vec3, world_z: f32, cfg: &ShadingConfig) -> ShadedFragment {
    if cfg.threshold_test.rejects(color.w, cfg.alpha_threshold) {
        return ShadedFragment::HIDDEN;
    }

    let lambert = (normal.dot(cfg.light_dir) * 0.5 + 0.5).clamp(0.0, 1.0);
    let mut rgb = color.truncate() * lambert;
    if let Some(darkening) = cfg.height_darkening {
        rgb *= darkening.factor(world_z);
    }

    ShadedFragment {
        color: rgb.extend(1.0),
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_fragment_is_hidden() {
        let cfg = ShadingConfig::foliage();
        let frag = cutout_shade(Vec4::new(1.0, 1.0, 1.0, 0.2), Vec3::Z, 0.0, &cfg);
        assert_eq!(frag, ShadedFragment::HIDDEN);
    }

    #[test]
    fn test_visible_fragment_alpha_is_exactly_one() {
        let cfg = ShadingConfig::foliage();
        let frag = cutout_shade(Vec4::new(0.5, 0.5, 0.5, 0.8), Vec3::Z, 0.0, &cfg);
        assert!(frag.visible);
        assert_eq!(frag.color.w, 1.0);
    }

    #[test]
    fn test_boundary_asymmetry_between_passes() {
        let foliage = ShadingConfig::foliage();
        let terrain = ShadingConfig::terrain();
        // Foliage: alpha exactly 0.5 is rejected.
        assert!(!cutout_shade(Vec4::new(1.0, 0.0, 0.0, 0.5), Vec3::Z, 0.0, &foliage).visible);
        // Terrain: alpha exactly 0.6 passes.
        assert!(cutout_shade(Vec4::new(1.0, 0.0, 0.0, 0.6), Vec3::Z, 1.0, &terrain).visible);
    }

    #[test]
    fn test_lighting_brightens_toward_the_light() {
        let cfg = ShadingConfig::foliage();
        let facing = cutout_shade(Vec4::ONE, cfg.light_dir, 0.0, &cfg);
        let away = cutout_shade(Vec4::ONE, -cfg.light_dir, 0.0, &cfg);
        assert!((facing.color.x - 1.0).abs() < 1e-6);
        assert_eq!(away.color.truncate(), Vec3::ZERO);

        // Half-Lambert keeps grazing faces at half brightness, not black.
        let grazing_normal = cfg.light_dir.cross(Vec3::Z).normalize();
        let grazing = cutout_shade(Vec4::ONE, grazing_normal, 0.0, &cfg);
        assert!((grazing.color.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_height_darkening_dims_low_areas() {
        let cfg = ShadingConfig::terrain();
        let low = cutout_shade(Vec4::ONE, Vec3::Z, -1.0, &cfg);
        let high = cutout_shade(Vec4::ONE, Vec3::Z, 1.0, &cfg);
        assert!(low.color.x < high.color.x);
        assert_eq!(low.color.truncate(), Vec3::ZERO);
    }
}
