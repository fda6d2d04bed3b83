//! Localized Gaussian height depression

use crate::core::types::Vec2;

/// A radial Gaussian dent pressed into the height field.
///
/// Frame-scoped configuration owned by the caller (typically following a
/// character or other point of interest); not persisted state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepressionControl {
    /// World-space xy center of the dent.
    pub center: Vec2,
    /// Peak depth subtracted from the height sample at the center.
    pub strength: f32,
    /// Coefficient on the squared distance in the exponent. Larger values
    /// tighten the dent; 1.0 matches the fixed unit falloff radius.
    pub sharpness: f32,
}

impl DepressionControl {
    pub fn new(center: Vec2, strength: f32) -> Self {
        Self {
            center,
            strength,
            sharpness: 1.0,
        }
    }

    pub fn with_sharpness(mut self, sharpness: f32) -> Self {
        self.sharpness = sharpness;
        self
    }

    /// Height offset at a world-space xy position.
    ///
    /// Maximal (= strength) at the center, strictly decreasing with
    /// distance. With strength 0 this is an exact identity.
    pub fn falloff(&self, position: Vec2) -> f32 {
        self.strength * (-self.sharpness * (self.center - position).length_squared()).exp()
    }
}

impl Default for DepressionControl {
    /// The no-op depression.
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_strength_is_identity() {
        let dep = DepressionControl::new(Vec2::new(3.0, -2.0), 0.0);
        for &p in &[
            Vec2::ZERO,
            Vec2::new(3.0, -2.0),
            Vec2::new(100.0, 100.0),
        ] {
            assert_eq!(dep.falloff(p), 0.0);
        }
    }

    #[test]
    fn test_falloff_maximal_at_center() {
        let dep = DepressionControl::new(Vec2::new(1.0, 1.0), 0.8);
        assert!((dep.falloff(Vec2::new(1.0, 1.0)) - 0.8).abs() < 1e-7);
    }

    #[test]
    fn test_falloff_strictly_decreases_with_distance() {
        let dep = DepressionControl::new(Vec2::ZERO, 1.0);
        let mut last = dep.falloff(Vec2::ZERO);
        for i in 1..10 {
            let value = dep.falloff(Vec2::new(i as f32 * 0.25, 0.0));
            assert!(value < last);
            last = value;
        }
    }

    #[test]
    fn test_sharpness_tightens_the_dent() {
        let wide = DepressionControl::new(Vec2::ZERO, 1.0);
        let tight = DepressionControl::new(Vec2::ZERO, 1.0).with_sharpness(4.0);
        let p = Vec2::new(0.5, 0.0);
        assert!(tight.falloff(p) < wide.falloff(p));
        // Center depth is unaffected by sharpness.
        assert!((tight.falloff(Vec2::ZERO) - wide.falloff(Vec2::ZERO)).abs() < 1e-7);
    }
}
