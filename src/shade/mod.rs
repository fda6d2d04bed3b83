//! Fragment-stage shading: blend, cutout, light
//!
//! One routine covers the four blend strategies (flat color, single
//! texture, triplanar, dual-variant triplanar) through a tagged
//! [`BlendMode`] plus an immutable [`ShadingConfig`].

pub mod config;
pub mod cutout;
pub mod triplanar;
pub mod variant;

pub use config::{HeightDarkening, ShadingConfig, ThresholdTest};
pub use cutout::{cutout_shade, ShadedFragment};
pub use triplanar::{triplanar_color, triplanar_weights, TriplanarMaps};
pub use variant::{quintic_smooth, variant_color, VariantMaps};

use crate::core::types::Vec4;
use crate::field::{ColorField, ScalarField};
use crate::surface::SurfaceSample;

/// How the surface color is derived before cutout and lighting.
#[derive(Clone, Copy)]
pub enum BlendMode<'a> {
    /// A single flat color.
    Solid(Vec4),
    /// One texture sampled through the mesh uv (foliage albedo).
    Uv(&'a ColorField),
    /// Three world-space projections blended by normal alignment.
    Triplanar(TriplanarMaps<'a>),
    /// Triplanar with the xy plane blending two variants by a spatial
    /// scalar field sampled at the surface uv.
    TriplanarVariant {
        xy: VariantMaps<'a>,
        xz: &'a ColorField,
        yz: &'a ColorField,
        variant: &'a ScalarField,
    },
}

/// Shade one surface sample: derive the blended color for the configured
/// mode, then apply the cutout threshold and lighting.
pub fn shade_surface(
    sample: &SurfaceSample,
    mode: &BlendMode<'_>,
    cfg: &ShadingConfig,
) -> ShadedFragment {
    let color = match mode {
        BlendMode::Solid(color) => *color,
        BlendMode::Uv(albedo) => albedo.sample(sample.uv, cfg.lod_bias),
        BlendMode::Triplanar(maps) => triplanar_color(
            sample.position,
            sample.normal,
            maps,
            cfg.triplanar_sharpness,
            cfg.lod_bias,
        ),
        BlendMode::TriplanarVariant {
            xy,
            xz,
            yz,
            variant,
        } => {
            let t = variant.sample(sample.uv);
            let weights = triplanar_weights(sample.normal, cfg.triplanar_sharpness);
            let xy_color =
                variant_color(sample.position.truncate(), t, xy, cfg.lod_bias);
            let (xz_color, yz_color) =
                triplanar::side_colors(sample.position, xz, yz, cfg.lod_bias);
            triplanar::combine(weights, xy_color, xz_color, yz_color)
        }
    };

    cutout_shade(color, sample.normal, sample.position.z, cfg)
}
