//! Color quantization and pixel packing.

use crate::material::Color;

/// An 8-bit output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Gamma encoding with gamma = 2.0 (square-root mapping).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn quantize(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Quantize a linear color to an 8-bit pixel, gamma encoding first when
/// `gamma` is set.
pub fn color_to_pixel(color: Color, gamma: bool) -> Pixel {
    let c = if gamma {
        Color::new(
            linear_to_gamma(color.x),
            linear_to_gamma(color.y),
            linear_to_gamma(color.z),
        )
    } else {
        color
    };

    Pixel {
        r: quantize(c.x),
        g: quantize(c.y),
        b: quantize(c.z),
    }
}

/// Map an 8-bit pixel back to a linear color in [0, 1].
pub fn pixel_to_color(pixel: Pixel) -> Color {
    Color::new(
        pixel.r as f32 / 255.0,
        pixel.g as f32 / 255.0,
        pixel.b as f32 / 255.0,
    )
}

/// Pack a linear color as one RGBA word, red in the high byte, alpha
/// opaque. This is the live framebuffer's fixed pixel layout.
pub fn pack_rgba(color: Color) -> u32 {
    let p = color_to_pixel(color, true);
    ((p.r as u32) << 24) | ((p.g as u32) << 16) | ((p.b as u32) << 8) | 0xff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_round_trip_without_gamma() {
        // Identity for every 8-bit value when gamma encoding is off.
        for v in 0..=255u8 {
            let pixel = Pixel { r: v, g: v, b: v };
            assert_eq!(color_to_pixel(pixel_to_color(pixel), false), pixel);
        }
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        let p = color_to_pixel(Color::splat(0.25), true);
        // sqrt(0.25) = 0.5
        assert_eq!(p.r, 128);
    }

    #[test]
    fn test_quantize_clamps() {
        let p = color_to_pixel(Color::new(2.0, -1.0, 1.0), false);
        assert_eq!(p, Pixel { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_linear_to_gamma_edges() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pack_rgba_layout() {
        // Pure red, gamma encoded: red byte high, opaque alpha low.
        let packed = pack_rgba(Color::new(1.0, 0.0, 0.0));
        assert_eq!(packed, 0xff00_00ff);

        let white = pack_rgba(Color::ONE);
        assert_eq!(white, 0xffff_ffff);
    }
}
