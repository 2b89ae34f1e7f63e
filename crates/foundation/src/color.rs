/// Linear RGB color with unclamped components.
///
/// Brightness multipliers are allowed to push components above 1.0; the
/// renderer relies on additive blending to saturate rather than clamping here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decodes a 0xRRGGBB hex value.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self { r, g, b }
    }

    pub fn scaled(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn decodes_hex_channels() {
        let c = Rgb::from_hex(0xffd700);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn scaling_is_componentwise_and_unclamped() {
        let c = Rgb::from_hex(0xffffff).scaled(1.2);
        assert!((c.r - 1.2).abs() < 1e-6);
        assert!((c.g - 1.2).abs() < 1e-6);
        assert!((c.b - 1.2).abs() < 1e-6);
    }
}
