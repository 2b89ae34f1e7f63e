use catalog::{MagnitudeRange, StarRecord};
use foundation::Rgb;
use foundation::math::{Equatorial, Vec3, equatorial_to_sphere};
use rand::Rng;

use crate::config::GlobeConfig;
use crate::palette::Palette;

/// Radius of the viewer-centered celestial sphere.
pub const SPHERE_RADIUS: f64 = 150.0;

/// Below this magnitude a star always gets the palette's brightest color.
const BRIGHT_THRESHOLD: f64 = 2.0;
/// Above this magnitude the computed size is dampened further.
const FAINT_THRESHOLD: f64 = 5.0;
const FAINT_SCALE: f64 = 0.7;

/// Size formula: the max of a linear ramp and an exponential decay, so mid
/// magnitudes follow the ramp while the brightest stars keep the exponential
/// head start.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SizeModel {
    pub min_size: f64,
    pub max_size: f64,
    pub max_magnitude: f64,
}

impl SizeModel {
    pub fn size_for(&self, magnitude: f64) -> f64 {
        let linear = self.min_size * (1.1 - magnitude / self.max_magnitude);
        let decay = self.max_size * 0.75f64.powf(magnitude);
        let size = linear.max(decay);
        if magnitude > FAINT_THRESHOLD {
            size * FAINT_SCALE
        } else {
            size
        }
    }
}

/// A star ready for buffer packing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub position: Vec3,
    pub color: Rgb,
    pub size: f32,
}

#[derive(Debug, Copy, Clone)]
pub struct Projector {
    pub radius: f64,
    pub palette: Palette,
    pub sizes: SizeModel,
}

impl Projector {
    pub fn new(config: &GlobeConfig, range: MagnitudeRange) -> Self {
        Self {
            radius: SPHERE_RADIUS,
            palette: config.palette,
            sizes: SizeModel {
                min_size: config.star_size.0,
                max_size: config.star_size.1,
                max_magnitude: range.max,
            },
        }
    }

    /// Position and size are deterministic; the color bucket draws from the
    /// injected random source, so a reload reshuffles hues on purpose.
    pub fn project(&self, record: &StarRecord, rng: &mut impl Rng) -> ProjectedPoint {
        let position = equatorial_to_sphere(
            Equatorial::new(record.ra_deg, record.dec_deg),
            self.radius,
        );

        if let Some(h) = record.highlight {
            return ProjectedPoint {
                position,
                color: Rgb::from_hex(h.color_hex),
                size: (self.sizes.max_size * h.size_scale) as f32,
            };
        }

        ProjectedPoint {
            position,
            color: self.bucket_color(record.magnitude, rng),
            size: self.sizes.size_for(record.magnitude) as f32,
        }
    }

    fn bucket_color(&self, magnitude: f64, rng: &mut impl Rng) -> Rgb {
        let base = if magnitude < BRIGHT_THRESHOLD {
            self.palette.brightest.scaled(1.2)
        } else {
            let draw: f64 = rng.random();
            if draw < 0.4 {
                self.palette.warm.scaled(1.1)
            } else if draw < 0.7 {
                self.palette.cool.scaled(1.15)
            } else {
                self.palette.pale.scaled(1.1)
            }
        };

        // Faint stars dim but never vanish: fade floors at 0.2, and the
        // affine rescale keeps the final multiplier at or above 0.42.
        let fade = (1.0 - magnitude / self.sizes.max_magnitude).max(0.2);
        base.scaled((fade * 0.85 + 0.25) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::{FAINT_THRESHOLD, Projector, SPHERE_RADIUS};
    use catalog::{MagnitudeRange, StarRecord, named::southern_cross};
    use foundation::Rgb;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GlobeConfig;

    fn star(magnitude: f64, ra_deg: f64, dec_deg: f64) -> StarRecord {
        StarRecord {
            magnitude,
            color_index: 0.5,
            ra_deg,
            dec_deg,
            highlight: None,
        }
    }

    fn projector() -> Projector {
        Projector::new(&GlobeConfig::night(), MagnitudeRange::default())
    }

    #[test]
    fn position_is_deterministic_and_on_sphere() {
        let p = projector();
        let rec = star(3.2, 210.7, -41.2);
        let a = p.project(&rec, &mut StdRng::seed_from_u64(1));
        let b = p.project(&rec, &mut StdRng::seed_from_u64(999));
        // Different random seeds may change the color, never the position.
        assert_eq!(a.position, b.position);

        let r2 = a.position.dot(a.position);
        assert!((r2 - SPHERE_RADIUS * SPHERE_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn size_is_monotonic_below_faint_threshold() {
        let p = projector();
        let mut prev = f64::INFINITY;
        let mut mag = -1.5;
        while mag <= FAINT_THRESHOLD {
            let size = p.sizes.size_for(mag);
            assert!(
                size <= prev,
                "size must not grow with magnitude (mag {mag}: {size} > {prev})"
            );
            prev = size;
            mag += 0.1;
        }
    }

    #[test]
    fn size_is_monotonic_above_faint_threshold() {
        let p = projector();
        let mut prev = f64::INFINITY;
        let mut mag = 5.1;
        while mag <= 6.7 {
            let size = p.sizes.size_for(mag);
            assert!(size <= prev);
            prev = size;
            mag += 0.1;
        }
    }

    #[test]
    fn faint_dampening_applies_past_threshold() {
        let p = projector();
        let just_below = p.sizes.size_for(5.0);
        let just_above = p.sizes.size_for(5.0 + 1e-9);
        assert!(just_above < just_below * 0.75);
    }

    #[test]
    fn bright_stars_skip_the_random_bucket() {
        let p = projector();
        let rec = star(0.5, 10.0, 10.0);
        let a = p.project(&rec, &mut StdRng::seed_from_u64(1));
        let b = p.project(&rec, &mut StdRng::seed_from_u64(2));
        assert_eq!(a.color, b.color);
    }

    #[test]
    fn seeded_rng_reproduces_colors() {
        let p = projector();
        let rec = star(4.0, 10.0, 10.0);
        let a = p.project(&rec, &mut StdRng::seed_from_u64(42));
        let b = p.project(&rec, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.color, b.color);
    }

    #[test]
    fn faint_colors_never_fade_to_black() {
        let p = projector();
        let rec = star(6.7, 0.0, 0.0);
        let point = p.project(&rec, &mut StdRng::seed_from_u64(7));
        assert!(point.color.r > 0.0 || point.color.g > 0.0 || point.color.b > 0.0);
    }

    #[test]
    fn highlights_use_fixed_color_and_scale() {
        let p = projector();
        let acrux = southern_cross()[0];
        let point = p.project(&acrux, &mut StdRng::seed_from_u64(0));
        assert_eq!(point.color, Rgb::from_hex(0xffffff));
        let expected = (p.sizes.max_size * 1.8) as f32;
        assert!((point.size - expected).abs() < 1e-6);
    }
}
