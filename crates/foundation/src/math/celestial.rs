use super::Vec3;

/// Equatorial sky coordinates in degrees.
///
/// Right ascension plays the role of longitude, declination of latitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Equatorial {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }
}

/// Projects equatorial coordinates onto a viewer-centered sphere.
///
/// The viewer sits at the origin looking outward, so every point lands at
/// exactly `radius` from the origin.
pub fn equatorial_to_sphere(eq: Equatorial, radius: f64) -> Vec3 {
    let ra = eq.ra_deg.to_radians();
    let dec = eq.dec_deg.to_radians();
    let cos_dec = dec.cos();

    let x = radius * ra.cos() * cos_dec;
    let y = radius * dec.sin();
    let z = radius * ra.sin() * cos_dec;

    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::{Equatorial, equatorial_to_sphere};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn vernal_equinox_points_along_x() {
        let p = equatorial_to_sphere(Equatorial::new(0.0, 0.0), 150.0);
        assert_close(p.x, 150.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
        assert_close(p.z, 0.0, 1e-9);
    }

    #[test]
    fn celestial_pole_points_along_y() {
        let p = equatorial_to_sphere(Equatorial::new(123.4, 90.0), 150.0);
        assert_close(p.y, 150.0, 1e-9);
        assert_close(p.x, 0.0, 1e-6);
        assert_close(p.z, 0.0, 1e-6);
    }

    #[test]
    fn projection_lands_on_sphere() {
        let radius = 150.0;
        for (ra, dec) in [(186.6495, -63.0991), (12.5, 41.0), (359.9, -0.1)] {
            let p = equatorial_to_sphere(Equatorial::new(ra, dec), radius);
            assert_close(p.length(), radius, 1e-9);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let eq = Equatorial::new(191.9303, -59.6888);
        let a = equatorial_to_sphere(eq, 150.0);
        let b = equatorial_to_sphere(eq, 150.0);
        assert_eq!(a, b);
    }
}
