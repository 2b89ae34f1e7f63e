use crate::config::GlobeConfig;
use crate::projector::ProjectedPoint;

/// Distance at which attenuation leaves the nominal size untouched.
pub const ATTENUATION_REFERENCE_DISTANCE: f32 = 130.0;

/// Flat GPU-upload layout: `positions` and `colors` are interleaved xyz/rgb
/// triples, `sizes` one entry per star, all in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
}

impl PointField {
    pub fn pack(points: &[ProjectedPoint]) -> Self {
        let mut field = Self {
            positions: Vec::with_capacity(points.len() * 3),
            colors: Vec::with_capacity(points.len() * 3),
            sizes: Vec::with_capacity(points.len()),
        };
        for point in points {
            field.positions.push(point.position.x as f32);
            field.positions.push(point.position.y as f32);
            field.positions.push(point.position.z as f32);
            field.colors.push(point.color.r);
            field.colors.push(point.color.g);
            field.colors.push(point.color.b);
            field.sizes.push(point.size);
        }
        field
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Shading parameters shared by every star in a field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointMaterial {
    pub min_size: f32,
    pub max_size: f32,
    /// Breathing amplitude applied on top of the nominal size.
    pub fade_factor: f32,
}

impl PointMaterial {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            min_size: config.star_size.0 as f32,
            max_size: config.star_size.1 as f32,
            fade_factor: 2.0,
        }
    }

    /// Nominal size plus the fade-driven inflation margin.
    pub fn inflated_size(&self, size: f32) -> f32 {
        size * (1.0 + self.fade_factor * 0.08)
    }

    /// Perspective attenuation relative to the reference camera distance.
    pub fn attenuation_scale(&self, distance: f32) -> f32 {
        ATTENUATION_REFERENCE_DISTANCE / distance
    }
}

#[cfg(test)]
mod tests {
    use super::{PointField, PointMaterial};
    use crate::config::GlobeConfig;
    use crate::projector::ProjectedPoint;
    use foundation::Rgb;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    fn point(x: f64, size: f32) -> ProjectedPoint {
        ProjectedPoint {
            position: Vec3::new(x, 2.0 * x, -x),
            color: Rgb::from_hex(0x336699),
            size,
        }
    }

    #[test]
    fn pack_preserves_order_and_strides() {
        let points = vec![point(1.0, 3.0), point(2.0, 4.0), point(3.0, 5.0)];
        let field = PointField::pack(&points);
        assert_eq!(field.positions.len(), 9);
        assert_eq!(field.colors.len(), 9);
        assert_eq!(field.sizes, vec![3.0, 4.0, 5.0]);
        assert_eq!(field.positions[3..6], [2.0, 4.0, -2.0]);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn pack_of_nothing_is_empty() {
        let field = PointField::pack(&[]);
        assert!(field.is_empty());
        assert_eq!(field.positions.len(), 0);
    }

    #[test]
    fn inflation_and_attenuation() {
        let material = PointMaterial::from_config(&GlobeConfig::night());
        assert!((material.inflated_size(10.0) - 11.6).abs() < 1e-5);
        // At the reference distance attenuation is a no-op.
        assert!((material.attenuation_scale(130.0) - 1.0).abs() < 1e-6);
        assert!(material.attenuation_scale(260.0) < material.attenuation_scale(130.0));
    }
}
