/// One star from the catalog, or a hand-coded named reference star.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StarRecord {
    /// Apparent brightness; lower is brighter.
    pub magnitude: f64,
    /// Photometric color proxy. Parsed for the validity contract and carried
    /// through; the projector's color buckets are randomized, not derived
    /// from it.
    pub color_index: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub highlight: Option<Highlight>,
}

/// Fixed presentation overrides for a named reference star.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Highlight {
    pub name: &'static str,
    pub color_hex: u32,
    /// Multiplier on the configured maximum star size.
    pub size_scale: f64,
}

/// Inclusive magnitude window for the validity filter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MagnitudeRange {
    pub min: f64,
    pub max: f64,
}

impl MagnitudeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both boundaries are inclusive.
    pub fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.min && magnitude <= self.max
    }
}

impl Default for MagnitudeRange {
    /// Sirius (−1.46) through the naked-eye limit under dark skies.
    fn default() -> Self {
        Self::new(-1.5, 6.7)
    }
}

#[cfg(test)]
mod tests {
    use super::MagnitudeRange;

    #[test]
    fn boundaries_are_inclusive() {
        let range = MagnitudeRange::default();
        assert!(range.contains(-1.5));
        assert!(range.contains(6.7));
        assert!(!range.contains(-1.5000001));
        assert!(!range.contains(6.7000001));
    }
}
