use crate::record::{Highlight, StarRecord};

/// The Southern Cross reference stars, appended after every bulk load.
///
/// These are hand-coded so the constellation highlight survives even a
/// catalog that parses to zero rows. Sizes are tuned multipliers on the
/// configured maximum star size rather than outputs of the size formula.
pub fn southern_cross() -> [StarRecord; 4] {
    [
        named("Acrux", 186.6495, -63.0991, 0.77, 0xffffff, 1.8),
        named("Mimosa", 191.9303, -59.6888, 1.25, 0x87ceeb, 1.6),
        named("Gacrux", 187.7915, -57.1138, 1.59, 0xffd700, 1.5),
        named("Imai", 183.7863, -58.7489, 2.79, 0xffffff, 1.4),
    ]
}

fn named(
    name: &'static str,
    ra_deg: f64,
    dec_deg: f64,
    magnitude: f64,
    color_hex: u32,
    size_scale: f64,
) -> StarRecord {
    StarRecord {
        magnitude,
        color_index: 0.0,
        ra_deg,
        dec_deg,
        highlight: Some(Highlight {
            name,
            color_hex,
            size_scale,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::southern_cross;

    #[test]
    fn all_four_stars_are_highlighted() {
        let stars = southern_cross();
        assert_eq!(stars.len(), 4);
        for star in &stars {
            let h = star.highlight.expect("named star must carry a highlight");
            assert!(h.size_scale >= 1.4 && h.size_scale <= 1.8);
            assert!(star.dec_deg < -55.0, "{} is a southern star", h.name);
        }
    }
}
