use crate::record::{MagnitudeRange, StarRecord};

/// Column positions in the catalog CSV. The header row is discarded and
/// columns are addressed by index only, never by header name.
pub const MAGNITUDE_COL: usize = 5;
pub const RA_COL: usize = 8;
pub const DEC_COL: usize = 9;
pub const COLOR_INDEX_COL: usize = 11;
/// Rows with fewer fields than this are malformed and skipped.
pub const MIN_FIELDS: usize = 12;

/// Parses one data row, applying the validity filter.
///
/// Returns `None` for blank, short, non-numeric, non-finite, or
/// out-of-range rows. Malformed input is never an error at this level.
pub fn parse_row(line: &str, range: &MagnitudeRange) -> Option<StarRecord> {
    if line.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let magnitude = parse_finite(fields[MAGNITUDE_COL])?;
    let ra_deg = parse_finite(fields[RA_COL])?;
    let dec_deg = parse_finite(fields[DEC_COL])?;
    let color_index = parse_finite(fields[COLOR_INDEX_COL])?;

    if !range.contains(magnitude) {
        return None;
    }

    Some(StarRecord {
        magnitude,
        color_index,
        ra_deg,
        dec_deg,
        highlight: None,
    })
}

fn parse_finite(field: &str) -> Option<f64> {
    let v: f64 = field.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::parse_row;
    use crate::record::MagnitudeRange;

    /// Builds a 12-field row with the magnitude/RA/Dec/color-index columns
    /// populated and the rest as filler.
    pub(crate) fn row(mag: &str, ra: &str, dec: &str, bv: &str) -> String {
        format!("0,1,2,3,4,{mag},6,7,{ra},{dec},10,{bv}")
    }

    #[test]
    fn parses_valid_row_by_position() {
        let range = MagnitudeRange::default();
        let rec = parse_row(&row("4.5", "186.6", "-63.1", "0.25"), &range).unwrap();
        assert_eq!(rec.magnitude, 4.5);
        assert_eq!(rec.ra_deg, 186.6);
        assert_eq!(rec.dec_deg, -63.1);
        assert_eq!(rec.color_index, 0.25);
        assert!(rec.highlight.is_none());
    }

    #[test]
    fn skips_blank_and_short_rows() {
        let range = MagnitudeRange::default();
        assert!(parse_row("", &range).is_none());
        assert!(parse_row("   ", &range).is_none());
        assert!(parse_row("1,2,3,4,5", &range).is_none());
    }

    #[test]
    fn skips_non_finite_fields() {
        let range = MagnitudeRange::default();
        assert!(parse_row(&row("NaN", "10.0", "20.0", "0.5"), &range).is_none());
        assert!(parse_row(&row("3.0", "inf", "20.0", "0.5"), &range).is_none());
        assert!(parse_row(&row("3.0", "10.0", "nope", "0.5"), &range).is_none());
        assert!(parse_row(&row("3.0", "10.0", "20.0", ""), &range).is_none());
    }

    #[test]
    fn magnitude_filter_is_inclusive() {
        let range = MagnitudeRange::default();
        assert!(parse_row(&row("-1.5", "0", "0", "0"), &range).is_some());
        assert!(parse_row(&row("6.7", "0", "0", "0"), &range).is_some());
        assert!(parse_row(&row("-1.6", "0", "0", "0"), &range).is_none());
        assert!(parse_row(&row("6.8", "0", "0", "0"), &range).is_none());
    }
}
