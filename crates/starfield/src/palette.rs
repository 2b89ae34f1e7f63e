use foundation::Rgb;

/// Discrete star color palette.
///
/// `brightest` is forced for stars above the brightness threshold; the other
/// three are the randomized warm/cool/pale buckets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub brightest: Rgb,
    pub warm: Rgb,
    pub cool: Rgb,
    pub pale: Rgb,
}

impl Palette {
    /// White-on-black: gold, sky blue, and ghost white over a dark sky.
    pub fn night() -> Self {
        Self {
            brightest: Rgb::from_hex(0xffffff),
            warm: Rgb::from_hex(0xffd700),
            cool: Rgb::from_hex(0x87ceeb),
            pale: Rgb::from_hex(0xf8f8ff),
        }
    }

    /// Dark-on-light greys for sections rendered over a pale background.
    pub fn paper() -> Self {
        Self {
            brightest: Rgb::from_hex(0x000000),
            warm: Rgb::from_hex(0x444444),
            cool: Rgb::from_hex(0x666666),
            pale: Rgb::from_hex(0x333333),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;

    #[test]
    fn palettes_are_distinct() {
        assert_ne!(Palette::night(), Palette::paper());
        assert_eq!(Palette::night().warm, foundation::Rgb::from_hex(0xffd700));
    }
}
