use crate::palette::Palette;

/// Per-instance variant configuration.
///
/// The original product shipped several near-identical globe views differing
/// only in these knobs; one struct replaces them all.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeConfig {
    /// Whether drag controls are wired up at all.
    pub interactive: bool,
    pub palette: Palette,
    /// (min, max) nominal star size in pixels before attenuation.
    pub star_size: (f64, f64),
    /// Drag rotation speed multiplier.
    pub rotation_speed: f64,
}

impl GlobeConfig {
    /// Full-screen landing view: dark sky, larger stars, free rotation.
    pub fn night() -> Self {
        Self {
            interactive: true,
            palette: Palette::night(),
            star_size: (3.0, 16.9),
            rotation_speed: 0.5,
        }
    }

    /// Inset view over a light background: smaller, slower, non-interactive.
    pub fn paper() -> Self {
        Self {
            interactive: false,
            palette: Palette::paper(),
            star_size: (2.0, 12.0),
            rotation_speed: 0.3,
        }
    }
}
