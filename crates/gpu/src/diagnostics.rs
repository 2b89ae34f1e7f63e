/// Why an instance stopped rendering and handed the slot to static content.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Context creation failed or the device was unavailable.
    ContextUnavailable,
    /// Catalog load produced zero stars (fetch failure included).
    NoStars,
    /// A frame failed to render and the context never came back.
    RenderFailed,
    /// Context loss outlasted the restoration grace window.
    LossGraceExpired,
}

impl FallbackReason {
    pub fn label(&self) -> &'static str {
        match self {
            FallbackReason::ContextUnavailable => "context unavailable",
            FallbackReason::NoStars => "no stars",
            FallbackReason::RenderFailed => "render failed",
            FallbackReason::LossGraceExpired => "loss grace expired",
        }
    }
}

/// Per-instance readiness, progress, and fallback state.
///
/// The host is told "ready" exactly once, whether startup succeeded or ended
/// in fallback; after fallback no further render work happens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    ready_fired: bool,
    fallback: Option<FallbackReason>,
    progress_pct: u8,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only the first time, so the host callback fires once.
    pub fn notify_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready_fired, true)
    }

    pub fn ready_fired(&self) -> bool {
        self.ready_fired
    }

    /// Records the first fallback reason; later reasons are ignored.
    pub fn enter_fallback(&mut self, reason: FallbackReason) {
        if self.fallback.is_none() {
            self.fallback = Some(reason);
        }
    }

    pub fn should_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        self.fallback
    }

    pub fn set_progress(&mut self, pct: f64) {
        self.progress_pct = pct.clamp(0.0, 100.0).round() as u8;
    }

    pub fn progress_pct(&self) -> u8 {
        self.progress_pct
    }
}
