use crate::frame::Frame;

/// Drives per-frame work for one view instance.
///
/// The host schedules ticks (in the browser, from an animation-frame
/// callback); the ticker decides whether a frame actually runs. Frames only
/// advance while running, pausing covers document-hidden periods, and a tick
/// arriving after disposal is a no-op rather than a crash — the scheduled
/// callback may fire once more after teardown.
#[derive(Debug)]
pub struct RenderTicker {
    frame: Frame,
    paused: bool,
    disposed: bool,
}

impl RenderTicker {
    pub fn new(dt_s: f64) -> Self {
        Self {
            frame: Frame::new(0, dt_s),
            paused: false,
            disposed: false,
        }
    }

    /// Returns the frame to run, or `None` when paused or disposed.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.disposed || self.paused {
            return None;
        }
        let frame = self.frame;
        self.frame = frame.next();
        Some(frame)
    }

    /// Index of the next frame that would run.
    pub fn frame_index(&self) -> u64 {
        self.frame.index
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if !self.disposed {
            self.paused = false;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Idempotent; a disposed ticker never runs another frame.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.paused = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::RenderTicker;

    #[test]
    fn frames_advance_while_running() {
        let mut t = RenderTicker::new(1.0 / 60.0);
        assert_eq!(t.tick().map(|f| f.index), Some(0));
        assert_eq!(t.tick().map(|f| f.index), Some(1));
        assert_eq!(t.frame_index(), 2);
    }

    #[test]
    fn paused_ticker_holds_frame_count() {
        let mut t = RenderTicker::new(1.0 / 60.0);
        t.tick();
        t.pause();
        assert!(t.tick().is_none());
        assert!(t.tick().is_none());
        t.resume();
        assert_eq!(t.tick().map(|f| f.index), Some(1));
    }

    #[test]
    fn stale_tick_after_dispose_is_noop() {
        let mut t = RenderTicker::new(1.0 / 60.0);
        t.tick();
        t.dispose();
        assert!(t.tick().is_none());
        // Double dispose must not panic or revive the loop.
        t.dispose();
        t.resume();
        assert!(t.tick().is_none());
    }
}
