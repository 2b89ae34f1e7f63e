/// Deterministic frame metadata.
///
/// This is the primary timebase for the render loop and the context-loss
/// grace window. It is intentionally small and pure so it can be recorded
/// and replayed in tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self { index, dt_s }
    }

    /// Engine time at the start of the frame (seconds).
    pub fn elapsed_s(self) -> f64 {
        self.index as f64 * self.dt_s
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.elapsed_s(), 10.0 / 60.0);
    }

    #[test]
    fn next_advances_index() {
        let f0 = Frame::new(0, 0.5);
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.elapsed_s(), 0.5);
    }
}
