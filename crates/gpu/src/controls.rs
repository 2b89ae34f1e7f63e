/// Damping rate for drag smoothing (per second).
const DAMPING_RATE: f64 = 6.0;

/// Radians of rotation per canvas-width of drag, before the speed multiplier.
const DRAG_SENSITIVITY: f64 = std::f64::consts::PI;

/// Pitch clamp keeping the camera short of the poles.
const MAX_PITCH: f64 = 1.55;

/// Fraction of the canvas width, on the right edge, where touch drags are
/// ignored so the page underneath keeps scrolling.
pub const DEFAULT_TOUCH_SCROLL_FRAC: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Damped rotational drag controls. No zoom, no pan, no keys.
///
/// Dragging moves a target orientation; `update` eases the visible yaw and
/// pitch toward it so release never stops dead.
#[derive(Debug, Clone, PartialEq)]
pub struct DragControls {
    pub rotate_speed: f64,
    enabled: bool,
    touch_scroll_frac: f64,

    canvas_width: f64,
    canvas_height: f64,

    dragging: bool,
    last_pos_px: [f64; 2],

    yaw: f64,
    pitch: f64,
    target_yaw: f64,
    target_pitch: f64,
}

impl DragControls {
    pub fn new(rotate_speed: f64) -> Self {
        Self {
            rotate_speed,
            enabled: true,
            touch_scroll_frac: DEFAULT_TOUCH_SCROLL_FRAC,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            dragging: false,
            last_pos_px: [0.0, 0.0],
            yaw: 0.0,
            pitch: 0.0,
            target_yaw: 0.0,
            target_pitch: 0.0,
        }
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(1.0);
        self.canvas_height = height.max(1.0);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.dragging = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Starts a drag. Returns whether the gesture was accepted; touch drags
    /// beginning inside the reserved scroll strip are refused.
    pub fn on_pointer_down(&mut self, pos_px: [f64; 2], kind: PointerKind) -> bool {
        if !self.enabled {
            return false;
        }
        if kind == PointerKind::Touch {
            let strip_start = self.canvas_width * (1.0 - self.touch_scroll_frac);
            if pos_px[0] >= strip_start {
                return false;
            }
        }
        self.dragging = true;
        self.last_pos_px = pos_px;
        true
    }

    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) {
        if !self.dragging {
            return;
        }
        let dx = pos_px[0] - self.last_pos_px[0];
        let dy = pos_px[1] - self.last_pos_px[1];
        self.last_pos_px = pos_px;

        let per_px = DRAG_SENSITIVITY / self.canvas_width;
        self.target_yaw += dx * per_px * self.rotate_speed;
        self.target_pitch =
            (self.target_pitch + dy * per_px * self.rotate_speed).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Eases the visible orientation toward the drag target.
    pub fn update(&mut self, dt_s: f64) {
        let dt = dt_s.clamp(0.0, 0.1);
        let alpha = 1.0 - (-DAMPING_RATE * dt).exp();
        self.yaw += (self.target_yaw - self.yaw) * alpha;
        self.pitch += (self.target_pitch - self.pitch) * alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::{DragControls, MAX_PITCH, PointerKind};

    const DT: f64 = 1.0 / 60.0;

    fn dragged(controls: &mut DragControls, from: [f64; 2], to: [f64; 2]) {
        assert!(controls.on_pointer_down(from, PointerKind::Mouse));
        controls.on_pointer_move(to);
        controls.on_pointer_up();
    }

    #[test]
    fn drag_rotates_after_damped_updates() {
        let mut controls = DragControls::new(0.5);
        dragged(&mut controls, [100.0, 100.0], [300.0, 100.0]);
        assert_eq!(controls.yaw(), 0.0);
        for _ in 0..600 {
            controls.update(DT);
        }
        assert!(controls.yaw() > 0.1);
        assert!(controls.pitch().abs() < 1e-9);
    }

    #[test]
    fn damping_converges_to_the_target() {
        let mut fast = DragControls::new(1.0);
        let mut slow = DragControls::new(1.0);
        dragged(&mut fast, [0.0, 0.0], [200.0, 0.0]);
        dragged(&mut slow, [0.0, 0.0], [200.0, 0.0]);
        fast.update(DT);
        let after_one = fast.yaw();
        for _ in 0..1000 {
            fast.update(DT);
        }
        slow.update(DT);
        // One step moves part of the way; many steps settle at the target.
        assert!(after_one > 0.0);
        assert!(fast.yaw() > after_one);
        assert!((fast.yaw() - slow.yaw()).abs() > 0.0);
    }

    #[test]
    fn rotate_speed_scales_the_response() {
        let mut half = DragControls::new(0.5);
        let mut full = DragControls::new(1.0);
        dragged(&mut half, [0.0, 0.0], [100.0, 0.0]);
        dragged(&mut full, [0.0, 0.0], [100.0, 0.0]);
        for _ in 0..1000 {
            half.update(DT);
            full.update(DT);
        }
        assert!((full.yaw() - 2.0 * half.yaw()).abs() < 1e-6);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut controls = DragControls::new(1.0);
        controls.set_enabled(false);
        assert!(!controls.on_pointer_down([10.0, 10.0], PointerKind::Mouse));
        controls.on_pointer_move([200.0, 200.0]);
        controls.update(DT);
        assert_eq!(controls.yaw(), 0.0);
    }

    #[test]
    fn touch_in_scroll_strip_is_refused() {
        let mut controls = DragControls::new(1.0);
        controls.set_canvas_size(1000.0, 600.0);
        assert!(!controls.on_pointer_down([950.0, 300.0], PointerKind::Touch));
        assert!(!controls.is_dragging());
        // Same spot with a mouse is fine.
        assert!(controls.on_pointer_down([950.0, 300.0], PointerKind::Mouse));
    }

    #[test]
    fn pitch_is_clamped_at_the_poles() {
        let mut controls = DragControls::new(10.0);
        assert!(controls.on_pointer_down([0.0, 0.0], PointerKind::Mouse));
        controls.on_pointer_move([0.0, 100_000.0]);
        controls.on_pointer_up();
        for _ in 0..2000 {
            controls.update(DT);
        }
        assert!(controls.pitch() <= MAX_PITCH + 1e-9);
    }
}
