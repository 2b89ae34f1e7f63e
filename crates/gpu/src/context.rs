use runtime::Frame;

/// Frames to wait after a context loss before giving up on restoration.
pub const DEFAULT_GRACE_FRAMES: u64 = 60;

/// Graphics context lifecycle.
///
/// ```text
/// Uninitialized -> Creating -> Live -> Lost -> Restoring -> Live
///                                  \-> Disposed (terminal, from any state)
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContextState {
    Uninitialized,
    Creating,
    Live,
    Lost,
    Restoring,
    Disposed,
}

impl ContextState {
    pub fn label(&self) -> &'static str {
        match self {
            ContextState::Uninitialized => "uninitialized",
            ContextState::Creating => "creating",
            ContextState::Lost => "lost",
            ContextState::Live => "live",
            ContextState::Restoring => "restoring",
            ContextState::Disposed => "disposed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    InvalidTransition {
        from: ContextState,
        to: ContextState,
    },
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "invalid context transition: {} -> {}",
                    from.label(),
                    to.label()
                )
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

/// State machine tracking one graphics context from creation to disposal.
///
/// Loss records the frame it happened on; `grace_expired` tells the caller
/// when restoration has been pending too long and fallback should take over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLifecycle {
    state: ContextState,
    grace_frames: u64,
    lost_at_frame: Option<u64>,
}

impl Default for ContextLifecycle {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_FRAMES)
    }
}

impl ContextLifecycle {
    pub fn new(grace_frames: u64) -> Self {
        Self {
            state: ContextState::Uninitialized,
            grace_frames,
            lost_at_frame: None,
        }
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == ContextState::Live
    }

    pub fn is_disposed(&self) -> bool {
        self.state == ContextState::Disposed
    }

    pub fn begin_create(&mut self) -> Result<(), LifecycleError> {
        self.transition(ContextState::Uninitialized, ContextState::Creating)
    }

    /// Creation or restoration finished.
    pub fn mark_live(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            ContextState::Creating | ContextState::Restoring => {
                self.state = ContextState::Live;
                self.lost_at_frame = None;
                Ok(())
            }
            from => Err(LifecycleError::InvalidTransition {
                from,
                to: ContextState::Live,
            }),
        }
    }

    pub fn mark_lost(&mut self, frame: &Frame) -> Result<(), LifecycleError> {
        self.transition(ContextState::Live, ContextState::Lost)?;
        self.lost_at_frame = Some(frame.index);
        Ok(())
    }

    pub fn begin_restore(&mut self) -> Result<(), LifecycleError> {
        self.transition(ContextState::Lost, ContextState::Restoring)
    }

    /// Terminal; valid from any state and idempotent.
    pub fn dispose(&mut self) {
        self.state = ContextState::Disposed;
        self.lost_at_frame = None;
    }

    /// True once the context has been lost for longer than the grace window
    /// without coming back. Meaningful only in `Lost` or `Restoring`.
    pub fn grace_expired(&self, now: &Frame) -> bool {
        match self.lost_at_frame {
            Some(lost_at) => now.index.saturating_sub(lost_at) > self.grace_frames,
            None => false,
        }
    }

    fn transition(&mut self, from: ContextState, to: ContextState) -> Result<(), LifecycleError> {
        if self.state == from {
            self.state = to;
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextLifecycle, ContextState, LifecycleError};
    use runtime::Frame;

    fn frame(index: u64) -> Frame {
        Frame {
            index,
            dt_s: 1.0 / 60.0,
        }
    }

    fn live_context() -> ContextLifecycle {
        let mut ctx = ContextLifecycle::default();
        ctx.begin_create().unwrap();
        ctx.mark_live().unwrap();
        ctx
    }

    #[test]
    fn happy_path_reaches_live() {
        let ctx = live_context();
        assert!(ctx.is_live());
    }

    #[test]
    fn loss_and_restore_round_trip() {
        let mut ctx = live_context();
        ctx.mark_lost(&frame(100)).unwrap();
        assert_eq!(ctx.state(), ContextState::Lost);
        ctx.begin_restore().unwrap();
        ctx.mark_live().unwrap();
        assert!(ctx.is_live());
        // Restoration clears the loss bookkeeping.
        assert!(!ctx.grace_expired(&frame(10_000)));
    }

    #[test]
    fn invalid_transition_is_an_error() {
        let mut ctx = ContextLifecycle::default();
        let err = ctx.mark_live().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: ContextState::Uninitialized,
                to: ContextState::Live,
            }
        );
        assert_eq!(ctx.state(), ContextState::Uninitialized);
    }

    #[test]
    fn cannot_lose_a_context_twice() {
        let mut ctx = live_context();
        ctx.mark_lost(&frame(5)).unwrap();
        assert!(ctx.mark_lost(&frame(6)).is_err());
    }

    #[test]
    fn dispose_is_idempotent_and_terminal() {
        let mut ctx = live_context();
        ctx.dispose();
        ctx.dispose();
        assert!(ctx.is_disposed());
        assert!(ctx.begin_create().is_err());
        assert!(ctx.begin_restore().is_err());
    }

    #[test]
    fn grace_window_expires_after_the_configured_frames() {
        let mut ctx = live_context();
        ctx.mark_lost(&frame(100)).unwrap();
        assert!(!ctx.grace_expired(&frame(100)));
        assert!(!ctx.grace_expired(&frame(160)));
        assert!(ctx.grace_expired(&frame(161)));
    }

    #[test]
    fn grace_never_expires_while_live() {
        let ctx = live_context();
        assert!(!ctx.grace_expired(&frame(u64::MAX)));
    }
}
