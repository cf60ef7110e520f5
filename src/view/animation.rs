use std::time::{Duration, Instant};

/// How long the completion flourish stays up without an explicit finish
pub const DISPLAY_DURATION: Duration = Duration::from_millis(1600);

/// One-shot completion flourish.
///
/// Armed only on an incomplete→complete edge; a complete→incomplete
/// transition or a re-render of an already-complete entity never arms it.
/// Cleared by the UI's "animation finished" callback or, failing that,
/// after [`DISPLAY_DURATION`].
#[derive(Debug, Default)]
pub struct CompletionAnimation {
    fired_at: Option<Instant>,
}

impl CompletionAnimation {
    pub fn new() -> Self {
        CompletionAnimation::default()
    }

    /// Arm the flourish for a completion that just happened
    pub fn fire(&mut self) {
        self.fired_at = Some(Instant::now());
    }

    /// Arm only when `before` → `after` crosses the incomplete→complete edge
    pub fn fire_on_transition(&mut self, before: bool, after: bool) {
        if !before && after {
            self.fire();
        }
    }

    pub fn is_active(&self) -> bool {
        self.fired_at
            .is_some_and(|fired| fired.elapsed() < DISPLAY_DURATION)
    }

    /// "Animation finished" callback from the UI
    pub fn finish(&mut self) {
        self.fired_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_on_the_completing_edge() {
        let mut animation = CompletionAnimation::new();
        animation.fire_on_transition(true, false);
        assert!(!animation.is_active());

        animation.fire_on_transition(true, true);
        assert!(!animation.is_active());

        animation.fire_on_transition(false, true);
        assert!(animation.is_active());
    }

    #[test]
    fn finish_clears_the_flourish() {
        let mut animation = CompletionAnimation::new();
        animation.fire();
        assert!(animation.is_active());
        animation.finish();
        assert!(!animation.is_active());
    }
}
