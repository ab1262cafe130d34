//! Cancellable delayed show/hide of the character body.

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingVisibility {
    visible: bool,
    remaining: f32,
}

/// At most one pending visibility change; a new request replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DelayedVisibility {
    pending: Option<PendingVisibility>,
}

impl DelayedVisibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a change `delay` seconds from now, cancelling any pending one.
    ///
    /// A non-positive delay applies at once: the value is returned and nothing
    /// stays pending.
    pub fn request(&mut self, visible: bool, delay: f32) -> Option<bool> {
        if delay <= 0.0 {
            self.pending = None;
            return Some(visible);
        }
        self.pending = Some(PendingVisibility {
            visible,
            remaining: delay,
        });
        None
    }

    /// Advance by `dt`. Returns the value to apply once the delay has elapsed.
    pub fn advance(&mut self, dt: f32) -> Option<bool> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            return None;
        }
        let visible = pending.visible;
        self.pending = None;
        Some(visible)
    }

    /// The value waiting to be applied, if any.
    #[must_use]
    pub fn pending(&self) -> Option<bool> {
        self.pending.map(|p| p.visible)
    }

    /// Seconds left on the pending change.
    #[must_use]
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| p.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_applies_after_delay() {
        let mut vis = DelayedVisibility::new();
        assert_eq!(vis.request(false, 0.5), None);
        assert_eq!(vis.advance(0.25), None);
        assert_eq!(vis.pending(), Some(false));
        assert_eq!(vis.advance(0.25), Some(false));
        assert_eq!(vis.pending(), None);
        assert_eq!(vis.advance(0.25), None);
    }

    #[test]
    fn test_new_request_replaces_pending() {
        let mut vis = DelayedVisibility::new();
        vis.request(false, 1.75);
        vis.advance(0.25);
        vis.request(true, 0.25);
        assert_eq!(vis.remaining(), Some(0.25));
        assert_eq!(vis.advance(0.25), Some(true));
    }

    #[test]
    fn test_zero_delay_is_immediate() {
        let mut vis = DelayedVisibility::new();
        vis.request(false, 1.0);
        assert_eq!(vis.request(true, 0.0), Some(true));
        assert_eq!(vis.pending(), None);
    }
}
