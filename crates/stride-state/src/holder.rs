//! Single-value state holder with change tracking.

use std::fmt::Debug;

/// Holds one exclusive state value.
///
/// [`set`](Self::set) is a no-op when the value is unchanged: the revision
/// counter only advances on a real change, so observers comparing revisions
/// never see a redundant notification.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    label: &'static str,
    value: T,
    revision: u64,
}

impl<T: Copy + PartialEq + Default + Debug> StateCell<T> {
    /// Create a holder at the type's neutral value.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: T::default(),
            revision: 0,
        }
    }

    /// The current value.
    #[must_use]
    pub fn current(&self) -> T {
        self.value
    }

    /// Whether the current value equals `value`.
    #[must_use]
    pub fn is(&self, value: T) -> bool {
        self.value == value
    }

    /// Replace the value. Returns `true` if it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        tracing::trace!(state = self.label, from = ?self.value, to = ?value, "state changed");
        self.value = value;
        self.revision += 1;
        true
    }

    /// Reset to the neutral value. Returns `true` if it changed.
    pub fn clear(&mut self) -> bool {
        self.set(T::default())
    }

    /// Number of real changes since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::MovementState;

    #[test]
    fn test_starts_neutral() {
        let cell: StateCell<MovementState> = StateCell::new("movement");
        assert_eq!(cell.current(), MovementState::Idle);
        assert_eq!(cell.revision(), 0);
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut cell: StateCell<MovementState> = StateCell::new("movement");
        assert!(cell.set(MovementState::Run));
        assert!(!cell.set(MovementState::Run));
        assert_eq!(cell.revision(), 1);
    }

    #[test]
    fn test_clear_returns_to_neutral() {
        let mut cell: StateCell<MovementState> = StateCell::new("movement");
        cell.set(MovementState::Ladder);
        assert!(cell.clear());
        assert!(cell.is(MovementState::Idle));
        assert!(!cell.clear());
        assert_eq!(cell.revision(), 2);
    }
}
