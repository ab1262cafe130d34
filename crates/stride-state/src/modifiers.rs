//! Non-exclusive state modifiers.

bitflags::bitflags! {
    /// Conditions that can hold simultaneously.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifier: u32 {
        const SNEAKING = 1 << 0;
        const INJURED = 1 << 1;
        /// Mirrors the coordinator's scripted (dummy) flag.
        const EXHAUSTED = 1 << 2;
        /// Mirrors movement being disallowed.
        const ENCUMBERED = 1 << 3;
        const IN_ZERO_GRAVITY = 1 << 4;
        const IN_COMBAT = 1 << 5;
        /// Airborne without ground contact.
        const IN_AIR = 1 << 6;
    }
}

/// Bit-set holder for [`Modifier`] flags.
///
/// Updates are sparse: each call touches only the bits it names, and a call
/// that leaves the set unchanged does not advance the revision.
#[derive(Debug, Clone, Default)]
pub struct ModifierSet {
    bits: Modifier,
    revision: u64,
}

impl ModifierSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All flags currently present.
    #[must_use]
    pub fn current(&self) -> Modifier {
        self.bits
    }

    /// Whether any flag in `flags` is present.
    #[must_use]
    pub fn has(&self, flags: Modifier) -> bool {
        self.bits.intersects(flags)
    }

    /// Add `flags`. Returns `true` if the set changed.
    pub fn add(&mut self, flags: Modifier) -> bool {
        self.replace(self.bits | flags)
    }

    /// Remove `flags`. Returns `true` if the set changed.
    pub fn remove(&mut self, flags: Modifier) -> bool {
        self.replace(self.bits - flags)
    }

    /// Add or remove `flags` depending on `present`.
    pub fn set(&mut self, flags: Modifier, present: bool) -> bool {
        if present {
            self.add(flags)
        } else {
            self.remove(flags)
        }
    }

    /// Remove every flag.
    pub fn clear(&mut self) -> bool {
        self.replace(Modifier::empty())
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace(&mut self, bits: Modifier) -> bool {
        if bits == self.bits {
            return false;
        }
        tracing::trace!(from = ?self.bits, to = ?bits, "modifiers changed");
        self.bits = bits;
        self.revision += 1;
        true
    }
}
