use std::fmt;

/// A lightweight handle identifying an entity slot in a [`Registry`](crate::Registry).
///
/// Carries the slot index and a validity flag. A handle is only meaningful
/// relative to the registry that produced it. Destroying an entity
/// invalidates the registry's slot and the handle passed to
/// [`destroy_entity`](crate::Registry::destroy_entity); other copies of the
/// handle keep their flag and are the caller's responsibility. Handles have
/// no generation counter, so a copy held across a destroy-then-recycle will
/// alias the new entity at that index.
///
/// # Equality
///
/// Two handles are equal iff both the index and the validity flag match.
/// (The comparison is a plain field-wise equivalence; it does not consult
/// the registry.)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    valid: bool,
}

impl Entity {
    /// The invalid handle. Also the [`Default`] value.
    pub const INVALID: Self = Self {
        index: u32::MAX,
        valid: false,
    };

    /// Creates a valid handle for a slot index.
    pub(crate) fn new(index: u32) -> Self {
        Self { index, valid: true }
    }

    /// Returns the slot index of this entity.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns whether this handle's validity flag is set.
    ///
    /// This reflects the flag only; it does not re-check liveness against
    /// the registry. Use [`Registry::is_alive`](crate::Registry::is_alive)
    /// for that.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Clears the validity flag.
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "Entity({})", self.index)
        } else {
            write!(f, "Entity(invalid)")
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
