//! Ordered (home, away) pairs of entities.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{Entity, EntitySet};

/// A fixture: an ordered pair of a home entity and an away entity.
///
/// A well-formed fixture has two distinct entities; schedules containing
/// self-pairs are reported by [`Schedule::check_no_self_pairs`].
///
/// [`Schedule::check_no_self_pairs`]: crate::Schedule::check_no_self_pairs
///
/// # Examples
///
/// ```
/// use fixturegen_core::{Entity, Fixture};
///
/// let fixture = Fixture::new(Entity::new(0), Entity::new(3));
/// assert_eq!(fixture.inverse(), Fixture::new(Entity::new(3), Entity::new(0)));
/// assert_eq!(fixture.to_string(), "1-4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// The entity playing at home.
    pub home: Entity,
    /// The visiting entity.
    pub away: Entity,
}

impl Fixture {
    /// Creates a fixture.
    #[must_use]
    pub const fn new(home: Entity, away: Entity) -> Self {
        Self { home, away }
    }

    /// Creates a fixture from zero-based entity indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for an [`Entity`].
    #[must_use]
    pub const fn from_indices(home: u8, away: u8) -> Self {
        Self::new(Entity::new(home), Entity::new(away))
    }

    /// Returns the same pairing with home and away swapped.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::new(self.away, self.home)
    }

    /// Returns `true` if home and away are the same entity.
    #[must_use]
    pub fn is_self_pair(self) -> bool {
        self.home == self.away
    }

    /// Returns `true` if this fixture involves the entity on either side.
    #[must_use]
    pub fn involves(self, entity: Entity) -> bool {
        self.home == entity || self.away == entity
    }

    /// Returns `true` if the two fixtures have an entity in common, in any position.
    #[must_use]
    pub fn shares_entity(self, other: Self) -> bool {
        self.involves(other.home) || self.involves(other.away)
    }

    /// Returns both entities as a set.
    #[must_use]
    pub fn entities(self) -> EntitySet {
        [self.home, self.away].into_iter().collect()
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}
