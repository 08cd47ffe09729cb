//! Entities, entity counts and entity sets.
//!
//! An [`Entity`] has no identity beyond its index. The number of entities taking
//! part in a schedule is an [`EntityCount`], which can only be constructed for
//! the sizes the search supports: even counts between [`EntityCount::MIN`] and
//! [`EntityCount::MAX`].
//!
//! # Examples
//!
//! ```
//! use fixturegen_core::{Entity, EntityCount, EntityCountError, EntitySet};
//!
//! assert!(EntityCount::new(8).is_ok());
//! assert_eq!(EntityCount::new(3), Err(EntityCountError::Odd { count: 3 }));
//!
//! let mut homes = EntitySet::new();
//! homes.insert(Entity::new(0));
//! homes.insert(Entity::new(5));
//! assert!(homes.contains(Entity::new(5)));
//! assert_eq!(homes.len(), 2);
//! ```

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitOr, BitOrAssign},
};

use serde::{Deserialize, Serialize};

/// A competing entity, identified by its zero-based index.
///
/// Indices are limited to `0..EntityCount::MAX`. The [`Display`] output is the
/// one-based entity number, which is what schedules show to people.
///
/// # Examples
///
/// ```
/// use fixturegen_core::Entity;
///
/// let entity = Entity::new(2);
/// assert_eq!(entity.index(), 2);
/// assert_eq!(entity.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Entity(u8);

impl Entity {
    /// Creates an entity from its zero-based index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`EntityCount::MAX`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(
            (index as usize) < EntityCount::MAX,
            "Entity index out of range"
        );
        Self(index)
    }

    /// Returns the zero-based index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the one-based entity number used for display.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    const fn bit(self) -> u32 {
        1 << self.0
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let index = u8::deserialize(deserializer)?;
        if usize::from(index) >= EntityCount::MAX {
            return Err(serde::de::Error::custom(format_args!(
                "entity index {index} out of range"
            )));
        }
        Ok(Self(index))
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Reasons an entity count is rejected.
///
/// Each precondition of the search has its own variant, so callers can tell
/// them apart without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EntityCountError {
    /// Fewer than [`EntityCount::MIN`] entities.
    #[display("entity count must be at least {}, got {count}", EntityCount::MIN)]
    TooFew {
        /// The rejected count.
        count: usize,
    },
    /// More than [`EntityCount::MAX`] entities.
    #[display("entity count must be at most {}, got {count}", EntityCount::MAX)]
    TooMany {
        /// The rejected count.
        count: usize,
    },
    /// An odd number of entities.
    #[display("entity count must be even, got {count}")]
    Odd {
        /// The rejected count.
        count: usize,
    },
}

/// A validated number of entities.
///
/// The count is even and lies in `MIN..=MAX`. All grid dimensions derive from
/// it: a double round-robin over `n` entities has `2 * (n - 1)` rounds of
/// `n / 2` courts each.
///
/// # Examples
///
/// ```
/// use fixturegen_core::EntityCount;
///
/// let count = EntityCount::new(4)?;
/// assert_eq!(count.get(), 4);
/// assert_eq!(count.rounds(), 6);
/// assert_eq!(count.half_rounds(), 3);
/// assert_eq!(count.courts(), 2);
/// assert_eq!(count.fixtures(), 12);
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityCount(u8);

impl EntityCount {
    /// Smallest supported entity count.
    pub const MIN: usize = 2;
    /// Largest supported entity count.
    pub const MAX: usize = 32;

    /// Validates an entity count.
    ///
    /// # Errors
    ///
    /// Returns [`EntityCountError::TooFew`] if `count < MIN`,
    /// [`EntityCountError::TooMany`] if `count > MAX` and
    /// [`EntityCountError::Odd`] if `count` is odd, checked in that order.
    pub fn new(count: usize) -> Result<Self, EntityCountError> {
        if count < Self::MIN {
            return Err(EntityCountError::TooFew { count });
        }
        if count > Self::MAX {
            return Err(EntityCountError::TooMany { count });
        }
        if count % 2 != 0 {
            return Err(EntityCountError::Odd { count });
        }
        #[expect(clippy::cast_possible_truncation)]
        let count = count as u8;
        Ok(Self(count))
    }

    /// Returns the number of entities.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the number of rounds in one season half (`n - 1`).
    #[must_use]
    pub const fn half_rounds(self) -> usize {
        self.0 as usize - 1
    }

    /// Returns the number of rounds in the whole schedule (`2 * (n - 1)`).
    #[must_use]
    pub const fn rounds(self) -> usize {
        self.half_rounds() * 2
    }

    /// Returns the number of fixtures played concurrently in a round (`n / 2`).
    #[must_use]
    pub const fn courts(self) -> usize {
        self.0 as usize / 2
    }

    /// Returns the number of ordered pairs of distinct entities (`n * (n - 1)`).
    #[must_use]
    pub const fn fixtures(self) -> usize {
        self.0 as usize * self.half_rounds()
    }

    /// Returns an iterator over all entities in index order.
    pub fn entities(self) -> impl DoubleEndedIterator<Item = Entity> + ExactSizeIterator {
        (0..self.0).map(Entity::new)
    }

    /// Returns the set of all entities.
    #[must_use]
    pub fn all(self) -> EntitySet {
        self.entities().collect()
    }
}

impl TryFrom<usize> for EntityCount {
    type Error = EntityCountError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl<'de> Deserialize<'de> for EntityCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let count = usize::deserialize(deserializer)?;
        Self::new(count).map_err(serde::de::Error::custom)
    }
}

impl Display for EntityCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of entities, represented as a 32-bit bitset.
///
/// Bit `i` is set when the entity with index `i` is a member, so every set
/// operation is a single integer operation.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{Entity, EntitySet};
///
/// let a: EntitySet = [0, 1, 2].into_iter().map(Entity::new).collect();
/// let b: EntitySet = [2, 3].into_iter().map(Entity::new).collect();
///
/// assert_eq!((a | b).len(), 4);
/// assert!(a.intersects(b));
/// assert_eq!(a.iter().map(Entity::index).collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntitySet {
    bits: u32,
}

impl EntitySet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Adds an entity. Returns `true` if it was not already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        let added = !self.contains(entity);
        self.bits |= entity.bit();
        added
    }

    /// Removes an entity. Returns `true` if it was present.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let present = self.contains(entity);
        self.bits &= !entity.bit();
        present
    }

    /// Returns `true` if the entity is a member.
    #[must_use]
    pub const fn contains(self, entity: Entity) -> bool {
        self.bits & entity.bit() != 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if the two sets share a member.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Returns an iterator over the members in index order.
    #[must_use]
    pub fn iter(self) -> EntitySetIter {
        EntitySetIter { bits: self.bits }
    }
}

impl BitOr for EntitySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for EntitySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl FromIterator<Entity> for EntitySet {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        let mut set = Self::new();
        for entity in iter {
            set.insert(entity);
        }
        set
    }
}

impl IntoIterator for EntitySet {
    type Item = Entity;
    type IntoIter = EntitySetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of an [`EntitySet`].
#[derive(Debug, Clone)]
pub struct EntitySetIter {
    bits: u32,
}

impl Iterator for EntitySetIter {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(Entity::new(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for EntitySetIter {}
impl FusedIterator for EntitySetIter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_entity_count_bounds() {
        assert_eq!(
            EntityCount::new(0),
            Err(EntityCountError::TooFew { count: 0 })
        );
        assert_eq!(
            EntityCount::new(1),
            Err(EntityCountError::TooFew { count: 1 })
        );
        assert_eq!(
            EntityCount::new(33),
            Err(EntityCountError::TooMany { count: 33 })
        );
        assert_eq!(
            EntityCount::new(34),
            Err(EntityCountError::TooMany { count: 34 })
        );
        assert_eq!(EntityCount::new(3), Err(EntityCountError::Odd { count: 3 }));
        assert_eq!(EntityCount::new(2).unwrap().get(), 2);
        assert_eq!(EntityCount::new(32).unwrap().get(), 32);
    }

    #[test]
    fn test_entity_count_errors_are_distinct() {
        let errors = [
            EntityCount::new(1).unwrap_err(),
            EntityCount::new(33).unwrap_err(),
            EntityCount::new(3).unwrap_err(),
        ];
        assert_ne!(errors[0], errors[1]);
        assert_ne!(errors[1], errors[2]);
        assert_ne!(errors[0], errors[2]);
        assert_eq!(errors[0].to_string(), "entity count must be at least 2, got 1");
        assert_eq!(errors[1].to_string(), "entity count must be at most 32, got 33");
        assert_eq!(errors[2].to_string(), "entity count must be even, got 3");
    }

    #[test]
    fn test_entity_count_dimensions() {
        let count = EntityCount::new(2).unwrap();
        assert_eq!(count.rounds(), 2);
        assert_eq!(count.half_rounds(), 1);
        assert_eq!(count.courts(), 1);
        assert_eq!(count.fixtures(), 2);

        let count = EntityCount::new(32).unwrap();
        assert_eq!(count.rounds(), 62);
        assert_eq!(count.courts(), 16);
        assert_eq!(count.fixtures(), 32 * 31);
        assert_eq!(count.all().len(), 32);
    }

    #[test]
    fn test_entity_count_deserialize_validates() {
        let count: EntityCount = serde_json::from_str("6").unwrap();
        assert_eq!(count.get(), 6);
        assert!(serde_json::from_str::<EntityCount>("7").is_err());
    }

    #[test]
    fn test_entity_deserialize_validates() {
        let entity: Entity = serde_json::from_str("31").unwrap();
        assert_eq!(entity.index(), 31);
        assert!(serde_json::from_str::<Entity>("32").is_err());
    }

    #[test]
    fn test_entity_display_is_one_based() {
        assert_eq!(Entity::new(0).to_string(), "1");
        assert_eq!(Entity::new(31).to_string(), "32");
    }

    #[test]
    #[should_panic(expected = "Entity index out of range")]
    fn test_entity_out_of_range_panics() {
        let _ = Entity::new(32);
    }

    #[test]
    fn test_entity_set_operations() {
        let mut set = EntitySet::new();
        assert!(set.is_empty());
        assert!(set.insert(Entity::new(3)));
        assert!(!set.insert(Entity::new(3)));
        assert!(set.insert(Entity::new(31)));
        assert_eq!(set.len(), 2);
        assert!(set.remove(Entity::new(3)));
        assert!(!set.remove(Entity::new(3)));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Entity::new(31)]);
    }

    proptest! {
        #[test]
        fn prop_entity_set_matches_members(indices in proptest::collection::vec(0u8..32, 0..40)) {
            let set: EntitySet = indices.iter().copied().map(Entity::new).collect();
            let mut expected = indices.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(set.len(), expected.len());
            prop_assert_eq!(set.iter().map(Entity::index).collect::<Vec<_>>(), expected);
        }

        #[test]
        fn prop_entity_count_accepts_exactly_even_in_range(count in 0usize..64) {
            let valid = (2..=32).contains(&count) && count % 2 == 0;
            prop_assert_eq!(EntityCount::new(count).is_ok(), valid);
        }
    }
}
