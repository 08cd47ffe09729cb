//! Per-cell candidate sets with O(1) selection and discard.
//!
//! An [`OptionSet`] is an owned array of candidate fixtures partitioned by two
//! indices:
//!
//! ```text
//!  tried            untried                discarded
//! [ ... selected | selected+1 ... active | active+1 ... ]
//! ```
//!
//! Selecting moves the `selected` pointer one step to the right. Discarding
//! swaps a candidate with the one at `active` and moves `active` one step to the
//! left, so nothing is ever shifted and a discard is permanent for the lifetime
//! of the set.

use std::ops::Range;

use fixturegen_core::Fixture;

/// A partitioned, mutable set of candidate fixtures for one grid cell.
///
/// # Examples
///
/// ```
/// use fixturegen_core::Fixture;
/// use fixturegen_engine::OptionSet;
///
/// let mut options = OptionSet::new(vec![
///     Fixture::from_indices(0, 1),
///     Fixture::from_indices(0, 2),
///     Fixture::from_indices(1, 2),
/// ]);
/// assert_eq!(options.selected(), None);
/// assert_eq!(options.active(), Some(2));
///
/// assert_eq!(options.select_next(), Fixture::from_indices(0, 1));
/// options.find_and_discard(Fixture::from_indices(0, 2));
///
/// // (1, 2) is the only untried candidate left.
/// assert_eq!(options.untried(), &[Fixture::from_indices(1, 2)]);
/// assert_eq!(options.select_next(), Fixture::from_indices(1, 2));
/// assert!(options.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    candidates: Vec<Fixture>,
    /// Number of tried candidates; `selected == tried - 1`.
    tried: usize,
    /// Number of candidates not discarded; `active == live - 1`.
    live: usize,
}

impl OptionSet {
    /// Creates a set where every candidate is untried.
    #[must_use]
    pub fn new(candidates: Vec<Fixture>) -> Self {
        let live = candidates.len();
        Self {
            candidates,
            tried: 0,
            live,
        }
    }

    /// Creates a set with no candidates. It is a leaf from the start.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the index of the candidate placed at the cell, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.tried.checked_sub(1)
    }

    /// Returns the index of the last candidate that has not been discarded.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.live.checked_sub(1)
    }

    /// Returns the candidate placed at the cell, if any.
    #[must_use]
    pub fn selected_fixture(&self) -> Option<Fixture> {
        self.selected().map(|i| self.candidates[i])
    }

    /// Returns `true` if no untried candidate remains.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tried == self.live
    }

    /// Returns the number of candidates that have not been discarded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if every candidate has been discarded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the candidates that have not been discarded, tried ones first.
    #[must_use]
    pub fn candidates(&self) -> &[Fixture] {
        &self.candidates[..self.live]
    }

    /// Returns the untried candidates: strictly after `selected`, up to `active`.
    #[must_use]
    pub fn untried(&self) -> &[Fixture] {
        &self.candidates[self.tried..self.live]
    }

    /// Returns the positions of the untried candidates.
    #[must_use]
    pub fn untried_range(&self) -> Range<usize> {
        self.tried..self.live
    }

    /// Selects the next untried candidate and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the set is a leaf.
    pub fn select_next(&mut self) -> Fixture {
        assert!(!self.is_leaf(), "select_next called on a leaf option set");
        self.tried += 1;
        self.candidates[self.tried - 1]
    }

    /// Discards the candidate at `index` by swapping it with the candidate at
    /// `active` and shrinking the active bound.
    ///
    /// The order of untried candidates is disturbed.
    ///
    /// # Panics
    ///
    /// Panics unless `selected <= index <= active`.
    pub fn discard_at(&mut self, index: usize) {
        assert!(
            self.selected().is_none_or(|selected| selected <= index) && index < self.live,
            "discard index {index} outside [{:?}, {:?}]",
            self.selected(),
            self.active()
        );
        self.live -= 1;
        self.candidates.swap(index, self.live);
    }

    /// Discards the first untried candidate equal to `fixture`.
    ///
    /// Returns `true` if a candidate was discarded.
    pub fn find_and_discard(&mut self, fixture: Fixture) -> bool {
        match self.untried().iter().position(|c| *c == fixture) {
            Some(offset) => {
                self.discard_at(self.tried + offset);
                true
            }
            None => false,
        }
    }

    /// Discards every untried candidate matching `pred`.
    ///
    /// The candidate swapped into a discarded slot is examined too, so no
    /// matching candidate survives.
    pub fn discard_where<F>(&mut self, mut pred: F)
    where
        F: FnMut(Fixture) -> bool,
    {
        let mut i = self.tried;
        while i < self.live {
            if pred(self.candidates[i]) {
                self.discard_at(i);
            } else {
                i += 1;
            }
        }
    }

    /// Swaps two untried candidates. Changes try order only.
    ///
    /// # Panics
    ///
    /// Panics if either index is not an untried position.
    pub fn swap_untried(&mut self, a: usize, b: usize) {
        let range = self.untried_range();
        assert!(
            range.contains(&a) && range.contains(&b),
            "swap indices {a}, {b} outside untried range {range:?}"
        );
        self.candidates.swap(a, b);
    }
}

impl From<&[Fixture]> for OptionSet {
    fn from(candidates: &[Fixture]) -> Self {
        Self::new(candidates.to_vec())
    }
}
