//! Grid geometry: coordinates and row-major traversal.
//!
//! A schedule grid has one row per round and one column per court. The search
//! visits cells in row-major order, so a [`Coordinate`] doubles as the stack
//! pointer of the backtracking search: [`GridShape::advance`] pushes,
//! [`GridShape::retreat`] pops.
//!
//! Both moves are total. Advancing from the last cell yields a coordinate one
//! round past the end, which [`GridShape::contains`] rejects; retreating from
//! the first cell yields `None`.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::EntityCount;

/// A (round, court) position in a schedule grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Zero-based round (row).
    pub round: usize,
    /// Zero-based court (column).
    pub court: usize,
}

impl Coordinate {
    /// The first cell of every grid.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a coordinate.
    #[must_use]
    pub const fn new(round: usize, court: usize) -> Self {
        Self { round, court }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}, court {}", self.round + 1, self.court + 1)
    }
}

/// Dimensions of the schedule grid for an entity count.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{Coordinate, EntityCount, GridShape};
///
/// let shape = GridShape::new(EntityCount::new(4)?);
/// assert_eq!(shape.cell_count(), 12);
///
/// let last = shape.last();
/// assert_eq!(last, Coordinate::new(5, 1));
/// assert!(!shape.contains(shape.advance(last)));
/// assert_eq!(shape.retreat(Coordinate::ORIGIN), None);
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    entities: EntityCount,
    rounds: usize,
    half_rounds: usize,
    courts: usize,
}

impl GridShape {
    /// Creates the grid shape for a double round-robin over `entities`.
    #[must_use]
    pub const fn new(entities: EntityCount) -> Self {
        Self {
            entities,
            rounds: entities.rounds(),
            half_rounds: entities.half_rounds(),
            courts: entities.courts(),
        }
    }

    /// Returns the entity count the grid was built for.
    #[must_use]
    pub const fn entities(self) -> EntityCount {
        self.entities
    }

    /// Returns the number of rounds (rows).
    #[must_use]
    pub const fn rounds(self) -> usize {
        self.rounds
    }

    /// Returns the number of rounds in one season half.
    #[must_use]
    pub const fn half_rounds(self) -> usize {
        self.half_rounds
    }

    /// Returns the number of courts (columns).
    #[must_use]
    pub const fn courts(self) -> usize {
        self.courts
    }

    /// Returns the total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rounds * self.courts
    }

    /// Returns the last cell in row-major order.
    #[must_use]
    pub const fn last(self) -> Coordinate {
        Coordinate::new(self.rounds - 1, self.courts - 1)
    }

    /// Returns `true` if the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(self, coord: Coordinate) -> bool {
        coord.round < self.rounds && coord.court < self.courts
    }

    /// Returns `true` if the coordinate is the last cell.
    #[must_use]
    pub const fn is_last(self, coord: Coordinate) -> bool {
        coord.round == self.rounds - 1 && coord.court == self.courts - 1
    }

    /// Moves one cell forward in row-major order.
    ///
    /// Past the last court the walk wraps to court 0 of the next round. The
    /// result lies outside the grid when `coord` is the last cell.
    #[must_use]
    pub const fn advance(self, coord: Coordinate) -> Coordinate {
        if coord.court == self.courts - 1 {
            Coordinate::new(coord.round + 1, 0)
        } else {
            Coordinate::new(coord.round, coord.court + 1)
        }
    }

    /// Moves one cell backward in row-major order.
    ///
    /// Returns `None` when `coord` is the origin.
    #[must_use]
    pub const fn retreat(self, coord: Coordinate) -> Option<Coordinate> {
        if coord.court == 0 {
            if coord.round == 0 {
                return None;
            }
            Some(Coordinate::new(coord.round - 1, self.courts - 1))
        } else {
            Some(Coordinate::new(coord.round, coord.court - 1))
        }
    }

    /// Returns the row-major index of a cell.
    ///
    /// The index of a cell equals the number of cells visited before it.
    #[must_use]
    pub const fn index(self, coord: Coordinate) -> usize {
        coord.round * self.courts + coord.court
    }

    /// Returns the cell at a row-major index.
    #[must_use]
    pub const fn coordinate(self, index: usize) -> Coordinate {
        Coordinate::new(index / self.courts, index % self.courts)
    }

    /// Returns the first round of the season half containing `round`.
    #[must_use]
    pub const fn half_start(self, round: usize) -> usize {
        if round < self.half_rounds {
            0
        } else {
            self.half_rounds
        }
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(self) -> impl DoubleEndedIterator<Item = Coordinate> + ExactSizeIterator {
        (0..self.cell_count()).map(move |index| self.coordinate(index))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn shape(n: usize) -> GridShape {
        GridShape::new(EntityCount::new(n).unwrap())
    }

    #[test]
    fn test_advance_wraps_at_row_boundary() {
        let shape = shape(6);
        assert_eq!(shape.advance(Coordinate::new(0, 0)), Coordinate::new(0, 1));
        assert_eq!(shape.advance(Coordinate::new(0, 2)), Coordinate::new(1, 0));
        assert_eq!(shape.advance(shape.last()), Coordinate::new(10, 0));
    }

    #[test]
    fn test_retreat_wraps_at_row_boundary() {
        let shape = shape(6);
        assert_eq!(
            shape.retreat(Coordinate::new(1, 0)),
            Some(Coordinate::new(0, 2))
        );
        assert_eq!(
            shape.retreat(Coordinate::new(1, 2)),
            Some(Coordinate::new(1, 1))
        );
        assert_eq!(shape.retreat(Coordinate::ORIGIN), None);
    }

    #[test]
    fn test_single_court_grid() {
        let shape = shape(2);
        assert_eq!(shape.cell_count(), 2);
        assert_eq!(shape.advance(Coordinate::ORIGIN), Coordinate::new(1, 0));
        assert_eq!(
            shape.retreat(Coordinate::new(1, 0)),
            Some(Coordinate::ORIGIN)
        );
        assert!(shape.is_last(Coordinate::new(1, 0)));
    }

    #[test]
    fn test_half_start() {
        let shape = shape(4);
        assert_eq!(shape.half_start(0), 0);
        assert_eq!(shape.half_start(2), 0);
        assert_eq!(shape.half_start(3), 3);
        assert_eq!(shape.half_start(5), 3);
    }

    #[test]
    fn test_cells_visit_row_major() {
        let cells: Vec<_> = shape(4).cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Coordinate::ORIGIN);
        assert_eq!(cells[1], Coordinate::new(0, 1));
        assert_eq!(cells[2], Coordinate::new(1, 0));
        assert_eq!(cells[11], Coordinate::new(5, 1));
    }

    proptest! {
        #[test]
        fn prop_advance_then_retreat_is_identity(half in 1usize..=16, index in 0usize..992) {
            let shape = shape(half * 2);
            let index = index % shape.cell_count();
            let coord = shape.coordinate(index);
            let next = shape.advance(coord);
            prop_assert_eq!(shape.index(next), index + 1);
            prop_assert_eq!(shape.retreat(next), Some(coord));
        }
    }
}
