//! Completed schedules.
//!
//! A [`Schedule`] is a fully populated grid of fixtures, stored row-major. It is
//! what the search engine returns on success and what the validation functions
//! in [`validation`](crate::validation) inspect.
//!
//! # Examples
//!
//! ```
//! use fixturegen_core::{Coordinate, EntityCount, Fixture, Schedule};
//!
//! let count = EntityCount::new(2)?;
//! let schedule = Schedule::from_fixtures(
//!     count,
//!     vec![Fixture::from_indices(0, 1), Fixture::from_indices(1, 0)],
//! )
//! .unwrap();
//!
//! assert_eq!(schedule[Coordinate::new(1, 0)], Fixture::from_indices(1, 0));
//! assert_eq!(schedule.to_string(), "Round 1: 1-2\nRound 2: 2-1\n");
//! # Ok::<(), fixturegen_core::EntityCountError>(())
//! ```

use std::{
    fmt::{self, Display, Write as _},
    ops::Index,
};

use serde::{Serialize, ser::SerializeStruct as _};

use crate::{Coordinate, EntityCount, Fixture, GridShape};

/// The number of fixtures does not fill the grid of the entity count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("schedule needs {expected} fixtures, got {actual}")]
pub struct ShapeMismatchError {
    /// Number of cells in the grid.
    pub expected: usize,
    /// Number of fixtures supplied.
    pub actual: usize,
}

/// A complete double round-robin schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    shape: GridShape,
    fixtures: Vec<Fixture>,
}

impl Schedule {
    /// Creates a schedule from fixtures listed in row-major order.
    ///
    /// No scheduling rule is checked here; use the `check_*` methods for that.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatchError`] if the number of fixtures differs from the
    /// number of grid cells for `entities`.
    pub fn from_fixtures(
        entities: EntityCount,
        fixtures: Vec<Fixture>,
    ) -> Result<Self, ShapeMismatchError> {
        let shape = GridShape::new(entities);
        if fixtures.len() != shape.cell_count() {
            return Err(ShapeMismatchError {
                expected: shape.cell_count(),
                actual: fixtures.len(),
            });
        }
        Ok(Self { shape, fixtures })
    }

    /// Returns the grid shape.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the number of scheduled entities.
    #[must_use]
    pub fn entities(&self) -> EntityCount {
        self.shape.entities()
    }

    /// Returns the fixture at a cell, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<Fixture> {
        self.shape
            .contains(coord)
            .then(|| self.fixtures[self.shape.index(coord)])
    }

    /// Returns all fixtures in row-major order.
    #[must_use]
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Returns the fixtures of one round.
    ///
    /// # Panics
    ///
    /// Panics if `round` is outside the grid.
    #[must_use]
    pub fn round(&self, round: usize) -> &[Fixture] {
        assert!(round < self.shape.rounds(), "round {round} out of range");
        let start = round * self.shape.courts();
        &self.fixtures[start..start + self.shape.courts()]
    }

    /// Returns an iterator over the rounds.
    pub fn rounds(&self) -> impl ExactSizeIterator<Item = &[Fixture]> {
        self.fixtures.chunks_exact(self.shape.courts())
    }

    /// Returns an iterator over every cell and its fixture, in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Coordinate, Fixture)> + '_ {
        self.shape.cells().zip(self.fixtures.iter().copied())
    }

    /// Renders the schedule with custom entity labels, one round per line.
    ///
    /// Entity `i` is written as `labels[i]`.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer labels than entities.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixturegen_core::{EntityCount, Fixture, Schedule, default_labels};
    ///
    /// let count = EntityCount::new(2)?;
    /// let schedule = Schedule::from_fixtures(
    ///     count,
    ///     vec![Fixture::from_indices(0, 1), Fixture::from_indices(1, 0)],
    /// )
    /// .unwrap();
    ///
    /// let text = schedule.render_with(&default_labels(count));
    /// assert_eq!(text, "Round 1: A-B\nRound 2: B-A\n");
    /// # Ok::<(), fixturegen_core::EntityCountError>(())
    /// ```
    #[must_use]
    pub fn render_with<L: Display>(&self, labels: &[L]) -> String {
        assert!(
            labels.len() >= usize::from(self.entities().get()),
            "need {} labels, got {}",
            self.entities(),
            labels.len()
        );
        let mut out = String::new();
        self.write_rounds(&mut out, |f, fixture| {
            write!(
                f,
                "{}-{}",
                labels[usize::from(fixture.home.index())],
                labels[usize::from(fixture.away.index())]
            )
        })
        .expect("writing to a String never fails");
        out
    }

    fn write_rounds<W, F>(&self, out: &mut W, mut write_fixture: F) -> fmt::Result
    where
        W: fmt::Write,
        F: FnMut(&mut W, Fixture) -> fmt::Result,
    {
        let width = self.shape.rounds().to_string().len();
        for (i, round) in self.rounds().enumerate() {
            write!(out, "Round {:>width$}: ", i + 1)?;
            for (j, fixture) in round.iter().enumerate() {
                if j > 0 {
                    out.write_str(", ")?;
                }
                write_fixture(out, *fixture)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl Index<Coordinate> for Schedule {
    type Output = Fixture;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        assert!(self.shape.contains(coord), "{coord} is outside the grid");
        &self.fixtures[self.shape.index(coord)]
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rounds(f, |f, fixture| write!(f, "{fixture}"))
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let rounds: Vec<&[Fixture]> = self.rounds().collect();
        let mut state = serializer.serialize_struct("Schedule", 2)?;
        state.serialize_field("entities", &self.entities())?;
        state.serialize_field("rounds", &rounds)?;
        state.end()
    }
}

/// Returns spreadsheet-style letter labels (`A`, `B`, ..., `Z`, `AA`, ...) for
/// every entity.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{EntityCount, default_labels};
///
/// let labels = default_labels(EntityCount::new(28)?);
/// assert_eq!(labels[0], "A");
/// assert_eq!(labels[25], "Z");
/// assert_eq!(labels[27], "AB");
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[must_use]
pub fn default_labels(entities: EntityCount) -> Vec<String> {
    entities
        .entities()
        .map(|entity| {
            let mut n = usize::from(entity.index()) + 1;
            let mut label = Vec::new();
            while n > 0 {
                let rem = (n - 1) % 26;
                #[expect(clippy::cast_possible_truncation)]
                label.push(b'A' + rem as u8);
                n = (n - 1) / 26;
            }
            label.iter().rev().map(|&b| char::from(b)).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_entity_schedule() -> Schedule {
        let fixtures = [
            (0, 1),
            (3, 2),
            (0, 2),
            (3, 1),
            (0, 3),
            (1, 2),
            (2, 1),
            (3, 0),
            (1, 0),
            (2, 3),
            (2, 0),
            (1, 3),
        ]
        .into_iter()
        .map(|(h, a)| Fixture::from_indices(h, a))
        .collect();
        Schedule::from_fixtures(EntityCount::new(4).unwrap(), fixtures).unwrap()
    }

    #[test]
    fn test_from_fixtures_checks_length() {
        let count = EntityCount::new(4).unwrap();
        let err = Schedule::from_fixtures(count, vec![Fixture::from_indices(0, 1)]).unwrap_err();
        assert_eq!(
            err,
            ShapeMismatchError {
                expected: 12,
                actual: 1
            }
        );
    }

    #[test]
    fn test_round_access() {
        let schedule = four_entity_schedule();
        assert_eq!(schedule.rounds().len(), 6);
        assert_eq!(
            schedule.round(2),
            &[Fixture::from_indices(0, 3), Fixture::from_indices(1, 2)]
        );
        assert_eq!(
            schedule.get(Coordinate::new(5, 1)),
            Some(Fixture::from_indices(1, 3))
        );
        assert_eq!(schedule.get(Coordinate::new(6, 0)), None);
        assert_eq!(schedule.iter().nth(3).unwrap().0, Coordinate::new(1, 1));
    }

    #[test]
    fn test_display() {
        let text = four_entity_schedule().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Round 1: 1-2, 4-3");
        assert_eq!(lines[5], "Round 6: 3-1, 2-4");
    }

    #[test]
    fn test_display_pads_round_numbers() {
        let count = EntityCount::new(6).unwrap();
        let fixtures = vec![Fixture::from_indices(0, 1); 30];
        let text = Schedule::from_fixtures(count, fixtures)
            .unwrap()
            .to_string();
        assert!(text.starts_with("Round  1: "));
        assert!(text.lines().last().unwrap().starts_with("Round 10: "));
    }

    #[test]
    fn test_render_with_labels() {
        let labels = ["north", "south", "east", "west"];
        let text = four_entity_schedule().render_with(&labels);
        assert!(text.starts_with("Round 1: north-south, west-east\n"));
    }

    #[test]
    #[should_panic(expected = "need 4 labels, got 2")]
    fn test_render_with_too_few_labels_panics() {
        let _ = four_entity_schedule().render_with(&["a", "b"]);
    }

    #[test]
    fn test_serialize() {
        let count = EntityCount::new(2).unwrap();
        let schedule = Schedule::from_fixtures(
            count,
            vec![Fixture::from_indices(0, 1), Fixture::from_indices(1, 0)],
        )
        .unwrap();
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(
            json,
            r#"{"entities":2,"rounds":[[{"home":0,"away":1}],[{"home":1,"away":0}]]}"#
        );
    }

    #[test]
    fn test_default_labels() {
        let labels = default_labels(EntityCount::new(32).unwrap());
        assert_eq!(labels.len(), 32);
        assert_eq!(labels[1], "B");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[31], "AF");
    }
}
