//! Rule checks for completed schedules.
//!
//! The checks are split the same way the generators are:
//!
//! - Round-robin rules, which every schedule must satisfy:
//!   [`Schedule::check_no_self_pairs`], [`Schedule::check_complete`] and
//!   [`Schedule::check_round_integrity`], bundled as
//!   [`Schedule::check_round_robin`].
//! - League rules: [`Schedule::check_half_separation`] and
//!   [`Schedule::check_home_spacing`], bundled with the round-robin rules as
//!   [`Schedule::check_league`].
//!
//! Each check stops at the first violation it finds.
//!
//! # Examples
//!
//! ```
//! use fixturegen_core::{EntityCount, Fixture, Schedule, ScheduleViolation};
//!
//! let count = EntityCount::new(2)?;
//! let good = Schedule::from_fixtures(
//!     count,
//!     vec![Fixture::from_indices(0, 1), Fixture::from_indices(1, 0)],
//! )
//! .unwrap();
//! assert_eq!(good.check_league(), Ok(()));
//!
//! let bad = Schedule::from_fixtures(
//!     count,
//!     vec![Fixture::from_indices(0, 1), Fixture::from_indices(0, 1)],
//! )
//! .unwrap();
//! assert!(matches!(
//!     bad.check_complete(),
//!     Err(ScheduleViolation::DuplicateFixture { .. })
//! ));
//! # Ok::<(), fixturegen_core::EntityCountError>(())
//! ```

use crate::{Coordinate, Entity, EntitySet, Fixture, Schedule};

/// The first broken rule found in a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScheduleViolation {
    /// A fixture pairs an entity with itself.
    #[display("fixture {fixture} at {at} pairs an entity with itself")]
    SelfPair {
        /// Cell of the fixture.
        at: Coordinate,
        /// The offending fixture.
        fixture: Fixture,
    },
    /// A fixture names an entity outside the schedule's entity count.
    #[display("fixture {fixture} at {at} names an unknown entity")]
    EntityOutOfRange {
        /// Cell of the fixture.
        at: Coordinate,
        /// The offending fixture.
        fixture: Fixture,
    },
    /// The same ordered pair is scheduled twice.
    #[display("fixture {fixture} is scheduled at {first} and again at {second}")]
    DuplicateFixture {
        /// The repeated fixture.
        fixture: Fixture,
        /// Its first cell.
        first: Coordinate,
        /// Its second cell.
        second: Coordinate,
    },
    /// An ordered pair is never scheduled.
    #[display("fixture {fixture} is never scheduled")]
    MissingFixture {
        /// The missing fixture.
        fixture: Fixture,
    },
    /// An entity plays twice in one round.
    #[display("entity {entity} plays more than once in round {}", round + 1)]
    RepeatedEntity {
        /// Zero-based round.
        round: usize,
        /// The repeated entity.
        entity: Entity,
    },
    /// A fixture and its inverse fall in the same season half.
    #[display("fixture {fixture} at {first} and its inverse at {second} share a season half")]
    InverseInSameHalf {
        /// The fixture scheduled first.
        fixture: Fixture,
        /// Cell of the fixture.
        first: Coordinate,
        /// Cell of its inverse.
        second: Coordinate,
    },
    /// An entity is at home on the same court in three consecutive rounds.
    #[display(
        "entity {entity} is at home on court {} in rounds {} to {}",
        court + 1,
        round + 1,
        round + 3
    )]
    HomeStreak {
        /// Zero-based court.
        court: usize,
        /// First round of the streak.
        round: usize,
        /// The entity at home.
        entity: Entity,
    },
}

impl Schedule {
    /// Checks every round-robin rule.
    ///
    /// # Errors
    ///
    /// Returns the first violation of [`check_no_self_pairs`](Self::check_no_self_pairs),
    /// [`check_complete`](Self::check_complete) or
    /// [`check_round_integrity`](Self::check_round_integrity).
    pub fn check_round_robin(&self) -> Result<(), ScheduleViolation> {
        self.check_no_self_pairs()?;
        self.check_complete()?;
        self.check_round_integrity()
    }

    /// Checks every round-robin rule and every league rule.
    ///
    /// # Errors
    ///
    /// Returns the first violation of [`check_round_robin`](Self::check_round_robin),
    /// [`check_half_separation`](Self::check_half_separation) or
    /// [`check_home_spacing`](Self::check_home_spacing).
    pub fn check_league(&self) -> Result<(), ScheduleViolation> {
        self.check_round_robin()?;
        self.check_half_separation()?;
        self.check_home_spacing()
    }

    /// Checks that no fixture pairs an entity with itself.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleViolation::SelfPair`] for the first self-pair.
    pub fn check_no_self_pairs(&self) -> Result<(), ScheduleViolation> {
        match self.iter().find(|(_, fixture)| fixture.is_self_pair()) {
            Some((at, fixture)) => Err(ScheduleViolation::SelfPair { at, fixture }),
            None => Ok(()),
        }
    }

    /// Checks that every ordered pair of distinct entities is scheduled exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleViolation::EntityOutOfRange`],
    /// [`ScheduleViolation::DuplicateFixture`] or
    /// [`ScheduleViolation::MissingFixture`].
    pub fn check_complete(&self) -> Result<(), ScheduleViolation> {
        let n = usize::from(self.entities().get());
        let all = self.entities().all();
        let mut seen: Vec<Option<Coordinate>> = vec![None; n * n];

        for (at, fixture) in self.iter() {
            if !all.contains(fixture.home) || !all.contains(fixture.away) {
                return Err(ScheduleViolation::EntityOutOfRange { at, fixture });
            }
            let slot = &mut seen[pair_index(n, fixture)];
            if let Some(first) = *slot {
                return Err(ScheduleViolation::DuplicateFixture {
                    fixture,
                    first,
                    second: at,
                });
            }
            *slot = Some(at);
        }

        for home in self.entities().entities() {
            for away in self.entities().entities() {
                let fixture = Fixture::new(home, away);
                if home != away && seen[pair_index(n, fixture)].is_none() {
                    return Err(ScheduleViolation::MissingFixture { fixture });
                }
            }
        }
        Ok(())
    }

    /// Checks that no entity plays more than once in any round.
    ///
    /// Together with [`check_complete`](Self::check_complete) this means every
    /// entity plays exactly once per round.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleViolation::RepeatedEntity`] for the first repeat.
    pub fn check_round_integrity(&self) -> Result<(), ScheduleViolation> {
        for (round, fixtures) in self.rounds().enumerate() {
            let mut used = EntitySet::new();
            for fixture in fixtures {
                for entity in [fixture.home, fixture.away] {
                    if !used.insert(entity) {
                        return Err(ScheduleViolation::RepeatedEntity { round, entity });
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks that no fixture shares a season half with its inverse.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleViolation::InverseInSameHalf`] for the first such pair.
    pub fn check_half_separation(&self) -> Result<(), ScheduleViolation> {
        let shape = self.shape();
        let half_cells = shape.half_rounds() * shape.courts();
        for (half_index, fixtures) in self.fixtures().chunks(half_cells).enumerate() {
            let offset = half_index * half_cells;
            for (i, fixture) in fixtures.iter().enumerate() {
                if let Some(j) = fixtures[i + 1..]
                    .iter()
                    .position(|other| *other == fixture.inverse())
                {
                    return Err(ScheduleViolation::InverseInSameHalf {
                        fixture: *fixture,
                        first: shape.coordinate(offset + i),
                        second: shape.coordinate(offset + i + 1 + j),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that no entity is at home on the same court in three consecutive rounds.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleViolation::HomeStreak`] for the first streak found,
    /// scanning court by court.
    pub fn check_home_spacing(&self) -> Result<(), ScheduleViolation> {
        match self.home_streaks().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Counts the home streaks reported by [`check_home_spacing`](Self::check_home_spacing).
    #[must_use]
    pub fn home_spacing_violations(&self) -> usize {
        self.home_streaks().count()
    }

    fn home_streaks(&self) -> impl Iterator<Item = ScheduleViolation> + '_ {
        let shape = self.shape();
        (0..shape.courts()).flat_map(move |court| {
            (0..shape.rounds().saturating_sub(2)).filter_map(move |round| {
                let home = |r: usize| self[Coordinate::new(r, court)].home;
                let entity = home(round);
                (entity == home(round + 1) && entity == home(round + 2)).then_some(
                    ScheduleViolation::HomeStreak {
                        court,
                        round,
                        entity,
                    },
                )
            })
        })
    }
}

fn pair_index(n: usize, fixture: Fixture) -> usize {
    usize::from(fixture.home.index()) * n + usize::from(fixture.away.index())
}
