//! Test utilities for schedule searches.
//!
//! [`ScheduleTester`] runs a search once and offers chained assertions on the
//! result:
//!
//! ```ignore
//! ScheduleTester::generate(&ScheduleGenerator::league(), 6)
//!     .assert_league()
//!     .assert_steps(331);
//! ```

use fixturegen_core::{Fixture, Schedule};

use crate::{ScheduleGenerator, SearchStats};

/// A test harness holding the outcome of one search.
///
/// All methods return `self`, and every assertion panics with `#[track_caller]`
/// so failures point at the test line.
#[derive(Debug)]
pub struct ScheduleTester {
    entities: usize,
    schedule: Schedule,
    stats: SearchStats,
}

impl ScheduleTester {
    /// Runs `generator` for `entities` entities.
    ///
    /// # Panics
    ///
    /// Panics if the count is rejected or no schedule is found.
    #[track_caller]
    pub fn generate(generator: &ScheduleGenerator, entities: usize) -> Self {
        let (schedule, stats) = generator
            .generate_with_stats(entities)
            .unwrap_or_else(|e| panic!("entity count {entities} rejected: {e}"));
        let schedule = schedule.unwrap_or_else(|| {
            panic!(
                "no schedule for {entities} entities after {} steps",
                stats.steps()
            )
        });
        Self {
            entities,
            schedule,
            stats,
        }
    }

    /// Asserts every round-robin rule.
    #[track_caller]
    pub fn assert_round_robin(self) -> Self {
        if let Err(violation) = self.schedule.check_round_robin() {
            panic!(
                "{}-entity schedule breaks a round-robin rule: {violation}\n{}",
                self.entities, self.schedule
            );
        }
        self
    }

    /// Asserts every round-robin and league rule.
    #[track_caller]
    pub fn assert_league(self) -> Self {
        if let Err(violation) = self.schedule.check_league() {
            panic!(
                "{}-entity schedule breaks a league rule: {violation}\n{}",
                self.entities, self.schedule
            );
        }
        self
    }

    /// Asserts the exact placement of every round.
    #[track_caller]
    pub fn assert_rounds(self, expected: &[Vec<Fixture>]) -> Self {
        let actual: Vec<Vec<Fixture>> = self.schedule.rounds().map(<[_]>::to_vec).collect();
        assert_eq!(
            actual, expected,
            "unexpected {}-entity schedule:\n{}",
            self.entities, self.schedule
        );
        self
    }

    /// Asserts the number of main-loop iterations the search took.
    #[track_caller]
    pub fn assert_steps(self, expected: u64) -> Self {
        assert_eq!(
            self.stats.steps(),
            expected,
            "unexpected step count for {} entities",
            self.entities
        );
        self
    }
}
