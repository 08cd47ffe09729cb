//! Backtracking search for double round-robin schedules.
//!
//! [`ScheduleGenerator`] fills a rounds × courts grid cell by cell. Every cell
//! gets an [`OptionSet`] built from the untried candidates of an earlier cell,
//! so the search never revisits a combination an ancestor already explored.
//! [`rule`]s hook into option generation to encode extra scheduling rules;
//! [`rule::league_rules`] keeps pairs apart within a season half and rotates
//! home entities between rounds.
//!
//! # Examples
//!
//! ```
//! use fixturegen_engine::{ScheduleGenerator, Variant};
//!
//! let generator = ScheduleGenerator::for_variant(Variant::Basic);
//! let schedule = generator.generate(4)?.expect("schedule exists");
//!
//! assert_eq!(schedule.to_string().lines().next(), Some("Round 1: 1-2, 4-3"));
//! assert_eq!(schedule.check_round_robin(), Ok(()));
//! # Ok::<(), fixturegen_core::EntityCountError>(())
//! ```

pub use self::{
    cancel::CancellationToken, generator::*, option_set::OptionSet, pool::combination_pool,
    stats::SearchStats,
};

mod cancel;
mod generator;
mod option_set;
mod pool;
pub mod rule;
mod stats;

#[cfg(test)]
mod testing;
