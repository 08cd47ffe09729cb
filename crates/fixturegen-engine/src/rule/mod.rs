//! Option rules: passes applied to every freshly generated option set.
//!
//! The basic search builds each cell's candidates from the round-robin
//! constraints alone. Extra scheduling rules hook in here: each [`OptionRule`]
//! receives the new [`OptionSet`] together with the placements made so far and
//! may discard candidates or reorder the untried ones.
//!
//! Rules run in the order given to
//! [`ScheduleGenerator::new`](crate::ScheduleGenerator::new). The search skips
//! the remaining rules of a cell once it observes cancellation.

use std::fmt::Debug;

use fixturegen_core::{Coordinate, EntitySet, Fixture, GridShape};

pub use self::{half_season_inverse::HalfSeasonInverse, home_away_balance::HomeAwayBalance};
use crate::OptionSet;

mod half_season_inverse;
mod home_away_balance;

/// Returns the rules of the basic round-robin search: none.
#[must_use]
pub fn basic_rules() -> Vec<BoxedOptionRule> {
    Vec::new()
}

/// Returns the league rules in application order.
///
/// - **Half-season inverse**: a pair plays at most once per season half.
/// - **Home/away balance**: candidates that keep home teams rotating are
///   tried first.
///
/// # Examples
///
/// ```
/// use fixturegen_engine::rule;
///
/// let names: Vec<_> = rule::league_rules().iter().map(|r| r.name()).collect();
/// assert_eq!(names, ["half-season inverse", "home/away balance"]);
/// ```
#[must_use]
pub fn league_rules() -> Vec<BoxedOptionRule> {
    vec![
        Box::new(HalfSeasonInverse::new()),
        Box::new(HomeAwayBalance::new()),
    ]
}

/// A pass over a freshly generated option set.
///
/// Rules may discard candidates and reorder untried ones, but must never touch
/// the tried region of the set.
pub trait OptionRule: Debug + Send + Sync {
    /// Returns the name of the rule.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the rule.
    fn clone_box(&self) -> BoxedOptionRule;

    /// Applies the rule to the option set of `ctx.coord()`.
    fn apply(&self, ctx: &RuleContext<'_>, options: &mut OptionSet);
}

/// A boxed option rule.
pub type BoxedOptionRule = Box<dyn OptionRule>;

impl Clone for BoxedOptionRule {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Search state visible to an [`OptionRule`].
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    shape: GridShape,
    coord: Coordinate,
    placed: &'a [Fixture],
}

impl<'a> RuleContext<'a> {
    /// Creates a context for the cell at `coord`.
    ///
    /// # Panics
    ///
    /// Panics unless `placed` holds exactly one fixture per cell before `coord`.
    #[must_use]
    pub fn new(shape: GridShape, coord: Coordinate, placed: &'a [Fixture]) -> Self {
        assert_eq!(
            placed.len(),
            shape.index(coord),
            "placements do not end right before {coord}"
        );
        Self {
            shape,
            coord,
            placed,
        }
    }

    /// Returns the grid shape.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the cell whose options are being built.
    #[must_use]
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Returns every placement before the current cell, in row-major order.
    #[must_use]
    pub fn placed(&self) -> &'a [Fixture] {
        self.placed
    }

    /// Returns the placements of a completed round.
    ///
    /// # Panics
    ///
    /// Panics unless `round` lies before the current round.
    #[must_use]
    pub fn placed_in_round(&self, round: usize) -> &'a [Fixture] {
        assert!(
            round < self.coord.round,
            "round {round} is not complete at {}",
            self.coord
        );
        let courts = self.shape.courts();
        &self.placed[round * courts..(round + 1) * courts]
    }

    /// Returns the placements made since the start of the current season half.
    #[must_use]
    pub fn placed_in_current_half(&self) -> &'a [Fixture] {
        let start = self.shape.half_start(self.coord.round) * self.shape.courts();
        &self.placed[start..]
    }

    /// Returns the home entities of the round before the current one, or an
    /// empty set in the first round.
    #[must_use]
    pub fn previous_round_homes(&self) -> EntitySet {
        match self.coord.round.checked_sub(1) {
            Some(round) => self
                .placed_in_round(round)
                .iter()
                .map(|fixture| fixture.home)
                .collect(),
            None => EntitySet::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use fixturegen_core::EntityCount;

    use super::*;

    fn f(h: u8, a: u8) -> Fixture {
        Fixture::from_indices(h, a)
    }

    fn shape4() -> GridShape {
        GridShape::new(EntityCount::new(4).unwrap())
    }

    #[test]
    fn test_league_rules_clone() {
        let rules = league_rules();
        let cloned = rules.clone();
        assert_eq!(
            rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            cloned.iter().map(|r| r.name()).collect::<Vec<_>>()
        );
        assert!(basic_rules().is_empty());
    }

    #[test]
    fn test_context_slices() {
        let placed = [f(0, 1), f(3, 2), f(0, 2), f(3, 1), f(0, 3), f(1, 2), f(2, 1)];
        let ctx = RuleContext::new(shape4(), Coordinate::new(3, 1), &placed);
        assert_eq!(ctx.placed_in_round(1), &[f(0, 2), f(3, 1)]);
        assert_eq!(ctx.placed_in_current_half(), &[f(2, 1)]);
        let homes: Vec<_> = ctx.previous_round_homes().iter().map(|e| e.index()).collect();
        assert_eq!(homes, vec![0, 1]);
    }

    #[test]
    fn test_first_round_has_no_previous_homes() {
        let placed = [f(0, 1)];
        let ctx = RuleContext::new(shape4(), Coordinate::new(0, 1), &placed);
        assert!(ctx.previous_round_homes().is_empty());
        assert_eq!(ctx.placed_in_current_half(), &[f(0, 1)]);
    }

    #[test]
    #[should_panic(expected = "placements do not end right before")]
    fn test_context_rejects_short_placements() {
        let _ = RuleContext::new(shape4(), Coordinate::new(1, 0), &[f(0, 1)]);
    }

    #[test]
    #[should_panic(expected = "round 1 is not complete")]
    fn test_placed_in_current_round_panics() {
        let placed = [f(0, 1), f(3, 2), f(0, 2)];
        let ctx = RuleContext::new(shape4(), Coordinate::new(1, 1), &placed);
        let _ = ctx.placed_in_round(1);
    }
}
