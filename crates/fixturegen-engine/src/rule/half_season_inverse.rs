use fixturegen_core::{EntityCount, EntitySet};

use super::{BoxedOptionRule, OptionRule, RuleContext};
use crate::OptionSet;

const NAME: &str = "half-season inverse";

/// Discards candidates whose inverse was already placed in the current season
/// half.
///
/// Within one half an entity pair meets in one orientation only; the mirrored
/// fixture is left for the other half. The placements are scanned once per
/// call and indexed by home entity, so each candidate costs one bit test.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{Coordinate, EntityCount, Fixture, GridShape};
/// use fixturegen_engine::{
///     OptionSet,
///     rule::{HalfSeasonInverse, OptionRule, RuleContext},
/// };
///
/// let shape = GridShape::new(EntityCount::new(4)?);
/// let placed = [Fixture::from_indices(0, 1), Fixture::from_indices(3, 2)];
/// let ctx = RuleContext::new(shape, Coordinate::new(1, 0), &placed);
///
/// let mut options = OptionSet::new(vec![
///     Fixture::from_indices(1, 0),
///     Fixture::from_indices(0, 2),
/// ]);
/// HalfSeasonInverse::new().apply(&ctx, &mut options);
/// assert_eq!(options.candidates(), &[Fixture::from_indices(0, 2)]);
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HalfSeasonInverse;

impl HalfSeasonInverse {
    /// Creates a new `HalfSeasonInverse` rule.
    #[must_use]
    pub const fn new() -> Self {
        HalfSeasonInverse
    }
}

impl OptionRule for HalfSeasonInverse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedOptionRule {
        Box::new(*self)
    }

    fn apply(&self, ctx: &RuleContext<'_>, options: &mut OptionSet) {
        let placed = ctx.placed_in_current_half();
        if placed.is_empty() {
            return;
        }

        // aways_by_home[h] holds every a with (h, a) placed in this half.
        let mut aways_by_home = [EntitySet::EMPTY; EntityCount::MAX];
        for fixture in placed {
            aways_by_home[usize::from(fixture.home.index())].insert(fixture.away);
        }
        options.discard_where(|candidate| {
            aways_by_home[usize::from(candidate.away.index())].contains(candidate.home)
        });
    }
}

#[cfg(test)]
mod tests {
    use fixturegen_core::{Coordinate, Fixture, GridShape};

    use super::*;

    fn f(h: u8, a: u8) -> Fixture {
        Fixture::from_indices(h, a)
    }

    fn shape4() -> GridShape {
        GridShape::new(EntityCount::new(4).unwrap())
    }

    #[test]
    fn test_discards_inverses_in_first_half() {
        let placed = [f(0, 1), f(3, 2), f(0, 2), f(3, 1)];
        let ctx = RuleContext::new(shape4(), Coordinate::new(2, 0), &placed);
        let mut options = OptionSet::new(vec![
            f(1, 0),
            f(0, 3),
            f(2, 3),
            f(1, 3),
            f(2, 0),
            f(1, 2),
        ]);

        HalfSeasonInverse::new().apply(&ctx, &mut options);

        let mut left = options.candidates().to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![f(0, 3), f(1, 2)]);
    }

    #[test]
    fn test_second_half_ignores_first_half() {
        let placed = [
            f(0, 1),
            f(3, 2),
            f(0, 2),
            f(3, 1),
            f(0, 3),
            f(1, 2),
            f(2, 1),
            f(3, 0),
        ];
        let ctx = RuleContext::new(shape4(), Coordinate::new(4, 0), &placed);
        let mut options = OptionSet::new(vec![f(1, 0), f(2, 0), f(1, 2), f(0, 3), f(2, 3)]);

        HalfSeasonInverse::new().apply(&ctx, &mut options);

        // (1, 2) and (0, 3) mirror round 3 placements; round 0 to 2 do not count.
        let mut left = options.candidates().to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![f(1, 0), f(2, 0), f(2, 3)]);
    }

    #[test]
    fn test_no_placements_in_half_keeps_all() {
        let placed = [f(0, 1), f(3, 2), f(0, 2), f(3, 1), f(0, 3), f(1, 2)];
        let ctx = RuleContext::new(shape4(), Coordinate::new(3, 0), &placed);
        let mut options = OptionSet::new(vec![f(1, 0), f(2, 3)]);
        HalfSeasonInverse::new().apply(&ctx, &mut options);
        assert_eq!(options.len(), 2);
    }
}
