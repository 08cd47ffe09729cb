use super::{BoxedOptionRule, OptionRule, RuleContext};
use crate::OptionSet;

const NAME: &str = "home/away balance";

/// Reorders candidates so that home entities rotate between rounds.
///
/// Let `P` be the entities playing at home in the previous round. The untried
/// candidates are partitioned into three tiers, tried in this order:
///
/// 1. home not in `P`, away in `P`: both entities swap sides.
/// 2. home not in `P`, away not in `P`.
/// 3. home in `P`: the home entity would stay at home.
///
/// Nothing is discarded; only the try order changes. The first round, and any
/// cell with a single candidate, are left alone.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{Coordinate, EntityCount, Fixture, GridShape};
/// use fixturegen_engine::{
///     OptionSet,
///     rule::{HomeAwayBalance, OptionRule, RuleContext},
/// };
///
/// let shape = GridShape::new(EntityCount::new(4)?);
/// // Entities 0 and 3 played at home in round 0.
/// let placed = [Fixture::from_indices(0, 1), Fixture::from_indices(3, 2)];
/// let ctx = RuleContext::new(shape, Coordinate::new(1, 0), &placed);
///
/// let mut options = OptionSet::new(vec![
///     Fixture::from_indices(0, 2),
///     Fixture::from_indices(1, 0),
/// ]);
/// HomeAwayBalance::new().apply(&ctx, &mut options);
/// assert_eq!(
///     options.candidates(),
///     &[Fixture::from_indices(1, 0), Fixture::from_indices(0, 2)]
/// );
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HomeAwayBalance;

impl HomeAwayBalance {
    /// Creates a new `HomeAwayBalance` rule.
    #[must_use]
    pub const fn new() -> Self {
        HomeAwayBalance
    }
}

impl OptionRule for HomeAwayBalance {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedOptionRule {
        Box::new(*self)
    }

    fn apply(&self, ctx: &RuleContext<'_>, options: &mut OptionSet) {
        if ctx.coord().round == 0 || options.untried().len() <= 1 {
            return;
        }
        let previous_homes = ctx.previous_round_homes();

        // [start, first_medium): tier 1, [first_medium, i): tier 2,
        // (end, live): tier 3, [i, end]: unclassified.
        let start = options.untried_range().start;
        let mut end = options.untried_range().end - 1;
        let mut i = start;
        let mut first_medium = None;
        while i <= end {
            let candidate = options.untried()[i - start];
            if previous_homes.contains(candidate.home) {
                options.swap_untried(i, end);
                if end == start {
                    break;
                }
                end -= 1;
                continue;
            }
            if previous_homes.contains(candidate.away) {
                if let Some(medium) = first_medium {
                    options.swap_untried(medium, i);
                    first_medium = Some(medium + 1);
                }
            } else if first_medium.is_none() {
                first_medium = Some(i);
            }
            i += 1;
        }
    }
}
