//! The backtracking schedule search.

use fixturegen_core::{Coordinate, EntityCount, EntityCountError, Fixture, GridShape, Schedule};

use crate::{
    CancellationToken, OptionSet, SearchStats, combination_pool,
    rule::{self, BoxedOptionRule, RuleContext},
};

/// A preset rule set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum Variant {
    /// Plain double round-robin: every ordered pair once, no entity twice per
    /// round.
    #[default]
    #[display("basic")]
    Basic,
    /// Double round-robin with season halves and home/away rotation.
    #[display("league")]
    League,
}

impl Variant {
    /// Returns the option rules of the variant.
    #[must_use]
    pub fn rules(self) -> Vec<BoxedOptionRule> {
        match self {
            Self::Basic => rule::basic_rules(),
            Self::League => rule::league_rules(),
        }
    }
}

/// A depth-first search that fills a schedule grid cell by cell.
///
/// Cells are visited in row-major order. Each visited cell owns an
/// [`OptionSet`] derived from an earlier cell's untried candidates; the search
/// places the next candidate and moves forward, or steps back once a cell runs
/// out of candidates. The configured [`rule`](crate::rule)s filter and reorder
/// every option set as it is built.
///
/// The search is deterministic: for a given entity count and rule list it
/// always returns the same schedule.
///
/// # Examples
///
/// ```
/// use fixturegen_engine::ScheduleGenerator;
///
/// let schedule = ScheduleGenerator::league().generate(6)?.expect("schedule exists");
/// assert_eq!(schedule.rounds().len(), 10);
/// assert_eq!(schedule.check_league(), Ok(()));
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    rules: Vec<BoxedOptionRule>,
    cancellation: CancellationToken,
}

impl ScheduleGenerator {
    /// Creates a generator that applies `rules` to every option set, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixturegen_engine::{
    ///     ScheduleGenerator,
    ///     rule::{BoxedOptionRule, HalfSeasonInverse},
    /// };
    ///
    /// let rules: Vec<BoxedOptionRule> = vec![Box::new(HalfSeasonInverse::new())];
    /// let generator = ScheduleGenerator::new(rules);
    /// let schedule = generator.generate(4)?.unwrap();
    /// assert_eq!(schedule.check_half_separation(), Ok(()));
    /// # Ok::<(), fixturegen_core::EntityCountError>(())
    /// ```
    #[must_use]
    pub fn new(rules: Vec<BoxedOptionRule>) -> Self {
        Self {
            rules,
            cancellation: CancellationToken::new(),
        }
    }

    /// Creates a generator for plain double round-robin schedules.
    #[must_use]
    pub fn basic() -> Self {
        Self::new(rule::basic_rules())
    }

    /// Creates a generator for league schedules.
    #[must_use]
    pub fn league() -> Self {
        Self::new(rule::league_rules())
    }

    /// Creates a generator with the rules of `variant`.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(variant.rules())
    }

    /// Makes the search observe `token`.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the configured rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[BoxedOptionRule] {
        &self.rules
    }

    /// Returns the token the search observes.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Searches for a schedule over `entities` entities.
    ///
    /// Returns `Ok(None)` when the search is exhausted or cancelled; a
    /// partially filled grid is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`EntityCountError`] if `entities` is below 2, above 32 or odd.
    /// No search state is built in that case.
    pub fn generate(&self, entities: usize) -> Result<Option<Schedule>, EntityCountError> {
        Ok(self.generate_with_stats(entities)?.0)
    }

    /// Like [`generate`](Self::generate), also returning search statistics.
    ///
    /// # Errors
    ///
    /// Returns [`EntityCountError`] if `entities` is below 2, above 32 or odd.
    pub fn generate_with_stats(
        &self,
        entities: usize,
    ) -> Result<(Option<Schedule>, SearchStats), EntityCountError> {
        let entities = EntityCount::new(entities)?;
        let mut stats = SearchStats::default();
        let schedule = self.search(entities, &mut stats);
        Ok((schedule, stats))
    }

    /// Runs the search for a validated entity count.
    pub fn search(&self, entities: EntityCount, stats: &mut SearchStats) -> Option<Schedule> {
        log::debug!(
            "searching {entities}-entity schedule with rules {:?}",
            self.rules.iter().map(|r| r.name()).collect::<Vec<_>>()
        );
        let result = Search::new(self, entities, stats).run();
        match &result {
            Some(_) => log::debug!(
                "found {entities}-entity schedule: {} steps, {} backtracks",
                stats.steps(),
                stats.backtracks()
            ),
            None if stats.was_cancelled() => log::info!(
                "{entities}-entity search cancelled after {} steps",
                stats.steps()
            ),
            None => log::debug!(
                "{entities}-entity search exhausted after {} steps",
                stats.steps()
            ),
        }
        result
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::basic()
    }
}

/// State of one search invocation.
///
/// `options` holds one set per cell from the origin up to and including the
/// current cell; `placed` holds the placement of every cell before it.
struct Search<'a> {
    generator: &'a ScheduleGenerator,
    entities: EntityCount,
    shape: GridShape,
    options: Vec<OptionSet>,
    placed: Vec<Fixture>,
    stats: &'a mut SearchStats,
}

impl<'a> Search<'a> {
    fn new(
        generator: &'a ScheduleGenerator,
        entities: EntityCount,
        stats: &'a mut SearchStats,
    ) -> Self {
        let shape = GridShape::new(entities);
        Self {
            generator,
            entities,
            shape,
            options: Vec::with_capacity(shape.cell_count()),
            placed: Vec::with_capacity(shape.cell_count()),
            stats,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.generator.cancellation.is_cancelled()
    }

    fn run(mut self) -> Option<Schedule> {
        let mut root = OptionSet::new(combination_pool(self.entities));
        self.placed.push(root.select_next());
        self.options.push(root);

        let mut coord = self.shape.advance(Coordinate::ORIGIN);
        if !self.shape.contains(coord) {
            return Some(self.finish());
        }
        self.generate_options(coord);

        loop {
            if self.is_cancelled() {
                self.stats.record_cancellation();
                return None;
            }
            self.stats.record_step();

            let current = self
                .options
                .last_mut()
                .expect("the current cell always has an option set");
            if current.is_leaf() {
                if self.shape.is_last(coord)
                    && let Some(fixture) = current.selected_fixture()
                {
                    self.placed.push(fixture);
                    return Some(self.finish());
                }
                coord = self.shape.retreat(coord)?;
                self.options.pop();
                self.placed.pop();
                self.stats.record_backtrack();
            } else {
                let fixture = current.select_next();
                self.placed.push(fixture);
                coord = self.shape.advance(coord);
                if !self.shape.contains(coord) {
                    return Some(self.finish());
                }
                self.generate_options(coord);
            }
        }
    }

    /// Builds and pushes the option set of `coord`.
    fn generate_options(&mut self, coord: Coordinate) {
        self.stats.record_regeneration();
        if self.is_cancelled() {
            self.options.push(OptionSet::empty());
            return;
        }

        let index = self.shape.index(coord);
        debug_assert_eq!(self.options.len(), index);
        debug_assert_eq!(self.placed.len(), index);

        let mut options = if coord.court == 0 {
            self.round_start_options(coord.round)
        } else {
            let parent = &self.options[index - 1];
            let last = self.placed[index - 1];
            let mut options = OptionSet::from(parent.untried());
            options.discard_where(|candidate| candidate.shares_entity(last));
            options
        };

        let ctx = RuleContext::new(self.shape, coord, &self.placed);
        for rule in &self.generator.rules {
            if self.is_cancelled() {
                break;
            }
            rule.apply(&ctx, &mut options);
        }
        self.options.push(options);
    }

    /// Candidates for court 0 of a round after the first.
    ///
    /// The untried suffix of the previous round's first cell (the origin's, at
    /// the start of the second half) minus everything placed so far.
    fn round_start_options(&self, round: usize) -> OptionSet {
        let base_round = if round == self.shape.half_rounds() {
            0
        } else {
            round - 1
        };
        let base = &self.options[self.shape.index(Coordinate::new(base_round, 0))];
        let mut options = OptionSet::from(base.untried());
        // The origin's placement precedes every suffix of the pool.
        for &fixture in &self.placed[1..] {
            options.find_and_discard(fixture);
        }
        options
    }

    fn finish(self) -> Schedule {
        Schedule::from_fixtures(self.entities, self.placed)
            .expect("a finished search fills every cell")
    }
}
