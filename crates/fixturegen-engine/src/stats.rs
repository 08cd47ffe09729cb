//! Search statistics.

/// Statistics collected during one schedule search.
///
/// # Examples
///
/// ```
/// use fixturegen_engine::ScheduleGenerator;
///
/// let (schedule, stats) = ScheduleGenerator::basic().generate_with_stats(4)?;
/// assert!(schedule.is_some());
/// assert!(stats.steps() >= stats.backtracks());
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    steps: u64,
    backtracks: u64,
    regenerations: u64,
    cancelled: bool,
}

impl SearchStats {
    /// Returns the number of main-loop iterations.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns the number of times the search stepped back to an earlier cell.
    #[must_use]
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Returns the number of option sets built, the root excluded.
    #[must_use]
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Returns `true` if the search stopped because it observed cancellation.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn record_step(&mut self) {
        self.steps += 1;
    }

    pub(crate) fn record_backtrack(&mut self) {
        self.backtracks += 1;
    }

    pub(crate) fn record_regeneration(&mut self) {
        self.regenerations += 1;
    }

    pub(crate) fn record_cancellation(&mut self) {
        self.cancelled = true;
    }
}
