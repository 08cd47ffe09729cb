//! Cooperative cancellation.

use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// A cloneable, externally settable stop flag observed by the search.
///
/// Every clone shares the same flag. The search polls it once per main-loop
/// iteration and once per option generation; once it observes the flag, it
/// stops and reports no schedule.
///
/// # Examples
///
/// ```
/// use fixturegen_engine::{CancellationToken, ScheduleGenerator};
///
/// let token = CancellationToken::new();
/// let generator = ScheduleGenerator::basic().with_cancellation(token.clone());
///
/// token.cancel();
/// assert_eq!(generator.generate(8)?, None);
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is already cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        let token = Self::new();
        token.cancel();
        token
    }

    /// Sets the flag. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once any clone of this token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
