//! The combination pool that seeds the search.

use fixturegen_core::{EntityCount, Fixture};

/// Returns every ordered pair of distinct entities in search order.
///
/// The pool has two halves of `n * (n - 1) / 2` fixtures each. The first half
/// lists `(i, j)` for every `i < j`, grouped by `i`; the second half lists the
/// inverses `(j, i)` in the same relative order.
///
/// The search derives every candidate set from suffixes of this array, so the
/// order decides which branches are explored first and which are pruned. It
/// must not change.
///
/// # Examples
///
/// ```
/// use fixturegen_core::{EntityCount, Fixture};
/// use fixturegen_engine::combination_pool;
///
/// let pool = combination_pool(EntityCount::new(4)?);
/// let expected: Vec<_> = [
///     (0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3),
///     (1, 0), (2, 0), (3, 0), (2, 1), (3, 1), (3, 2),
/// ]
/// .into_iter()
/// .map(|(h, a)| Fixture::from_indices(h, a))
/// .collect();
/// assert_eq!(pool, expected);
/// # Ok::<(), fixturegen_core::EntityCountError>(())
/// ```
#[must_use]
pub fn combination_pool(entities: EntityCount) -> Vec<Fixture> {
    let mut pool = Vec::with_capacity(entities.fixtures());
    pool.extend(entities.entities().flat_map(|home| {
        entities
            .entities()
            .skip(usize::from(home.index()) + 1)
            .map(move |away| Fixture::new(home, away))
    }));
    let half = pool.len();
    for i in 0..half {
        pool.push(pool[i].inverse());
    }
    pool
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_two_entities() {
        let pool = combination_pool(EntityCount::new(2).unwrap());
        assert_eq!(
            pool,
            vec![Fixture::from_indices(0, 1), Fixture::from_indices(1, 0)]
        );
    }

    proptest! {
        #[test]
        fn prop_pool_layout(half in 1usize..=16) {
            let entities = EntityCount::new(half * 2).unwrap();
            let pool = combination_pool(entities);
            let n = entities.fixtures();
            prop_assert_eq!(pool.len(), n);

            let (forward, inverse) = pool.split_at(n / 2);
            for (f, i) in forward.iter().zip(inverse) {
                prop_assert!(f.home < f.away);
                prop_assert_eq!(f.inverse(), *i);
            }
            // Grouped by home entity, in non-decreasing order.
            prop_assert!(forward.windows(2).all(|w| w[0] < w[1]));

            let unique: HashSet<_> = pool.iter().copied().collect();
            prop_assert_eq!(unique.len(), n);
        }
    }
}
