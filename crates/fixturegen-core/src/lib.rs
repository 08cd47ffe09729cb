//! Core data structures for double round-robin scheduling.
//!
//! This crate provides the value types shared by the schedule search engine and
//! its front ends. None of them perform any search; they describe entities,
//! fixtures, the shape of a schedule grid and the finished schedule itself.
//!
//! # Overview
//!
//! 1. **Entities** - Competing entities identified only by their index
//!    - [`entity`]: [`Entity`], the validated [`EntityCount`] and the bitset
//!      [`EntitySet`].
//!
//! 2. **Fixtures** - Ordered (home, away) pairs
//!    - [`fixture`]: [`Fixture`] and its inverse.
//!
//! 3. **Grid geometry** - Rounds × courts layout and row-major traversal
//!    - [`grid`]: [`Coordinate`] and [`GridShape`], including the
//!      advance/retreat walk used by the backtracking search.
//!
//! 4. **Schedules** - Completed grids
//!    - [`schedule`]: [`Schedule`], rendering and round access.
//!    - [`validation`]: schedule rule checks and [`ScheduleViolation`].
//!
//! # Examples
//!
//! ```
//! use fixturegen_core::{Coordinate, EntityCount, GridShape};
//!
//! let count = EntityCount::new(6)?;
//! let shape = GridShape::new(count);
//! assert_eq!(shape.rounds(), 10);
//! assert_eq!(shape.courts(), 3);
//!
//! // Walking past the last court wraps to the next round.
//! let next = shape.advance(Coordinate::new(0, 2));
//! assert_eq!(next, Coordinate::new(1, 0));
//! # Ok::<(), fixturegen_core::EntityCountError>(())
//! ```

pub mod entity;
pub mod fixture;
pub mod grid;
pub mod schedule;
pub mod validation;

// Re-export commonly used types
pub use self::{
    entity::{Entity, EntityCount, EntityCountError, EntitySet},
    fixture::Fixture,
    grid::{Coordinate, GridShape},
    schedule::{Schedule, ShapeMismatchError, default_labels},
    validation::ScheduleViolation,
};
