//! Euclidean travelling-salesman solving engine.
//!
//! Solves closed tours that start and end at a fixed origin waypoint,
//! with two interchangeable strategies:
//!
//! - **Exhaustive search**: enumerates all `k!` orderings of the free
//!   waypoints and streams every improvement. Guaranteed optimal at
//!   factorial cost, so only viable for small instances.
//! - **Genetic algorithm**: population-based approximation with three
//!   selection strategies, order-preserving crossover, and swap
//!   mutation. Runs until cancelled and scales to larger instances.
//!
//! Both strategies run on a dedicated background worker owned by
//! [`controller::SolverController`], report progress over a channel of
//! [`events::SolverEvent`] values, and stop through a cooperative
//! cancellation flag checked at loop boundaries.
//!
//! # Modules
//!
//! - [`geometry`]: 2D points and the two distance functions. Squared
//!   distance drives every optimization comparison; true distance is
//!   reserved for reporting.
//! - [`problem`]: waypoint set generation under a minimum pairwise
//!   separation constraint.
//! - [`candidate`]: one tour with its lazily cached fitness.
//! - [`ga`]: population mechanics and the generational loop.
//! - [`exhaustive`]: brute-force permutation enumeration.
//! - [`controller`]: worker lifecycle, start/stop, run state.

pub mod candidate;
pub mod controller;
pub mod error;
pub mod events;
pub mod exhaustive;
pub mod ga;
pub mod geometry;
pub mod problem;
pub mod random;
