//! Genetic metaheuristic for the travelling-salesman problem.
//!
//! The population evolves through one fixed cycle per generation:
//! selection → reproduction (order crossover) → mutation → evaluation.
//! There is no built-in convergence condition; the loop runs until the
//! caller cancels it.
//!
//! # Key types
//!
//! - [`GeneticConfig`]: run parameters (population size, selection,
//!   mutation operator and probability, seed)
//! - [`Selection`]: the three parent-pair selection strategies
//! - [`Population`]: fixed-size candidate pool and the genetic operators
//! - [`GeneticSolver`]: drives the generational loop on a worker

mod config;
mod population;
mod selection;
mod solver;

pub use config::GeneticConfig;
pub use population::{order_crossover, order_crossover_at, MutationOperator, Population};
pub use selection::Selection;
pub use solver::GeneticSolver;
