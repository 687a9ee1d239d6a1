//! The generational loop.

use crate::events::{Outcome, SolverEvent};
use crate::problem::ProblemInstance;
use crate::random::{create_rng, random_seed};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::config::GeneticConfig;
use super::population::Population;

/// Runs the genetic search on a worker until cancelled.
///
/// One iteration is selection → reproduction → mutation → evaluation.
/// There is no convergence condition: the loop checks the cancellation
/// flag between generations and that is the only exit.
pub struct GeneticSolver {
    instance: Arc<ProblemInstance>,
    config: GeneticConfig,
}

impl GeneticSolver {
    /// Creates a solver for the given instance.
    ///
    /// # Panics
    ///
    /// Panics when the instance has fewer than two free waypoints;
    /// crossover needs a cut point strictly inside the gene sequence.
    /// Callers are expected to validate `config` beforehand.
    pub fn new(instance: Arc<ProblemInstance>, config: GeneticConfig) -> Self {
        assert!(
            instance.free_waypoints().len() >= 2,
            "genetic search requires at least two free waypoints"
        );
        Self { instance, config }
    }

    /// Runs until `cancel` is observed, emitting progress on `events`.
    ///
    /// Emits [`SolverEvent::GenerationAdvanced`] once per generation,
    /// [`SolverEvent::BestCandidateUpdated`] on every strict improvement
    /// (the seeded population's best counts unconditionally), and a
    /// terminal [`SolverEvent::Finished`]. Sends never block; a dropped
    /// receiver is ignored.
    pub fn run(&self, cancel: &AtomicBool, events: &Sender<SolverEvent>) -> Outcome {
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(random_seed()),
        };

        let mut population = Population::random(&self.instance, self.config.population_size, &mut rng);

        // No prior baseline: the first best is always an improvement.
        let mut best = population.best().clone();
        tracing::debug!(fitness = best.fitness(), "initial population seeded");
        let _ = events.send(SolverEvent::BestCandidateUpdated(best.clone()));

        let mut generation: u64 = 0;
        while !cancel.load(Ordering::Relaxed) {
            let pairs = population.select_pairs(self.config.selection, &mut rng);
            population.reproduce(&pairs, &mut rng);
            population.mutate(self.config.mutation, self.config.mutation_probability, &mut rng);

            generation += 1;
            let _ = events.send(SolverEvent::GenerationAdvanced(generation));

            let generation_best = population.best();
            if generation_best.fitness() < best.fitness() {
                best = generation_best.clone();
                tracing::debug!(generation, fitness = best.fitness(), "best tour improved");
                let _ = events.send(SolverEvent::BestCandidateUpdated(best.clone()));
            }
        }

        tracing::info!(generation, fitness = best.fitness(), "genetic search cancelled");
        let _ = events.send(SolverEvent::Finished(Outcome::Cancelled));
        Outcome::Cancelled
    }
}
