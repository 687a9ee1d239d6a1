//! Solver lifecycle management.
//!
//! [`SolverController`] owns the problem instance and at most one
//! background worker at a time. Workers run on a dedicated thread, stop
//! through a cooperative cancellation flag checked at loop boundaries
//! (never forced termination), and publish progress on the event channel
//! handed out by [`SolverController::new`].

use crate::error::Error;
use crate::events::{Outcome, SolverEvent};
use crate::exhaustive::ExhaustiveSolver;
use crate::ga::{GeneticConfig, GeneticSolver};
use crate::problem::ProblemInstance;
use crate::random::{create_rng, random_seed};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;

/// Which solver a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Brute-force permutation enumeration.
    Exhaustive,
    /// Genetic metaheuristic.
    Genetic,
}

/// Lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has happened yet.
    Idle,
    /// A worker is searching.
    Running(Strategy),
    /// The most recent run was stopped by the caller.
    Cancelled,
    /// The most recent run exhausted its search space.
    Completed,
}

struct Worker {
    handle: JoinHandle<()>,
    cancel: Arc<AtomicBool>,
    outcome: Arc<OnceLock<Outcome>>,
    strategy: Strategy,
}

/// Owns the problem instance and the single background solver worker.
///
/// # Examples
///
/// ```no_run
/// use tsp_engine::controller::SolverController;
/// use tsp_engine::events::SolverEvent;
/// use tsp_engine::ga::GeneticConfig;
///
/// let (mut controller, events) = SolverController::new();
/// controller.generate(10, 0.0..500.0, 0.0..500.0)?;
/// controller.start_genetic(GeneticConfig::default())?;
///
/// for event in events.iter().take(100) {
///     if let SolverEvent::BestCandidateUpdated(best) = event {
///         println!("tour length {:.1}", best.display_length());
///     }
/// }
/// controller.stop();
/// # Ok::<(), tsp_engine::error::Error>(())
/// ```
pub struct SolverController {
    instance: Option<Arc<ProblemInstance>>,
    events: Sender<SolverEvent>,
    worker: Option<Worker>,
    last: RunState,
    seed: Option<u64>,
}

impl SolverController {
    /// Creates a controller and the receiving end of its event channel.
    pub fn new() -> (Self, Receiver<SolverEvent>) {
        let (events, receiver) = mpsc::channel();
        (
            Self {
                instance: None,
                events,
                worker: None,
                last: RunState::Idle,
                seed: None,
            },
            receiver,
        )
    }

    /// Pins the seed used for instance generation, making `generate`
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generates a fresh problem instance, replacing any prior one.
    ///
    /// A worker that is still running keeps its own handle to the old
    /// instance and is unaffected.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a zero count or empty bounds,
    /// [`Error::InfeasibleInstance`] when the separation constraint
    /// cannot be met.
    pub fn generate(
        &mut self,
        count: usize,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<(), Error> {
        let mut rng = match self.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(random_seed()),
        };
        let instance = ProblemInstance::generate(count, x_range, y_range, &mut rng)?;
        tracing::info!(count, "problem instance generated");
        self.instance = Some(Arc::new(instance));
        Ok(())
    }

    /// The current problem instance, if one was generated.
    pub fn instance(&self) -> Option<&ProblemInstance> {
        self.instance.as_deref()
    }

    /// Starts the exhaustive solver on a background worker.
    ///
    /// No-op when no instance is set or a worker is already running.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the instance has no free waypoints
    /// to permute.
    pub fn start_exhaustive(&mut self) -> Result<(), Error> {
        self.reap();
        if self.is_running() {
            return Ok(());
        }
        let Some(instance) = self.instance.clone() else {
            return Ok(());
        };
        if instance.free_waypoints().is_empty() {
            return Err(Error::InvalidInput(
                "exhaustive search requires at least two waypoints".into(),
            ));
        }

        let solver = ExhaustiveSolver::new(instance);
        self.spawn(Strategy::Exhaustive, move |cancel, events| {
            solver.run(&cancel, &events)
        });
        Ok(())
    }

    /// Starts the genetic solver on a background worker.
    ///
    /// No-op when no instance is set or a worker is already running.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when `config` fails validation or the
    /// instance has fewer than two free waypoints.
    pub fn start_genetic(&mut self, config: GeneticConfig) -> Result<(), Error> {
        config.validate()?;
        self.reap();
        if self.is_running() {
            return Ok(());
        }
        let Some(instance) = self.instance.clone() else {
            return Ok(());
        };
        if instance.free_waypoints().len() < 2 {
            return Err(Error::InvalidInput(
                "genetic search requires at least two non-origin waypoints".into(),
            ));
        }

        let solver = GeneticSolver::new(instance, config);
        self.spawn(Strategy::Genetic, move |cancel, events| {
            solver.run(&cancel, &events)
        });
        Ok(())
    }

    /// Requests cancellation and waits for the worker to wind down.
    ///
    /// Does not return until the worker has observed the flag and
    /// exited, so no further events follow and a new start is clean.
    /// Safe no-op when nothing is running.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // A worker that already ran to completion keeps its
            // Completed outcome; the flag is then a harmless no-op.
            worker.cancel.store(true, Ordering::Relaxed);
            let _ = worker.handle.join();
            self.last = match worker.outcome.get() {
                Some(Outcome::Completed) => RunState::Completed,
                _ => RunState::Cancelled,
            };
            tracing::info!(state = ?self.last, "solver worker stopped");
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        match &self.worker {
            Some(worker) => match worker.outcome.get() {
                None => RunState::Running(worker.strategy),
                Some(Outcome::Completed) => RunState::Completed,
                Some(Outcome::Cancelled) => RunState::Cancelled,
            },
            None => self.last,
        }
    }

    /// Whether a worker is currently searching.
    pub fn is_running(&self) -> bool {
        matches!(self.state(), RunState::Running(_))
    }

    fn spawn<F>(&mut self, strategy: Strategy, run: F)
    where
        F: FnOnce(Arc<AtomicBool>, Sender<SolverEvent>) -> Outcome + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let outcome = Arc::new(OnceLock::new());
        let events = self.events.clone();

        tracing::info!(?strategy, "solver worker starting");
        let worker_cancel = Arc::clone(&cancel);
        let worker_outcome = Arc::clone(&outcome);
        let handle = std::thread::spawn(move || {
            let result = run(worker_cancel, events);
            let _ = worker_outcome.set(result);
        });

        self.worker = Some(Worker {
            handle,
            cancel,
            outcome,
            strategy,
        });
    }

    /// Joins a worker that finished on its own so its terminal state is
    /// recorded before a new start.
    fn reap(&mut self) {
        let finished = self
            .worker
            .as_ref()
            .is_some_and(|w| w.outcome.get().is_some());
        if finished {
            self.stop();
        }
    }
}

impl Drop for SolverController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_while_running(controller: &SolverController) {
        let start = Instant::now();
        while controller.is_running() {
            assert!(
                start.elapsed() < Duration::from_secs(30),
                "worker did not finish in time"
            );
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// Blocks until a generation past `threshold` has been observed.
    fn wait_for_generation(receiver: &Receiver<SolverEvent>, threshold: u64) {
        loop {
            let event = receiver
                .recv_timeout(Duration::from_secs(10))
                .expect("solver went silent");
            if matches!(event, SolverEvent::GenerationAdvanced(n) if n >= threshold) {
                return;
            }
        }
    }

    #[test]
    fn test_generate_validates_input() {
        let (mut controller, _events) = SolverController::new();
        assert!(matches!(
            controller.generate(0, 0.0..100.0, 0.0..100.0),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.instance().is_none());
    }

    #[test]
    fn test_generate_surfaces_infeasible_instance() {
        let (mut controller, _events) = SolverController::new();
        let result = controller.generate(50, 0.0..10.0, 0.0..10.0);
        assert!(matches!(result, Err(Error::InfeasibleInstance { .. })));
    }

    #[test]
    fn test_generate_replaces_prior_instance() {
        let (mut controller, _events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(5, 0.0..200.0, 0.0..200.0).unwrap();
        let first: Vec<_> = controller.instance().unwrap().waypoints().to_vec();
        controller.generate(8, 0.0..200.0, 0.0..200.0).unwrap();
        assert_eq!(controller.instance().unwrap().len(), 8);
        assert_ne!(controller.instance().unwrap().waypoints(), &first[..]);
    }

    #[test]
    fn test_start_without_instance_is_a_no_op() {
        let (mut controller, _events) = SolverController::new();
        controller.start_exhaustive().unwrap();
        assert_eq!(controller.state(), RunState::Idle);
        controller.start_genetic(GeneticConfig::default()).unwrap();
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn test_stop_when_idle_is_a_no_op() {
        let (mut controller, _events) = SolverController::new();
        controller.stop();
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn test_exhaustive_run_completes() {
        let (mut controller, events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(6, 0.0..300.0, 0.0..300.0).unwrap();
        controller.start_exhaustive().unwrap();

        wait_while_running(&controller);
        assert_eq!(controller.state(), RunState::Completed);

        let received: Vec<SolverEvent> = events.try_iter().collect();
        assert!(matches!(
            received.last(),
            Some(SolverEvent::Finished(Outcome::Completed))
        ));
        let bests: Vec<f64> = received
            .iter()
            .filter_map(|e| match e {
                SolverEvent::BestCandidateUpdated(c) => Some(c.fitness()),
                _ => None,
            })
            .collect();
        assert!(!bests.is_empty());
        for pair in bests.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_genetic_stop_is_acknowledged_and_restartable() {
        let (mut controller, events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(8, 0.0..300.0, 0.0..300.0).unwrap();

        let config = GeneticConfig::default().with_population_size(20).with_seed(7);
        controller.start_genetic(config.clone()).unwrap();
        assert_eq!(controller.state(), RunState::Running(Strategy::Genetic));

        wait_for_generation(&events, 3);
        controller.stop();
        assert_eq!(controller.state(), RunState::Cancelled);

        // Everything still queued was sent before the worker exited;
        // the terminal event closes the stream.
        let drained: Vec<SolverEvent> = events.try_iter().collect();
        assert!(matches!(
            drained.last(),
            Some(SolverEvent::Finished(Outcome::Cancelled))
        ));

        // No leaked worker: a new run starts cleanly.
        controller.start_genetic(config).unwrap();
        assert!(controller.is_running());
        controller.stop();
        assert_eq!(controller.state(), RunState::Cancelled);
    }

    #[test]
    fn test_start_while_running_is_a_no_op() {
        let (mut controller, _events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(8, 0.0..300.0, 0.0..300.0).unwrap();

        controller
            .start_genetic(GeneticConfig::default().with_seed(7))
            .unwrap();
        controller.start_exhaustive().unwrap();
        assert_eq!(controller.state(), RunState::Running(Strategy::Genetic));
        controller.stop();
    }

    #[test]
    fn test_invalid_genetic_config_fails_before_start() {
        let (mut controller, _events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(8, 0.0..300.0, 0.0..300.0).unwrap();

        let result =
            controller.start_genetic(GeneticConfig::default().with_population_size(0));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn test_genetic_needs_two_free_waypoints() {
        let (mut controller, _events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(2, 0.0..300.0, 0.0..300.0).unwrap();

        let result = controller.start_genetic(GeneticConfig::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_completed_run_allows_restart() {
        let (mut controller, events) = SolverController::new();
        controller = controller.with_seed(42);
        controller.generate(5, 0.0..300.0, 0.0..300.0).unwrap();

        controller.start_exhaustive().unwrap();
        wait_while_running(&controller);
        assert_eq!(controller.state(), RunState::Completed);

        controller.start_exhaustive().unwrap();
        wait_while_running(&controller);
        assert_eq!(controller.state(), RunState::Completed);

        let finishes = events
            .try_iter()
            .filter(|e| matches!(e, SolverEvent::Finished(Outcome::Completed)))
            .count();
        assert_eq!(finishes, 2);
    }
}
