//! Population mechanics: seeding, crossover, and mutation.
//!
//! A [`Population`] is a fixed-size pool of [`Candidate`] tours over one
//! problem instance. Reproduction replaces the entire generation with
//! children, one per parent pair, so the size never changes.

use crate::candidate::Candidate;
use crate::geometry::Point;
use crate::problem::ProblemInstance;
use rand::seq::SliceRandom;
use rand::Rng;

use super::selection::Selection;

/// Which swap-mutation variant to apply after reproduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationOperator {
    /// For every gene position, with probability `p`, swap it with one
    /// other randomly chosen position in the same individual.
    ///
    /// The more thorough exploration operator, and the default.
    #[default]
    PerGene,

    /// With probability `p` per individual, swap exactly two randomly
    /// chosen gene positions.
    SingleSwap,
}

/// A fixed-size pool of candidate tours.
#[derive(Debug, Clone)]
pub struct Population {
    origin: Point,
    individuals: Vec<Candidate>,
}

impl Population {
    /// Seeds `size` candidates, each a uniformly random shuffle of the
    /// instance's free waypoints.
    ///
    /// # Panics
    ///
    /// Panics when `size` is zero or the instance has no free waypoints.
    pub fn random<R: Rng>(instance: &ProblemInstance, size: usize, rng: &mut R) -> Self {
        assert!(size > 0, "population size must be positive");
        assert!(
            !instance.free_waypoints().is_empty(),
            "instance has no free waypoints to permute"
        );

        let origin = instance.origin();
        let individuals = (0..size)
            .map(|_| {
                let mut genes = instance.free_waypoints().to_vec();
                genes.shuffle(rng);
                Candidate::new(origin, genes)
            })
            .collect();

        Self { origin, individuals }
    }

    /// The current generation's individuals.
    pub fn individuals(&self) -> &[Candidate] {
        &self.individuals
    }

    /// Population size; constant across generations.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty. Never true once seeded.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individual with the lowest fitness.
    pub fn best(&self) -> &Candidate {
        self.individuals
            .iter()
            .min_by(|a, b| {
                a.fitness()
                    .partial_cmp(&b.fitness())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("population is never empty")
    }

    /// Chooses one parent pair per slot with the given strategy.
    pub fn select_pairs<R: Rng>(&self, selection: Selection, rng: &mut R) -> Vec<(usize, usize)> {
        let fitnesses: Vec<f64> = self.individuals.iter().map(|c| c.fitness()).collect();
        selection.select_pairs(&fitnesses, rng)
    }

    /// Replaces the generation with one crossover child per pair.
    pub fn reproduce<R: Rng>(&mut self, pairs: &[(usize, usize)], rng: &mut R) {
        let children: Vec<Candidate> = pairs
            .iter()
            .map(|&(a, b)| {
                let genes = order_crossover(
                    self.individuals[a].genes(),
                    self.individuals[b].genes(),
                    rng,
                );
                Candidate::new(self.origin, genes)
            })
            .collect();
        self.individuals = children;
    }

    /// Applies swap mutation to every individual.
    ///
    /// `probability == 0` skips the pass entirely.
    pub fn mutate<R: Rng>(
        &mut self,
        operator: MutationOperator,
        probability: f64,
        rng: &mut R,
    ) {
        if probability <= 0.0 {
            return;
        }

        match operator {
            MutationOperator::PerGene => {
                for individual in &mut self.individuals {
                    let len = individual.len();
                    for i in 0..len {
                        if rng.random_range(0.0..1.0) < probability {
                            let j = rng.random_range(0..len);
                            individual.swap_genes(i, j);
                        }
                    }
                }
            }
            MutationOperator::SingleSwap => {
                for individual in &mut self.individuals {
                    if rng.random_range(0.0..1.0) < probability {
                        let len = individual.len();
                        let i = rng.random_range(0..len);
                        let j = rng.random_range(0..len);
                        individual.swap_genes(i, j);
                    }
                }
            }
        }
    }
}

/// Order crossover with a random cut point in `[1, len - 1]`.
///
/// # Panics
///
/// Panics if the parents differ in length or have fewer than two genes.
pub fn order_crossover<R: Rng>(parent1: &[Point], parent2: &[Point], rng: &mut R) -> Vec<Point> {
    assert!(parent1.len() >= 2, "crossover requires at least two genes");
    let cut = rng.random_range(1..parent1.len());
    order_crossover_at(parent1, parent2, cut)
}

/// Order crossover at a fixed cut point.
///
/// The child takes parent 1's genes verbatim in `[0, cut)`. The
/// remaining slots are filled from the last position backward, scanning
/// parent 2 from its last gene backward and skipping genes the child
/// already holds. Both parents being permutations of the same waypoint
/// set, the child is a valid permutation by construction.
///
/// # Panics
///
/// Panics if the parents differ in length or `cut` is outside
/// `[1, len - 1]`.
pub fn order_crossover_at(parent1: &[Point], parent2: &[Point], cut: usize) -> Vec<Point> {
    let len = parent1.len();
    assert_eq!(len, parent2.len(), "parents must have equal length");
    assert!(
        (1..len).contains(&cut),
        "cut point {cut} outside [1, {}]",
        len - 1
    );

    let mut child: Vec<Option<Point>> = vec![None; len];
    for i in 0..cut {
        child[i] = Some(parent1[i]);
    }

    let mut slot = len - 1;
    for &gene in parent2.iter().rev() {
        if child.contains(&Some(gene)) {
            continue;
        }
        child[slot] = Some(gene);
        slot -= 1;
    }

    child
        .into_iter()
        .map(|g| g.expect("crossover fills every slot"))
        .collect()
}
