//! Parent-pair selection strategies.
//!
//! Selection turns the current population's fitness values into one
//! parent pair per population slot, so reproduction replaces the
//! generation 1:1. All strategies assume minimization (lower fitness is
//! better) and work on a plain fitness slice.

use rand::Rng;

/// Strategy for pairing up parents.
///
/// # Examples
///
/// ```
/// use tsp_engine::ga::Selection;
///
/// // Tournament with 4 contenders per pair
/// let sel = Selection::Tournament(4);
///
/// // Selection weight proportional to fitness headroom
/// let sel = Selection::WeightedByValue;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Draw `m` contenders uniformly at random (with replacement), keep
    /// the best two as the pair, in random order.
    ///
    /// Higher `m` means stronger selection pressure. Requires `m >= 2`.
    Tournament(usize),

    /// Weight each individual by `max_fitness - fitness`, draw both
    /// parents independently over the cumulative distribution.
    ///
    /// Individuals at the maximum fitness carry zero weight and are
    /// never chosen. When every individual shares the same fitness the
    /// weights all vanish; the single best individual is then paired
    /// with itself for every slot.
    WeightedByValue,

    /// Sort by fitness ascending and weight rank `r` (1 = best) by
    /// `n - r + 1`.
    ///
    /// Avoids the scaling problems of value weighting; never
    /// degenerates, since rank weights are always positive.
    WeightedByRank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Produces one parent pair (as indices) per population slot.
    ///
    /// # Panics
    ///
    /// Panics if `fitnesses` is empty.
    pub fn select_pairs<R: Rng>(&self, fitnesses: &[f64], rng: &mut R) -> Vec<(usize, usize)> {
        assert!(
            !fitnesses.is_empty(),
            "cannot select from an empty population"
        );

        match self {
            Selection::Tournament(m) => tournament_pairs(fitnesses, *m, rng),
            Selection::WeightedByValue => value_weighted_pairs(fitnesses, rng),
            Selection::WeightedByRank => rank_weighted_pairs(fitnesses, rng),
        }
    }
}

/// Tournament: best two of `m` uniform draws, pair order randomized.
fn tournament_pairs<R: Rng>(fitnesses: &[f64], m: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let m = m.max(2);
    let n = fitnesses.len();

    (0..n)
        .map(|_| {
            let mut contenders: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
            contenders.sort_by(|&a, &b| {
                fitnesses[a]
                    .partial_cmp(&fitnesses[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            order_pair((contenders[0], contenders[1]), rng)
        })
        .collect()
}

/// Weight = headroom below the worst individual.
fn value_weighted_pairs<R: Rng>(fitnesses: &[f64], rng: &mut R) -> Vec<(usize, usize)> {
    let n = fitnesses.len();
    let max_fitness = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = fitnesses.iter().map(|&f| max_fitness - f).collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        // Every individual is at max fitness: pair the best with itself.
        let best = best_index(fitnesses);
        return vec![(best, best); n];
    }

    (0..n)
        .map(|_| {
            (
                weighted_pick(&weights, total, rng),
                weighted_pick(&weights, total, rng),
            )
        })
        .collect()
}

/// Linear rank weighting: rank r (1-based, 1 = best) weighs `n - r + 1`.
fn rank_weighted_pairs<R: Rng>(fitnesses: &[f64], rng: &mut R) -> Vec<(usize, usize)> {
    let n = fitnesses.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        fitnesses[a]
            .partial_cmp(&fitnesses[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Weight of the individual at sorted position p is n - p.
    let total = (n * (n + 1) / 2) as f64;
    let mut pick = |rng: &mut R| -> usize {
        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (position, &idx) in order.iter().enumerate() {
            cumulative += (n - position) as f64;
            if cumulative > threshold {
                return idx;
            }
        }
        order[n - 1] // floating-point fallback
    };

    (0..n).map(|_| (pick(rng), pick(rng))).collect()
}

/// Cumulative-weight draw over `weights`; `total` is their sum.
fn weighted_pick<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1 // floating-point fallback
}

fn best_index(fitnesses: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitnesses.iter().enumerate() {
        if f < fitnesses[best] {
            best = i;
        }
    }
    best
}

fn order_pair<R: Rng>(pair: (usize, usize), rng: &mut R) -> (usize, usize) {
    if rng.random_bool(0.5) {
        (pair.1, pair.0)
    } else {
        pair
    }
}
