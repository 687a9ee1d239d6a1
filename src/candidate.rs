//! Tour candidates.
//!
//! A [`Candidate`] is one ordered permutation of a problem's free
//! waypoints plus the origin that closes the loop. Its fitness, the sum
//! of *squared* segment lengths around the closed loop, is computed
//! lazily and cached. The cache is an explicit [`OnceCell`], so a
//! legitimate fitness of exactly zero (coincident points) is cached like
//! any other value rather than being mistaken for "not yet computed".

use crate::geometry::Point;
use std::cell::OnceCell;

/// One closed tour: origin → genes… → origin.
///
/// The gene sequence is always a permutation of the instance's free
/// waypoints; seeding, crossover, and mutation all preserve that
/// invariant by construction. A candidate is owned by exactly one
/// population slot or enumeration step at a time and crosses thread
/// boundaries only by value.
#[derive(Debug, Clone)]
pub struct Candidate {
    origin: Point,
    genes: Vec<Point>,
    fitness: OnceCell<f64>,
}

impl Candidate {
    /// Creates a candidate from the origin and an ordered gene sequence.
    ///
    /// # Panics
    ///
    /// Panics when `genes` is empty; a tour visits at least one waypoint
    /// besides the origin.
    pub fn new(origin: Point, genes: Vec<Point>) -> Self {
        assert!(!genes.is_empty(), "a candidate requires at least one gene");
        Self {
            origin,
            genes,
            fitness: OnceCell::new(),
        }
    }

    /// The point the tour starts and ends at.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The ordered waypoints between the two origin visits.
    pub fn genes(&self) -> &[Point] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the candidate has no genes. Never true for a constructed
    /// candidate.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Tour fitness: the closed-loop sum of squared segment lengths.
    ///
    /// Lower is better. Computed once and cached; subsequent calls are
    /// free.
    pub fn fitness(&self) -> f64 {
        *self
            .fitness
            .get_or_init(|| self.loop_length(Point::distance_sq))
    }

    /// True (non-squared) tour length, for reporting.
    ///
    /// Recomputed on demand; only display paths need it.
    pub fn display_length(&self) -> f64 {
        self.loop_length(Point::distance)
    }

    /// Swaps two gene positions in place and invalidates the cached
    /// fitness.
    pub fn swap_genes(&mut self, i: usize, j: usize) {
        self.genes.swap(i, j);
        self.fitness = OnceCell::new();
    }

    fn loop_length(&self, segment: fn(&Point, &Point) -> f64) -> f64 {
        let first = self.genes.first().expect("genes are never empty");
        let last = self.genes.last().expect("genes are never empty");

        let mut total = segment(&self.origin, first);
        total += self
            .genes
            .windows(2)
            .map(|pair| segment(&pair[0], &pair[1]))
            .sum::<f64>();
        total + segment(last, &self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_sums_squared_segments() {
        // Square corners: each side is 10, so each squared segment
        // is 100 and the closed loop totals 400.
        let origin = Point::new(0.0, 0.0);
        let genes = vec![
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let candidate = Candidate::new(origin, genes);
        assert!((candidate.fitness() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_length_uses_true_distance() {
        let origin = Point::new(0.0, 0.0);
        let genes = vec![
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let candidate = Candidate::new(origin, genes);
        assert!((candidate.display_length() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_gene_loop() {
        let origin = Point::new(0.0, 0.0);
        let candidate = Candidate::new(origin, vec![Point::new(3.0, 4.0)]);
        // Out and back: 25 + 25 squared, 5 + 5 true.
        assert!((candidate.fitness() - 50.0).abs() < 1e-9);
        assert!((candidate.display_length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_fitness_is_cached_not_recomputed() {
        // Degenerate coincident points: fitness is legitimately zero and
        // must behave like any other cached value.
        let origin = Point::new(5.0, 5.0);
        let candidate = Candidate::new(origin, vec![origin, origin]);
        assert_eq!(candidate.fitness(), 0.0);
        assert_eq!(candidate.fitness(), 0.0);
    }

    #[test]
    fn test_swap_invalidates_cache() {
        let origin = Point::new(0.0, 0.0);
        let mut candidate = Candidate::new(
            origin,
            vec![
                Point::new(10.0, 0.0),
                Point::new(0.0, 30.0),
                Point::new(20.0, 0.0),
            ],
        );
        let before = candidate.fitness();
        candidate.swap_genes(1, 2);
        let after = candidate.fitness();
        assert_ne!(before, after, "swap changed the tour, fitness must follow");
    }

    #[test]
    fn test_swap_preserves_gene_multiset() {
        let origin = Point::new(0.0, 0.0);
        let genes = vec![
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        ];
        let mut candidate = Candidate::new(origin, genes.clone());
        candidate.swap_genes(0, 2);
        for g in &genes {
            assert!(candidate.genes().contains(g));
        }
        assert_eq!(candidate.len(), genes.len());
    }

    #[test]
    #[should_panic(expected = "at least one gene")]
    fn test_empty_genes_panic() {
        Candidate::new(Point::new(0.0, 0.0), Vec::new());
    }
}
