//! Problem-instance generation.
//!
//! A [`ProblemInstance`] owns the ordered waypoint set of one travelling-
//! salesman problem. Waypoints are drawn uniformly inside the caller's
//! coordinate bounds by rejection sampling: a candidate point is redrawn
//! while it lies within [`MIN_SEPARATION`] of any accepted point. The
//! retry loop is bounded; exhausting it reports
//! [`Error::InfeasibleInstance`] instead of hanging.
//!
//! Waypoint index 0 is the origin: every tour starts and ends there, and
//! only the remaining waypoints are permuted.

use crate::error::Error;
use crate::geometry::Point;
use rand::Rng;
use std::ops::Range;

/// Minimum pairwise distance between generated waypoints.
pub const MIN_SEPARATION: f64 = 10.0;

/// Sanity ceiling on the waypoint count.
///
/// Not enforced here; callers are expected to keep their requests under
/// it, and the retry budget will reject dense packings regardless.
pub const MAX_POINTS: usize = 1000;

/// Redraws allowed per waypoint before the instance is declared
/// infeasible.
const MAX_ATTEMPTS_PER_POINT: usize = 10_000;

/// One travelling-salesman problem: an origin plus free waypoints.
///
/// Immutable after generation; solvers share it read-only for the
/// duration of a run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    points: Vec<Point>,
}

impl ProblemInstance {
    /// Generates `count` waypoints inside `x_range` × `y_range`, every
    /// pair at least [`MIN_SEPARATION`] apart.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when `count` is zero or a range is empty;
    /// [`Error::InfeasibleInstance`] when the separation constraint
    /// cannot be met within the retry budget.
    pub fn generate<R: Rng>(
        count: usize,
        x_range: Range<f64>,
        y_range: Range<f64>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if count < 1 {
            return Err(Error::InvalidInput("point count must be at least 1".into()));
        }
        if x_range.is_empty() || y_range.is_empty() {
            return Err(Error::InvalidInput(format!(
                "coordinate bounds must be non-empty ranges, got x {x_range:?}, y {y_range:?}"
            )));
        }

        let mut points: Vec<Point> = Vec::with_capacity(count);

        for placed in 0..count {
            let mut attempts = 0;
            let accepted = loop {
                if attempts >= MAX_ATTEMPTS_PER_POINT {
                    return Err(Error::InfeasibleInstance {
                        placed,
                        requested: count,
                    });
                }
                attempts += 1;

                let candidate = Point::new(
                    rng.random_range(x_range.clone()),
                    rng.random_range(y_range.clone()),
                );
                let too_close = points
                    .iter()
                    .any(|p| p.distance(&candidate) < MIN_SEPARATION);
                if !too_close {
                    break candidate;
                }
            };
            points.push(accepted);
        }

        Ok(Self { points })
    }

    /// Wraps an already-validated waypoint set.
    ///
    /// Intended for tests and benchmarks; the separation constraint is
    /// not re-checked.
    ///
    /// # Panics
    ///
    /// Panics when `points` is empty, since an instance always has an origin.
    pub fn from_points(points: Vec<Point>) -> Self {
        assert!(!points.is_empty(), "an instance requires at least an origin");
        Self { points }
    }

    /// The fixed start and end point of every tour.
    pub fn origin(&self) -> Point {
        self.points[0]
    }

    /// All waypoints, origin first.
    pub fn waypoints(&self) -> &[Point] {
        &self.points
    }

    /// The waypoints a tour permutes: everything except the origin.
    pub fn free_waypoints(&self) -> &[Point] {
        &self.points[1..]
    }

    /// Total waypoint count, origin included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the instance holds no waypoints. Always false for a
    /// generated instance.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = create_rng(42);
        let instance = ProblemInstance::generate(5, 0.0..100.0, 0.0..100.0, &mut rng)
            .expect("5 points in 100x100 is feasible");
        assert_eq!(instance.len(), 5);
        assert_eq!(instance.free_waypoints().len(), 4);
    }

    #[test]
    fn test_min_separation_holds_pairwise() {
        let mut rng = create_rng(7);
        let instance = ProblemInstance::generate(5, 0.0..100.0, 0.0..100.0, &mut rng)
            .expect("5 points in 100x100 is feasible");

        let pts = instance.waypoints();
        for i in 0..pts.len() {
            for j in (i + 1)..pts.len() {
                let d = pts[i].distance(&pts[j]);
                assert!(
                    d >= MIN_SEPARATION,
                    "points {i} and {j} are only {d} apart"
                );
            }
        }
    }

    #[test]
    fn test_points_stay_inside_bounds() {
        let mut rng = create_rng(11);
        let instance = ProblemInstance::generate(8, 10.0..50.0, -20.0..20.0, &mut rng)
            .expect("feasible");
        for p in instance.waypoints() {
            assert!((10.0..50.0).contains(&p.x), "x out of bounds: {}", p.x);
            assert!((-20.0..20.0).contains(&p.y), "y out of bounds: {}", p.y);
        }
    }

    #[test]
    fn test_infeasible_packing_reports_instead_of_hanging() {
        // At most a couple of points fit 10 apart in a 10x10 region.
        let mut rng = create_rng(42);
        let result = ProblemInstance::generate(5, 0.0..10.0, 0.0..10.0, &mut rng);
        match result {
            Err(Error::InfeasibleInstance { placed, requested }) => {
                assert!(placed < 5);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InfeasibleInstance, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let mut rng = create_rng(42);
        let result = ProblemInstance::generate(0, 0.0..100.0, 0.0..100.0, &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_range_is_invalid() {
        let mut rng = create_rng(42);
        let result = ProblemInstance::generate(3, 50.0..50.0, 0.0..100.0, &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_same_seed_reproduces_instance() {
        let a = ProblemInstance::generate(6, 0.0..200.0, 0.0..200.0, &mut create_rng(99))
            .expect("feasible");
        let b = ProblemInstance::generate(6, 0.0..200.0, 0.0..200.0, &mut create_rng(99))
            .expect("feasible");
        assert_eq!(a.waypoints(), b.waypoints());
    }

    #[test]
    #[should_panic(expected = "at least an origin")]
    fn test_from_points_rejects_empty() {
        ProblemInstance::from_points(Vec::new());
    }
}
