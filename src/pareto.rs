//! Pareto-front extraction and hypervolume for two-objective runs.
//!
//! Raw evaluations live on incompatible scales (room pairings in the
//! hundreds, day separation in `[0, 25]`), so everything here works on
//! normalized points in the unit square with both objectives minimized:
//!
//! - `f1 = 1 - separation / max_separation` (more separation is better)
//! - `f2 = pairings / max_pairings`
//!
//! The reference point is the worst corner `(1, 1)`; points outside the
//! reference box contribute nothing and are dropped before the sweep. The
//! hypervolume itself is the usual staircase sum over the front sorted by
//! the first objective.

use crate::ga::Evaluation;
use crate::models::MAX_DAYS;

/// Worst corner of the normalized objective space.
pub const REFERENCE: [f64; 2] = [1.0, 1.0];

/// Normalization bounds mapping raw objectives into the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Upper bound on total room pairings.
    pub max_pairings: f64,
    /// Upper bound on mean conflict separation, in days.
    pub max_separation: f64,
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            max_pairings: 1200.0,
            max_separation: MAX_DAYS as f64,
        }
    }
}

impl Scaling {
    /// Maps an evaluation to a normalized `[f1, f2]` point, both minimized.
    pub fn normalize(&self, eval: &Evaluation) -> [f64; 2] {
        [
            1.0 - eval.mean_separation() / self.max_separation,
            eval.room_pairings() / self.max_pairings,
        ]
    }
}

/// Indices of the non-dominated points, in input order.
///
/// A point dominates another when it is no worse in both objectives and
/// strictly better in at least one. Duplicates do not dominate each other,
/// so exact ties all survive.
pub fn pareto_front(points: &[[f64; 2]]) -> Vec<usize> {
    (0..points.len())
        .filter(|&i| {
            !points
                .iter()
                .enumerate()
                .any(|(j, q)| j != i && dominates(q, &points[i]))
        })
        .collect()
}

fn dominates(a: &[f64; 2], b: &[f64; 2]) -> bool {
    a[0] <= b[0] && a[1] <= b[1] && (a[0] < b[0] || a[1] < b[1])
}

/// Hypervolume dominated by `points` with respect to `reference`.
///
/// Dominated and out-of-reference points are ignored, so the input need
/// not be a clean front. Returns 0 for an empty input.
pub fn hypervolume(points: &[[f64; 2]], reference: [f64; 2]) -> f64 {
    let mut front: Vec<[f64; 2]> = pareto_front(points)
        .into_iter()
        .map(|i| points[i])
        .filter(|p| p[0] <= reference[0] && p[1] <= reference[1])
        .collect();
    front.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    front.dedup();

    // Staircase sweep: each point adds the rectangle between itself, the
    // reference f1 edge, and the previous point's f2 level.
    let mut volume = 0.0;
    let mut prev_f2 = reference[1];
    for p in &front {
        volume += (reference[0] - p[0]) * (prev_f2 - p[1]);
        prev_f2 = p[1];
    }
    volume
}

/// Normalizes a batch of evaluations and returns the hypervolume of their
/// front against [`REFERENCE`].
pub fn front_hypervolume(evals: &[Evaluation], scaling: &Scaling) -> f64 {
    let points: Vec<[f64; 2]> = evals.iter().map(|e| scaling.normalize(e)).collect();
    hypervolume(&points, REFERENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_dominance_filter() {
        let points = [[0.2, 0.3], [0.4, 0.1], [0.5, 0.5]];
        // (0.5, 0.5) is dominated by (0.2, 0.3); the other two trade off.
        assert_eq!(pareto_front(&points), vec![0, 1]);
    }

    #[test]
    fn test_exact_ties_both_survive() {
        let points = [[0.3, 0.3], [0.3, 0.3]];
        assert_eq!(pareto_front(&points), vec![0, 1]);
    }

    #[test]
    fn test_hypervolume_empty_is_zero() {
        assert_eq!(hypervolume(&[], REFERENCE), 0.0);
    }

    #[test]
    fn test_hypervolume_at_reference_corner_is_zero() {
        assert_eq!(hypervolume(&[[1.0, 1.0]], REFERENCE), 0.0);
    }

    #[test]
    fn test_hypervolume_at_origin_is_one() {
        assert!(close(hypervolume(&[[0.0, 0.0]], REFERENCE), 1.0));
    }

    #[test]
    fn test_hypervolume_two_point_staircase() {
        let points = [[0.2, 0.3], [0.4, 0.1]];
        // 0.8 * 0.7 + 0.6 * 0.2
        assert!(close(hypervolume(&points, REFERENCE), 0.68));
    }

    #[test]
    fn test_dominated_points_do_not_change_volume() {
        let front = [[0.2, 0.3], [0.4, 0.1]];
        let with_noise = [[0.2, 0.3], [0.4, 0.1], [0.5, 0.5], [0.9, 0.9]];
        assert!(close(
            hypervolume(&front, REFERENCE),
            hypervolume(&with_noise, REFERENCE),
        ));
    }

    #[test]
    fn test_out_of_reference_points_are_dropped() {
        let points = [[1.5, 0.1]];
        assert_eq!(hypervolume(&points, REFERENCE), 0.0);
    }

    #[test]
    fn test_normalization() {
        let scaling = Scaling::default();
        let eval = Evaluation {
            objectives: [120.0, -5.0],
            constraints: [0.0, 0.0],
        };
        let p = scaling.normalize(&eval);
        assert!(close(p[0], 1.0 - 5.0 / 25.0));
        assert!(close(p[1], 0.1));
    }

    #[test]
    fn test_front_hypervolume_improves_with_better_points() {
        let scaling = Scaling::default();
        let weak = Evaluation {
            objectives: [600.0, -5.0],
            constraints: [0.0, 0.0],
        };
        let strong = Evaluation {
            objectives: [120.0, -20.0],
            constraints: [0.0, 0.0],
        };
        let hv_weak = front_hypervolume(&[weak], &scaling);
        let hv_both = front_hypervolume(&[weak, strong], &scaling);
        assert!(hv_both > hv_weak);
    }
}
