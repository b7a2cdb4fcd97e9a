//! Fuzzy membership weights.
//!
//! For a point with distance `d_i` to cluster `i`, the membership weight is
//!
//! ```text
//! w_i = 1 / Σ_j (d_i / d_j)^(2 / (m - 1))
//! ```
//!
//! Zero distances are replaced by [`MIN_DISTANCE`] so a point sitting exactly on a
//! center gets (almost) all of its mass there instead of dividing by zero.

/// Stand-in for a zero distance.
pub const MIN_DISTANCE: f64 = 1e-10;

#[inline]
fn clamp(d: f64) -> f64 {
    if d == 0.0 {
        MIN_DISTANCE
    } else {
        d
    }
}

/// Membership weight of the cluster at distance `distance`, given the point's
/// distances to every cluster (including that one).
///
/// `m` must be greater than 1; [`FuzzyConfig::validate`](super::FuzzyConfig::validate)
/// enforces this before a run starts. The result lies in `(0, 1]`.
pub fn membership_weight(distance: f64, distances: &[f64], m: f64) -> f64 {
    debug_assert!(m > 1.0);
    let exponent = 2.0 / (m - 1.0);
    let d_i = clamp(distance);
    let denom: f64 = distances
        .iter()
        .map(|&d_j| (d_i / clamp(d_j)).powf(exponent))
        .sum();
    1.0 / denom
}

/// Membership weights for every cluster, in the order of `distances`.
pub fn membership_weights(distances: &[f64], m: f64) -> Vec<f64> {
    distances
        .iter()
        .map(|&d| membership_weight(d, distances, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_two_cluster_example() {
        // Centers [0,0] and [10,0], point [2,0].
        let w = membership_weights(&[2.0, 8.0], 2.0);
        assert!((w[0] - 16.0 / 17.0).abs() < TOL);
        assert!((w[1] - 1.0 / 17.0).abs() < TOL);
        assert!(w[0] > w[1]);
        assert!((w[0] + w[1] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_equal_distances_share_evenly() {
        let w = membership_weights(&[3.0; 4], 2.0);
        for x in w {
            assert!((x - 0.25).abs() < TOL);
        }
    }

    #[test]
    fn test_zero_distance_takes_nearly_all() {
        let w = membership_weights(&[0.0, 5.0, 7.0], 2.0);
        assert!(w[0] > 1.0 - 1e-9);
        assert!(w[0] <= 1.0);
        assert!(w[1] > 0.0 && w[2] > 0.0);
    }

    #[test]
    fn test_all_zero_distances() {
        let w = membership_weights(&[0.0, 0.0], 2.0);
        assert!((w[0] - 0.5).abs() < TOL);
        assert!((w[1] - 0.5).abs() < TOL);
    }

    #[test]
    fn test_single_cluster_gets_everything() {
        assert_eq!(membership_weight(4.2, &[4.2], 2.0), 1.0);
    }

    #[test]
    fn test_larger_m_spreads_membership() {
        let sharp = membership_weights(&[1.0, 4.0], 1.5);
        let soft = membership_weights(&[1.0, 4.0], 4.0);
        assert!(sharp[0] > soft[0]);
        assert!(soft[0] > 0.5);
    }
}
