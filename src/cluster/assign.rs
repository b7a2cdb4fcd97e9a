//! Soft assignment of one point to every cluster.
//!
//! [`SoftAssignment::compute`] measures the point against each cluster center once
//! and derives all membership weights from that single distance list. The result can
//! then be packaged two ways:
//!
//! - [`SoftAssignment::fan_out`]: one [`ClusterRecord`] per cluster, keyed by the
//!   cluster's encoded form, for routing partial sums to that cluster's reducer.
//! - [`SoftAssignment::summary`]: one [`PointSummary`] listing `(cluster id, weight)`
//!   for every cluster, for final labeling.

use std::fmt;

use super::codec;
use super::config::FuzzyConfig;
use super::membership::membership_weights;
use super::soft::SoftCluster;
use crate::error::{Error, Result};

/// Distances and membership weights of one point against a set of clusters.
#[derive(Debug, Clone)]
pub struct SoftAssignment<'a> {
    clusters: &'a [SoftCluster],
    distances: Vec<f64>,
    weights: Vec<f64>,
}

impl<'a> SoftAssignment<'a> {
    /// Measure `point` against every cluster center and weight the result.
    pub fn compute(point: &[f64], clusters: &'a [SoftCluster], config: &FuzzyConfig) -> Result<Self> {
        if clusters.is_empty() {
            return Err(Error::EmptyInput);
        }
        let distances = clusters
            .iter()
            .map(|c| {
                if c.dimension() != point.len() {
                    return Err(Error::DimensionMismatch {
                        expected: c.dimension(),
                        found: point.len(),
                    });
                }
                Ok(config.distance(point, c.center()))
            })
            .collect::<Result<Vec<f64>>>()?;
        let weights = membership_weights(&distances, config.m());
        Ok(Self {
            clusters,
            distances,
            weights,
        })
    }

    /// Distance to each cluster, in cluster order.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Membership weight of each cluster, in cluster order. Sums to 1.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Clusters paired with this point's weight for each.
    pub fn iter(&self) -> impl Iterator<Item = (&'a SoftCluster, f64)> + '_ {
        self.clusters.iter().zip(self.weights.iter().copied())
    }

    /// Cluster with the largest weight. Ties go to the earliest cluster.
    pub fn best(&self) -> (&'a SoftCluster, f64) {
        let mut best = 0;
        for (i, w) in self.weights.iter().enumerate().skip(1) {
            if *w > self.weights[best] {
                best = i;
            }
        }
        (&self.clusters[best], self.weights[best])
    }

    /// One record per cluster, keyed by the encoded cluster, carrying `payload`.
    pub fn fan_out<P: Clone>(&self, payload: &P) -> Vec<ClusterRecord<P>> {
        self.iter()
            .map(|(cluster, weight)| ClusterRecord {
                key: codec::encode(cluster),
                value: WeightedPayload {
                    weight,
                    payload: payload.clone(),
                },
            })
            .collect()
    }

    /// All `(cluster id, weight)` pairs for the point identified by `point`.
    pub fn summary<K>(&self, point: K) -> PointSummary<K> {
        PointSummary {
            point,
            memberships: self.iter().map(|(c, w)| (c.id(), w)).collect(),
        }
    }
}

/// A point's weight for one cluster, plus whatever the caller attached to the point.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPayload<P> {
    /// Membership weight.
    pub weight: f64,
    /// Caller data, typically the point itself.
    pub payload: P,
}

impl<P: fmt::Display> fmt::Display for WeightedPayload<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.weight, self.payload)
    }
}

/// Record routed to the reducer of the cluster named by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRecord<P> {
    /// Encoded cluster, see [`codec::encode`].
    pub key: String,
    /// Weight and payload.
    pub value: WeightedPayload<P>,
}

/// Every cluster's membership weight for one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSummary<K> {
    /// Caller's identity for the point.
    pub point: K,
    /// `(cluster id, weight)` in cluster order.
    pub memberships: Vec<(u32, f64)>,
}

impl<K> fmt::Display for PointSummary<K> {
    /// `[id:weight id:weight ...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (id, w)) in self.memberships.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{id}:{w}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{IdAllocator, Measure};

    fn two_clusters() -> Vec<SoftCluster> {
        let ids = IdAllocator::new();
        vec![
            SoftCluster::new(vec![0.0, 0.0], &ids),
            SoftCluster::new(vec![10.0, 0.0], &ids),
        ]
    }

    #[test]
    fn test_two_cluster_example() {
        let clusters = two_clusters();
        let config = FuzzyConfig::new(Measure::Euclidean).with_m(2.0);
        let a = SoftAssignment::compute(&[2.0, 0.0], &clusters, &config).unwrap();

        assert_eq!(a.distances(), &[2.0, 8.0]);
        let w = a.weights();
        assert!(w[0] > w[1]);
        assert!((w[0] + w[1] - 1.0).abs() < 1e-12);
        assert!((w[0] - 16.0 / 17.0).abs() < 1e-12);
        assert_eq!(a.best().0.id(), 0);
    }

    #[test]
    fn test_fan_out_and_summary_share_weights() {
        let clusters = two_clusters();
        let config = FuzzyConfig::default();
        let a = SoftAssignment::compute(&[7.0, 1.0], &clusters, &config).unwrap();

        let records = a.fan_out(&"p7".to_string());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "C0: [0.0, 0.0]");
        assert_eq!(records[1].key, "C1: [10.0, 0.0]");
        assert_eq!(records[0].value.payload, "p7");

        let summary = a.summary("p7");
        assert_eq!(summary.point, "p7");
        for (record, (id, w)) in records.iter().zip(&summary.memberships) {
            assert_eq!(record.value.weight, *w);
            assert!(record.key.starts_with(&format!("C{id}:")));
        }
    }

    #[test]
    fn test_display_formats() {
        let summary = PointSummary {
            point: 0usize,
            memberships: vec![(0, 0.75), (4, 0.25)],
        };
        assert_eq!(summary.to_string(), "[0:0.75 4:0.25]");

        let value = WeightedPayload {
            weight: 0.5,
            payload: "[1.0, 2.0]",
        };
        assert_eq!(value.to_string(), "0.5:[1.0, 2.0]");
    }

    #[test]
    fn test_errors() {
        let config = FuzzyConfig::default();
        assert!(matches!(
            SoftAssignment::compute(&[1.0], &[], &config),
            Err(Error::EmptyInput)
        ));

        let clusters = two_clusters();
        assert!(matches!(
            SoftAssignment::compute(&[1.0, 2.0, 3.0], &clusters, &config),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        ));
    }
}
