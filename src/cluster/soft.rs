//! Per-cluster state of a fuzzy k-means run.

use std::fmt;
use std::str::FromStr;

use super::codec;
use super::config::FuzzyConfig;
use super::ids::IdAllocator;
use super::partial::Partial;
use crate::error::{Error, Result};

/// Cached centroid, cleared by every accumulator mutation.
#[derive(Debug, Clone, Default)]
struct CentroidCache(Option<Vec<f64>>);

impl CentroidCache {
    fn invalidate(&mut self) {
        self.0 = None;
    }

    /// Centroid of `acc`, computed at most once between invalidations.
    ///
    /// With no accumulated mass the raw total is returned as-is.
    fn resolve<'a>(&'a mut self, acc: &'a Partial) -> &'a [f64] {
        if acc.prob_sum() == 0.0 {
            return acc.total();
        }
        self.0.get_or_insert_with(|| acc.mean())
    }
}

/// A cluster with soft (weighted) membership.
///
/// Holds the current center and an accumulator of weighted points for the iteration
/// in progress. Points and worker partials are added with [`SoftCluster::add_point`]
/// and [`SoftCluster::add_points`]; [`SoftCluster::compute_convergence`] compares the
/// resulting centroid with the center, and [`SoftCluster::recompute_center`] moves
/// the center and starts the next iteration.
#[derive(Debug, Clone)]
pub struct SoftCluster {
    id: u32,
    center: Vec<f64>,
    acc: Partial,
    converged: bool,
    centroid: CentroidCache,
}

impl SoftCluster {
    /// New cluster centered on `center`, with a fresh id from `ids`.
    pub fn new(center: Vec<f64>, ids: &IdAllocator) -> Self {
        Self::with_id(center, ids.allocate())
    }

    /// New cluster with an explicit id, e.g. one restored from a previous iteration.
    pub fn with_id(center: Vec<f64>, id: u32) -> Self {
        let acc = Partial::zeros(center.len());
        Self {
            id,
            center,
            acc,
            converged: false,
            centroid: CentroidCache::default(),
        }
    }

    pub(crate) fn restored(id: u32, center: Vec<f64>, converged: bool) -> Self {
        Self {
            converged,
            ..Self::with_id(center, id)
        }
    }

    /// Add one point with its membership weight for this cluster.
    pub fn add_point(&mut self, point: &[f64], weight: f64) -> Result<()> {
        self.check_dim(point.len())?;
        self.accumulator_mut().add_point(point, weight)
    }

    /// Merge a worker's pre-aggregated `(prob_sum, weighted_total)`.
    pub fn add_points(&mut self, partial_prob_sum: f64, partial_total: &[f64]) -> Result<()> {
        self.check_dim(partial_total.len())?;
        self.accumulator_mut().add(partial_prob_sum, partial_total)
    }

    /// Merge a worker's [`Partial`] for this cluster.
    pub fn absorb(&mut self, partial: &Partial) -> Result<()> {
        if partial.is_empty() {
            return Ok(());
        }
        self.add_points(partial.prob_sum(), partial.total())
    }

    /// Check that [`SoftCluster::absorb`] would accept `partial`, without absorbing it.
    pub fn accepts(&self, partial: &Partial) -> Result<()> {
        if partial.is_empty() {
            return Ok(());
        }
        self.check_dim(partial.dimension())
    }

    /// Weighted mean of the accumulated points.
    ///
    /// A cluster that received no mass returns its raw weighted total (all zeros
    /// after a reset) instead of dividing by zero.
    pub fn compute_centroid(&mut self) -> &[f64] {
        self.centroid.resolve(&self.acc)
    }

    /// Replace the center with the centroid and clear the accumulator.
    pub fn recompute_center(&mut self) {
        if self.acc.prob_sum() == 0.0 {
            log::warn!(
                "cluster {} received no membership mass; center falls back to the raw total",
                self.id
            );
        }
        let next = self.compute_centroid().to_vec();
        self.acc = Partial::zeros(next.len());
        self.centroid.invalidate();
        self.center = next;
    }

    /// Test whether the centroid lies within the convergence delta of the center.
    ///
    /// Records and returns the outcome; the center and accumulator are untouched.
    pub fn compute_convergence(&mut self, config: &FuzzyConfig) -> bool {
        let centroid = self.centroid.resolve(&self.acc);
        let shift = config.distance(centroid, &self.center);
        self.converged = shift <= config.convergence_delta();
        log::debug!(
            "cluster {} shift {:.6} (delta {}), converged: {}",
            self.id,
            shift,
            config.convergence_delta(),
            self.converged
        );
        self.converged
    }

    /// `V<id>` when converged, `C<id>` otherwise.
    pub fn identifier(&self) -> String {
        let prefix = if self.converged { 'V' } else { 'C' };
        format!("{prefix}{}", self.id)
    }

    /// Run-unique id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Current center.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Dimensionality of the center.
    pub fn dimension(&self) -> usize {
        self.center.len()
    }

    /// Outcome of the last convergence check.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Sum of membership weights accumulated this iteration.
    pub fn prob_sum(&self) -> f64 {
        self.acc.prob_sum()
    }

    /// Weighted point total accumulated this iteration.
    pub fn weighted_total(&self) -> &[f64] {
        self.acc.total()
    }

    /// The accumulator itself.
    pub fn accumulator(&self) -> &Partial {
        &self.acc
    }

    // Every accumulator mutation goes through here.
    fn accumulator_mut(&mut self) -> &mut Partial {
        self.centroid.invalidate();
        &mut self.acc
    }

    fn check_dim(&self, found: usize) -> Result<()> {
        if found != self.center.len() {
            return Err(Error::DimensionMismatch {
                expected: self.center.len(),
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Display for SoftCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.identifier(), codec::format_vector(&self.center))
    }
}

impl FromStr for SoftCluster {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::decode(s)
    }
}
