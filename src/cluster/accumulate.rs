//! One accumulation round: worker partial sums, their merge, and the recompute step.
//!
//! Workers only read the broadcast cluster centers and each produce their own
//! [`Partials`]. Partials combine by addition, so the result does not depend on how
//! the batch was split or in which order partial results arrive. Each cluster then
//! absorbs its merged partial in a single-writer step before [`recompute`] closes the
//! iteration.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;

use super::assign::SoftAssignment;
use super::config::FuzzyConfig;
use super::partial::Partial;
use super::soft::SoftCluster;
use crate::error::{Error, Result};

/// Partial sums keyed by cluster id.
pub type Partials = HashMap<u32, Partial>;

/// Fold a batch of points into per-cluster partials on a single worker.
pub fn fold_points<'p, I>(points: I, clusters: &[SoftCluster], config: &FuzzyConfig) -> Result<Partials>
where
    I: IntoIterator<Item = &'p Vec<f64>>,
{
    points
        .into_iter()
        .try_fold(Partials::new(), |acc, point| add_point(acc, point, clusters, config))
}

/// Accumulate a batch of points into per-cluster partials across the rayon pool.
///
/// Equivalent to [`fold_points`] up to floating-point rounding.
pub fn partials(points: &[Vec<f64>], clusters: &[SoftCluster], config: &FuzzyConfig) -> Result<Partials> {
    if clusters.is_empty() {
        return Err(Error::EmptyInput);
    }
    points
        .par_iter()
        .try_fold(Partials::new, |acc, point| add_point(acc, point, clusters, config))
        .try_reduce(Partials::new, combine)
}

/// Merge two workers' partials.
pub fn combine(mut a: Partials, b: Partials) -> Result<Partials> {
    for (id, partial) in b {
        match a.entry(id) {
            Entry::Occupied(mut e) => e.get_mut().merge(&partial)?,
            Entry::Vacant(e) => {
                e.insert(partial);
            }
        }
    }
    Ok(a)
}

/// Hand each cluster its merged partial.
///
/// Every partial is checked before any cluster changes: a partial for an id that
/// is not among `clusters`, or one whose dimensionality differs from its cluster,
/// fails the whole merge and leaves all clusters as they were. Clusters without a
/// partial are left untouched.
pub fn merge(clusters: &mut [SoftCluster], partials: &Partials) -> Result<()> {
    for (id, partial) in partials {
        let cluster = clusters
            .iter()
            .find(|c| c.id() == *id)
            .ok_or(Error::UnknownCluster(*id))?;
        cluster.accepts(partial)?;
    }
    for cluster in clusters.iter_mut() {
        if let Some(partial) = partials.get(&cluster.id()) {
            cluster.absorb(partial)?;
        }
    }
    log::debug!("merged {} partials into {} clusters", partials.len(), clusters.len());
    Ok(())
}

/// Close an iteration: test each cluster for convergence, then move its center.
///
/// Returns how many clusters converged.
pub fn recompute(clusters: &mut [SoftCluster], config: &FuzzyConfig) -> usize {
    let mut converged = 0;
    for cluster in clusters.iter_mut() {
        if cluster.compute_convergence(config) {
            converged += 1;
        }
        cluster.recompute_center();
    }
    log::debug!("{converged}/{} clusters converged", clusters.len());
    converged
}

fn add_point(
    mut acc: Partials,
    point: &[f64],
    clusters: &[SoftCluster],
    config: &FuzzyConfig,
) -> Result<Partials> {
    let assignment = SoftAssignment::compute(point, clusters, config)?;
    for (cluster, weight) in assignment.iter() {
        acc.entry(cluster.id())
            .or_insert_with(|| Partial::zeros(cluster.dimension()))
            .add_point(point, weight)?;
    }
    Ok(acc)
}
