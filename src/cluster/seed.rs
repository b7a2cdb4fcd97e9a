//! Initial cluster centers.

use rand::prelude::*;
use rand::seq::index;

use super::ids::IdAllocator;
use super::soft::SoftCluster;
use crate::error::{Error, Result};

/// Pick `k` distinct points as initial centers, one fresh cluster per point.
///
/// With `seed` set the choice is reproducible; otherwise the thread RNG is used.
pub fn random_seeds(
    data: &[Vec<f64>],
    k: usize,
    seed: Option<u64>,
    ids: &IdAllocator,
) -> Result<Vec<SoftCluster>> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if k == 0 || k > data.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: data.len(),
        });
    }
    let d = data[0].len();
    for point in data.iter().skip(1) {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
    }

    let mut rng: Box<dyn RngCore> = match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    };
    let picked = index::sample(&mut rng, data.len(), k);

    Ok(picked
        .into_iter()
        .map(|i| SoftCluster::new(data[i].clone(), ids))
        .collect())
}
