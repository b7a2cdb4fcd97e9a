//! Fuzzy (soft) k-means building blocks.
//!
//! ## Hard vs Soft Clustering
//!
//! **Hard clustering** assigns each item to exactly one cluster. **Soft clustering**
//! gives each item a weight for every cluster; the weights of one item sum to 1.
//! Fuzzy k-means (fuzzy c-means) is the soft counterpart of Lloyd's k-means.
//!
//! ## The algorithm
//!
//! Each iteration, every point `x` gets a membership weight for every cluster:
//!
//! ```text
//! w_i(x) = 1 / Σ_j (d(x, c_i) / d(x, c_j))^(2 / (m - 1))
//! ```
//!
//! where `m > 1` is the fuzziness exponent. Each cluster then moves to the
//! weighted mean of all points:
//!
//! ```text
//! c_i' = Σ_x w_i(x) · x / Σ_x w_i(x)
//! ```
//!
//! As `m → 1` this approaches hard k-means; larger `m` spreads membership more
//! evenly.
//!
//! ## Parallel iterations
//!
//! The weighted sums are additive, so a batch can be split across workers. Each
//! worker reads the broadcast centers, folds its points into a [`Partial`] per
//! cluster, and the partials are merged in any order before a single
//! [`accumulate::recompute`] step per iteration. This crate provides the cluster side
//! of that loop; deciding when the whole run stops is left to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use fuzzy_clump::cluster::{accumulate, random_seeds, FuzzyConfig, IdAllocator, Measure};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let config = FuzzyConfig::new(Measure::Euclidean).with_m(2.0);
//! config.validate().unwrap();
//!
//! let ids = IdAllocator::new();
//! let mut clusters = random_seeds(&data, 2, Some(42), &ids).unwrap();
//!
//! for _ in 0..20 {
//!     let partials = accumulate::partials(&data, &clusters, &config).unwrap();
//!     accumulate::merge(&mut clusters, &partials).unwrap();
//!     if accumulate::recompute(&mut clusters, &config) == clusters.len() {
//!         break;
//!     }
//! }
//! ```

pub mod accumulate;
mod assign;
pub mod codec;
mod config;
mod ids;
mod measure;
mod membership;
mod partial;
mod seed;
mod soft;
mod traits;

pub use accumulate::Partials;
pub use assign::{ClusterRecord, PointSummary, SoftAssignment, WeightedPayload};
pub use config::{
    FuzzyConfig, DEFAULT_CONVERGENCE_DELTA, DEFAULT_M, KEY_CONVERGENCE, KEY_M, KEY_MEASURE,
};
pub use ids::IdAllocator;
pub use measure::Measure;
pub use membership::{membership_weight, membership_weights, MIN_DISTANCE};
pub use partial::Partial;
pub use seed::random_seeds;
pub use soft::SoftCluster;
pub use traits::DistanceMeasure;
