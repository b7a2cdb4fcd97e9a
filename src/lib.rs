//! Fuzzy k-means cluster state.
//!
//! `fuzzy-clump` holds the per-cluster side of a soft k-means run over dense vectors:
//! membership weighting, order-independent accumulation of worker partials, lazy
//! centroids, convergence checks, and a one-line text codec for persisting clusters
//! between iterations.
//!
//! The primary public API is under [`cluster`].

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    DistanceMeasure, FuzzyConfig, IdAllocator, Measure, Partial, SoftAssignment, SoftCluster,
};
pub use error::{Error, Result};
