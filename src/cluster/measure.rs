//! Built-in distance measures.
//!
//! The set is closed: a run picks one variant by name when its configuration is
//! loaded (see [`Measure::from_str`]), or supplies its own closure through
//! [`DistanceMeasure`].

use std::fmt;
use std::str::FromStr;

use super::traits::DistanceMeasure;
use crate::error::Error;

/// Registry of the distance measures known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measure {
    /// L2 distance.
    #[default]
    Euclidean,
    /// Squared L2 distance. Not a metric, but cheaper and order-preserving.
    SquaredEuclidean,
    /// L1 distance.
    Manhattan,
    /// L-infinity distance.
    Chebyshev,
    /// `1 - cos(a, b)`. Zero vectors are treated as orthogonal to everything.
    Cosine,
}

impl Measure {
    /// Every registered measure, in declaration order.
    pub const ALL: [Measure; 5] = [
        Measure::Euclidean,
        Measure::SquaredEuclidean,
        Measure::Manhattan,
        Measure::Chebyshev,
        Measure::Cosine,
    ];

    /// Name accepted by [`Measure::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Measure::Euclidean => "euclidean",
            Measure::SquaredEuclidean => "squared_euclidean",
            Measure::Manhattan => "manhattan",
            Measure::Chebyshev => "chebyshev",
            Measure::Cosine => "cosine",
        }
    }
}

impl DistanceMeasure for Measure {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Measure::Euclidean => squared_euclidean(a, b).sqrt(),
            Measure::SquaredEuclidean => squared_euclidean(a, b),
            Measure::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Measure::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            Measure::Cosine => cosine(a, b),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Measure::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| Error::UnknownMeasure(s.to_string()))
    }
}

#[inline]
fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 1.0;
    }
    // Rounding can push the ratio just past 1.
    (1.0 - dot / (na * nb)).max(0.0)
}
