//! Run configuration.
//!
//! A [`FuzzyConfig`] is built once at the start of a run and shared read-only by
//! every cluster and every worker for the rest of it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::measure::Measure;
use super::traits::DistanceMeasure;
use crate::error::{Error, Result};

/// Key naming the distance measure in a property map.
pub const KEY_MEASURE: &str = "distance.measure";
/// Key holding the convergence delta in a property map.
pub const KEY_CONVERGENCE: &str = "convergence.delta";
/// Key holding the fuzziness exponent in a property map.
pub const KEY_M: &str = "fuzziness.m";

/// Default fuzziness exponent.
pub const DEFAULT_M: f64 = 2.0;
/// Default convergence delta.
pub const DEFAULT_CONVERGENCE_DELTA: f64 = 1e-3;

/// Immutable parameters of one fuzzy k-means run.
#[derive(Clone)]
pub struct FuzzyConfig {
    measure: Arc<dyn DistanceMeasure>,
    m: f64,
    convergence_delta: f64,
}

impl FuzzyConfig {
    /// Create a configuration with the given measure and default parameters.
    pub fn new(measure: impl DistanceMeasure + 'static) -> Self {
        Self {
            measure: Arc::new(measure),
            m: DEFAULT_M,
            convergence_delta: DEFAULT_CONVERGENCE_DELTA,
        }
    }

    /// Set the fuzziness exponent `m`.
    ///
    /// Values close to 1 approach hard assignment; larger values spread membership
    /// more evenly. Must be greater than 1.
    pub fn with_m(mut self, m: f64) -> Self {
        self.m = m;
        self
    }

    /// Set the distance under which a centroid counts as converged.
    pub fn with_convergence_delta(mut self, delta: f64) -> Self {
        self.convergence_delta = delta;
        self
    }

    /// Replace the distance measure.
    pub fn with_measure(mut self, measure: impl DistanceMeasure + 'static) -> Self {
        self.measure = Arc::new(measure);
        self
    }

    /// Build and validate a configuration from string properties.
    ///
    /// Reads [`KEY_MEASURE`] (a [`Measure`] name), [`KEY_CONVERGENCE`] and [`KEY_M`].
    /// The measure and the convergence delta are required; `m` defaults to
    /// [`DEFAULT_M`].
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let measure: Measure = props
            .get(KEY_MEASURE)
            .ok_or(Error::MissingKey(KEY_MEASURE))?
            .parse()?;
        let delta = props
            .get(KEY_CONVERGENCE)
            .ok_or(Error::MissingKey(KEY_CONVERGENCE))
            .and_then(|v| parse_f64(KEY_CONVERGENCE, v))?;
        let m = match props.get(KEY_M) {
            Some(v) => parse_f64(KEY_M, v)?,
            None => DEFAULT_M,
        };

        let config = Self::new(measure)
            .with_convergence_delta(delta)
            .with_m(m);
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges. Call once before the run starts.
    pub fn validate(&self) -> Result<()> {
        if !self.m.is_finite() || self.m <= 1.0 {
            return Err(Error::InvalidParameter {
                name: "m",
                message: "must be finite and greater than 1",
            });
        }
        if !self.convergence_delta.is_finite() || self.convergence_delta < 0.0 {
            return Err(Error::InvalidParameter {
                name: "convergence_delta",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Distance between `a` and `b` under the configured measure.
    #[inline]
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self.measure.distance(a, b)
    }

    /// The configured measure.
    pub fn measure(&self) -> &dyn DistanceMeasure {
        self.measure.as_ref()
    }

    /// Fuzziness exponent.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Convergence threshold.
    pub fn convergence_delta(&self) -> f64 {
        self.convergence_delta
    }
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self::new(Measure::default())
    }
}

impl fmt::Debug for FuzzyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyConfig")
            .field("m", &self.m)
            .field("convergence_delta", &self.convergence_delta)
            .finish_non_exhaustive()
    }
}

fn parse_f64(key: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::UnparsableValue {
        key,
        value: value.to_string(),
    })
}
