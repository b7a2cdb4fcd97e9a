/// Distance between two dense vectors of equal length.
///
/// Implementations must be deterministic and return a finite, non-negative value.
/// Convergence checks assume the measure behaves like a metric, although nothing here
/// relies on the triangle inequality.
///
/// Any `Fn(&[f64], &[f64]) -> f64` closure that is `Send + Sync` is a measure, so a
/// caller can plug in a custom function without defining a type.
pub trait DistanceMeasure: Send + Sync {
    /// Distance from `a` to `b`.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> DistanceMeasure for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}
