use crate::error::{Error, Result};

/// Weighted point total and probability sum for one cluster.
///
/// This is both a cluster's own accumulator and the pre-aggregated result a worker
/// ships for that cluster. Merging is plain element-wise addition, so partials can
/// be combined in any order or grouping.
///
/// A partial created with [`Partial::default`] has no dimensionality yet; the first
/// point or partial added to it fixes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partial {
    total: Vec<f64>,
    prob_sum: f64,
}

impl Partial {
    /// Zero accumulator of the given dimensionality.
    pub fn zeros(dim: usize) -> Self {
        Self {
            total: vec![0.0; dim],
            prob_sum: 0.0,
        }
    }

    /// Partial from already aggregated values.
    pub fn new(prob_sum: f64, total: Vec<f64>) -> Result<Self> {
        check_weight(prob_sum)?;
        Ok(Self { total, prob_sum })
    }

    /// Add `point` with membership weight `weight`.
    pub fn add_point(&mut self, point: &[f64], weight: f64) -> Result<()> {
        check_weight(weight)?;
        if self.is_empty() {
            self.total = vec![0.0; point.len()];
        }
        self.check_dim(point.len())?;
        for (t, x) in self.total.iter_mut().zip(point) {
            *t += x * weight;
        }
        self.prob_sum += weight;
        Ok(())
    }

    /// Add a pre-aggregated `(prob_sum, total)` pair.
    pub fn add(&mut self, prob_sum: f64, total: &[f64]) -> Result<()> {
        check_weight(prob_sum)?;
        if self.is_empty() {
            self.total = total.to_vec();
            self.prob_sum += prob_sum;
            return Ok(());
        }
        self.check_dim(total.len())?;
        for (t, x) in self.total.iter_mut().zip(total) {
            *t += x;
        }
        self.prob_sum += prob_sum;
        Ok(())
    }

    /// Merge another partial into this one.
    pub fn merge(&mut self, other: &Partial) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        self.add(other.prob_sum, &other.total)
    }

    /// True until a point or partial fixes the dimensionality or adds mass.
    pub fn is_empty(&self) -> bool {
        self.total.is_empty() && self.prob_sum == 0.0
    }

    /// Sum of membership weights added so far.
    pub fn prob_sum(&self) -> f64 {
        self.prob_sum
    }

    /// Weighted sum of the points added so far.
    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// Dimensionality, or 0 if nothing fixed it yet.
    pub fn dimension(&self) -> usize {
        self.total.len()
    }

    /// `total / prob_sum`. The caller handles `prob_sum == 0`.
    pub(crate) fn mean(&self) -> Vec<f64> {
        self.total.iter().map(|t| t / self.prob_sum).collect()
    }

    fn check_dim(&self, found: usize) -> Result<()> {
        if found != self.total.len() {
            return Err(Error::DimensionMismatch {
                expected: self.total.len(),
                found,
            });
        }
        Ok(())
    }
}

fn check_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidParameter {
            name: "weight",
            message: "must be finite and non-negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_fixes_dimension() {
        let mut p = Partial::default();
        assert_eq!(p.dimension(), 0);
        p.add_point(&[1.0, 2.0, 3.0], 0.5).unwrap();
        assert_eq!(p.total(), &[0.5, 1.0, 1.5]);
        assert_eq!(p.prob_sum(), 0.5);
        assert!(matches!(
            p.add_point(&[1.0], 1.0),
            Err(Error::DimensionMismatch { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_merge_example() {
        let mut a = Partial::new(2.0, vec![4.0, 0.0]).unwrap();
        let b = Partial::new(3.0, vec![6.0, 0.0]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.prob_sum(), 5.0);
        assert_eq!(a.total(), &[10.0, 0.0]);
        assert_eq!(a.mean(), vec![2.0, 0.0]);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut a = Partial::new(1.0, vec![1.0, 1.0]).unwrap();
        a.merge(&Partial::default()).unwrap();
        assert_eq!(a, Partial::new(1.0, vec![1.0, 1.0]).unwrap());

        let mut empty = Partial::default();
        empty.merge(&a).unwrap();
        assert_eq!(empty, a);
    }

    #[test]
    fn test_rejects_negative_or_nan_weight() {
        let mut p = Partial::zeros(2);
        assert!(p.add_point(&[1.0, 1.0], -0.1).is_err());
        assert!(p.add_point(&[1.0, 1.0], f64::NAN).is_err());
        assert!(Partial::new(-1.0, vec![0.0]).is_err());
        assert_eq!(p, Partial::zeros(2));
    }

    #[test]
    fn test_mass_without_dimension_keeps_it() {
        let mut p = Partial::new(1.0, vec![]).unwrap();
        assert!(!p.is_empty());
        assert!(matches!(
            p.add(1.0, &[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch { expected: 0, found: 3 })
        ));
        assert!(matches!(
            p.add_point(&[1.0, 2.0], 1.0),
            Err(Error::DimensionMismatch { expected: 0, found: 2 })
        ));
        assert_eq!(p.dimension(), 0);
        assert_eq!(p.prob_sum(), 1.0);

        let mut empty = Partial::default();
        assert!(empty.is_empty());
        empty.add(1.0, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(empty.dimension(), 3);
    }
}
