//! Single-line text form of a cluster, persisted between iterations.
//!
//! ```text
//! C3: [1.0, 2.0]     unconverged cluster 3
//! V3: [1.0, 2.0]     converged cluster 3
//! ```
//!
//! Coordinates are written with Rust's shortest round-trip `f64` formatting, so a
//! decoded center is bit-identical to the encoded one.

use super::soft::SoftCluster;
use crate::error::{Error, Result};

/// Encode a cluster's identifier and center.
pub fn encode(cluster: &SoftCluster) -> String {
    format!("{}: {}", cluster.identifier(), format_vector(cluster.center()))
}

/// Rebuild a cluster from a record produced by [`encode`].
///
/// The cluster comes back with its id, center and converged flag, and an empty
/// accumulator. Anything else is a corrupt record and fails as a whole.
pub fn decode(record: &str) -> Result<SoftCluster> {
    let start = record
        .find('[')
        .ok_or_else(|| Error::decode(record, "center", "missing '['"))?;
    let (head, body) = record.split_at(start);

    let head = head.trim();
    let converged = match head.chars().next() {
        Some('V') => true,
        Some('C') => false,
        _ => return Err(Error::decode(record, "prefix", "expected 'C' or 'V'")),
    };
    let id = head[1..]
        .strip_suffix(':')
        .ok_or_else(|| Error::decode(record, "id", "missing ':' after id"))?
        .trim();
    let id: u32 = id
        .parse()
        .map_err(|e| Error::decode(record, "id", format!("{id:?}: {e}")))?;

    let center = parse_vector(body).map_err(|msg| Error::decode(record, "center", msg))?;
    Ok(SoftCluster::restored(id, center, converged))
}

/// `[x0, x1, ...]`
pub fn format_vector(v: &[f64]) -> String {
    let mut out = String::with_capacity(2 + v.len() * 8);
    out.push('[');
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{x:?}"));
    }
    out.push(']');
    out
}

/// Inverse of [`format_vector`]. Whitespace around elements is ignored.
pub fn parse_vector(text: &str) -> std::result::Result<Vec<f64>, String> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| "vector must be enclosed in '[' and ']'".to_string())?
        .trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .enumerate()
        .map(|(i, x)| {
            let x = x.trim();
            x.parse::<f64>()
                .map_err(|e| format!("element {i} ({x:?}): {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{FuzzyConfig, Measure};

    #[test]
    fn test_encode_prefixes() {
        let mut c = SoftCluster::with_id(vec![1.0, 2.0], 3);
        let text = encode(&c);
        assert!(text.starts_with("C3:"));
        assert_eq!(text, "C3: [1.0, 2.0]");

        c.add_point(&[1.0, 2.0], 1.0).unwrap();
        assert!(c.compute_convergence(&FuzzyConfig::new(Measure::Euclidean)));
        assert!(encode(&c).starts_with("V3:"));
    }

    #[test]
    fn test_decode() {
        let c = decode("V12: [0.5, -1.25, 3e-7]").unwrap();
        assert_eq!(c.id(), 12);
        assert!(c.is_converged());
        assert_eq!(c.center(), &[0.5, -1.25, 3e-7]);
        assert_eq!(c.prob_sum(), 0.0);
        assert_eq!(c.weighted_total(), &[0.0, 0.0, 0.0]);

        let c = decode("C0:[1,2]").unwrap();
        assert_eq!(c.id(), 0);
        assert!(!c.is_converged());
        assert_eq!(c.center(), &[1.0, 2.0]);
    }

    #[test]
    fn test_round_trip_preserves_bits() {
        let center = vec![0.1 + 0.2, -1.0 / 3.0, 1e300, f64::MIN_POSITIVE];
        let c = SoftCluster::with_id(center.clone(), 41);
        let back = decode(&encode(&c)).unwrap();
        assert_eq!(back.id(), 41);
        assert_eq!(back.center(), center.as_slice());
        assert_eq!(encode(&back), encode(&c));
    }

    #[test]
    fn test_empty_center() {
        let c = decode("C1: []").unwrap();
        assert!(c.center().is_empty());
        assert_eq!(encode(&c), "C1: []");
    }

    fn field_of(record: &str) -> &'static str {
        match decode(record) {
            Err(Error::Decode { field, .. }) => field,
            other => panic!("expected decode error for {record:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_errors_name_the_field() {
        assert_eq!(field_of("X3: [1.0]"), "prefix");
        assert_eq!(field_of(": [1.0]"), "prefix");
        assert_eq!(field_of("C3 1.0"), "center");
        assert_eq!(field_of("Cx: [1.0]"), "id");
        assert_eq!(field_of("C-1: [1.0]"), "id");
        assert_eq!(field_of("C3 [1.0]"), "id");
        assert_eq!(field_of("C3: [1.0, abc]"), "center");
        assert_eq!(field_of("C3: [1.0, 2.0"), "center");
    }

    #[test]
    fn test_decode_error_keeps_record() {
        let err = decode("Q9: [1]").unwrap_err();
        assert!(matches!(&err, Error::Decode { record, .. } if record == "Q9: [1]"));
        assert!(err.to_string().contains("Q9: [1]"));
    }
}
