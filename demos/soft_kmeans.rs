//! Fuzzy k-means on a small 2D dataset, persisting clusters as text between rounds.
//!
//! Run with `RUST_LOG=debug` to see per-cluster convergence.

use std::collections::HashMap;

use fuzzy_clump::cluster::{accumulate, codec, random_seeds, KEY_CONVERGENCE, KEY_M, KEY_MEASURE};
use fuzzy_clump::{FuzzyConfig, IdAllocator, Result, SoftAssignment, SoftCluster};

fn main() -> Result<()> {
    env_logger::init();

    // Three well-separated groups in 2D.
    let data: Vec<Vec<f64>> = vec![
        // near origin
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // near (5, 5)
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // near (10, 0)
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    let props: HashMap<String, String> = [
        (KEY_MEASURE, "euclidean"),
        (KEY_CONVERGENCE, "0.0001"),
        (KEY_M, "2.0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let config = FuzzyConfig::from_properties(&props)?;

    let ids = IdAllocator::new();
    let clusters = random_seeds(&data, 3, Some(42), &ids)?;
    let mut records: Vec<String> = clusters.iter().map(codec::encode).collect();

    for round in 1..=50 {
        let mut clusters = records
            .iter()
            .map(|r| codec::decode(r))
            .collect::<Result<Vec<SoftCluster>>>()?;

        let partials = accumulate::partials(&data, &clusters, &config)?;
        accumulate::merge(&mut clusters, &partials)?;
        let converged = accumulate::recompute(&mut clusters, &config);

        records = clusters.iter().map(codec::encode).collect();
        println!("round {round:2}: {converged}/{} converged", clusters.len());
        for r in &records {
            println!("  {r}");
        }
        if converged == clusters.len() {
            break;
        }
    }

    let clusters = records
        .iter()
        .map(|r| r.parse())
        .collect::<Result<Vec<SoftCluster>>>()?;
    println!("\n=== memberships ===");
    for (i, point) in data.iter().enumerate() {
        let assignment = SoftAssignment::compute(point, &clusters, &config)?;
        let (best, weight) = assignment.best();
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => {}  best {} ({:.3})",
            i,
            point[0],
            point[1],
            assignment.summary(i),
            best.id(),
            weight
        );
    }
    Ok(())
}
