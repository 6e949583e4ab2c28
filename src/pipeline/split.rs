//! Stratified train/test splitting
//!
//! Partitions row indices so that each target class keeps its proportion
//! (within one row of rounding) in both partitions. Seeded shuffling makes
//! the split reproducible: same seed + same labels = same partition.

use std::collections::BTreeMap;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::PipelineError;

/// Row indices for the two partitions.
#[derive(Debug, Clone)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified split of row indices by label.
///
/// The total test size is `round(n * test_fraction)`; per-class test counts
/// are allocated by largest remainder so the class ratios are preserved
/// within rounding. A class too small to appear in both partitions is a
/// fatal [`PipelineError::ClassTooSmall`] - there is no silent fallback to
/// an unstratified split.
pub fn stratified_split(
    labels: &[i64],
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices> {
    anyhow::ensure!(
        test_fraction > 0.0 && test_fraction < 1.0,
        "test_fraction must be strictly between 0 and 1, got {}",
        test_fraction
    );
    anyhow::ensure!(!labels.is_empty(), "cannot split an empty dataset");

    // BTreeMap keeps the class iteration order deterministic
    let mut by_class: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    for (&label, indices) in &by_class {
        if indices.len() < 2 {
            return Err(PipelineError::ClassTooSmall {
                label,
                count: indices.len(),
                test_fraction,
            }
            .into());
        }
    }

    let n_test_total = (labels.len() as f64 * test_fraction).round() as usize;
    let test_counts = allocate_test_counts(&by_class, test_fraction, n_test_total);

    // Every class must land in both partitions
    for (&label, indices) in &by_class {
        let n_test = test_counts[&label];
        if n_test == 0 || n_test == indices.len() {
            return Err(PipelineError::ClassTooSmall {
                label,
                count: indices.len(),
                test_fraction,
            }
            .into());
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len() - n_test_total);
    let mut test = Vec::with_capacity(n_test_total);

    for (&label, indices) in &by_class {
        let mut shuffled = indices.clone();
        shuffled.shuffle(&mut rng);

        let n_test = test_counts[&label];
        test.extend_from_slice(&shuffled[..n_test]);
        train.extend_from_slice(&shuffled[n_test..]);
    }

    Ok(SplitIndices { train, test })
}

/// Allocate per-class test counts by largest remainder.
///
/// Each class gets the floor of its exact share; the remaining slots go to
/// the classes with the largest fractional parts (ties broken by label for
/// determinism).
fn allocate_test_counts(
    by_class: &BTreeMap<i64, Vec<usize>>,
    test_fraction: f64,
    n_test_total: usize,
) -> BTreeMap<i64, usize> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut remainders: Vec<(i64, f64)> = Vec::with_capacity(by_class.len());
    let mut allocated = 0;

    for (&label, indices) in by_class {
        let exact = indices.len() as f64 * test_fraction;
        let floor = exact.floor() as usize;
        counts.insert(label, floor);
        remainders.push((label, exact - floor as f64));
        allocated += floor;
    }

    remainders.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    for (label, _) in remainders
        .iter()
        .take(n_test_total.saturating_sub(allocated))
    {
        if let Some(count) = counts.get_mut(label) {
            *count += 1;
        }
    }

    counts
}
