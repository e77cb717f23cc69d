//! Deterministic merge of detector outputs: fixed priority order, identity
//! dedup, proportional cap.

use std::collections::HashSet;

use casefile_core::models::Insight;

/// Merge in priority order DUPLICATE → OVERLAP → CHAIN → COINCIDENCE.
/// Two insights with the same kind and the same id set collapse to the
/// first occurrence. When the cap bites, each kind keeps a share
/// proportional to its size so no category is silently starved.
pub fn merge(
    duplicates: Vec<Insight>,
    overlaps: Vec<Insight>,
    chains: Vec<Insight>,
    coincidences: Vec<Insight>,
    max_insights: usize,
) -> Vec<Insight> {
    let mut buckets = [duplicates, overlaps, chains, coincidences];

    let mut seen = HashSet::new();
    for bucket in &mut buckets {
        bucket.retain(|insight| seen.insert(insight.identity()));
    }

    let total: usize = buckets.iter().map(Vec::len).sum();
    if total > max_insights {
        let mut quotas: Vec<usize> = buckets
            .iter()
            .map(|b| b.len() * max_insights / total)
            .collect();
        // Hand the rounding remainder out in priority order.
        let mut remainder = max_insights - quotas.iter().sum::<usize>();
        for (quota, bucket) in quotas.iter_mut().zip(&buckets) {
            while remainder > 0 && *quota < bucket.len() {
                *quota += 1;
                remainder -= 1;
            }
        }
        for (bucket, quota) in buckets.iter_mut().zip(quotas) {
            bucket.truncate(quota);
        }
    }

    buckets.into_iter().flatten().collect()
}
