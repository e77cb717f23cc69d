//! Overlap detector: relationship pairs sharing an endpoint whose active
//! periods intersect — e.g. two people at the same organisation during
//! overlapping years.

use casefile_core::models::{Insight, InsightKind, Relationship};

use crate::dates::{cmp_start, DateRange};
use crate::snapshot::GraphSnapshot;

pub fn detect(snapshot: &GraphSnapshot) -> Vec<Insight> {
    // Group edges under each endpoint. Direction is irrelevant; each edge
    // lands in both endpoints' groups (once for a self-loop).
    let mut groups: std::collections::HashMap<&str, Vec<&Relationship>> =
        std::collections::HashMap::new();
    for rel in snapshot.relationships() {
        groups.entry(rel.from_id.as_str()).or_default().push(rel);
        if rel.to_id != rel.from_id {
            groups.entry(rel.to_id.as_str()).or_default().push(rel);
        }
    }

    let mut insights = Vec::new();
    // Shared entities in snapshot load order keeps output deterministic.
    for (_, shared) in snapshot.entities() {
        let Some(group) = groups.get(shared.id.as_str()) else {
            continue;
        };

        let mut findings = Vec::new();
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let (a, b) = (group[i], group[j]);
                if a.id == b.id {
                    continue;
                }
                let other_a = a.other_endpoint(&shared.id);
                let other_b = b.other_endpoint(&shared.id);
                // A self-loop's far end is the shared entity itself; it
                // can never form a three-party overlap.
                if other_a == other_b || other_a == shared.id || other_b == shared.id {
                    continue;
                }
                let range_a = DateRange::from_raw(&a.start_date, &a.end_date);
                let range_b = DateRange::from_raw(&b.start_date, &b.end_date);
                if !range_a.overlaps(&range_b) {
                    continue;
                }
                let window = range_a.intersection(&range_b);
                let name = |id: &str| {
                    snapshot
                        .entity(id)
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| id.to_string())
                };
                findings.push((
                    window.start,
                    Insight {
                        kind: InsightKind::Overlap,
                        title: format!("Overlapping timelines at {}", shared.name),
                        details: format!(
                            "{} ({}) and {} ({}) overlap during {}",
                            name(other_a),
                            a.rel_type,
                            name(other_b),
                            b.rel_type,
                            window.label()
                        ),
                        ids: vec![
                            shared.id.clone(),
                            other_a.to_string(),
                            other_b.to_string(),
                        ],
                    },
                ));
            }
        }

        // Within a group: overlap start ascending, open start first.
        findings.sort_by(|(a, _), (b, _)| cmp_start(a, b));
        insights.extend(findings.into_iter().map(|(_, insight)| insight));
    }
    insights
}
