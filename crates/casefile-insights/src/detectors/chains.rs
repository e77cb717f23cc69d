//! Chain detector: two-hop paths A–B–C where A and C have no direct edge,
//! surfaced as candidate hidden relationships.

use casefile_core::models::{Insight, InsightKind};

use crate::snapshot::GraphSnapshot;

/// Chain findings plus the diagnostic hub count. Hubs above the degree
/// threshold are excluded from pair expansion to bound cost; they are
/// counted here rather than silently dropped.
#[derive(Debug, Default)]
pub struct ChainFindings {
    pub insights: Vec<Insight>,
    pub hubs_skipped: usize,
}

pub fn detect(snapshot: &GraphSnapshot, max_hub_degree: usize) -> ChainFindings {
    let mut findings = ChainFindings::default();

    for (hub_idx, hub) in snapshot.entities() {
        let adjacent = snapshot.adjacent(hub_idx);
        if adjacent.len() < 2 {
            continue;
        }
        if adjacent.len() > max_hub_degree {
            findings.hubs_skipped += 1;
            continue;
        }

        // Distinct neighbors in discovery order, first edge per neighbor,
        // self-loops ignored.
        let mut neighbors = Vec::new();
        for (neighbor_idx, rel) in adjacent {
            if neighbor_idx == hub_idx {
                continue;
            }
            if neighbors.iter().all(|&(idx, _)| idx != neighbor_idx) {
                neighbors.push((neighbor_idx, rel));
            }
        }
        if neighbors.len() < 2 {
            continue;
        }

        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                let (a_idx, rel_a) = neighbors[i];
                let (c_idx, rel_c) = neighbors[j];
                if snapshot.directly_connected(a_idx, c_idx) {
                    continue;
                }
                let a = snapshot.entity_at(a_idx);
                let c = snapshot.entity_at(c_idx);
                findings.insights.push(Insight {
                    kind: InsightKind::Chain,
                    title: format!("Hidden chain through {}", hub.name),
                    details: format!(
                        "{} ({}) and {} ({}) both connect to {} but not to each other",
                        a.name, rel_a.rel_type, c.name, rel_c.rel_type, hub.name
                    ),
                    ids: vec![a.id.clone(), hub.id.clone(), c.id.clone()],
                });
            }
        }
    }

    findings
}
