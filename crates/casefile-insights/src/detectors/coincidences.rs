//! Coincidence detector: entities sharing a tag name + value pair, e.g.
//! the same phone-number identifier attached to two people.

use std::collections::{BTreeMap, BTreeSet};

use casefile_core::models::{Insight, InsightKind};

use crate::snapshot::GraphSnapshot;

struct Group {
    /// First-seen spelling of the value, for display.
    display_value: String,
    entity_ids: BTreeSet<String>,
}

pub fn detect(snapshot: &GraphSnapshot) -> Vec<Insight> {
    // BTreeMap keys give the (tag name, normalized value) output order.
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

    for assignment in snapshot.tag_assignments() {
        let Some(value) = &assignment.value else {
            continue;
        };
        let display = value.trim();
        if display.is_empty() {
            continue;
        }
        let normalized = display.to_lowercase();
        groups
            .entry((assignment.tag_name.clone(), normalized))
            .or_insert_with(|| Group {
                display_value: display.to_string(),
                entity_ids: BTreeSet::new(),
            })
            .entity_ids
            .insert(assignment.entity_id.clone());
    }

    groups
        .into_iter()
        .filter(|(_, group)| group.entity_ids.len() >= 2)
        .map(|((tag_name, _), group)| Insight {
            kind: InsightKind::Coincidence,
            title: format!("Shared {tag_name}: {}", group.display_value),
            details: format!(
                "{} entities share {} = \"{}\"",
                group.entity_ids.len(),
                tag_name,
                group.display_value
            ),
            ids: group.entity_ids.into_iter().collect(),
        })
        .collect()
}
