//! Property tests for the insight engine over randomly generated graphs.

use proptest::prelude::*;

use casefile_core::config::InsightConfig;
use casefile_core::errors::CaseResult;
use casefile_core::models::{Entity, EntityType, InsightKind, Relationship, TagAssignment};
use casefile_core::traits::IGraphStore;
use casefile_insights::InsightEngine;
use chrono::Utc;

const NAMES: &[&str] = &[
    "Jane Doe",
    "J. Doe",
    "John Smith",
    "J Smith",
    "Acme Holdings",
    "Acme",
    "Harbour Trust",
    "",
];

const TYPES: &[EntityType] = &[
    EntityType::Person,
    EntityType::Org,
    EntityType::Location,
    EntityType::Event,
    EntityType::Identifier,
];

/// Vector-backed read-only store; what the engine sees is exactly what the
/// strategy generated.
struct FixtureStore {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
    assignments: Vec<TagAssignment>,
}

impl IGraphStore for FixtureStore {
    fn list_entities(&self) -> CaseResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }
    fn list_relationships(&self) -> CaseResult<Vec<Relationship>> {
        Ok(self.relationships.clone())
    }
    fn list_tag_assignments(&self) -> CaseResult<Vec<TagAssignment>> {
        Ok(self.assignments.clone())
    }
    fn entities_by_ids(&self, ids: &[String]) -> CaseResult<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }
}

fn make_entity(i: usize, name_idx: usize, type_idx: usize) -> Entity {
    let now = Utc::now();
    Entity {
        id: format!("e{i}"),
        entity_type: TYPES[type_idx % TYPES.len()],
        name: NAMES[name_idx % NAMES.len()].to_string(),
        aliases: String::new(),
        notes: String::new(),
        event_date: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn year_field(year: Option<u16>) -> String {
    year.map(|y| format!("{y:04}")).unwrap_or_default()
}

/// Endpoint index `n` (one past the last entity) produces a dangling
/// reference on purpose.
fn make_store(
    n: usize,
    entities: &[(usize, usize)],
    edges: &[(usize, usize, Option<u16>, Option<u16>)],
    tags: &[(usize, usize, usize)],
) -> FixtureStore {
    let entity_rows: Vec<Entity> = entities
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &(name_idx, type_idx))| make_entity(i, name_idx, type_idx))
        .collect();
    let count = entity_rows.len();

    let endpoint = |idx: usize| {
        if idx >= count {
            "ghost".to_string()
        } else {
            format!("e{idx}")
        }
    };
    let relationships: Vec<Relationship> = edges
        .iter()
        .enumerate()
        .map(|(i, &(from, to, start, end))| Relationship {
            id: format!("r{i}"),
            from_id: endpoint(from),
            to_id: endpoint(to),
            rel_type: "LINKED_TO".to_string(),
            start_date: year_field(start),
            end_date: year_field(end),
            strength: Relationship::default_strength(),
            notes: String::new(),
            created_at: Utc::now(),
        })
        .collect();

    let tag_names = ["PHONE", "ADDRESS"];
    let tag_values = ["555-0100", "555-0199", "12 Harbour Lane"];
    let assignments: Vec<TagAssignment> = tags
        .iter()
        .filter(|&&(entity, _, _)| entity < count)
        .map(|&(entity, name_idx, value_idx)| TagAssignment {
            entity_id: format!("e{entity}"),
            tag_name: tag_names[name_idx % tag_names.len()].to_string(),
            value: Some(tag_values[value_idx % tag_values.len()].to_string()),
        })
        .collect();

    FixtureStore {
        entities: entity_rows,
        relationships,
        assignments,
    }
}

type GraphInput = (
    Vec<(usize, usize)>,
    Vec<(usize, usize, Option<u16>, Option<u16>)>,
    Vec<(usize, usize, usize)>,
);

fn graph_strategy(max_entities: usize) -> impl Strategy<Value = GraphInput> {
    let entity = (0..NAMES.len(), 0..TYPES.len());
    let edge = (
        0..=max_entities,
        0..=max_entities,
        prop::option::of(2000_u16..2030),
        prop::option::of(2000_u16..2030),
    );
    let tag = (0..max_entities, 0_usize..2, 0_usize..3);
    (
        prop::collection::vec(entity, 0..max_entities),
        prop::collection::vec(edge, 0..max_entities * 2),
        prop::collection::vec(tag, 0..max_entities),
    )
}

fn sequential_engine() -> InsightEngine {
    InsightEngine::new(InsightConfig {
        parallel: false,
        ..Default::default()
    })
}

// =============================================================================
// Repeated runs over the same graph produce identical results
// =============================================================================
proptest! {
    #[test]
    fn runs_are_idempotent((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let engine = sequential_engine();
        let first = engine.compute_insights(&store).unwrap();
        let second = engine.compute_insights(&store).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Parallel and sequential modes agree
// =============================================================================
proptest! {
    #[test]
    fn parallel_matches_sequential((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let parallel = InsightEngine::with_defaults().compute_insights(&store).unwrap();
        let sequential = sequential_engine().compute_insights(&store).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}

// =============================================================================
// No two insights share a kind and id set
// =============================================================================
proptest! {
    #[test]
    fn identities_are_unique((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let insights = sequential_engine().compute_insights(&store).unwrap();
        let mut identities: Vec<_> = insights.iter().map(|i| i.identity()).collect();
        let total = identities.len();
        identities.sort();
        identities.dedup();
        prop_assert_eq!(identities.len(), total);
    }
}

// =============================================================================
// The cap bounds output for any graph and any cap
// =============================================================================
proptest! {
    #[test]
    fn cap_is_respected(
        (entities, edges, tags) in graph_strategy(12),
        cap in 0_usize..20,
    ) {
        let store = make_store(12, &entities, &edges, &tags);
        let engine = InsightEngine::new(InsightConfig {
            max_insights: cap,
            parallel: false,
            ..Default::default()
        });
        let insights = engine.compute_insights(&store).unwrap();
        prop_assert!(insights.len() <= cap, "got {} insights, cap {}", insights.len(), cap);
    }
}

// =============================================================================
// Every referenced id resolves; dangling edges never abort a run
// =============================================================================
proptest! {
    #[test]
    fn ids_resolve_and_dangling_is_tolerated((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let insights = sequential_engine().compute_insights(&store).unwrap();
        for insight in &insights {
            for id in &insight.ids {
                prop_assert!(
                    store.entities.iter().any(|e| &e.id == id),
                    "insight references unknown id {id}"
                );
            }
        }
    }
}

// =============================================================================
// Date range overlap is symmetric for any pair of raw date fields
// =============================================================================
fn raw_date() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (1_u16..9999).prop_map(|y| format!("{y:04}")),
        (1_u16..9999, 1_u8..=12).prop_map(|(y, m)| format!("{y:04}-{m:02}")),
        (1_u16..9999, 1_u8..=12, 1_u8..=31).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
        "[a-z ]{0,12}",
    ]
}

proptest! {
    #[test]
    fn overlap_is_symmetric(
        (s1, e1, s2, e2) in (raw_date(), raw_date(), raw_date(), raw_date()),
    ) {
        let a = casefile_insights::dates::DateRange::from_raw(&s1, &e1);
        let b = casefile_insights::dates::DateRange::from_raw(&s2, &e2);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}

// =============================================================================
// Duplicates pair distinct entities of the same type
// =============================================================================
proptest! {
    #[test]
    fn duplicates_stay_within_type((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let insights = sequential_engine().compute_insights(&store).unwrap();
        for insight in insights.iter().filter(|i| i.kind == InsightKind::Duplicate) {
            prop_assert_eq!(insight.ids.len(), 2);
            prop_assert_ne!(&insight.ids[0], &insight.ids[1]);
            let type_of = |id: &str| {
                store.entities.iter().find(|e| e.id == id).map(|e| e.entity_type)
            };
            prop_assert_eq!(type_of(&insight.ids[0]), type_of(&insight.ids[1]));
        }
    }
}

// =============================================================================
// A chain's endpoints are never directly connected
// =============================================================================
proptest! {
    #[test]
    fn chain_endpoints_are_not_adjacent((entities, edges, tags) in graph_strategy(10)) {
        let store = make_store(10, &entities, &edges, &tags);
        let insights = sequential_engine().compute_insights(&store).unwrap();
        for insight in insights.iter().filter(|i| i.kind == InsightKind::Chain) {
            prop_assert_eq!(insight.ids.len(), 3);
            let (a, c) = (&insight.ids[0], &insight.ids[2]);
            let direct = store.relationships.iter().any(|r| {
                (&r.from_id == a && &r.to_id == c) || (&r.from_id == c && &r.to_id == a)
            });
            prop_assert!(!direct, "chain {a}..{c} has a direct edge");
        }
    }
}
