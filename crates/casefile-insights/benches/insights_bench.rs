use criterion::{criterion_group, criterion_main, Criterion};

use casefile_core::config::InsightConfig;
use casefile_core::errors::CaseResult;
use casefile_core::models::{Entity, EntityType, Relationship, TagAssignment};
use casefile_core::traits::IGraphStore;
use casefile_insights::InsightEngine;
use chrono::Utc;

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

/// ~500 entities, ~1K edges in a ring-with-shortcuts shape, plus a shared
/// phone tag on every tenth entity. Dense enough to exercise every detector.
fn build_store() -> FixtureStore {
    let n = 500;
    let now = Utc::now();

    let entities: Vec<Entity> = (0..n)
        .map(|i| Entity {
            id: format!("e{i}"),
            entity_type: if i % 3 == 0 {
                EntityType::Org
            } else {
                EntityType::Person
            },
            name: format!("Subject {i}"),
            aliases: String::new(),
            notes: String::new(),
            event_date: String::new(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    let mut relationships = Vec::new();
    for i in 0..n {
        for step in [1, 7] {
            let j = (i + step) % n;
            relationships.push(Relationship {
                id: format!("r{}", relationships.len()),
                from_id: format!("e{i}"),
                to_id: format!("e{j}"),
                rel_type: "LINKED_TO".to_string(),
                start_date: format!("{}", 2000 + (i % 20)),
                end_date: format!("{}", 2005 + (i % 20)),
                strength: Relationship::default_strength(),
                notes: String::new(),
                created_at: now,
            });
        }
    }

    let assignments: Vec<TagAssignment> = (0..n)
        .step_by(10)
        .map(|i| TagAssignment {
            entity_id: format!("e{i}"),
            tag_name: "PHONE".to_string(),
            value: Some(format!("555-{:04}", i % 30)),
        })
        .collect();

    FixtureStore {
        entities,
        relationships,
        assignments,
    }
}

fn bench_full_run_parallel(c: &mut Criterion) {
    let store = build_store();
    let engine = InsightEngine::with_defaults();
    c.bench_function("insights_500_entities_1k_edges_parallel", |b| {
        b.iter(|| engine.compute_insights(&store).unwrap());
    });
}

fn bench_full_run_sequential(c: &mut Criterion) {
    let store = build_store();
    let engine = InsightEngine::new(InsightConfig {
        parallel: false,
        ..Default::default()
    });
    c.bench_function("insights_500_entities_1k_edges_sequential", |b| {
        b.iter(|| engine.compute_insights(&store).unwrap());
    });
}

criterion_group!(benches, bench_full_run_parallel, bench_full_run_sequential);
criterion_main!(benches);
