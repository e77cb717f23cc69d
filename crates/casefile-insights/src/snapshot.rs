//! Immutable in-memory snapshot of the full graph for one analysis run.
//!
//! Entities live in a stable graph arena indexed by id; relationships are
//! edge weights, giving both-direction adjacency without back-references.
//! The snapshot is built once, read by every detector, and discarded.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use casefile_core::errors::{CaseError, CaseResult, InsightError};
use casefile_core::models::{Entity, Relationship, TagAssignment};
use casefile_core::traits::IGraphStore;

pub struct GraphSnapshot {
    graph: StableDiGraph<Entity, Relationship>,
    index: HashMap<String, NodeIndex>,
    /// All assignments whose entity exists, store order.
    assignments: Vec<TagAssignment>,
    /// Relationships that referenced a nonexistent endpoint and were
    /// excluded rather than failing the load.
    pub dangling_skipped: usize,
}

fn load_failed(err: CaseError) -> CaseError {
    InsightError::LoadFailed {
        reason: err.to_string(),
    }
    .into()
}

impl GraphSnapshot {
    /// One full read of the store. This is the only I/O in an analysis
    /// run; any store failure aborts the run rather than analyzing a
    /// partial graph.
    pub fn load(store: &dyn IGraphStore) -> CaseResult<Self> {
        let entities = store.list_entities().map_err(load_failed)?;
        let relationships = store.list_relationships().map_err(load_failed)?;
        let tag_assignments = store.list_tag_assignments().map_err(load_failed)?;

        let mut graph = StableDiGraph::with_capacity(entities.len(), relationships.len());
        let mut index = HashMap::with_capacity(entities.len());
        for entity in entities {
            let id = entity.id.clone();
            let node = graph.add_node(entity);
            index.insert(id, node);
        }

        let mut dangling_skipped = 0;
        for rel in relationships {
            match (index.get(&rel.from_id), index.get(&rel.to_id)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, rel);
                }
                _ => {
                    tracing::debug!(
                        relationship = %rel.id,
                        from = %rel.from_id,
                        to = %rel.to_id,
                        "skipping relationship with dangling endpoint"
                    );
                    dangling_skipped += 1;
                }
            }
        }

        let assignments: Vec<TagAssignment> = tag_assignments
            .into_iter()
            .filter(|a| index.contains_key(&a.entity_id))
            .collect();

        Ok(Self {
            graph,
            index,
            assignments,
            dangling_skipped,
        })
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// O(1) id lookup.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// The entity behind a node index. Indices handed out by this
    /// snapshot are always valid for its lifetime.
    pub fn entity_at(&self, idx: NodeIndex) -> &Entity {
        &self.graph[idx]
    }

    /// Entities in load order.
    pub fn entities(&self) -> impl Iterator<Item = (NodeIndex, &Entity)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Relationships in load order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.graph.edge_indices().map(move |idx| &self.graph[idx])
    }

    /// Adjacent (neighbor, relationship) pairs, both directions. A
    /// self-loop contributes a single entry pointing back at the node.
    pub fn adjacent(&self, idx: NodeIndex) -> Vec<(NodeIndex, &Relationship)> {
        let mut out = Vec::new();
        for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
            out.push((edge.target(), edge.weight()));
        }
        for edge in self.graph.edges_directed(idx, Direction::Incoming) {
            // Self-loops already appear on the outgoing walk.
            if edge.source() != idx {
                out.push((edge.source(), edge.weight()));
            }
        }
        out
    }

    /// Whether any relationship directly connects the two nodes,
    /// regardless of direction.
    pub fn directly_connected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge_undirected(a, b).is_some()
    }

    /// All tag assignments whose entity exists in the snapshot.
    pub fn tag_assignments(&self) -> &[TagAssignment] {
        &self.assignments
    }
}
