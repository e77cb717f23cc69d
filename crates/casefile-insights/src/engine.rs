//! InsightEngine: orchestrates one analysis run — snapshot load, detector
//! fan-out, deterministic aggregation.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use casefile_core::config::InsightConfig;
use casefile_core::errors::CaseResult;
use casefile_core::models::Insight;
use casefile_core::traits::IGraphStore;

use crate::aggregate;
use crate::detectors::chains::ChainFindings;
use crate::detectors::{chains, coincidences, duplicates, overlaps};
use crate::snapshot::GraphSnapshot;

/// Recovered-locally conditions of one run. None of these abort the
/// analysis; they exist so degraded output is visible instead of silent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineDiagnostics {
    /// Relationships excluded for referencing a nonexistent entity.
    pub dangling_skipped: usize,
    /// Entities excluded from chain expansion for exceeding the degree
    /// threshold.
    pub hubs_skipped: usize,
    /// Detectors that faulted and contributed zero insights.
    pub failed_detectors: Vec<String>,
}

/// The insight-detection engine. Stateless between runs; every call reads
/// the full current graph and computes findings fresh.
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(InsightConfig::default())
    }

    /// The engine's single external operation: the aggregated, capped,
    /// ordered insight list for the current graph. Only a failed snapshot
    /// load is an error; detector faults degrade to missing categories.
    pub fn compute_insights(&self, store: &dyn IGraphStore) -> CaseResult<Vec<Insight>> {
        self.compute_insights_with_diagnostics(store)
            .map(|(insights, _)| insights)
    }

    pub fn compute_insights_with_diagnostics(
        &self,
        store: &dyn IGraphStore,
    ) -> CaseResult<(Vec<Insight>, EngineDiagnostics)> {
        let snapshot = GraphSnapshot::load(store)?;
        debug!(
            entities = snapshot.entity_count(),
            relationships = snapshot.relationship_count(),
            dangling_skipped = snapshot.dangling_skipped,
            "snapshot loaded"
        );

        let mut diagnostics = EngineDiagnostics {
            dangling_skipped: snapshot.dangling_skipped,
            ..Default::default()
        };

        let max_hub_degree = self.config.max_hub_degree;
        let snap = &snapshot;

        // The detectors are pure over the shared read-only snapshot, so
        // completion order cannot affect the merged result: each output is
        // internally sorted and the merge order is fixed.
        let (dup_out, ovl_out, chain_out, coin_out) = if self.config.parallel {
            let ((dup_out, ovl_out), (chain_out, coin_out)) = rayon::join(
                || {
                    rayon::join(
                        || guarded("duplicates", || duplicates::detect(snap)),
                        || guarded("overlaps", || overlaps::detect(snap)),
                    )
                },
                || {
                    rayon::join(
                        || guarded("chains", || chains::detect(snap, max_hub_degree)),
                        || guarded("coincidences", || coincidences::detect(snap)),
                    )
                },
            );
            (dup_out, ovl_out, chain_out, coin_out)
        } else {
            (
                guarded("duplicates", || duplicates::detect(snap)),
                guarded("overlaps", || overlaps::detect(snap)),
                guarded("chains", || chains::detect(snap, max_hub_degree)),
                guarded("coincidences", || coincidences::detect(snap)),
            )
        };

        let duplicates = recover(dup_out, "duplicates", &mut diagnostics);
        let overlaps = recover(ovl_out, "overlaps", &mut diagnostics);
        let coincidences = recover(coin_out, "coincidences", &mut diagnostics);
        let chain_findings: ChainFindings = recover(chain_out, "chains", &mut diagnostics);
        diagnostics.hubs_skipped = chain_findings.hubs_skipped;
        let chains = chain_findings.insights;

        let insights = aggregate::merge(
            duplicates,
            overlaps,
            chains,
            coincidences,
            self.config.max_insights,
        );
        debug!(
            total = insights.len(),
            hubs_skipped = diagnostics.hubs_skipped,
            "analysis complete"
        );
        Ok((insights, diagnostics))
    }
}

/// Run one detector, converting a panic into `None` so one bad detector
/// never blanks the whole result.
fn guarded<T>(name: &'static str, f: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(output) => Some(output),
        Err(_) => {
            warn!(detector = name, "detector faulted; contributing zero insights");
            None
        }
    }
}

fn recover<T: Default>(
    output: Option<T>,
    name: &'static str,
    diagnostics: &mut EngineDiagnostics,
) -> T {
    match output {
        Some(value) => value,
        None => {
            diagnostics.failed_detectors.push(name.to_string());
            T::default()
        }
    }
}
