//! Duplicate detector: entity pairs likely denoting the same subject.
//!
//! Every unordered pair of same-type entities is compared on normalized
//! name and alias strings. Exact normalized equality is a confident
//! match; a token-subset match (initials allowed) is a weaker one.

use std::cmp::Ordering;

use casefile_core::models::{Insight, InsightKind};

use crate::snapshot::GraphSnapshot;

const CONFIDENCE_EXACT: f64 = 1.0;
const CONFIDENCE_SUBSET: f64 = 0.75;

/// One comparable name string of an entity.
struct NameForm {
    /// Original trimmed text, for display.
    raw: String,
    /// Lowercased, punctuation stripped, whitespace collapsed.
    normalized: String,
    tokens: Vec<String>,
}

struct Candidate<'a> {
    id: &'a str,
    display_name: &'a str,
    forms: Vec<NameForm>,
}

struct Flagged<'a> {
    confidence: f64,
    a: &'a str,
    b: &'a str,
    name_a: &'a str,
    name_b: &'a str,
    matched_a: String,
    matched_b: String,
}

pub fn detect(snapshot: &GraphSnapshot) -> Vec<Insight> {
    // Entities with empty names never participate.
    let candidates: Vec<(casefile_core::models::EntityType, Candidate<'_>)> = snapshot
        .entities()
        .filter(|(_, e)| !normalize(&e.name).is_empty())
        .map(|(_, e)| {
            let mut forms = vec![name_form(&e.name)];
            forms.extend(e.alias_names().map(name_form));
            forms.retain(|f| !f.normalized.is_empty());
            (
                e.entity_type,
                Candidate {
                    id: &e.id,
                    display_name: &e.name,
                    forms,
                },
            )
        })
        .collect();

    let mut flagged = Vec::new();
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let (type_a, a) = &candidates[i];
            let (type_b, b) = &candidates[j];
            if type_a != type_b || a.id == b.id {
                continue;
            }
            if let Some(hit) = best_match(a, b) {
                flagged.push(hit);
            }
        }
    }

    // Descending confidence, then combined name order for determinism.
    flagged.sort_by(|x, y| {
        y.confidence
            .partial_cmp(&x.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| pair_key(x.name_a, x.name_b).cmp(&pair_key(y.name_a, y.name_b)))
    });

    flagged
        .into_iter()
        .map(|f| Insight {
            kind: InsightKind::Duplicate,
            title: format!("Possible duplicate: {} / {}", f.name_a, f.name_b),
            details: format!(
                "\"{}\" matches \"{}\" ({})",
                f.matched_a,
                f.matched_b,
                if f.confidence >= CONFIDENCE_EXACT {
                    "exact name match"
                } else {
                    "name token subset"
                }
            ),
            ids: vec![f.a.to_string(), f.b.to_string()],
        })
        .collect()
}

/// Best-scoring form pair across both entities' names and aliases.
fn best_match<'a>(a: &Candidate<'a>, b: &Candidate<'a>) -> Option<Flagged<'a>> {
    let mut best: Option<(f64, &NameForm, &NameForm)> = None;
    for fa in &a.forms {
        for fb in &b.forms {
            let confidence = if fa.normalized == fb.normalized {
                CONFIDENCE_EXACT
            } else if token_subset(&fa.tokens, &fb.tokens) || token_subset(&fb.tokens, &fa.tokens) {
                CONFIDENCE_SUBSET
            } else {
                continue;
            };
            if best.map_or(true, |(c, _, _)| confidence > c) {
                best = Some((confidence, fa, fb));
            }
        }
    }
    best.map(|(confidence, fa, fb)| Flagged {
        confidence,
        a: a.id,
        b: b.id,
        name_a: a.display_name,
        name_b: b.display_name,
        matched_a: fa.raw.clone(),
        matched_b: fb.raw.clone(),
    })
}

fn name_form(raw: &str) -> NameForm {
    let normalized = normalize(raw);
    NameForm {
        raw: raw.trim().to_string(),
        tokens: normalized.split(' ').map(String::from).collect(),
        normalized,
    }
}

/// Lowercase, punctuation to spaces, whitespace collapsed.
fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every token of `small` pairs off against a distinct token of `large`.
/// A single-character token matches any token sharing its initial, so
/// "j doe" is a subset of "jane doe".
fn token_subset(small: &[String], large: &[String]) -> bool {
    if small.is_empty() || small.len() > large.len() {
        return false;
    }
    let mut used = vec![false; large.len()];
    'outer: for token in small {
        for (i, other) in large.iter().enumerate() {
            if !used[i] && token_matches(token, other) {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

fn token_matches(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let initial = |s: &str| s.chars().next();
    (a.chars().count() == 1 || b.chars().count() == 1) && initial(a) == initial(b)
}

fn pair_key(name_a: &str, name_b: &str) -> String {
    let mut names = [name_a.to_lowercase(), name_b.to_lowercase()];
    names.sort();
    names.join(" / ")
}
