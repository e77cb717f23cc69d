use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a piece of evidence should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceKind {
    Link,
    Note,
}

impl EvidenceKind {
    /// Kind is inferred from the content, not stored separately:
    /// anything starting with an http(s) scheme is a link.
    pub fn infer(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            EvidenceKind::Link
        } else {
            EvidenceKind::Note
        }
    }
}

/// Supporting context attached to an entity. Not consumed by the
/// insight engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub entity_id: String,
    pub kind: EvidenceKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_inferred_from_prefix() {
        assert_eq!(EvidenceKind::infer("https://example.org/report"), EvidenceKind::Link);
        assert_eq!(EvidenceKind::infer("  http://archive.example"), EvidenceKind::Link);
        assert_eq!(EvidenceKind::infer("met at the harbour in 2019"), EvidenceKind::Note);
    }
}
