use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of real-world subject an entity denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Org,
    Location,
    Event,
    Identifier,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Org => "ORG",
            EntityType::Location => "LOCATION",
            EntityType::Event => "EVENT",
            EntityType::Identifier => "IDENTIFIER",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "PERSON" => Some(EntityType::Person),
            "ORG" => Some(EntityType::Org),
            "LOCATION" => Some(EntityType::Location),
            "EVENT" => Some(EntityType::Event),
            "IDENTIFIER" => Some(EntityType::Identifier),
            _ => None,
        }
    }
}

/// A node in the investigative graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque stable identifier. Unique and immutable once created.
    pub id: String,
    pub entity_type: EntityType,
    /// Display name.
    pub name: String,
    /// Alternate names as comma-separated free text, in entry order.
    pub aliases: String,
    pub notes: String,
    /// When this entity took place, for EVENT entities shown on the
    /// timeline. Same loose format as relationship dates; empty when unset.
    pub event_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    /// The alias list split out of the comma-separated field, trimmed,
    /// empty segments dropped, order preserved.
    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Identity equality: two entities are equal if they have the same id.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn alias_names_splits_and_trims() {
        let e = Entity {
            id: "e1".to_string(),
            entity_type: EntityType::Person,
            name: "Jane Doe".to_string(),
            aliases: " J. Doe , , Janey ".to_string(),
            notes: String::new(),
            event_date: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let aliases: Vec<&str> = e.alias_names().collect();
        assert_eq!(aliases, vec!["J. Doe", "Janey"]);
    }

    #[test]
    fn entity_type_round_trips_by_name() {
        for t in [
            EntityType::Person,
            EntityType::Org,
            EntityType::Location,
            EntityType::Event,
            EntityType::Identifier,
        ] {
            assert_eq!(EntityType::from_str_name(t.as_str()), Some(t));
        }
        assert_eq!(EntityType::from_str_name("WIDGET"), None);
    }
}
