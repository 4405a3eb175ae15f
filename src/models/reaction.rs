use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-reported allergic reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub possible_triggers: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_roundtrips_through_json() {
        let record = ReactionRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            symptoms: vec!["Sneezing".into(), "Rash".into()],
            possible_triggers: vec!["Pollen".into()],
            notes: "After a walk in the park".into(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ReactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn notes_default_to_empty() {
        let json = format!(
            r#"{{"id":"{}","date":"2026-03-01T10:00:00Z","symptoms":[],"possible_triggers":[]}}"#,
            Uuid::new_v4()
        );
        let record: ReactionRecord = serde_json::from_str(&json).unwrap();
        assert!(record.notes.is_empty());
    }
}
