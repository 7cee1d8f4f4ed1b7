use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Labels attached to a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Human-readable pipeline name, used in log spans.
    pub name: String,

    /// Tags for filtering and categorization.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Arbitrary metadata key-value pairs.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Unique identifier for this run.
    pub run_id: Uuid,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: "pipeline".into(),
            tags: Vec::new(),
            metadata: HashMap::new(),
            run_id: Uuid::new_v4(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RunConfig::default();
        assert_eq!(config.name, "pipeline");
        assert!(config.tags.is_empty());
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn builder_methods() {
        let config = RunConfig::new()
            .with_name("evens")
            .with_tag("demo")
            .with_tag("numbers")
            .with_metadata("source", serde_json::json!("1..=10"));

        assert_eq!(config.name, "evens");
        assert_eq!(config.tags, vec!["demo", "numbers"]);
        assert_eq!(config.metadata["source"], serde_json::json!("1..=10"));
    }

    #[test]
    fn run_id_uniqueness() {
        let config1 = RunConfig::new();
        let config2 = RunConfig::new();
        assert_ne!(config1.run_id, config2.run_id);
    }

    #[test]
    fn with_explicit_run_id() {
        let id = Uuid::new_v4();
        let config = RunConfig::new().with_run_id(id);
        assert_eq!(config.run_id, id);
    }

    #[test]
    fn serde_roundtrip() {
        let config = RunConfig::new()
            .with_name("words")
            .with_metadata("limit", serde_json::json!(16));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.name, config.name);
        assert_eq!(deserialized.metadata, config.metadata);
        assert_eq!(deserialized.run_id, config.run_id);
    }

    #[test]
    fn missing_optional_fields_default() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"name":"bare","run_id":"{id}"}}"#);
        let config: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.name, "bare");
        assert!(config.tags.is_empty());
        assert!(config.metadata.is_empty());
    }
}
