//! Artifact: the data carrier passed between pipeline stages, with typed config extraction.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::{QaError, Result};

/// Selects which stages process an artifact. An empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: SelectorOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl LabelSelector {
    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty() && self.match_expressions.is_empty()
    }

    /// All `matchLabels` pairs and all `matchExpressions` must hold for `labels`.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let labels_ok = self
            .match_labels
            .iter()
            .all(|(k, v)| labels.get(k) == Some(v));
        labels_ok && self.match_expressions.iter().all(|req| req.matches(labels))
    }
}

impl LabelSelectorRequirement {
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let value = labels.get(&self.key);
        match self.operator {
            SelectorOperator::In => value.is_some_and(|v| self.values.contains(v)),
            SelectorOperator::NotIn => !value.is_some_and(|v| self.values.contains(v)),
            SelectorOperator::Exists => value.is_some(),
            SelectorOperator::DoesNotExist => value.is_none(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "LabelSelector::is_empty")]
    pub process_with: LabelSelector,
    /// Paths grouped by path type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, Vec<PathBuf>>,
    /// Free-form configs keyed by config type (IR, template config, custom).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configs: BTreeMap<String, Value>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, artifact_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifact_type: artifact_type.into(),
            ..Self::default()
        }
    }

    /// Decodes the config stored under `config_name` into `T`.
    pub fn get_config<T: DeserializeOwned>(&self, config_name: &str) -> Result<T> {
        let config = self
            .configs
            .get(config_name)
            .ok_or_else(|| QaError::ConfigNotFound(config_name.to_string()))?;
        serde_json::from_value(config.clone()).map_err(|source| {
            error!(
                artifact = %self.name,
                config = %config_name,
                error = %source,
                "Unable to load config"
            );
            QaError::ConfigDecode {
                name: config_name.to_string(),
                source,
            }
        })
    }

    pub fn set_config<T: Serialize>(&mut self, config_name: &str, config: &T) -> Result<()> {
        let value = serde_json::to_value(config).map_err(|source| QaError::ConfigDecode {
            name: config_name.to_string(),
            source,
        })?;
        self.configs.insert(config_name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct ServiceConfig {
        name: String,
        port: u16,
    }

    #[test]
    fn test_get_config() {
        let mut artifact = Artifact::new("api", "Service");
        artifact.set_config(
            "service",
            &ServiceConfig {
                name: "api".into(),
                port: 8080,
            },
        )
        .unwrap();

        let config: ServiceConfig = artifact.get_config("service").unwrap();
        assert_eq!(config.port, 8080);
        assert!(matches!(
            artifact.get_config::<ServiceConfig>("missing"),
            Err(QaError::ConfigNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_get_config_decode_error() {
        let mut artifact = Artifact::new("api", "Service");
        artifact.configs.insert("service".into(), json!({"name": 1}));
        assert!(matches!(
            artifact.get_config::<ServiceConfig>("service"),
            Err(QaError::ConfigDecode { .. })
        ));
    }

    #[test]
    fn test_label_selector() {
        let labels: BTreeMap<String, String> =
            [("tier".to_string(), "web".to_string())].into_iter().collect();

        assert!(LabelSelector::default().matches(&labels));

        let mut selector = LabelSelector::default();
        selector.match_labels.insert("tier".into(), "web".into());
        assert!(selector.matches(&labels));

        selector.match_expressions.push(LabelSelectorRequirement {
            key: "env".into(),
            operator: SelectorOperator::DoesNotExist,
            values: vec![],
        });
        assert!(selector.matches(&labels));

        selector.match_expressions.push(LabelSelectorRequirement {
            key: "tier".into(),
            operator: SelectorOperator::NotIn,
            values: vec!["web".into()],
        });
        assert!(!selector.matches(&labels));
    }

    #[test]
    fn test_artifact_wire_names() {
        let value = json!({
            "name": "api",
            "type": "Service",
            "processWith": {"matchLabels": {"tier": "web"}},
            "paths": {"ServiceDirPath": ["src/api"]},
            "configs": {"service": {"name": "api", "port": 80}}
        });
        let artifact: Artifact = serde_json::from_value(value).unwrap();
        assert_eq!(artifact.artifact_type, "Service");
        assert_eq!(artifact.paths["ServiceDirPath"], vec![PathBuf::from("src/api")]);
        assert_eq!(artifact.process_with.match_labels["tier"], "web");
    }
}
