//! On-disk shape of the cache: type metadata, object metadata and `spec.solutions`.

use std::path::Path;

use qa_core::{ObjectMeta, Problem, TypeMeta};
use serde::{Deserialize, Serialize};
use storage::StorageError;

pub const QA_CACHE_KIND: &str = "QACache";
pub const API_GROUP: &str = "qacache.io";
pub const API_VERSION: &str = "qacache.io/v1alpha1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: CacheSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSpec {
    /// Problems with resolutions, in insertion order.
    #[serde(rename = "solutions", default)]
    pub problems: Vec<Problem>,
}

impl CacheDocument {
    pub fn new(metadata: ObjectMeta, problems: Vec<Problem>) -> Self {
        Self {
            type_meta: TypeMeta::new(QA_CACHE_KIND, API_VERSION),
            metadata,
            spec: CacheSpec { problems },
        }
    }

    /// Rejects documents of another kind or API group.
    pub fn validate(&self, path: &Path) -> Result<(), StorageError> {
        if self.type_meta.kind != QA_CACHE_KIND {
            return Err(StorageError::parse(
                path,
                format!(
                    "expected kind {}, found {:?}",
                    QA_CACHE_KIND, self.type_meta.kind
                ),
            ));
        }
        if self.type_meta.group() != API_GROUP {
            return Err(StorageError::parse(
                path,
                format!(
                    "expected apiVersion in group {}, found {:?}",
                    API_GROUP, self.type_meta.api_version
                ),
            ));
        }
        Ok(())
    }
}
