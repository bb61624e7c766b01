//! Common metadata types for CRDs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Kubernetes-style object metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name (required unless `generate_name` is set)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Name-generation prefix; the cluster appends a random suffix on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,

    /// Namespace (optional, defaults to "default")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Unique identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,

    /// Resource version for optimistic concurrency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Labels for organizing resources
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    /// Annotations for storing arbitrary metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl ObjectMeta {
    /// Create new metadata with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create new metadata with name and namespace
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// Create new metadata with a name-generation prefix and namespace
    pub fn with_generate_name(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            generate_name: Some(prefix.into()),
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            generate_name: None,
            namespace: None,
            uid: None,
            resource_version: None,
            labels: HashMap::new(),
            annotations: HashMap::new(),
            creation_timestamp: None,
        }
    }
}

/// Type metadata for CRD objects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// API version (e.g., "anchorage.io/v1alpha1")
    pub api_version: String,

    /// Kind (e.g., "Addon", "Workflow")
    pub kind: String,
}

impl TypeMeta {
    /// Create type metadata for Addon
    pub fn addon() -> Self {
        Self {
            api_version: crate::API_VERSION.to_string(),
            kind: "Addon".to_string(),
        }
    }

    /// Create type metadata for the rendered Argo Workflow resource
    pub fn workflow() -> Self {
        Self {
            api_version: crate::WORKFLOW_API_VERSION.to_string(),
            kind: crate::WORKFLOW_KIND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_meta_new() {
        let meta = ObjectMeta::new("my-addon");
        assert_eq!(meta.name, "my-addon");
        assert!(meta.namespace.is_none());
        assert!(meta.generate_name.is_none());
        assert!(meta.labels.is_empty());
    }

    #[test]
    fn test_object_meta_with_namespace() {
        let meta = ObjectMeta::with_namespace("my-addon", "addons");
        assert_eq!(meta.name, "my-addon");
        assert_eq!(meta.namespace, Some("addons".to_string()));
    }

    #[test]
    fn test_object_meta_with_generate_name() {
        let meta = ObjectMeta::with_generate_name("addon-wf-", "default");
        assert!(meta.name.is_empty());
        assert_eq!(meta.generate_name, Some("addon-wf-".to_string()));
        assert_eq!(meta.namespace, Some("default".to_string()));
    }

    #[test]
    fn test_object_meta_with_labels() {
        let meta = ObjectMeta::new("test")
            .with_label("app", "my-app")
            .with_label("tier", "addons");

        assert_eq!(meta.labels.get("app"), Some(&"my-app".to_string()));
        assert_eq!(meta.labels.get("tier"), Some(&"addons".to_string()));
    }

    #[test]
    fn test_type_meta_addon() {
        let meta = TypeMeta::addon();
        assert_eq!(meta.api_version, "anchorage.io/v1alpha1");
        assert_eq!(meta.kind, "Addon");
    }

    #[test]
    fn test_type_meta_workflow() {
        let meta = TypeMeta::workflow();
        assert_eq!(meta.api_version, "argoproj.io/v1alpha1");
        assert_eq!(meta.kind, "Workflow");
    }

    #[test]
    fn test_object_meta_serialization() {
        let meta = ObjectMeta::with_namespace("foo", "default").with_label("app", "my-app");

        let json = serde_json::to_string(&meta).unwrap();
        let parsed: ObjectMeta = serde_json::from_str(&json).unwrap();

        assert_eq!(meta, parsed);
    }

    #[test]
    fn test_generate_name_serializes_camel_case() {
        let meta = ObjectMeta::with_generate_name("scripts-python-", "default");
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"generateName\":\"scripts-python-\""));
        assert!(!json.contains("\"name\""));
    }
}
