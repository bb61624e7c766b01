//! Rendered workflow resource types
//!
//! A `WorkflowResource` is the concrete, submittable form of a workflow
//! template. The known envelope fields (group/version/kind, namespace,
//! name or generate-name) are statically typed; the workflow body itself
//! is carried as an opaque document and passed through to the cluster
//! unmodified.

use crate::{CrdError, ObjectMeta, Result, TypeMeta};
use serde::{Deserialize, Serialize};

/// A rendered, submittable Argo Workflow document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResource {
    /// Type metadata (apiVersion, kind)
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Object metadata (name or generate-name, namespace, labels)
    pub metadata: ObjectMeta,

    /// Opaque workflow body, passed through from the template
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub spec: serde_json::Value,
}

impl WorkflowResource {
    /// Create a workflow resource with an exact name
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            type_meta: TypeMeta::workflow(),
            metadata: ObjectMeta::with_namespace(name, namespace),
            spec: serde_json::Value::Null,
        }
    }

    /// Create a workflow resource with a name-generation prefix
    pub fn generated(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            type_meta: TypeMeta::workflow(),
            metadata: ObjectMeta::with_generate_name(prefix, namespace),
            spec: serde_json::Value::Null,
        }
    }

    /// Set the opaque workflow body
    pub fn with_spec(mut self, spec: serde_json::Value) -> Self {
        self.spec = spec;
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.into(), value.into());
        self
    }

    /// Name or generate-name prefix, for logging and event messages
    pub fn identity(&self) -> &str {
        if !self.metadata.name.is_empty() {
            &self.metadata.name
        } else {
            self.metadata.generate_name.as_deref().unwrap_or_default()
        }
    }

    /// Validate the rendered resource
    pub fn validate(&self) -> Result<()> {
        if self.metadata.name.is_empty() && self.metadata.generate_name.is_none() {
            return Err(CrdError::MissingField("metadata.name".to_string()));
        }

        if self.metadata.namespace.is_none() {
            return Err(CrdError::MissingField("metadata.namespace".to_string()));
        }

        if self.type_meta.kind != crate::WORKFLOW_KIND {
            return Err(CrdError::InvalidFieldValue {
                field: "kind".to_string(),
                message: format!("expected '{}', got '{}'", crate::WORKFLOW_KIND, self.type_meta.kind),
            });
        }

        Ok(())
    }
}
