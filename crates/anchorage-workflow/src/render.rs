//! Workflow template rendering
//!
//! Rendering turns a `WorkflowType` (structured YAML text) into a
//! concrete `WorkflowResource` ready for submission. It is a pure
//! transformation: no cluster calls, no side effects.

use crate::error::{LifecycleError, Result};
use anchorage_crd::{CrdError, WorkflowResource, WorkflowType};

/// Label carrying the workflow type's role on rendered resources
pub const ROLE_LABEL: &str = "anchorage.io/role";

/// Renders workflow templates into submittable resources, scoped to the
/// owning addon's namespace.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    namespace: String,
}

impl TemplateRenderer {
    /// Create a renderer targeting the owning addon's namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Render a workflow type into a submittable resource named after
    /// `target_name`.
    ///
    /// A template whose own metadata uses `generateName` renders to a
    /// generate-name prefix `"<target_name>-"`; otherwise the target name
    /// is used exactly. The workflow body under `spec` passes through
    /// unmodified, and template labels are carried over.
    pub fn render(
        &self,
        workflow_type: &WorkflowType,
        target_name: &str,
    ) -> Result<WorkflowResource> {
        workflow_type.validate()?;

        if target_name.is_empty() {
            return Err(LifecycleError::Validation(CrdError::MissingField(
                "targetName".to_string(),
            )));
        }

        let doc: serde_yaml::Value = serde_yaml::from_str(&workflow_type.template)?;
        let doc = serde_json::to_value(doc)?;
        let body = doc.as_object().ok_or_else(|| {
            LifecycleError::Validation(CrdError::Validation(
                "workflow template must be a YAML mapping".to_string(),
            ))
        })?;

        let template_meta = body.get("metadata").and_then(|m| m.as_object());
        let generated = template_meta
            .map(|m| m.contains_key("generateName"))
            .unwrap_or(false);

        let mut resource = if generated {
            WorkflowResource::generated(format!("{target_name}-"), &self.namespace)
        } else {
            WorkflowResource::new(target_name, &self.namespace)
        };

        if let Some(labels) = template_meta
            .and_then(|m| m.get("labels"))
            .and_then(|l| l.as_object())
        {
            for (key, value) in labels {
                if let Some(value) = value.as_str() {
                    resource
                        .metadata
                        .labels
                        .insert(key.clone(), value.to_string());
                }
            }
        }

        resource
            .metadata
            .labels
            .insert(ROLE_LABEL.to_string(), workflow_type.role.clone());

        if let Some(spec) = body.get("spec") {
            resource.spec = spec.clone();
        }

        resource.validate().map_err(LifecycleError::Validation)?;
        Ok(resource)
    }
}
