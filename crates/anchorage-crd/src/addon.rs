//! Addon CRD types
//!
//! An `Addon` is the higher-level entity whose install and removal steps
//! are driven through rendered Argo workflows. The reconciler owns and
//! mutates addons; the lifecycle core only reads them.

use crate::{CrdError, ObjectMeta, Result, TypeMeta};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Addon resource representing a managed cluster addon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    /// Type metadata (apiVersion, kind)
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Object metadata (name, namespace, labels, etc.)
    pub metadata: ObjectMeta,

    /// Addon specification
    pub spec: AddonSpec,

    /// Addon status (set by the reconciler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AddonStatus>,
}

impl Addon {
    /// Create a new Addon
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            type_meta: TypeMeta::addon(),
            metadata: ObjectMeta::with_namespace(name, namespace),
            spec: AddonSpec::default(),
            status: None,
        }
    }

    /// Set the package specification
    pub fn with_package(mut self, package_spec: PackageSpec) -> Self {
        self.spec.package_spec = package_spec;
        self
    }

    /// Add a selector label
    pub fn with_selector_label(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.spec
            .selector
            .match_labels
            .insert(key.into(), value.into());
        self
    }

    /// Namespace the addon's workflows are submitted into
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or("default")
    }

    /// Validate the addon
    pub fn validate(&self) -> Result<()> {
        if self.metadata.name.is_empty() {
            return Err(CrdError::MissingField("metadata.name".to_string()));
        }

        if self.spec.package_spec.pkg_name.is_empty() {
            return Err(CrdError::MissingField("spec.pkgName".to_string()));
        }

        Ok(())
    }
}

/// Addon specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddonSpec {
    /// Package being installed by this addon
    #[serde(flatten)]
    pub package_spec: PackageSpec,

    /// Label selector for the addon's workloads
    #[serde(default)]
    pub selector: LabelSelector,
}

/// Package specification for an addon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    /// Package name
    pub pkg_name: String,

    /// Package version
    pub pkg_version: String,

    /// Package type, used to dispatch the lifecycle implementation
    pub pkg_type: PackageType,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pkg_description: String,

    /// Declared dependencies, package name to version constraint
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub pkg_deps: HashMap<String, String>,
}

impl PackageSpec {
    /// Create a new package specification
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        pkg_type: PackageType,
    ) -> Self {
        Self {
            pkg_name: name.into(),
            pkg_version: version.into(),
            pkg_type,
            pkg_description: String::new(),
            pkg_deps: HashMap::new(),
        }
    }

    /// Add a dependency constraint
    pub fn with_dep(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.pkg_deps.insert(name.into(), constraint.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.pkg_description = description.into();
        self
    }
}

/// Supported package types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Helm chart package
    #[default]
    Helm,
    /// Composite package made of other packages
    Composite,
}

/// Label selector matching the addon's workloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Labels a workload must carry to match
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub match_labels: HashMap<String, String>,
}

/// Addon status (set by the reconciler, never by the lifecycle core)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddonStatus {
    /// Observed lifecycle phase
    pub phase: Phase,

    /// Reason for the current phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Addon-visible lifecycle phase of a workflow submission.
///
/// The lifecycle core only ever produces `Pending` (submitted) or
/// `Failed` (could not be submitted). `Running` and `Succeeded` are set
/// later by the reconciler watching the submitted workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Phase {
    /// Successfully submitted, execution not yet observed complete
    #[default]
    Pending,
    /// Observed executing
    Running,
    /// Observed complete
    Succeeded,
    /// Could not be submitted
    Failed,
}

impl Phase {
    /// Phase name as exposed in status fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pending => "Pending",
            Phase::Running => "Running",
            Phase::Succeeded => "Succeeded",
            Phase::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow template descriptor used to render an install or removal
/// workflow for an addon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowType {
    /// Prefix stamped on rendered workflow names
    #[serde(default)]
    pub name_prefix: String,

    /// Role the workflow executes under
    #[serde(default)]
    pub role: String,

    /// Workflow template body (YAML text)
    #[serde(default)]
    pub template: String,
}

impl WorkflowType {
    /// Create a new workflow type
    pub fn new(
        name_prefix: impl Into<String>,
        role: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            role: role.into(),
            template: template.into(),
        }
    }

    /// Validate the workflow type.
    ///
    /// An empty template, prefix, or role is a caller configuration
    /// mistake, never a transient failure.
    pub fn validate(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            return Err(CrdError::MissingField("template".to_string()));
        }

        if self.name_prefix.is_empty() {
            return Err(CrdError::MissingField("namePrefix".to_string()));
        }

        if self.role.is_empty() {
            return Err(CrdError::MissingField("role".to_string()));
        }

        Ok(())
    }
}
