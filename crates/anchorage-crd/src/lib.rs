//! Anchorage CRD Types
//!
//! This crate provides CRD-compatible types for cluster addon management.
//!
//! # API Groups
//!
//! - Addons use the `anchorage.io/v1alpha1` API group.
//! - Rendered workflows target the Argo `argoproj.io/v1alpha1` group.
//!
//! # Resources
//!
//! - `Addon` - A managed cluster addon (package spec, selector)
//! - `WorkflowType` - Template descriptor used to render install/removal workflows
//! - `WorkflowResource` - A rendered, submittable Argo Workflow document

pub mod addon;
pub mod error;
pub mod metadata;
pub mod workflow;

pub use addon::*;
pub use error::*;
pub use metadata::*;
pub use workflow::*;

/// API version for the Addon CRD
pub const API_VERSION: &str = "anchorage.io/v1alpha1";

/// API group for the Addon CRD
pub const API_GROUP: &str = "anchorage.io";

/// API version string
pub const VERSION: &str = "v1alpha1";

/// API group of the rendered workflow resource
pub const WORKFLOW_GROUP: &str = "argoproj.io";

/// API version of the rendered workflow resource
pub const WORKFLOW_VERSION: &str = "v1alpha1";

/// Kind of the rendered workflow resource
pub const WORKFLOW_KIND: &str = "Workflow";

/// Plural resource name of the rendered workflow resource
pub const WORKFLOW_PLURAL: &str = "workflows";

/// apiVersion string of the rendered workflow resource
pub const WORKFLOW_API_VERSION: &str = "argoproj.io/v1alpha1";
