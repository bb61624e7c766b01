//! Anchorage Workflow Lifecycle
//!
//! This crate manages the lifecycle of the ephemeral Argo Workflow
//! resources that perform an addon's install and removal steps. It
//! renders a workflow template into a submittable resource, submits or
//! removes it against the cluster's dynamic resource API, translates the
//! outcome into an addon-visible phase, and emits a lifecycle event.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               WorkflowLifecycle                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  TemplateRenderer                              │  │
//! │  │  template text -> WorkflowResource             │  │
//! │  └────────────────────────────────────────────────┘  │
//! │                       │                              │
//! │                       ▼                              │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  WorkflowSubmitter over WorkflowApi            │  │
//! │  │  kube dynamic API | in-memory fake             │  │
//! │  └────────────────────────────────────────────────┘  │
//! │                       │                              │
//! │                       ▼                              │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  Phase translation + EventSink                 │  │
//! │  │  Pending | Failed, "installing"/"failed" event │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Retry policy belongs to the caller: the lifecycle classifies failures
//! and returns, it never retries internally.
//!
//! # Example
//!
//! ```ignore
//! use anchorage_workflow::{AddonLifecycle, KubeWorkflowApi, KubeEventSink, WorkflowLifecycle};
//! use std::sync::Arc;
//!
//! let api = Arc::new(KubeWorkflowApi::try_default().await?);
//! let events = Arc::new(KubeEventSink::new(client));
//! let lifecycle = WorkflowLifecycle::new(api, addon, events);
//!
//! let phase = lifecycle.install(&workflow_type, "addon-wf-test").await?;
//! ```

pub mod api;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod memory;
pub mod phase;
pub mod render;
pub mod submit;

pub use api::*;
pub use error::*;
pub use events::*;
pub use lifecycle::*;
pub use memory::*;
pub use phase::*;
pub use render::*;
pub use submit::*;
