//! Addon lifecycle orchestration
//!
//! `WorkflowLifecycle` composes the renderer, submitter, phase
//! translation, and event sink behind the public `AddonLifecycle`
//! contract. Each instance is scoped to a single addon for its whole
//! life; the collaborators are injected once at construction.

use crate::api::WorkflowApi;
use crate::error::Result;
use crate::events::{EventSink, LifecycleEventKind};
use crate::phase::install_phase;
use crate::render::TemplateRenderer;
use crate::submit::WorkflowSubmitter;
use anchorage_crd::{Addon, Phase, WorkflowResource, WorkflowType};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Lifecycle contract dispatched per addon package type.
///
/// `WorkflowLifecycle` is the workflow-driven variant; other package
/// types plug their own implementations in behind this trait, selected
/// by the reconciler from `PackageSpec::pkg_type`.
#[async_trait]
pub trait AddonLifecycle: Send + Sync {
    /// Render and submit the install workflow for the addon.
    ///
    /// An addon-visible phase is always derivable from the outcome:
    /// `Ok` is always `Ok(Phase::Pending)`, and every error satisfies
    /// `err.phase() == Phase::Failed`. Rendering failures short-circuit
    /// without touching the cluster. Cancellation is caller-side: wrap
    /// the future in a timeout to bound the remote call.
    async fn install(&self, workflow_type: &WorkflowType, target_name: &str) -> Result<Phase>;

    /// Remove the named workflow resource from the addon's namespace.
    ///
    /// `NotFound` propagates unchanged; the caller decides whether
    /// "already gone" is acceptable.
    async fn delete(&self, target_name: &str) -> Result<()>;
}

/// Workflow-driven addon lifecycle, scoped to a single addon instance
pub struct WorkflowLifecycle {
    renderer: TemplateRenderer,
    submitter: WorkflowSubmitter,
    addon: Arc<Addon>,
    events: Arc<dyn EventSink>,
}

impl WorkflowLifecycle {
    /// Compose a lifecycle for one addon.
    ///
    /// The resource API, addon reference, and event sink are fixed for
    /// the object's life and must be safe for concurrent use across
    /// lifecycle instances.
    pub fn new(api: Arc<dyn WorkflowApi>, addon: Arc<Addon>, events: Arc<dyn EventSink>) -> Self {
        Self {
            renderer: TemplateRenderer::new(addon.namespace()),
            submitter: WorkflowSubmitter::new(api),
            addon,
            events,
        }
    }

    async fn try_install(
        &self,
        workflow_type: &WorkflowType,
        target_name: &str,
    ) -> Result<WorkflowResource> {
        let resource = self.renderer.render(workflow_type, target_name)?;
        self.submitter.create(self.addon.namespace(), &resource).await
    }
}

#[async_trait]
impl AddonLifecycle for WorkflowLifecycle {
    async fn install(&self, workflow_type: &WorkflowType, target_name: &str) -> Result<Phase> {
        let outcome = self.try_install(workflow_type, target_name).await;
        let phase = install_phase(&outcome);

        // Best-effort event, emitted regardless of outcome; the sink can
        // never mask the install result.
        match &outcome {
            Ok(resource) => {
                info!(
                    "workflow '{}' submitted for addon '{}', phase {}",
                    resource.identity(),
                    self.addon.metadata.name,
                    phase
                );
                self.events
                    .record(
                        &self.addon,
                        LifecycleEventKind::Installing,
                        "WorkflowSubmitted",
                        &format!("install workflow '{}' submitted", resource.identity()),
                    )
                    .await;
            }
            Err(e) => {
                self.events
                    .record(
                        &self.addon,
                        LifecycleEventKind::Failed,
                        "WorkflowSubmissionFailed",
                        &e.to_string(),
                    )
                    .await;
            }
        }

        outcome.map(|_| phase)
    }

    async fn delete(&self, target_name: &str) -> Result<()> {
        self.submitter
            .delete(self.addon.namespace(), target_name)
            .await?;

        self.events
            .record(
                &self.addon,
                LifecycleEventKind::Deleting,
                "WorkflowDeleted",
                &format!("workflow '{target_name}' deleted"),
            )
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifecycleError;
    use crate::events::MemoryEventSink;
    use crate::memory::MemoryWorkflowApi;
    use anchorage_crd::{PackageSpec, PackageType};

    fn test_addon() -> Arc<Addon> {
        Arc::new(
            Addon::new("foo", "default")
                .with_package(
                    PackageSpec::new("my-addon", "1.0.0", PackageType::Helm)
                        .with_dep("core/A", "*")
                        .with_dep("core/B", "v1.0.0"),
                )
                .with_selector_label("app", "my-app"),
        )
    }

    fn harness() -> (Arc<MemoryWorkflowApi>, Arc<MemoryEventSink>, WorkflowLifecycle) {
        let api = Arc::new(MemoryWorkflowApi::new());
        let events = Arc::new(MemoryEventSink::new());
        let lifecycle = WorkflowLifecycle::new(api.clone(), test_addon(), events.clone());
        (api, events, lifecycle)
    }

    #[tokio::test]
    async fn test_render_failure_short_circuits_submission() {
        let (api, events, lifecycle) = harness();

        let wt = WorkflowType::new("test", "myrole", "spec: [unclosed");
        let err = lifecycle.install(&wt, "addon-wf-test").await.unwrap_err();

        assert!(matches!(err, LifecycleError::TemplateParse(_)));
        assert_eq!(err.phase(), Phase::Failed);
        assert!(api.is_empty());

        let events = events.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, LifecycleEventKind::Failed);
    }

    #[tokio::test]
    async fn test_install_conflict_surfaces_already_exists() {
        let (api, _, lifecycle) = harness();

        // exact-name template, so the second submit collides
        let wt = WorkflowType::new(
            "test",
            "myrole",
            "apiVersion: argoproj.io/v1alpha1\nkind: Workflow\nspec:\n  entrypoint: main\n",
        );

        let phase = lifecycle.install(&wt, "addon-wf-test").await.unwrap();
        assert_eq!(phase, Phase::Pending);
        assert_eq!(api.len(), 1);

        let err = lifecycle.install(&wt, "addon-wf-test").await.unwrap_err();
        assert!(matches!(err, LifecycleError::AlreadyExists(_)));
        assert_eq!(err.phase(), Phase::Failed);
        assert_eq!(api.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_emits_event_on_success_only() {
        let (api, events, lifecycle) = harness();

        let err = lifecycle.delete("addon-wf-test").await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(events.events().is_empty());

        api.create("default", &WorkflowResource::new("addon-wf-test", "default"))
            .await
            .unwrap();
        lifecycle.delete("addon-wf-test").await.unwrap();

        let events = events.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, LifecycleEventKind::Deleting);
    }
}
