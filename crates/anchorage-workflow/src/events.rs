//! Lifecycle event emission
//!
//! Event emission is best-effort: implementations log and swallow their
//! own failures so an event can never mask the primary install/delete
//! outcome.

use anchorage_crd::Addon;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ObjectReference;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use std::sync::Mutex;
use tracing::warn;

/// Fixed component identity stamped on every lifecycle event
pub const COMPONENT: &str = "addons";

/// Kind of lifecycle event emitted for an addon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEventKind {
    /// An install workflow was submitted
    Installing,
    /// A removal workflow was carried out
    Deleting,
    /// An install or removal step failed
    Failed,
}

impl LifecycleEventKind {
    /// Event kind as exposed in event actions
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEventKind::Installing => "installing",
            LifecycleEventKind::Deleting => "deleting",
            LifecycleEventKind::Failed => "failed",
        }
    }
}

/// Sink for addon lifecycle events.
///
/// Fire and forget: `record` returns nothing and implementations must
/// not fail the caller.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Record a lifecycle event against its owning addon
    async fn record(
        &self,
        owner: &Addon,
        kind: LifecycleEventKind,
        reason: &str,
        message: &str,
    );
}

/// `EventSink` publishing Kubernetes Events against the owning addon
pub struct KubeEventSink {
    recorder: Recorder,
}

impl KubeEventSink {
    pub fn new(client: kube::Client) -> Self {
        let reporter = Reporter {
            controller: COMPONENT.to_string(),
            instance: None,
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }
}

#[async_trait]
impl EventSink for KubeEventSink {
    async fn record(
        &self,
        owner: &Addon,
        kind: LifecycleEventKind,
        reason: &str,
        message: &str,
    ) {
        let reference = ObjectReference {
            api_version: Some(owner.type_meta.api_version.clone()),
            kind: Some(owner.type_meta.kind.clone()),
            name: Some(owner.metadata.name.clone()),
            namespace: owner.metadata.namespace.clone(),
            uid: owner.metadata.uid.map(|u| u.to_string()),
            ..Default::default()
        };

        let event = Event {
            type_: match kind {
                LifecycleEventKind::Failed => EventType::Warning,
                _ => EventType::Normal,
            },
            reason: reason.to_string(),
            note: Some(message.to_string()),
            action: kind.as_str().to_string(),
            secondary: None,
        };

        if let Err(e) = self.recorder.publish(&event, &reference).await {
            warn!(
                "failed to publish '{}' event for addon '{}': {}",
                kind.as_str(),
                owner.metadata.name,
                e
            );
        }
    }
}

/// A lifecycle event captured by `MemoryEventSink`
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub component: String,
    pub addon: String,
    pub namespace: Option<String>,
    pub kind: LifecycleEventKind,
    pub reason: String,
    pub message: String,
}

/// In-memory `EventSink` for test assertion
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event, in emission order
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn record(
        &self,
        owner: &Addon,
        kind: LifecycleEventKind,
        reason: &str,
        message: &str,
    ) {
        // same fixed identity `KubeEventSink` stamps via its `Reporter`
        self.events.lock().unwrap().push(RecordedEvent {
            component: COMPONENT.to_string(),
            addon: owner.metadata.name.clone(),
            namespace: owner.metadata.namespace.clone(),
            kind,
            reason: reason.to_string(),
            message: message.to_string(),
        });
    }
}
