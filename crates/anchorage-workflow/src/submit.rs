//! Workflow submission over the dynamic resource API

use crate::api::WorkflowApi;
use crate::error::Result;
use anchorage_crd::WorkflowResource;
use std::sync::Arc;
use tracing::info;

/// Submits and removes rendered workflow resources.
///
/// Deletion is existence-checked: deleting a name that does not exist
/// surfaces `NotFound` rather than succeeding silently, leaving the
/// "already gone" decision to the caller.
#[derive(Clone)]
pub struct WorkflowSubmitter {
    api: Arc<dyn WorkflowApi>,
}

impl WorkflowSubmitter {
    pub fn new(api: Arc<dyn WorkflowApi>) -> Self {
        Self { api }
    }

    /// Submit a rendered workflow resource into a namespace
    pub async fn create(
        &self,
        namespace: &str,
        resource: &WorkflowResource,
    ) -> Result<WorkflowResource> {
        self.api.create(namespace, resource).await
    }

    /// Fetch a workflow by name
    pub async fn get(&self, namespace: &str, name: &str) -> Result<WorkflowResource> {
        self.api.get(namespace, name).await
    }

    /// Delete a workflow by name, verifying it exists first.
    ///
    /// The existence check's own failure propagates as classified by
    /// `get` (`NotFound` for an absent target, `Client` for a lookup
    /// failure); `Deletion` is reserved for a rejected delete call.
    pub async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.api.get(namespace, name).await?;

        info!("deleting workflow '{}' from namespace '{}'", name, namespace);
        self.api.delete(namespace, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifecycleError;
    use crate::memory::MemoryWorkflowApi;
    use async_trait::async_trait;

    fn submitter() -> (Arc<MemoryWorkflowApi>, WorkflowSubmitter) {
        let api = Arc::new(MemoryWorkflowApi::new());
        (api.clone(), WorkflowSubmitter::new(api))
    }

    /// Fails every lookup with a client error and counts delete calls
    #[derive(Default)]
    struct UnreachableApi {
        deletes: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl WorkflowApi for UnreachableApi {
        async fn create(&self, _: &str, _: &WorkflowResource) -> Result<WorkflowResource> {
            Err(LifecycleError::Client("connection refused".to_string()))
        }

        async fn get(&self, _: &str, _: &str) -> Result<WorkflowResource> {
            Err(LifecycleError::Client("connection refused".to_string()))
        }

        async fn delete(&self, _: &str, _: &str) -> Result<()> {
            self.deletes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_create_then_delete() {
        let (api, submitter) = submitter();

        submitter
            .create("default", &WorkflowResource::new("addon-wf-test", "default"))
            .await
            .unwrap();
        assert_eq!(api.len(), 1);

        submitter.delete("default", "addon-wf-test").await.unwrap();
        assert!(api.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_surfaces_not_found() {
        let (_, submitter) = submitter();

        let err = submitter.delete("default", "addon-wf-test").await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(name) if name == "addon-wf-test"));
    }

    #[tokio::test]
    async fn test_repeat_delete_fails() {
        let (_, submitter) = submitter();

        submitter
            .create("default", &WorkflowResource::new("addon-wf-test", "default"))
            .await
            .unwrap();

        submitter.delete("default", "addon-wf-test").await.unwrap();
        let err = submitter.delete("default", "addon-wf-test").await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_existence_check_is_not_a_deletion_error() {
        let api = Arc::new(UnreachableApi::default());
        let submitter = WorkflowSubmitter::new(api.clone());

        let err = submitter.delete("default", "addon-wf-test").await.unwrap_err();
        assert!(matches!(err, LifecycleError::Client(_)));

        // no delete call was ever attempted
        assert_eq!(api.deletes.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
