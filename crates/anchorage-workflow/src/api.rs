//! Dynamic workflow resource API
//!
//! `WorkflowApi` abstracts namespaced create/get/delete of the Argo
//! Workflow kind so the lifecycle can run against a real cluster or an
//! in-memory fake. The kube-backed implementation addresses the kind
//! through a dynamic `ApiResource` rather than a typed client; the
//! workflow body stays opaque end to end.

use crate::error::{LifecycleError, Result};
use anchorage_crd::{
    WorkflowResource, WORKFLOW_API_VERSION, WORKFLOW_GROUP, WORKFLOW_KIND, WORKFLOW_PLURAL,
    WORKFLOW_VERSION,
};
use async_trait::async_trait;
use kube::api::{Api, DeleteParams, PostParams};
use kube::core::{ApiResource, DynamicObject};
use kube::{Client, Error as KubeError};
use tracing::{error, info};
use uuid::Uuid;

/// Namespaced create/get/delete of Argo Workflow resources.
///
/// Implementations must be safe for concurrent use; one instance is
/// typically shared across every lifecycle the reconciler drives.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Submit a workflow resource into a namespace.
    ///
    /// Submitting an exact name that already exists is a distinguishable
    /// `AlreadyExists` error, never a silent success.
    async fn create(
        &self,
        namespace: &str,
        resource: &WorkflowResource,
    ) -> Result<WorkflowResource>;

    /// Fetch a workflow resource by name
    async fn get(&self, namespace: &str, name: &str) -> Result<WorkflowResource>;

    /// Delete a workflow resource by name
    async fn delete(&self, namespace: &str, name: &str) -> Result<()>;
}

/// `ApiResource` describing the Argo Workflow kind
pub fn workflow_api_resource() -> ApiResource {
    ApiResource {
        group: WORKFLOW_GROUP.to_string(),
        version: WORKFLOW_VERSION.to_string(),
        kind: WORKFLOW_KIND.to_string(),
        api_version: WORKFLOW_API_VERSION.to_string(),
        plural: WORKFLOW_PLURAL.to_string(),
    }
}

/// `WorkflowApi` backed by the cluster's dynamic resource API
pub struct KubeWorkflowApi {
    client: Client,
    resource: ApiResource,
}

impl KubeWorkflowApi {
    /// Build against an existing cluster client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            resource: workflow_api_resource(),
        }
    }

    /// Build a client from the ambient kubeconfig or in-cluster
    /// environment
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| LifecycleError::Client(format!("failed to create cluster client: {e}")))?;
        Ok(Self::new(client))
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }
}

fn to_dynamic(resource: &WorkflowResource) -> DynamicObject {
    let metadata = kube::core::ObjectMeta {
        name: if resource.metadata.name.is_empty() {
            None
        } else {
            Some(resource.metadata.name.clone())
        },
        generate_name: resource.metadata.generate_name.clone(),
        namespace: resource.metadata.namespace.clone(),
        labels: if resource.metadata.labels.is_empty() {
            None
        } else {
            Some(
                resource
                    .metadata
                    .labels
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        },
        ..Default::default()
    };

    DynamicObject {
        types: Some(kube::core::TypeMeta {
            api_version: resource.type_meta.api_version.clone(),
            kind: resource.type_meta.kind.clone(),
        }),
        metadata,
        data: serde_json::json!({ "spec": resource.spec }),
    }
}

fn from_dynamic(obj: DynamicObject) -> WorkflowResource {
    let mut resource =
        WorkflowResource::new(obj.metadata.name.clone().unwrap_or_default(), String::new());
    // keep an absent namespace absent so validation still catches it
    resource.metadata.namespace = obj.metadata.namespace.clone();
    resource.metadata.generate_name = obj.metadata.generate_name.clone();
    resource.metadata.resource_version = obj.metadata.resource_version.clone();
    resource.metadata.uid = obj
        .metadata
        .uid
        .as_deref()
        .and_then(|u| Uuid::parse_str(u).ok());
    if let Some(labels) = obj.metadata.labels {
        resource.metadata.labels = labels.into_iter().collect();
    }
    if let Some(spec) = obj.data.get("spec") {
        resource.spec = spec.clone();
    }
    resource
}

#[async_trait]
impl WorkflowApi for KubeWorkflowApi {
    async fn create(
        &self,
        namespace: &str,
        resource: &WorkflowResource,
    ) -> Result<WorkflowResource> {
        let name = resource.identity().to_string();
        let obj = to_dynamic(resource);

        info!("submitting workflow '{}' in namespace '{}'", name, namespace);
        match self.api(namespace).create(&PostParams::default(), &obj).await {
            Ok(created) => {
                info!(
                    "created workflow '{}' (resourceVersion: {:?})",
                    created.metadata.name.as_deref().unwrap_or(&name),
                    created.metadata.resource_version
                );
                Ok(from_dynamic(created))
            }
            Err(KubeError::Api(ae)) if ae.code == 409 => {
                error!(
                    "workflow '{}' already exists in namespace '{}'",
                    name, namespace
                );
                Err(LifecycleError::AlreadyExists(name))
            }
            Err(e) => {
                error!("failed to create workflow '{}': {}", name, e);
                Err(LifecycleError::Submission {
                    name,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<WorkflowResource> {
        match self.api(namespace).get(name).await {
            Ok(obj) => Ok(from_dynamic(obj)),
            Err(KubeError::Api(ae)) if ae.code == 404 => {
                Err(LifecycleError::NotFound(name.to_string()))
            }
            Err(e) => Err(LifecycleError::Client(format!(
                "failed to get workflow '{name}': {e}"
            ))),
        }
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        match self
            .api(namespace)
            .delete(name, &DeleteParams::default())
            .await
        {
            Ok(_) => {
                info!("deleted workflow '{}' from namespace '{}'", name, namespace);
                Ok(())
            }
            Err(KubeError::Api(ae)) if ae.code == 404 => {
                Err(LifecycleError::NotFound(name.to_string()))
            }
            Err(e) => {
                error!("failed to delete workflow '{}': {}", name, e);
                Err(LifecycleError::Deletion {
                    name: name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_api_resource() {
        let resource = workflow_api_resource();
        assert_eq!(resource.group, "argoproj.io");
        assert_eq!(resource.version, "v1alpha1");
        assert_eq!(resource.kind, "Workflow");
        assert_eq!(resource.plural, "workflows");
        assert_eq!(resource.api_version, "argoproj.io/v1alpha1");
    }

    #[test]
    fn test_to_dynamic_exact_name() {
        let resource = WorkflowResource::new("addon-wf-test", "default")
            .with_label("app", "my-app")
            .with_spec(serde_json::json!({"entrypoint": "main"}));

        let obj = to_dynamic(&resource);
        assert_eq!(obj.metadata.name, Some("addon-wf-test".to_string()));
        assert_eq!(obj.metadata.namespace, Some("default".to_string()));
        assert!(obj.metadata.generate_name.is_none());
        assert_eq!(
            obj.types.as_ref().unwrap().api_version,
            "argoproj.io/v1alpha1"
        );
        assert_eq!(obj.data["spec"]["entrypoint"], "main");
    }

    #[test]
    fn test_to_dynamic_generate_name() {
        let resource = WorkflowResource::generated("addon-wf-test-", "default");

        let obj = to_dynamic(&resource);
        assert!(obj.metadata.name.is_none());
        assert_eq!(
            obj.metadata.generate_name,
            Some("addon-wf-test-".to_string())
        );
    }

    #[test]
    fn test_from_dynamic_keeps_absent_namespace_absent() {
        let obj = DynamicObject {
            types: Some(kube::core::TypeMeta {
                api_version: "argoproj.io/v1alpha1".to_string(),
                kind: "Workflow".to_string(),
            }),
            metadata: kube::core::ObjectMeta {
                name: Some("addon-wf-test".to_string()),
                ..Default::default()
            },
            data: serde_json::json!({}),
        };

        let resource = from_dynamic(obj);
        assert_eq!(resource.metadata.namespace, None);
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_dynamic_round_trip() {
        let resource = WorkflowResource::new("addon-wf-test", "default")
            .with_label("app", "my-app")
            .with_spec(serde_json::json!({"entrypoint": "main"}));

        let restored = from_dynamic(to_dynamic(&resource));
        assert_eq!(restored.metadata.name, "addon-wf-test");
        assert_eq!(restored.metadata.namespace, Some("default".to_string()));
        assert_eq!(
            restored.metadata.labels.get("app"),
            Some(&"my-app".to_string())
        );
        assert_eq!(restored.spec, resource.spec);
    }
}
