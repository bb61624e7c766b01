//! In-memory workflow API
//!
//! `MemoryWorkflowApi` mirrors the cluster API's name semantics so tests
//! and standalone runs exercise the same code paths: exact names
//! conflict, generate-name prefixes receive a random suffix, and deletes
//! of absent names report not-found.

use crate::api::WorkflowApi;
use crate::error::{LifecycleError, Result};
use anchorage_crd::{CrdError, WorkflowResource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory `WorkflowApi` for tests and standalone use
#[derive(Debug, Default)]
pub struct MemoryWorkflowApi {
    workflows: RwLock<HashMap<(String, String), WorkflowResource>>,
}

impl MemoryWorkflowApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored workflows across all namespaces
    pub fn len(&self) -> usize {
        self.workflows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored workflow names in a namespace matching a prefix
    pub fn names_with_prefix(&self, namespace: &str, prefix: &str) -> Vec<String> {
        self.workflows
            .read()
            .unwrap()
            .keys()
            .filter(|(ns, name)| ns == namespace && name.starts_with(prefix))
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[async_trait]
impl WorkflowApi for MemoryWorkflowApi {
    async fn create(
        &self,
        namespace: &str,
        resource: &WorkflowResource,
    ) -> Result<WorkflowResource> {
        let name = if !resource.metadata.name.is_empty() {
            resource.metadata.name.clone()
        } else if let Some(prefix) = &resource.metadata.generate_name {
            // five character suffix, matching the cluster's behavior
            let suffix = Uuid::new_v4().simple().to_string();
            format!("{prefix}{}", &suffix[..5])
        } else {
            return Err(LifecycleError::Validation(CrdError::MissingField(
                "metadata.name".to_string(),
            )));
        };

        let mut workflows = self.workflows.write().unwrap();
        let key = (namespace.to_string(), name.clone());
        if workflows.contains_key(&key) {
            return Err(LifecycleError::AlreadyExists(name));
        }

        let mut stored = resource.clone();
        stored.metadata.name = name;
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.uid = Some(Uuid::new_v4());
        workflows.insert(key, stored.clone());
        Ok(stored)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<WorkflowResource> {
        self.workflows
            .read()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| LifecycleError::NotFound(name.to_string()))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        match self
            .workflows
            .write()
            .unwrap()
            .remove(&(namespace.to_string(), name.to_string()))
        {
            Some(_) => Ok(()),
            None => Err(LifecycleError::NotFound(name.to_string())),
        }
    }
}
