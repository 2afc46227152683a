//! Remote pipeline store backed by a Kubernetes/Tekton control plane.
//!
//! Resources are read through the `kubectl` binary so that whatever
//! kubeconfig, context and credentials the user already has are honoured.

use async_trait::async_trait;
use regex::Regex;
use serde_yaml::Value;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::backends::Backend;
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::pipeline::parser::{from_pipeline_resource, task_ref};
use crate::pipeline::{Fetched, TaskEntry};

static NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(NotFound\)").expect("static regex"));

/// A source of pipeline definitions keyed by pipeline name.
#[async_trait]
pub trait PipelineStore: Send + Sync {
    /// `Ok(None)` means the pipeline (or the requested task) does not exist.
    async fn fetch(&self, pipeline: &str, task: Option<&str>) -> Result<Option<Fetched>>;
}

pub struct KubectlStore {
    backend: Arc<dyn Backend>,
    config: ClusterConfig,
}

impl KubectlStore {
    pub fn new(backend: Arc<dyn Backend>, config: ClusterConfig) -> Self {
        Self { backend, config }
    }

    fn args_for(&self, kind: &str, name: &str) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            kind.to_lowercase(),
            name.to_string(),
            "-o".to_string(),
            "yaml".to_string(),
        ];
        if let Some(ns) = &self.config.namespace {
            args.push("--namespace".to_string());
            args.push(ns.clone());
        }
        if let Some(ctx) = &self.config.context {
            args.push("--context".to_string());
            args.push(ctx.clone());
        }
        args
    }

    /// Fetch one resource. Absent when the control plane reports NotFound.
    async fn get_resource(&self, kind: &str, name: &str) -> Result<Option<Value>> {
        let args = self.args_for(kind, name);
        debug!(kubectl = %self.config.kubectl, ?args, "querying control plane");
        let out = self
            .backend
            .run(&self.config.kubectl, &args, self.config.timeout_secs)
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{:#}", e)))?;

        if !out.success() {
            if NOT_FOUND.is_match(&out.stderr) {
                return Ok(None);
            }
            let stderr = out.stderr.trim();
            return Err(Error::SourceUnavailable(if stderr.is_empty() {
                format!("{} exited with {:?}", self.config.kubectl, out.code)
            } else {
                stderr.to_string()
            }));
        }

        let doc: Value = serde_yaml::from_str(&out.stdout)
            .map_err(|e| Error::SourceUnavailable(format!("unreadable {} {}: {}", kind, name, e)))?;
        Ok(Some(doc))
    }

    /// Replace an entry's inline body by the Task resource it references.
    /// A reference that cannot be found keeps the inline entry.
    async fn resolve(&self, mut entry: TaskEntry) -> Result<TaskEntry> {
        let reference = task_ref(&entry.body).map(|(k, n)| (k.to_string(), n.to_string()));
        let Some((kind, name)) = reference else {
            return Ok(entry);
        };
        match self.get_resource(&kind, &name).await? {
            Some(resource) => entry.body = resource,
            None => warn!(task = %entry.name, reference = %name, "referenced {} not found, keeping inline entry", kind),
        }
        Ok(entry)
    }
}

#[async_trait]
impl PipelineStore for KubectlStore {
    async fn fetch(&self, pipeline: &str, task: Option<&str>) -> Result<Option<Fetched>> {
        let Some(doc) = self.get_resource("Pipeline", pipeline).await? else {
            return Ok(None);
        };
        let mut definition = from_pipeline_resource(&doc, pipeline)?;

        match task {
            Some(wanted) => {
                let Some(pos) = definition.tasks.iter().position(|t| t.name == wanted) else {
                    return Ok(None);
                };
                let entry = definition.tasks.swap_remove(pos);
                Ok(Some(Fetched::Task(self.resolve(entry).await?)))
            }
            None => {
                let mut resolved = Vec::with_capacity(definition.tasks.len());
                for entry in definition.tasks {
                    resolved.push(self.resolve(entry).await?);
                }
                definition.tasks = resolved;
                Ok(Some(Fetched::Pipeline(definition)))
            }
        }
    }
}
