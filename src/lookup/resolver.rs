use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::lookup::LookupRequest;
use crate::pipeline::{find_pipeline, load_documents, Fetched};
use crate::store::PipelineStore;

/// Chooses between a local file and the remote store. A file path always
/// wins; the store is not consulted when one is given.
#[derive(Clone)]
pub struct SourceResolver {
    store: Arc<dyn PipelineStore>,
}

impl SourceResolver {
    pub fn new(store: Arc<dyn PipelineStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, request: &LookupRequest) -> Result<Option<Fetched>> {
        match &request.file_path {
            Some(path) => {
                info!(file = %path.display(), pipeline = %request.pipeline_name, "reading pipeline from file");
                let docs = load_documents(path).await?;
                debug!(documents = docs.len(), "parsed file");
                let origin = path.display().to_string();
                Ok(find_pipeline(&docs, &request.pipeline_name, &origin)?.map(Fetched::Pipeline))
            }
            None => {
                info!(pipeline = %request.pipeline_name, "fetching pipeline from store");
                self.store
                    .fetch(&request.pipeline_name, request.task_name.as_deref())
                    .await
            }
        }
    }
}
