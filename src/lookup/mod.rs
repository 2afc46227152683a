//! `get task` / `get tasks`: locate → resolve → select → shape.

pub mod locator;
pub mod resolver;
pub mod selector;
pub mod shaper;

use async_trait::async_trait;
use tracing::debug;

pub use locator::{locate, LookupRequest};
pub use resolver::SourceResolver;
pub use selector::{select, LookupResult};
pub use shaper::{shape, EntityEnvelope, Response};

use crate::commands::{CommandHandler, EvaluatorArgs, Flag, Positional, Usage};
use crate::error::Result;

/// Usage shared by both spellings of the command.
pub fn usage(command: &str) -> Usage {
    Usage {
        command: command.to_string(),
        required: vec![Positional { name: "pipelineName", docs: "Name of the pipeline" }],
        optional: vec![Positional { name: "taskName", docs: "Name of the task" }],
        flags: vec![Flag { name: "file", alias: Some('f'), docs: "Path to resource specification" }],
    }
}

/// One handler for both `task` and `tasks`; `label` is the command token
/// the positionals are read after.
pub struct GetTask {
    label: &'static str,
    resolver: SourceResolver,
}

impl GetTask {
    pub fn new(label: &'static str, resolver: SourceResolver) -> Self {
        Self { label, resolver }
    }

    pub async fn run(&self, args: &EvaluatorArgs) -> Result<Response> {
        let request = locate(&args.argv_no_options, self.label, &args.parsed_options)?;
        debug!(?request, "located");

        let result = match self.resolver.resolve(&request).await? {
            Some(fetched) => select(fetched, request.task_name.as_deref()),
            None => LookupResult::NotFound,
        };
        shape(result, &request.pipeline_name)
    }
}

#[async_trait]
impl CommandHandler for GetTask {
    async fn evaluate(&self, args: EvaluatorArgs) -> Result<Response> {
        self.run(&args).await
    }
}
