pub mod parser;

pub use parser::{find_pipeline, load_documents, parse_documents, Fetched, PipelineDefinition, TaskEntry};
