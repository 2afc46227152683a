use serde::Serialize;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::lookup::LookupResult;
use crate::pipeline::TaskEntry;

/// Typed wrapper the renderer shows as a single resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub is_entity: bool,
    pub pretty_type: String,
    pub name: String,
    pub package_name: String,
    pub content_type: String,
    pub content: Value,
}

impl EntityEnvelope {
    pub fn task(entry: TaskEntry, pipeline_name: &str) -> Self {
        Self {
            kind: "custom".to_string(),
            is_entity: true,
            pretty_type: "task".to_string(),
            name: entry.name,
            package_name: pipeline_name.to_string(),
            content_type: "yaml".to_string(),
            content: entry.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    List(Vec<TaskEntry>),
    Entity(EntityEnvelope),
}

pub fn shape(result: LookupResult, pipeline_name: &str) -> Result<Response> {
    match result {
        LookupResult::NotFound => Err(Error::EntityNotFound),
        LookupResult::AllTasks(tasks) => Ok(Response::List(tasks)),
        LookupResult::SingleTask(entry) => Ok(Response::Entity(EntityEnvelope::task(entry, pipeline_name))),
    }
}
