use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// A single task within a pipeline. `body` is whatever structured content
/// the source holds for it (the resolved Task resource when one is found).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEntry {
    pub name: String,
    pub body: Value,
}

/// Pipeline with its tasks in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineDefinition {
    pub name: Option<String>,
    pub tasks: Vec<TaskEntry>,
}

/// What a source hands back: the whole pipeline, or a single entry it
/// already filtered by task name.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Pipeline(PipelineDefinition),
    Task(TaskEntry),
}

/// Split a (possibly multi-document) YAML string into values, skipping
/// empty documents.
pub fn parse_documents(content: &str, origin: &str) -> Result<Vec<Value>> {
    let mut docs = Vec::new();
    for de in serde_yaml::Deserializer::from_str(content) {
        let doc = Value::deserialize(de).map_err(|e| Error::parse(origin, e))?;
        if !doc.is_null() {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// Read and parse a declarative file.
pub async fn load_documents(path: &Path) -> Result<Vec<Value>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound { path: path.to_path_buf() });
        }
        Err(e) => return Err(e.into()),
    };
    parse_documents(&content, &path.display().to_string())
}

pub fn kind_of(doc: &Value) -> Option<&str> {
    doc.get("kind").and_then(Value::as_str)
}

pub fn metadata_name(doc: &Value) -> Option<&str> {
    doc.get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
}

/// The `(kind, name)` a pipeline task refers to through `taskRef`, if any.
pub fn task_ref(entry: &Value) -> Option<(&str, &str)> {
    let r = entry.get("taskRef")?;
    let name = r.get("name").and_then(Value::as_str)?;
    let kind = r.get("kind").and_then(Value::as_str).unwrap_or("Task");
    Some((kind, name))
}

/// Build a definition from a `kind: Pipeline` document. Bodies are the
/// inline pipeline task entries; `spec.finally` follows `spec.tasks`.
pub fn from_pipeline_resource(doc: &Value, origin: &str) -> Result<PipelineDefinition> {
    let spec = doc.get("spec");
    let mut tasks = Vec::new();
    for section in ["tasks", "finally"] {
        if let Some(seq) = spec.and_then(|s| s.get(section)).and_then(Value::as_sequence) {
            tasks.extend(entries_from(seq, origin)?);
        }
    }
    Ok(PipelineDefinition {
        name: metadata_name(doc).map(str::to_string),
        tasks,
    })
}

fn from_plain(doc: &Value, tasks: &[Value], origin: &str) -> Result<PipelineDefinition> {
    Ok(PipelineDefinition {
        name: doc.get("name").and_then(Value::as_str).map(str::to_string),
        tasks: entries_from(tasks, origin)?,
    })
}

fn entries_from(seq: &[Value], origin: &str) -> Result<Vec<TaskEntry>> {
    seq.iter()
        .enumerate()
        .map(|(i, entry)| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::parse(origin, format!("task at index {} has no name", i)))?;
            Ok(TaskEntry {
                name: name.to_string(),
                body: entry.clone(),
            })
        })
        .collect()
}

/// Find the pipeline called `name` among `docs` and resolve its task
/// references against Task resources in the same set.
pub fn find_pipeline(docs: &[Value], name: &str, origin: &str) -> Result<Option<PipelineDefinition>> {
    for doc in docs {
        let mut definition = match kind_of(doc) {
            Some("Pipeline") if metadata_name(doc) == Some(name) => from_pipeline_resource(doc, origin)?,
            None => match doc.get("tasks").and_then(Value::as_sequence) {
                Some(tasks) => {
                    // an unnamed plain document answers to any pipeline name
                    if doc.get("name").and_then(Value::as_str).is_some_and(|n| n != name) {
                        continue;
                    }
                    from_plain(doc, tasks, origin)?
                }
                None => continue,
            },
            _ => continue,
        };
        for task in &mut definition.tasks {
            if let Some(resource) = resolve_in(docs, &task.body) {
                task.body = resource.clone();
            }
        }
        return Ok(Some(definition));
    }
    Ok(None)
}

fn resolve_in<'a>(docs: &'a [Value], entry: &Value) -> Option<&'a Value> {
    let (kind, name) = task_ref(entry)?;
    docs.iter()
        .find(|d| kind_of(d) == Some(kind) && metadata_name(d) == Some(name))
}
