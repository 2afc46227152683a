use crate::pipeline::{Fetched, TaskEntry};

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    AllTasks(Vec<TaskEntry>),
    SingleTask(TaskEntry),
    NotFound,
}

/// Pick every task (declared order) or the one named `task_name`.
/// Matching is exact and case-sensitive. A pipeline without tasks is
/// reported as not found.
pub fn select(fetched: Fetched, task_name: Option<&str>) -> LookupResult {
    match (fetched, task_name) {
        (Fetched::Pipeline(p), None) if p.tasks.is_empty() => LookupResult::NotFound,
        (Fetched::Pipeline(p), None) => LookupResult::AllTasks(p.tasks),
        (Fetched::Pipeline(p), Some(name)) => p
            .tasks
            .into_iter()
            .find(|t| t.name == name)
            .map_or(LookupResult::NotFound, LookupResult::SingleTask),
        (Fetched::Task(t), None) => LookupResult::AllTasks(vec![t]),
        (Fetched::Task(t), Some(name)) if t.name == name => LookupResult::SingleTask(t),
        (Fetched::Task(_), Some(_)) => LookupResult::NotFound,
    }
}
