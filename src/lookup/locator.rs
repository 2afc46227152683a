use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// What a single `get task` invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub pipeline_name: String,
    pub task_name: Option<String>,
    pub file_path: Option<PathBuf>,
}

/// Read `<command> <pipelineName> [taskName]` out of the positionals and
/// the file path out of `--file`/`-f`. An empty `taskName` token counts as
/// absent, so the request lists every task.
pub fn locate(args: &[String], command_token: &str, flags: &HashMap<String, String>) -> Result<LookupRequest> {
    let rest = args
        .iter()
        .position(|a| a == command_token)
        .map(|i| &args[i + 1..])
        .unwrap_or_default();

    let (pipeline, task) = match rest {
        [] => (None, None),
        [p] => (Some(p), None),
        [p, t] => (Some(p), Some(t)),
        [_, _, extra, ..] => {
            return Err(Error::UnexpectedArgument { token: extra.clone() });
        }
    };

    let pipeline_name = pipeline
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::missing("pipelineName"))?
        .clone();

    let file_path = flags
        .get("file")
        .or_else(|| flags.get("f"))
        .map(PathBuf::from);

    Ok(LookupRequest {
        pipeline_name,
        task_name: task.filter(|t| !t.is_empty()).cloned(),
        file_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_pipeline_and_task_after_command_token() {
        let req = locate(&argv(&["get", "task", "build", "compile"]), "task", &HashMap::new()).unwrap();
        assert_eq!(req.pipeline_name, "build");
        assert_eq!(req.task_name.as_deref(), Some("compile"));
        assert_eq!(req.file_path, None);
    }

    #[test]
    fn task_is_optional() {
        let req = locate(&argv(&["get", "tasks", "build"]), "tasks", &HashMap::new()).unwrap();
        assert_eq!(req.task_name, None);
    }

    #[test]
    fn empty_task_token_means_list_all() {
        let req = locate(&argv(&["get", "task", "build", ""]), "task", &HashMap::new()).unwrap();
        assert_eq!(req.pipeline_name, "build");
        assert_eq!(req.task_name, None);
    }

    #[test]
    fn file_flag_and_alias() {
        let mut flags = HashMap::new();
        flags.insert("f".to_string(), "pipeline.yaml".to_string());
        let req = locate(&argv(&["get", "task", "build"]), "task", &flags).unwrap();
        assert_eq!(req.file_path, Some(PathBuf::from("pipeline.yaml")));

        flags.insert("file".to_string(), "other.yaml".to_string());
        let req = locate(&argv(&["get", "task", "build"]), "task", &flags).unwrap();
        assert_eq!(req.file_path, Some(PathBuf::from("other.yaml")));
    }

    #[test]
    fn missing_or_empty_pipeline() {
        for args in [argv(&["get", "task"]), argv(&["get", "task", ""]), argv(&["get"])] {
            let err = locate(&args, "task", &HashMap::new()).unwrap_err();
            assert!(matches!(err, Error::MissingArgument { ref name } if name == "pipelineName"));
        }
    }

    #[test]
    fn too_many_positionals() {
        let err = locate(&argv(&["get", "task", "a", "b", "c"]), "task", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedArgument { ref token } if token == "c"));
    }
}
