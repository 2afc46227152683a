use clap::Parser;

use crate::config::{ClusterConfig, Config, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "pipetask", version, about = "Look up tasks of a pipeline from a cluster or a file")]
pub struct Opts {
    /// kubectl binary used to reach the cluster
    #[arg(long, env = "PIPETASK_KUBECTL", default_value = "kubectl")]
    pub kubectl: String,

    #[arg(short, long, env = "PIPETASK_NAMESPACE")]
    pub namespace: Option<String>,

    /// kubeconfig context
    #[arg(long, env = "PIPETASK_CONTEXT")]
    pub context: Option<String>,

    /// Seconds before a cluster query is abandoned (0 disables)
    #[arg(long, env = "PIPETASK_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    #[arg(short, long, value_enum, default_value = "yaml")]
    pub output: OutputFormat,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command line handed to the shell, e.g. `get task build-pipeline compile -f pipeline.yaml`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

impl Opts {
    pub fn config(&self) -> Config {
        Config {
            cluster: ClusterConfig {
                kubectl: self.kubectl.clone(),
                namespace: self.namespace.clone(),
                context: self.context.clone(),
                timeout_secs: (self.timeout > 0).then_some(self.timeout),
            },
            output: self.output,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_valid() {
        Opts::command().debug_assert();
    }

    #[test]
    fn shell_flags_after_command_are_left_to_the_shell() {
        let opts = Opts::try_parse_from([
            "pipetask", "-n", "ci", "-o", "json", "get", "task", "build-pipeline", "-f", "p.yaml",
        ])
        .unwrap();
        assert_eq!(opts.namespace.as_deref(), Some("ci"));
        assert_eq!(opts.output, OutputFormat::Json);
        assert_eq!(opts.command, vec!["get", "task", "build-pipeline", "-f", "p.yaml"]);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let opts = Opts::try_parse_from(["pipetask", "--timeout", "0", "get", "tasks", "p"]).unwrap();
        let config = opts.config();
        assert_eq!(config.cluster.timeout_secs, None);
        assert_eq!(config.cluster.kubectl, "kubectl");
    }
}
