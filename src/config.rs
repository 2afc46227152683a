use clap::ValueEnum;

/// How to reach the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// kubectl binary (name on PATH or absolute path)
    pub kubectl: String,
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            namespace: None,
            context: None,
            timeout_secs: Some(30),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Name,
}

/// Everything a run needs, assembled once from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub output: OutputFormat,
    pub verbose: bool,
}
