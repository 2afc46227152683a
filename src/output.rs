use anyhow::Context;

use crate::config::OutputFormat;
use crate::lookup::Response;

/// Render a response for the terminal.
pub fn render(response: &Response, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(response).context("failed to render YAML")?,
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(response).context("failed to render JSON")?;
            s.push('\n');
            s
        }
        OutputFormat::Name => {
            let names: Vec<&str> = match response {
                Response::List(tasks) => tasks.iter().map(|t| t.name.as_str()).collect(),
                Response::Entity(env) => vec![env.name.as_str()],
            };
            let mut s = names.join("\n");
            s.push('\n');
            s
        }
    };
    Ok(text)
}
