use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipetask::backends::LocalBackend;
use pipetask::cli::Opts;
use pipetask::commands::Session;
use pipetask::lookup::SourceResolver;
use pipetask::output::render;
use pipetask::plugins::{install, Plugin, TaskPlugin};
use pipetask::store::KubectlStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let config = opts.config();

    // Initialize logging; stdout is reserved for rendered output
    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let store = KubectlStore::new(Arc::new(LocalBackend::new()), config.cluster.clone());
    let resolver = SourceResolver::new(Arc::new(store));
    let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(TaskPlugin::new(resolver))];
    let registrar = install(&plugins);

    match registrar.dispatch(&opts.command, Session::default()).await {
        Ok(response) => {
            print!("{}", render(&response, config.output)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {} (code {})", e, e.code());
            if let pipetask::Error::UnknownCommand { .. } = e {
                for route in registrar.routes() {
                    if let Some(usage) = registrar.usage(route) {
                        let prefix = route.rsplit_once('/').map(|(p, _)| p.replace('/', " ")).unwrap_or_default();
                        eprintln!("  {} {}", prefix, usage.synopsis());
                    }
                }
            }
            std::process::exit(1);
        }
    }
}
