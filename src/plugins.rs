use std::sync::Arc;

use crate::commands::{CommandOptions, CommandRegistrar};
use crate::lookup::{usage, GetTask, SourceResolver};

/// A feature set that contributes commands to the shell
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;
    fn register(&self, registrar: &mut CommandRegistrar);
}

/// Registers `get task` and `get tasks`; both run without authentication
pub struct TaskPlugin {
    resolver: SourceResolver,
}

impl TaskPlugin {
    pub fn new(resolver: SourceResolver) -> Self {
        Self { resolver }
    }
}

impl Plugin for TaskPlugin {
    fn name(&self) -> &str { "tasks" }

    fn register(&self, registrar: &mut CommandRegistrar) {
        for label in ["task", "tasks"] {
            registrar.listen(
                &format!("/get/{}", label),
                Arc::new(GetTask::new(label, self.resolver.clone())),
                CommandOptions { usage: usage(label), no_auth_ok: true },
            );
        }
    }
}

/// Build a registrar with every plugin's commands installed
pub fn install(plugins: &[Box<dyn Plugin>]) -> CommandRegistrar {
    let mut registrar = CommandRegistrar::new();
    for p in plugins {
        tracing::debug!(plugin = p.name(), "installing plugin");
        p.register(&mut registrar);
    }
    registrar
}
