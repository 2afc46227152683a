//! Command routing for the shell.
//!
//! Handlers register under a route such as `/get/task`. Dispatch matches
//! the longest route prefixing the command line, splits the remaining
//! tokens into positionals and declared flags, and checks authentication.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lookup::Response;

/// Arguments as a handler sees them. `argv_no_options` starts with the
/// route segments, followed by the positionals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluatorArgs {
    pub argv_no_options: Vec<String>,
    pub parsed_options: HashMap<String, String>,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn evaluate(&self, args: EvaluatorArgs) -> Result<Response>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    pub name: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// long name without dashes, also the key in `parsed_options`
    pub name: &'static str,
    pub alias: Option<char>,
    pub docs: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub command: String,
    pub required: Vec<Positional>,
    pub optional: Vec<Positional>,
    pub flags: Vec<Flag>,
}

impl Usage {
    fn flag(&self, token: &str) -> Option<&Flag> {
        if let Some(long) = token.strip_prefix("--") {
            self.flags.iter().find(|f| f.name == long)
        } else {
            let mut chars = token.strip_prefix('-')?.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.flags.iter().find(|f| f.alias == Some(c)),
                _ => None,
            }
        }
    }

    /// One-line synopsis, e.g. `task <pipelineName> [taskName] [--file|-f <value>]`.
    pub fn synopsis(&self) -> String {
        let mut parts = vec![self.command.clone()];
        parts.extend(self.required.iter().map(|p| format!("<{}>", p.name)));
        parts.extend(self.optional.iter().map(|p| format!("[{}]", p.name)));
        for f in &self.flags {
            match f.alias {
                Some(a) => parts.push(format!("[--{}|-{} <value>]", f.name, a)),
                None => parts.push(format!("[--{} <value>]", f.name)),
            }
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct CommandOptions {
    pub usage: Usage,
    pub no_auth_ok: bool,
}

/// Per-invocation caller state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    pub authenticated: bool,
}

struct Registration {
    segments: Vec<String>,
    handler: Arc<dyn CommandHandler>,
    options: CommandOptions,
}

#[derive(Default)]
pub struct CommandRegistrar {
    routes: BTreeMap<String, Registration>,
}

impl CommandRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `route`. Registering the same route again replaces it.
    pub fn listen(&mut self, route: &str, handler: Arc<dyn CommandHandler>, options: CommandOptions) {
        let segments: Vec<String> = route.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect();
        debug!(route, "registering command");
        self.routes.insert(
            segments.join("/"),
            Registration { segments, handler, options },
        );
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn usage(&self, route: &str) -> Option<&Usage> {
        let key = route.trim_matches('/');
        self.routes.get(key).map(|r| &r.options.usage)
    }

    fn find(&self, argv: &[String]) -> Option<&Registration> {
        self.routes
            .values()
            .filter(|r| argv.len() >= r.segments.len() && argv[..r.segments.len()] == r.segments[..])
            .max_by_key(|r| r.segments.len())
    }

    pub async fn dispatch(&self, argv: &[String], session: Session) -> Result<Response> {
        let registration = self.find(argv).ok_or_else(|| Error::UnknownCommand {
            command: argv.join(" "),
        })?;

        if !registration.options.no_auth_ok && !session.authenticated {
            return Err(Error::Unauthenticated {
                route: format!("/{}", registration.segments.join("/")),
            });
        }

        let args = split_args(
            &registration.segments,
            &argv[registration.segments.len()..],
            &registration.options.usage,
        )?;
        debug!(?args, "dispatching");
        registration.handler.evaluate(args).await
    }
}

fn split_args(segments: &[String], rest: &[String], usage: &Usage) -> Result<EvaluatorArgs> {
    let mut args = EvaluatorArgs {
        argv_no_options: segments.to_vec(),
        parsed_options: HashMap::new(),
    };

    let mut tokens = rest.iter();
    while let Some(token) = tokens.next() {
        if !token.starts_with('-') || token == "-" {
            args.argv_no_options.push(token.clone());
            continue;
        }
        let (flag_token, inline) = match token.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
            _ => (token.as_str(), None),
        };
        let flag = usage
            .flag(flag_token)
            .ok_or_else(|| Error::UnexpectedArgument { token: token.clone() })?;
        let value = match inline {
            Some(v) => v,
            None => tokens.next().cloned().ok_or_else(|| Error::missing(flag.name))?,
        };
        args.parsed_options.insert(flag.name.to_string(), value);
    }
    Ok(args)
}
