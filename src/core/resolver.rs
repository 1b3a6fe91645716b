/// Name resolution and step rendering
///
/// Turns the first token of a bare invocation into a stored command and
/// renders every step up front, so argument problems surface before
/// anything has run.

use crate::core::template;
use crate::error::{EzError, Result};
use crate::store::{CommandEntry, Registry};

/// A resolved invocation target
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub name: &'a str,
    pub entry: &'a CommandEntry,
}

/// Resolves user-typed tokens against the registry
pub struct Resolver<'a> {
    registry: &'a Registry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Resolve a token: direct command name first, then alias lookup
    pub fn resolve(&self, token: &str) -> Result<Resolution<'a>> {
        self.registry
            .resolve(token)
            .map(|(name, entry)| Resolution { name, entry })
            .ok_or_else(|| EzError::UnknownCommand(token.to_string()))
    }

    /// Render every step of the target with the invocation arguments.
    /// The first missing argument aborts the whole invocation; nothing
    /// gets executed partially rendered.
    pub fn render_steps(&self, entry: &CommandEntry, args: &[String]) -> Result<Vec<String>> {
        entry
            .steps
            .iter()
            .map(|step| template::render(step, args))
            .collect()
    }
}
