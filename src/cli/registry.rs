use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    /// Alternative spellings accepted at the prompt, e.g. `today` for
    /// `dashboard`. Help listings only show the canonical name.
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            usage,
            handler,
        }
    }
}

/// Command table that resolves aliases and remembers registration order for
/// help listings.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    aliases: HashMap<&'static str, &'static str>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        for alias in entry.aliases {
            self.aliases.insert(alias, name);
        }
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    fn resolve<'a>(&self, name: &'a str) -> &'a str {
        self.aliases.get(name).copied().unwrap_or(name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(self.resolve(name))
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    /// Canonical names in registration order. Aliases are left out so tab
    /// completion and suggestions steer toward the documented spellings.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_the_canonical_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new(
            "dashboard",
            &["today"],
            "Show today's numbers",
            "dashboard",
            noop,
        ));

        assert_eq!(registry.get("today").map(|e| e.name), Some("dashboard"));
        assert!(registry.handler("today").is_some());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["dashboard"]);
    }

    #[test]
    fn listing_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("b", &[], "second", "b", noop));
        registry.register(CommandEntry::new("a", &[], "first", "a", noop));

        let listed: Vec<_> = registry.list().iter().map(|entry| entry.name).collect();
        assert_eq!(listed, vec!["b", "a"]);
    }
}
