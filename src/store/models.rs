/// Data models for the command registry
///
/// The registry is the whole persisted state: a map from command name to
/// its entry. Aliases live on the entry that owns them and must stay
/// globally unique, disjoint from all command names.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Built-in subcommand words (including short forms). These always win
/// dispatch, so they may never be used as a command name or alias.
pub const RESERVED_NAMES: &[&str] = &[
    "save", "s", "update", "u", "delete", "d", "rename", "r", "copy", "c", "alias", "a", "append",
    "pop", "list", "ls", "replay", "install", "help", "version",
];

/// Check whether a token is a reserved subcommand word
pub fn is_reserved(token: &str) -> bool {
    RESERVED_NAMES.contains(&token)
}

/// A named entry: one or more template steps plus the aliases bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub steps: Vec<String>,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl CommandEntry {
    /// Entry holding a single template step and no aliases
    pub fn single(template: impl Into<String>) -> Self {
        Self {
            steps: vec![template.into()],
            aliases: BTreeSet::new(),
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.steps.len() > 1
    }
}

/// On-disk entry shapes. Older versions of the config file stored a bare
/// template string or a bare list of steps; both migrate to the canonical
/// `{steps, aliases}` form on load.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Full {
        steps: Vec<String>,
        #[serde(default)]
        aliases: BTreeSet<String>,
    },
    Steps(Vec<String>),
    Single(String),
}

impl From<RawEntry> for CommandEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Full { steps, aliases } => Self { steps, aliases },
            RawEntry::Steps(steps) => Self {
                steps,
                aliases: BTreeSet::new(),
            },
            RawEntry::Single(template) => Self::single(template),
        }
    }
}

/// The whole persisted state: command name -> entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    pub(super) commands: BTreeMap<String, CommandEntry>,
}

impl Registry {
    /// Build a registry from raw on-disk entries, migrating legacy shapes
    /// and dropping anything that violates the registry invariants instead
    /// of trusting the file structure.
    pub fn from_raw(raw: BTreeMap<String, RawEntry>) -> Self {
        let mut commands: BTreeMap<String, CommandEntry> = BTreeMap::new();

        for (name, value) in raw {
            let entry = CommandEntry::from(value);
            if entry.steps.is_empty() {
                tracing::warn!("dropping '{}': entry has no steps", name);
                continue;
            }
            commands.insert(name, entry);
        }

        // Aliases must be unique and disjoint from command names. The map
        // iterates in sorted order, so which duplicate survives is
        // deterministic.
        let names: BTreeSet<String> = commands.keys().cloned().collect();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for (name, entry) in commands.iter_mut() {
            entry.aliases.retain(|alias| {
                let ok = !names.contains(alias) && seen.insert(alias.clone());
                if !ok {
                    tracing::warn!("dropping alias '{}' of '{}': already in use", alias, name);
                }
                ok
            });
        }

        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Name of the command a given alias is bound to, if any
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.commands
            .iter()
            .find(|(_, entry)| entry.aliases.contains(alias))
            .map(|(name, _)| name.as_str())
    }

    /// Whether a token is already in use as a command name or alias
    pub(super) fn is_taken(&self, token: &str) -> bool {
        self.contains(token) || self.alias_target(token).is_some()
    }

    /// Resolve a token to its target command: direct name match first,
    /// then alias lookup.
    pub fn resolve(&self, token: &str) -> Option<(&str, &CommandEntry)> {
        if let Some((name, entry)) = self.commands.get_key_value(token) {
            return Some((name.as_str(), entry));
        }
        self.commands
            .iter()
            .find(|(_, entry)| entry.aliases.contains(token))
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// All command names and aliases, in registry order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().flat_map(|(name, entry)| {
            std::iter::once(name.as_str()).chain(entry.aliases.iter().map(|a| a.as_str()))
        })
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandEntry)> {
        self.commands.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Registry {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json).unwrap();
        Registry::from_raw(raw)
    }

    #[test]
    fn test_migrates_legacy_string_entry() {
        let registry = parse(r#"{"greet": "echo hi"}"#);
        let entry = registry.get("greet").unwrap();
        assert_eq!(entry.steps, vec!["echo hi"]);
        assert!(entry.aliases.is_empty());
    }

    #[test]
    fn test_migrates_legacy_list_entry() {
        let registry = parse(r#"{"deploy": ["git pull", "npm install"]}"#);
        let entry = registry.get("deploy").unwrap();
        assert_eq!(entry.steps, vec!["git pull", "npm install"]);
        assert!(entry.is_sequence());
    }

    #[test]
    fn test_parses_canonical_entry() {
        let registry =
            parse(r#"{"serve": {"steps": ["npm start"], "aliases": ["dev", "up"]}}"#);
        let entry = registry.get("serve").unwrap();
        assert_eq!(entry.steps, vec!["npm start"]);
        assert!(entry.aliases.contains("dev"));
        assert!(entry.aliases.contains("up"));
    }

    #[test]
    fn test_drops_entry_without_steps() {
        let registry = parse(r#"{"empty": {"steps": []}, "ok": "echo hi"}"#);
        assert!(registry.get("empty").is_none());
        assert!(registry.get("ok").is_some());
    }

    #[test]
    fn test_drops_alias_that_shadows_a_name() {
        let registry = parse(
            r#"{
                "build": {"steps": ["make"], "aliases": ["serve"]},
                "serve": "npm start"
            }"#,
        );
        assert!(registry.get("build").unwrap().aliases.is_empty());
        assert_eq!(registry.resolve("serve").unwrap().0, "serve");
    }

    #[test]
    fn test_drops_duplicate_alias_deterministically() {
        let registry = parse(
            r#"{
                "alpha": {"steps": ["echo a"], "aliases": ["x"]},
                "beta": {"steps": ["echo b"], "aliases": ["x"]}
            }"#,
        );
        // Sorted iteration: alpha keeps the alias, beta loses it.
        assert!(registry.get("alpha").unwrap().aliases.contains("x"));
        assert!(registry.get("beta").unwrap().aliases.is_empty());
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let registry =
            parse(r#"{"serve": {"steps": ["npm start"], "aliases": ["dev"]}}"#);
        assert_eq!(registry.resolve("serve").unwrap().0, "serve");
        assert_eq!(registry.resolve("dev").unwrap().0, "serve");
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_tokens_cover_names_and_aliases() {
        let registry =
            parse(r#"{"serve": {"steps": ["npm start"], "aliases": ["dev"]}}"#);
        let tokens: Vec<&str> = registry.tokens().collect();
        assert_eq!(tokens, vec!["serve", "dev"]);
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("save"));
        assert!(is_reserved("ls"));
        assert!(!is_reserved("deploy"));
    }
}
