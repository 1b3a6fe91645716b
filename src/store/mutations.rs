/// Registry mutators
///
/// Every operation validates first and touches the map only after all
/// checks pass, so a failed call leaves the registry exactly as it was.

use crate::error::{EzError, Result};
use crate::store::models::{is_reserved, CommandEntry, Registry};
use std::collections::BTreeSet;

impl Registry {
    /// Check that a token can become a new command name or alias
    pub fn ensure_available(&self, token: &str) -> Result<()> {
        if is_reserved(token) {
            return Err(EzError::ReservedName(token.to_string()));
        }
        if self.is_taken(token) {
            return Err(EzError::NameConflict(token.to_string()));
        }
        Ok(())
    }

    /// Create a new single-step command
    pub fn save_command(&mut self, name: &str, template: &str) -> Result<()> {
        self.ensure_available(name)?;
        self.commands
            .insert(name.to_string(), CommandEntry::single(template));
        Ok(())
    }

    /// Replace an existing command's steps with a single new template.
    /// Aliases are untouched; a prior sequence collapses to one step.
    pub fn update_command(&mut self, name: &str, template: &str) -> Result<()> {
        let entry = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EzError::NotFound(name.to_string()))?;
        entry.steps = vec![template.to_string()];
        Ok(())
    }

    /// Remove a command; its aliases go with it
    pub fn delete_command(&mut self, name: &str) -> Result<()> {
        self.commands
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| EzError::NotFound(name.to_string()))
    }

    /// Move a command to a new name, carrying steps and aliases.
    /// Renaming a command to itself is a no-op.
    pub fn rename_command(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.commands.contains_key(old) {
            return Err(EzError::NotFound(old.to_string()));
        }
        if new == old {
            return Ok(());
        }
        self.ensure_available(new)?;
        if let Some(entry) = self.commands.remove(old) {
            self.commands.insert(new.to_string(), entry);
        }
        Ok(())
    }

    /// Duplicate a command's steps under a new name. Aliases are not
    /// copied; they must stay bound to exactly one command.
    pub fn copy_command(&mut self, old: &str, new: &str) -> Result<()> {
        let entry = self
            .commands
            .get(old)
            .ok_or_else(|| EzError::NotFound(old.to_string()))?;
        let steps = entry.steps.clone();
        self.ensure_available(new)?;
        self.commands.insert(
            new.to_string(),
            CommandEntry {
                steps,
                aliases: BTreeSet::new(),
            },
        );
        Ok(())
    }

    /// Append a template as a new final step
    pub fn append_step(&mut self, name: &str, template: &str) -> Result<()> {
        let entry = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EzError::NotFound(name.to_string()))?;
        entry.steps.push(template.to_string());
        Ok(())
    }

    /// Remove the last step. Refuses to remove the only remaining step;
    /// deleting the whole command must be an explicit `delete`.
    pub fn pop_step(&mut self, name: &str) -> Result<()> {
        let entry = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EzError::NotFound(name.to_string()))?;
        if entry.steps.len() <= 1 {
            return Err(EzError::EmptySequence(name.to_string()));
        }
        entry.steps.pop();
        Ok(())
    }

    /// Bind an alias to a command
    pub fn add_alias(&mut self, name: &str, alias: &str) -> Result<()> {
        if !self.commands.contains_key(name) {
            return Err(EzError::NotFound(name.to_string()));
        }
        self.ensure_available(alias)?;
        if let Some(entry) = self.commands.get_mut(name) {
            entry.aliases.insert(alias.to_string());
        }
        Ok(())
    }

    /// Unbind an alias from a command. Removing an alias that is not
    /// bound is an error, not a no-op, so typos surface immediately.
    pub fn remove_alias(&mut self, name: &str, alias: &str) -> Result<()> {
        let entry = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EzError::NotFound(name.to_string()))?;
        if !entry.aliases.remove(alias) {
            return Err(EzError::AliasNotFound {
                command: name.to_string(),
                alias: alias.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(entries: &[(&str, &str)]) -> Registry {
        let mut registry = Registry::default();
        for (name, template) in entries {
            registry.save_command(name, template).unwrap();
        }
        registry
    }

    #[test]
    fn test_save_then_duplicate_save_conflicts() {
        let mut registry = registry_with(&[("x", "echo hi")]);

        let err = registry.save_command("x", "echo bye").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        // The original command is untouched
        assert_eq!(registry.get("x").unwrap().steps, vec!["echo hi"]);
    }

    #[test]
    fn test_save_conflicts_with_existing_alias() {
        let mut registry = registry_with(&[("serve", "npm start")]);
        registry.add_alias("serve", "dev").unwrap();

        let err = registry.save_command("dev", "echo hi").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));
    }

    #[test]
    fn test_save_rejects_reserved_name() {
        let mut registry = Registry::default();
        let err = registry.save_command("list", "echo hi").unwrap_err();
        assert!(matches!(err, EzError::ReservedName(_)));
    }

    #[test]
    fn test_update_replaces_steps_and_keeps_aliases() {
        let mut registry = registry_with(&[("x", "echo hi")]);
        registry.add_alias("x", "hi").unwrap();
        registry.append_step("x", "echo more").unwrap();

        registry.update_command("x", "echo bye").unwrap();

        let entry = registry.get("x").unwrap();
        assert_eq!(entry.steps, vec!["echo bye"]);
        assert!(entry.aliases.contains("hi"));
    }

    #[test]
    fn test_update_missing_command() {
        let mut registry = Registry::default();
        let err = registry.update_command("x", "echo bye").unwrap_err();
        assert!(matches!(err, EzError::NotFound(_)));
    }

    #[test]
    fn test_delete_frees_name_and_aliases() {
        let mut registry = registry_with(&[("serve", "npm start")]);
        registry.add_alias("serve", "dev").unwrap();

        registry.delete_command("serve").unwrap();

        assert!(registry.resolve("serve").is_none());
        assert!(registry.resolve("dev").is_none());
        // Both tokens are reusable now
        registry.save_command("dev", "echo hi").unwrap();
    }

    #[test]
    fn test_delete_missing_command() {
        let mut registry = Registry::default();
        let err = registry.delete_command("x").unwrap_err();
        assert!(matches!(err, EzError::NotFound(_)));
    }

    #[test]
    fn test_rename_preserves_aliases() {
        let mut registry = registry_with(&[("serve", "npm start")]);
        registry.add_alias("serve", "dev").unwrap();

        registry.rename_command("serve", "start").unwrap();

        assert!(registry.get("serve").is_none());
        let (name, entry) = registry.resolve("dev").unwrap();
        assert_eq!(name, "start");
        assert_eq!(entry.steps, vec!["npm start"]);
    }

    #[test]
    fn test_rename_to_self_is_noop() {
        let mut registry = registry_with(&[("serve", "npm start")]);
        registry.rename_command("serve", "serve").unwrap();
        assert!(registry.contains("serve"));
    }

    #[test]
    fn test_rename_conflicts() {
        let mut registry = registry_with(&[("serve", "npm start"), ("build", "make")]);
        registry.add_alias("serve", "dev").unwrap();

        let err = registry.rename_command("serve", "build").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        // A command may not take one of its own aliases as its name
        let err = registry.rename_command("serve", "dev").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        let err = registry.rename_command("missing", "other").unwrap_err();
        assert!(matches!(err, EzError::NotFound(_)));
    }

    #[test]
    fn test_copy_duplicates_steps_but_not_aliases() {
        let mut registry = registry_with(&[("greet", "echo hello")]);
        registry.add_alias("greet", "hi").unwrap();

        registry.copy_command("greet", "hello").unwrap();

        let copy = registry.get("hello").unwrap();
        assert_eq!(copy.steps, vec!["echo hello"]);
        assert!(copy.aliases.is_empty());
        // The alias still points at the original
        assert_eq!(registry.resolve("hi").unwrap().0, "greet");
    }

    #[test]
    fn test_copy_conflicts_and_missing_source() {
        let mut registry = registry_with(&[("greet", "echo hello"), ("other", "true")]);

        let err = registry.copy_command("greet", "other").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        let err = registry.copy_command("missing", "fresh").unwrap_err();
        assert!(matches!(err, EzError::NotFound(_)));
    }

    #[test]
    fn test_append_and_pop_sequence() {
        let mut registry = registry_with(&[("deploy", "git pull")]);
        registry.append_step("deploy", "npm install").unwrap();

        assert_eq!(
            registry.get("deploy").unwrap().steps,
            vec!["git pull", "npm install"]
        );

        registry.pop_step("deploy").unwrap();
        assert_eq!(registry.get("deploy").unwrap().steps, vec!["git pull"]);

        let err = registry.pop_step("deploy").unwrap_err();
        assert!(matches!(err, EzError::EmptySequence(_)));
        // The refusal left the command intact
        assert_eq!(registry.get("deploy").unwrap().steps, vec!["git pull"]);
    }

    #[test]
    fn test_append_and_pop_missing_command() {
        let mut registry = Registry::default();
        assert!(matches!(
            registry.append_step("x", "true").unwrap_err(),
            EzError::NotFound(_)
        ));
        assert!(matches!(
            registry.pop_step("x").unwrap_err(),
            EzError::NotFound(_)
        ));
    }

    #[test]
    fn test_alias_uniqueness_across_commands() {
        let mut registry = registry_with(&[("serve", "npm start"), ("build", "make")]);

        registry.add_alias("serve", "dev").unwrap();
        let err = registry.add_alias("build", "dev").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        registry.remove_alias("serve", "dev").unwrap();
        registry.add_alias("build", "dev").unwrap();
        assert_eq!(registry.resolve("dev").unwrap().0, "build");
    }

    #[test]
    fn test_alias_may_not_equal_any_command_name() {
        let mut registry = registry_with(&[("serve", "npm start"), ("build", "make")]);

        // Including the command's own name, which would be redundant
        let err = registry.add_alias("serve", "serve").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));

        let err = registry.add_alias("serve", "build").unwrap_err();
        assert!(matches!(err, EzError::NameConflict(_)));
    }

    #[test]
    fn test_alias_rejects_reserved_word() {
        let mut registry = registry_with(&[("serve", "npm start")]);
        let err = registry.add_alias("serve", "ls").unwrap_err();
        assert!(matches!(err, EzError::ReservedName(_)));
    }

    #[test]
    fn test_remove_alias_errors() {
        let mut registry = registry_with(&[("serve", "npm start"), ("build", "make")]);
        registry.add_alias("serve", "dev").unwrap();

        // Unknown command
        assert!(matches!(
            registry.remove_alias("missing", "dev").unwrap_err(),
            EzError::NotFound(_)
        ));

        // Alias bound to a different command
        assert!(matches!(
            registry.remove_alias("build", "dev").unwrap_err(),
            EzError::AliasNotFound { .. }
        ));

        // Never bound at all
        assert!(matches!(
            registry.remove_alias("serve", "nope").unwrap_err(),
            EzError::AliasNotFound { .. }
        ));
    }
}
