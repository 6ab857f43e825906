//! Command registration in encounter order.

use indexmap::IndexMap;

/// Resource groups and the commands synthesized for each.
///
/// Groups keep the order in which they were first registered, and commands
/// keep the order in which they were synthesized. The CLI assembler walks
/// the registry as-is.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    groups: IndexMap<String, Vec<String>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command type under its resource group.
    pub fn register(&mut self, group: impl Into<String>, command: impl Into<String>) {
        self.groups.entry(group.into()).or_default().push(command.into());
    }

    /// Groups with their commands, in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(group, commands)| (group.as_str(), commands.as_slice()))
    }

    pub fn commands(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn command_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
