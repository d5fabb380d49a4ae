//! Named commands and the tables they are looked up in.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// A named action a menu item or button can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    name: String,
    owner: String,
    text: String,
}

impl Command {
    /// A command `owner.name` with a display text.
    pub fn new(name: impl Into<String>, owner: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the type or table that declares the command.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Text shown to the user.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// A set of commands addressable by `Name` or `Owner.Name`.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<Arc<Command>>,
}

const APPLICATION_COMMANDS: &[(&str, &str)] = &[
    ("New", "New"),
    ("Open", "Open"),
    ("Save", "Save"),
    ("SaveAs", "Save As"),
    ("Close", "Close"),
    ("Print", "Print"),
    ("Copy", "Copy"),
    ("Cut", "Cut"),
    ("Paste", "Paste"),
    ("Delete", "Delete"),
    ("Undo", "Undo"),
    ("Redo", "Redo"),
    ("Find", "Find"),
    ("Replace", "Replace"),
    ("SelectAll", "Select All"),
    ("Help", "Help"),
    ("Properties", "Properties"),
];

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard application commands, owned by `ApplicationCommands`.
    pub fn standard() -> &'static CommandTable {
        static STANDARD: OnceLock<CommandTable> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut table = CommandTable::new();
            for (name, text) in APPLICATION_COMMANDS {
                table.add(Command::new(*name, "ApplicationCommands", *text));
            }
            table
        })
    }

    /// Add a command, replacing one with the same owner and name.
    pub fn add(&mut self, command: Command) -> Arc<Command> {
        let command = Arc::new(command);
        self.commands.retain(|existing| {
            !(existing.owner.eq_ignore_ascii_case(&command.owner)
                && existing.name.eq_ignore_ascii_case(&command.name))
        });
        self.commands.push(Arc::clone(&command));
        command
    }

    /// Find `Owner.Name` or `Name`, ignoring ASCII case.
    pub fn find(&self, path: &str) -> Option<Arc<Command>> {
        let path = path.trim();
        let (owner, name) = match path.rsplit_once('.') {
            Some((owner, name)) => (Some(owner.trim()), name.trim()),
            None => (None, path),
        };
        self.commands
            .iter()
            .find(|command| {
                command.name.eq_ignore_ascii_case(name)
                    && owner.is_none_or(|owner| command.owner.eq_ignore_ascii_case(owner))
            })
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lookup() {
        let table = CommandTable::standard();
        assert_eq!(table.len(), 17);
        let save = table.find("applicationcommands.save").unwrap();
        assert_eq!(save.text(), "Save");
        assert_eq!(table.find("SAVEAS").map(|c| c.to_string()).as_deref(), Some("ApplicationCommands.SaveAs"));
        assert!(table.find("EditorCommands.Save").is_none());
        assert!(table.find("Launch").is_none());
    }

    #[test]
    fn test_replace() {
        let mut table = CommandTable::new();
        table.add(Command::new("Run", "Debug", "Run"));
        table.add(Command::new("run", "debug", "Start"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.find("Debug.Run").unwrap().text(), "Start");
    }
}
