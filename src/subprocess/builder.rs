//! Fluent construction of a [`ProcessCommand`]

use std::collections::HashMap;
use std::path::Path;

use crate::subprocess::ProcessCommand;

/// Builds the commands the git backend hands to a `ProcessRunner`
pub struct ProcessCommandBuilder {
    command: ProcessCommand,
}

impl ProcessCommandBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: ProcessCommand {
                program: program.to_string(),
                args: Vec::new(),
                env: HashMap::new(),
                working_dir: None,
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.command
            .args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.command.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Force the C locale so error text can be matched
    pub fn untranslated(self) -> Self {
        self.env("LC_ALL", "C")
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.command.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Run inside `dir` when given, else in the caller's directory
    pub fn in_checkout(self, dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => self.current_dir(dir),
            None => self,
        }
    }

    pub fn build(self) -> ProcessCommand {
        self.command
    }
}
