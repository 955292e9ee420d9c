//! Subprocess abstraction layer
//!
//! Every external program (in practice, only `git`) is launched through the
//! [`ProcessRunner`] trait so command handlers can be exercised against
//! [`MockProcessRunner`] instead of real repositories.

pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;


pub use builder::ProcessCommandBuilder;
pub use error::ProcessError;
pub use mock::{MockCommandConfig, MockProcessRunner};
pub use runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner, TokioProcessRunner};

use crate::git::GitCommandRunner;
use std::sync::Arc;

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(TokioProcessRunner))
    }

    #[cfg(test)]
    pub fn mock() -> (Self, MockProcessRunner) {
        let mock = MockProcessRunner::new();
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        (Self::new(runner), mock)
    }

    /// Git backend bound to the given executable
    pub fn git(&self, program: &str) -> GitCommandRunner {
        GitCommandRunner::with_program(Arc::clone(&self.runner), program)
    }
}
