// SPDX-License-Identifier: MIT

//! Command descriptors: one invocable program plus its argument vector.

use serde::{Deserialize, Serialize};

use crate::env::Env;
use crate::error::Error;
use crate::exec::{ExecOutput, Stdin};
use crate::pipeline::{Pipeline, ESCALATION_CMD};

/// Descriptor for one external program invocation.
///
/// Constructing a `Cmd` launches nothing; it is plain data until it is
/// chained into a [`Pipeline`] and executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cmd {
    argv: Vec<String>,
    #[serde(default)]
    env: Env,
}

impl Cmd {
    /// Build a command from a single string, split into words with
    /// shell quoting rules. No glob or variable expansion is performed.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let argv = shlex::split(spec).ok_or_else(|| Error::Tokenize {
            spec: spec.to_string(),
        })?;
        Self::from_argv(argv)
    }

    /// Build a command from an explicit argument vector, used verbatim.
    pub fn from_argv<I, S>(argv: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(Error::EmptyCommand);
        }
        // Guardrail against accidental unescalated privilege invocation.
        // Exact-token match only ("/usr/bin/sudo" passes); kept weak on
        // purpose to preserve the historical observable behavior.
        if argv.iter().any(|token| token == ESCALATION_CMD) {
            return Err(Error::SudoRejected { argv });
        }
        Ok(Self {
            argv,
            env: Env::Inherit,
        })
    }

    /// Set the environment this command's pipeline will run under.
    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// The argument vector, program name first.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Chain this command's output into another command or pipeline.
    pub fn chain(self, next: impl Into<Pipeline>) -> Pipeline {
        Pipeline::from(self).chain(next)
    }

    /// Mark this command for privileged execution. See
    /// [`Pipeline::elevate`].
    pub fn elevate(self) -> Pipeline {
        Pipeline::from(self).elevate()
    }

    /// Run this command as a one-stage pipeline with no input.
    pub async fn run(self) -> Result<ExecOutput, Error> {
        Pipeline::from(self).run().await
    }

    /// Run this command as a one-stage pipeline with the given input.
    pub async fn run_with(self, stdin: impl Into<Stdin>) -> Result<ExecOutput, Error> {
        Pipeline::from(self).run_with(stdin).await
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Env) {
        (self.argv, self.env)
    }
}
