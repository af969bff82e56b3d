// SPDX-License-Identifier: MIT

//! Structural pipeline composition: ordered stages sharing one environment.

use serde::{Deserialize, Serialize};

use crate::command::Cmd;
use crate::env::Env;
use crate::error::Error;
use crate::exec::{ExecOutput, Executor, Stdin};

/// The privilege-escalation front-end injected by [`Pipeline::elevate`].
pub(crate) const ESCALATION_CMD: &str = "sudo";

/// An ordered sequence of stages where each stage's stdout feeds the next
/// stage's stdin.
///
/// Chaining is purely structural — no process is launched until
/// [`run`](Pipeline::run) or [`Executor::execute`] is called. `chain`
/// consumes both operands, so there is no builder left behind holding a
/// stale stage list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<Vec<String>>,
    #[serde(default)]
    env: Env,
}

impl From<Cmd> for Pipeline {
    /// A single command is a one-stage pipeline.
    fn from(cmd: Cmd) -> Self {
        let (argv, env) = cmd.into_parts();
        Pipeline {
            stages: vec![argv],
            env,
        }
    }
}

impl Pipeline {
    /// Append another command or pipeline after this one, left stages
    /// before right stages: `a.chain(b).chain(c)` runs `a | b | c`.
    ///
    /// The combined pipeline keeps the leftmost operand's environment.
    /// An empty left operand (e.g. a fold seed from
    /// [`Pipeline::default`]) adopts the right operand's instead.
    pub fn chain(mut self, next: impl Into<Pipeline>) -> Pipeline {
        let next = next.into();
        if self.stages.is_empty() {
            self.env = next.env;
        }
        self.stages.extend(next.stages);
        self
    }

    /// Mark every stage for privileged execution by prefixing its argv
    /// with the escalation command.
    ///
    /// This is the only sanctioned way to run under `sudo`: the
    /// construction-time guard rejects user-supplied `sudo` tokens, but
    /// not the systematic prefix injected here. The wrapped stages and
    /// environment are carried through unchanged.
    pub fn elevate(mut self) -> Pipeline {
        for stage in &mut self.stages {
            stage.insert(0, ESCALATION_CMD.to_string());
        }
        self
    }

    /// Stage argument vectors in execution order.
    pub fn stages(&self) -> &[Vec<String>] {
        &self.stages
    }

    /// The environment shared by all stages.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the pipeline has no stages. Executing an empty pipeline
    /// fails with [`Error::EmptyPipeline`].
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Execute with no input on a default [`Executor`].
    pub async fn run(self) -> Result<ExecOutput, Error> {
        Executor::new().execute(self, Stdin::Empty).await
    }

    /// Execute with the given input on a default [`Executor`].
    pub async fn run_with(self, stdin: impl Into<Stdin>) -> Result<ExecOutput, Error> {
        Executor::new().execute(self, stdin).await
    }
}
