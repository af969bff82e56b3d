// SPDX-License-Identifier: MIT

//! Environment configuration for pipeline stages.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Environment passed to every stage of a pipeline.
///
/// The environment is chosen explicitly at construction rather than
/// captured implicitly from global state. All stages of one pipeline
/// share a single `Env`; it is read-only during execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Env {
    /// Pass the calling process's environment through unchanged,
    /// resolved at spawn time.
    #[default]
    Inherit,
    /// Use exactly these variables and nothing else.
    Vars(HashMap<String, String>),
}

impl Env {
    /// Capture the calling process's environment right now as an explicit
    /// variable map. Later changes to the process environment do not
    /// affect the snapshot.
    pub fn snapshot() -> Self {
        Env::Vars(std::env::vars().collect())
    }

    /// Apply this environment to a process builder.
    pub(crate) fn apply(&self, command: &mut tokio::process::Command) {
        match self {
            Env::Inherit => {}
            Env::Vars(vars) => {
                command.env_clear();
                command.envs(vars);
            }
        }
    }
}

impl FromIterator<(String, String)> for Env {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Env::Vars(iter.into_iter().collect())
    }
}

impl From<HashMap<String, String>> for Env {
    fn from(vars: HashMap<String, String>) -> Self {
        Env::Vars(vars)
    }
}
