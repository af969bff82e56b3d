// SPDX-License-Identifier: MIT

//! Error types for command construction, execution, and redirection.

use std::path::PathBuf;

/// Errors reported by cmdflow, distinguishable so a host can branch on
/// cause (bad input vs. OS failure vs. I/O failure).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A command string could not be split into words (unbalanced quoting).
    #[error("unbalanced quoting in command `{spec}`")]
    Tokenize { spec: String },

    /// A command was constructed with an empty argument vector.
    #[error("command has an empty argument vector")]
    EmptyCommand,

    /// The argument vector contains a bare `sudo` token. Privileged
    /// execution must go through [`Pipeline::elevate`].
    ///
    /// [`Pipeline::elevate`]: crate::Pipeline::elevate
    #[error("`sudo` is not allowed in a command; use elevate() for privileged execution")]
    SudoRejected { argv: Vec<String> },

    /// Attempted to execute a pipeline with no stages.
    #[error("cannot execute an empty pipeline")]
    EmptyPipeline,

    /// A stage's process could not be started. Aborts the whole pipeline;
    /// no partial result is produced.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// The redirect destination could not be opened or written.
    #[error("failed to redirect output to `{}`: {source}", path.display())]
    RedirectFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}
