// SPDX-License-Identifier: MIT

//! Captured pipeline results.

use std::borrow::Cow;
use std::path::Path;

use crate::error::Error;

/// Outcome of executing a pipeline: the final stage's exit code and
/// captured streams. Intermediate stages' streams and exit codes are not
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code of the final stage (`-1` if it died by signal).
    pub exit_code: i32,
    /// Final stage's captured stdout.
    pub stdout: Vec<u8>,
    /// Final stage's captured stderr.
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    /// True when the final stage exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Lossy UTF-8 view of stdout.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Lossy UTF-8 view of stderr.
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Overwrite `path` with the captured stdout, shell `>` style.
    pub async fn redirect_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        tokio::fs::write(path, &self.stdout)
            .await
            .map_err(|source| Error::RedirectFailed {
                path: path.to_path_buf(),
                source,
            })
    }
}
