// SPDX-License-Identifier: MIT

//! Pipeline execution: process spawning, stream wiring, and capture.

mod result;

pub use result::ExecOutput;

use std::path::PathBuf;
use std::time::Instant;

use tokio::io::AsyncWriteExt;

use crate::command::Cmd;
use crate::error::Error;
use crate::pipeline::Pipeline;

// ---------------------------------------------------------------------------
// Initial input
// ---------------------------------------------------------------------------

/// Input supplied to the first stage of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stdin {
    /// No input: the first stage sees a closed input stream.
    #[default]
    Empty,
    /// Raw bytes written to the first stage.
    Bytes(Vec<u8>),
    /// An unexecuted pipeline whose stages are prepended before launch:
    /// running `p2` with `p1` as input is exactly running `p1 | p2`.
    Pipeline(Pipeline),
}

impl From<&str> for Stdin {
    fn from(s: &str) -> Self {
        Stdin::Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Stdin {
    fn from(s: String) -> Self {
        Stdin::Bytes(s.into_bytes())
    }
}

impl From<Vec<u8>> for Stdin {
    fn from(bytes: Vec<u8>) -> Self {
        Stdin::Bytes(bytes)
    }
}

impl From<&[u8]> for Stdin {
    fn from(bytes: &[u8]) -> Self {
        Stdin::Bytes(bytes.to_vec())
    }
}

impl From<Pipeline> for Stdin {
    fn from(pipeline: Pipeline) -> Self {
        Stdin::Pipeline(pipeline)
    }
}

impl From<Cmd> for Stdin {
    fn from(cmd: Cmd) -> Self {
        Stdin::Pipeline(cmd.into())
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Launches a pipeline's stages and collects the final stage's result.
///
/// There is no timeout or cancellation: `execute` resolves only when the
/// final stage has exited.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    cwd: Option<PathBuf>,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Working directory for every stage. Defaults to the caller's.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Execute a pipeline, blocking (at the await point) until the final
    /// stage completes.
    ///
    /// All stages run concurrently, each stage's stdout wired directly
    /// into the next stage's stdin with no host-side buffering. Only the
    /// final stage's exit code, stdout, and stderr are reported; a
    /// non-zero exit code is ordinary data, not an error.
    pub async fn execute(
        &self,
        pipeline: Pipeline,
        stdin: impl Into<Stdin>,
    ) -> Result<ExecOutput, Error> {
        // An unexecuted pipeline as input is prepended, not run separately.
        let (pipeline, input) = match stdin.into() {
            Stdin::Pipeline(head) => (head.chain(pipeline), None),
            Stdin::Bytes(bytes) => (pipeline, (!bytes.is_empty()).then_some(bytes)),
            Stdin::Empty => (pipeline, None),
        };

        let n = pipeline.stages().len();
        if n == 0 {
            return Err(Error::EmptyPipeline);
        }

        let run_span = tracing::info_span!(
            "pipeline.run",
            stages = n,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        let start = Instant::now();

        // Phase 1: spawn all stages in order. Stage i's stdin is stage
        // i-1's stdout pipe handed over directly; stage 0 gets a piped
        // stdin when external input is supplied, otherwise a closed one.
        struct SpawnedStage {
            child: tokio::process::Child,
            program: String,
        }

        let mut spawned: Vec<SpawnedStage> = Vec::with_capacity(n);
        let mut upstream: Option<tokio::process::ChildStdout> = None;

        for (i, argv) in pipeline.stages().iter().enumerate() {
            let Some(program) = argv.first() else {
                return Err(Error::EmptyCommand);
            };
            let last = i == n - 1;

            let mut command = tokio::process::Command::new(program);
            command.args(&argv[1..]);
            if let Some(dir) = &self.cwd {
                command.current_dir(dir);
            }
            pipeline.env().apply(&mut command);

            let stdin_cfg = match upstream.take() {
                Some(prev_stdout) => {
                    prev_stdout
                        .try_into()
                        .map_err(|source| Error::SpawnFailed {
                            command: program.clone(),
                            source,
                        })?
                }
                None if i == 0 && input.is_some() => std::process::Stdio::piped(),
                None => std::process::Stdio::null(),
            };
            command.stdin(stdin_cfg);
            command.stdout(std::process::Stdio::piped());
            // Intermediate stderr is never surfaced; only the final
            // stage's is captured.
            command.stderr(if last {
                std::process::Stdio::piped()
            } else {
                std::process::Stdio::null()
            });

            let mut child = command.spawn().map_err(|source| Error::SpawnFailed {
                command: program.clone(),
                source,
            })?;
            tracing::debug!(stage = i, program = %program, "spawned pipeline stage");

            if !last {
                upstream = child.stdout.take();
            }
            spawned.push(SpawnedStage {
                child,
                program: program.clone(),
            });
            // `command` drops here, closing the parent's duplicates of the
            // pipe ends so end-of-stream propagates between stages.
        }

        // Phase 2: feed external input to stage 0 concurrently with the
        // final-stage drain. A sequential write-then-drain would deadlock
        // on bounded pipe buffers once the payload outgrows them.
        let mut writer = None;
        if let Some(bytes) = input {
            if let Some(mut stage0_stdin) =
                spawned.first_mut().and_then(|s| s.child.stdin.take())
            {
                writer = Some(tokio::spawn(async move {
                    // EPIPE from an early-exiting consumer is not an error.
                    let _ = stage0_stdin.write_all(&bytes).await;
                    drop(stage0_stdin); // close pipe to signal EOF
                }));
            }
        }

        // Phase 3: await the final stage and capture its streams.
        let Some(last) = spawned.pop() else {
            return Err(Error::EmptyPipeline);
        };
        let output =
            last.child
                .wait_with_output()
                .await
                .map_err(|source| Error::SpawnFailed {
                    command: last.program,
                    source,
                })?;

        if let Some(writer) = writer {
            let _ = writer.await;
        }

        // Phase 4: reap intermediate stages so no process outlives this
        // call. Their exit codes are not part of the result.
        for mut stage in spawned {
            let _ = stage.child.wait().await;
        }

        let exit_code = output.status.code().unwrap_or(-1);
        run_span.record("exit_code", exit_code);
        run_span.record("duration_ms", start.elapsed().as_millis() as u64);

        Ok(ExecOutput {
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
