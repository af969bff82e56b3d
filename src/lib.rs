// SPDX-License-Identifier: MIT

//! cmdflow: compose and run external-process pipelines.
//!
//! Mirrors shell pipe semantics from inside a host program: independent
//! command descriptors are chained so that each stage's stdout feeds the
//! next stage's stdin directly, and only the final stage's exit code,
//! stdout, and stderr are reported. This is not a shell interpreter —
//! there is no globbing, variable expansion, or job control.
//!
//! ```no_run
//! use cmdflow::Cmd;
//!
//! # async fn demo() -> Result<(), cmdflow::Error> {
//! let out = Cmd::parse("printf 'hello\n'")?
//!     .chain(Cmd::parse("tr a-z A-Z")?)
//!     .run()
//!     .await?;
//! assert_eq!(out.exit_code, 0);
//! assert_eq!(out.stdout_text(), "HELLO\n");
//! # Ok(())
//! # }
//! ```

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod command;
pub mod env;
pub mod error;
pub mod exec;
pub mod pipeline;

#[cfg(test)]
mod exec_tests;

pub use command::Cmd;
pub use env::Env;
pub use error::Error;
pub use exec::{ExecOutput, Executor, Stdin};
pub use pipeline::Pipeline;
