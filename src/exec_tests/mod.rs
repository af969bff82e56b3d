// SPDX-License-Identifier: MIT

//! Tests for the pipeline executor.

use crate::{Cmd, Pipeline};

mod executor;

/// Parse a command, panicking on bad test input.
pub(crate) fn cmd(spec: &str) -> Cmd {
    Cmd::parse(spec).unwrap()
}

/// Build a pipeline from a sequence of command specs.
pub(crate) fn pipeline(specs: &[&str]) -> Pipeline {
    specs
        .iter()
        .fold(Pipeline::default(), |acc, spec| acc.chain(cmd(spec)))
}

/// Sync wrapper for async execution in parameterized tests.
pub(crate) fn run_async<F: std::future::Future>(f: F) -> F::Output {
    init_tracing();
    tokio::runtime::Runtime::new().unwrap().block_on(f)
}

/// Install a test subscriber once so `RUST_LOG` surfaces executor spans.
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
