// SPDX-License-Identifier: MIT

//! Tests for Executor options and environment propagation.

use std::collections::HashMap;

use super::cmd;
use crate::{Env, Executor, Stdin};

// ---------------------------------------------------------------------------
// Working directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cwd_changes_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    // Canonicalize to resolve symlinks (e.g., /var -> /private/var on macOS)
    let canonical = dir.path().canonicalize().unwrap();

    let out = Executor::new()
        .cwd(dir.path())
        .execute(cmd("pwd").into(), Stdin::Empty)
        .await
        .unwrap();

    assert_eq!(out.exit_code, 0);
    assert_eq!(out.stdout_text().trim(), canonical.to_str().unwrap());
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

fn base_vars() -> HashMap<String, String> {
    // Explicit environments start from nothing; keep PATH so the binary
    // can still be found.
    let mut vars = HashMap::new();
    if let Ok(path) = std::env::var("PATH") {
        vars.insert("PATH".to_string(), path);
    }
    vars
}

#[tokio::test]
async fn inherit_passes_parent_environment() {
    std::env::set_var("CMDFLOW_INHERIT_TEST", "inherited");
    let out = cmd("printenv CMDFLOW_INHERIT_TEST").run().await.unwrap();
    std::env::remove_var("CMDFLOW_INHERIT_TEST");

    assert_eq!(out.exit_code, 0);
    assert_eq!(out.stdout_text(), "inherited\n");
}

#[tokio::test]
async fn explicit_vars_reach_the_process() {
    let mut vars = base_vars();
    vars.insert("CMDFLOW_VARS_TEST".to_string(), "explicit".to_string());

    let out = cmd("printenv CMDFLOW_VARS_TEST")
        .env(Env::Vars(vars))
        .run()
        .await
        .unwrap();

    assert_eq!(out.exit_code, 0);
    assert_eq!(out.stdout_text(), "explicit\n");
}

#[tokio::test]
async fn explicit_vars_exclude_parent_environment() {
    std::env::set_var("CMDFLOW_LEAK_TEST", "leaked");
    let out = cmd("printenv CMDFLOW_LEAK_TEST")
        .env(Env::Vars(base_vars()))
        .run()
        .await
        .unwrap();
    std::env::remove_var("CMDFLOW_LEAK_TEST");

    // printenv exits non-zero when the variable is absent.
    assert_ne!(out.exit_code, 0);
    assert_eq!(out.stdout, b"");
}

#[tokio::test]
async fn all_stages_share_one_environment() {
    let mut vars = base_vars();
    vars.insert("SHARED".to_string(), "yes".to_string());

    let out = cmd("printenv SHARED")
        .env(Env::Vars(vars))
        .chain(crate::Cmd::from_argv(["sh", "-c", "cat; printenv SHARED"]).unwrap())
        .run()
        .await
        .unwrap();

    assert_eq!(out.exit_code, 0);
    // Stage 0 printed it through the pipe, stage 1 printed its own copy.
    assert_eq!(out.stdout_text(), "yes\nyes\n");
}

#[tokio::test]
async fn snapshot_env_is_frozen_at_capture_time() {
    std::env::set_var("CMDFLOW_FREEZE_TEST", "before");
    let env = Env::snapshot();
    std::env::set_var("CMDFLOW_FREEZE_TEST", "after");

    let out = cmd("printenv CMDFLOW_FREEZE_TEST")
        .env(env)
        .run()
        .await
        .unwrap();
    std::env::remove_var("CMDFLOW_FREEZE_TEST");

    assert_eq!(out.stdout_text(), "before\n");
}
