//! Delegated `gh` CLI calls for credentials and repository lookup.
//!
//! Both calls go through the [`CommandRunner`] seam so the orchestrator can
//! be exercised with fakes instead of a real `gh` binary.

use crate::repo::RepoRef;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// The external credential/API tool.
pub const GH_PROGRAM: &str = "gh";

/// Captured output of a finished external command.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Runs external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, capturing stdout and stderr.
    ///
    /// An `Err` means the process could not be spawned; a non-zero exit is
    /// reported through [`CommandOutput::success`].
    async fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Fetch a bearer token via `gh auth token`.
pub async fn fetch_auth_token(runner: &dyn CommandRunner) -> crate::Result<String> {
    debug!("fetching auth token from gh");
    let output = runner
        .run(GH_PROGRAM, &["auth", "token"])
        .await
        .map_err(|e| crate::Error::AuthenticationFailed(format!("failed to spawn gh: {e}")))?;

    if !output.success {
        return Err(crate::Error::AuthenticationFailed(format!(
            "gh auth token failed: {}",
            output.stderr.trim()
        )));
    }

    let token = output.stdout.trim();
    if token.is_empty() {
        return Err(crate::Error::AuthenticationFailed(
            "gh auth token returned an empty token".to_string(),
        ));
    }
    Ok(token.to_string())
}

/// Resolve a repository to its numeric id via `gh api repos/{owner}/{name}`.
///
/// The id is opaque beyond being echoed to the policy request.
pub async fn resolve_repository_id(
    runner: &dyn CommandRunner,
    repo: &RepoRef,
) -> crate::Result<u64> {
    let endpoint = format!("repos/{}/{}", repo.owner(), repo.name());
    debug!(%endpoint, "resolving repository id");
    let output = runner
        .run(GH_PROGRAM, &["api", &endpoint, "--jq", ".id"])
        .await
        .map_err(|e| {
            crate::Error::RepositoryResolutionFailed(format!("failed to spawn gh: {e}"))
        })?;

    if !output.success {
        return Err(crate::Error::RepositoryResolutionFailed(format!(
            "gh api {endpoint} failed: {}",
            output.stderr.trim()
        )));
    }

    let id = output.stdout.trim();
    id.parse::<u64>().map_err(|_| {
        crate::Error::RepositoryResolutionFailed(format!(
            "expected a numeric repository id from gh api {endpoint}, got {id:?}"
        ))
    })
}
