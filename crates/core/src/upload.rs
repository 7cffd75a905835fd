//! The upload orchestrator.
//!
//! Sequences validation, the delegated `gh` calls, the policy request, and
//! the storage submission. Strictly sequential; the first failure aborts
//! the whole flow and there is no retry or rollback. An unused policy is
//! simply abandoned and expires server-side.

use crate::github::{self, CommandRunner, ProcessRunner};
use crate::policy::{self, AssetClient};
use crate::repo::RepoRef;
use crate::{Error, Result, mime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Input to a single upload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Path to an existing regular file.
    pub file_path: PathBuf,
    /// Repository reference in any accepted shape.
    pub repository: String,
    /// Validate and derive metadata only; no external calls.
    pub dry_run: bool,
    /// Caller requested verbose diagnostics. The library itself emits
    /// `tracing` events unconditionally; this flag is carried for callers
    /// (like the CLI) that pick a subscriber filter from it.
    pub verbose: bool,
}

/// Terminal artifact of a successful (or dry-run) upload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResult {
    /// Permanent CDN URL, or a placeholder for dry runs.
    pub url: String,
    /// Asset identifier; always `None` for dry runs.
    pub asset_id: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Computed MIME type.
    pub mime_type: String,
    /// Repository as `owner/name`.
    pub repository: String,
    /// Whether this result came from a dry run.
    pub dry_run: bool,
}

/// Orchestrates one upload from validation through submission.
pub struct Uploader {
    runner: Box<dyn CommandRunner>,
    client: AssetClient,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

impl Uploader {
    /// Create an uploader against the real `gh` binary and GitHub endpoints.
    pub fn new() -> Self {
        Self::with_parts(Box::new(ProcessRunner), AssetClient::new())
    }

    /// Create an uploader with injected collaborators.
    pub fn with_parts(runner: Box<dyn CommandRunner>, client: AssetClient) -> Self {
        Self { runner, client }
    }

    /// Run the full upload flow.
    ///
    /// Validation is local-only and always happens before any process or
    /// network call; a dry run returns right after it.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadResult> {
        if request.file_path.as_os_str().is_empty() {
            return Err(Error::MissingArgument("file"));
        }
        if request.repository.trim().is_empty() {
            return Err(Error::MissingArgument("repository"));
        }

        let metadata = tokio::fs::metadata(&request.file_path)
            .await
            .map_err(|_| Error::FileNotFound(request.file_path.clone()))?;
        if !metadata.is_file() {
            return Err(Error::FileNotFound(request.file_path.clone()));
        }

        let file_name = request
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !mime::is_extension_allowed(&file_name) {
            let extension = request
                .file_path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| "(none)".to_string());
            return Err(Error::UnsupportedExtension { extension });
        }

        let repo = RepoRef::parse(&request.repository)?;
        let file_size = metadata.len();
        let mime_type = mime::mime_type(&file_name);
        debug!(%repo, file = %file_name, file_size, mime_type, "validated upload request");

        if request.dry_run {
            debug!("dry run: skipping credential, policy, and upload steps");
            return Ok(UploadResult {
                url: format!("dry-run://{repo}/{file_name}"),
                asset_id: None,
                file_name,
                file_size,
                mime_type: mime_type.to_string(),
                repository: repo.to_string(),
                dry_run: true,
            });
        }

        let token = github::fetch_auth_token(self.runner.as_ref()).await?;
        let repository_id = github::resolve_repository_id(self.runner.as_ref(), &repo).await?;

        let grant = self
            .client
            .request_policy(&token, &file_name, file_size, mime_type, repository_id)
            .await?;
        // Without an asset id there is no permanent URL to hand back, so
        // fail before shipping bytes to storage.
        let asset_id = grant.asset_id.clone().ok_or_else(|| {
            Error::PolicyRequestFailed("response is missing asset.id".to_string())
        })?;

        let bytes = tokio::fs::read(&request.file_path)
            .await
            .map_err(|_| Error::FileNotFound(request.file_path.clone()))?;
        self.client
            .submit(&grant, &file_name, mime_type, bytes)
            .await?;

        let url = policy::asset_url(&asset_id);
        info!(%url, "upload complete");
        Ok(UploadResult {
            url,
            asset_id: Some(asset_id),
            file_name,
            file_size,
            mime_type: mime_type.to_string(),
            repository: repo.to_string(),
            dry_run: false,
        })
    }
}

/// Upload with the default collaborators (`gh` + GitHub endpoints).
pub async fn upload(request: &UploadRequest) -> Result<UploadResult> {
    Uploader::new().upload(request).await
}
