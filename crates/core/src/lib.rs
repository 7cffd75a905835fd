//! Core upload flow for GitHub's CDN-backed asset store.
//!
//! This crate implements the policy-based upload protocol:
//! - Extension/MIME allow-list lookups
//! - Repository reference parsing
//! - Delegated `gh` calls for credentials and repository ids
//! - The policy request and storage submission
//! - The sequential upload orchestrator and markdown rendering

pub mod error;
pub mod format;
pub mod github;
pub mod markdown;
pub mod mime;
pub mod policy;
pub mod repo;
pub mod upload;

pub use error::{Error, Result};
pub use format::format_file_size;
pub use github::{CommandOutput, CommandRunner, ProcessRunner};
pub use markdown::render_markdown;
pub use mime::{is_extension_allowed, mime_type};
pub use policy::{AssetClient, UploadPolicy, asset_url};
pub use repo::RepoRef;
pub use upload::{UploadRequest, UploadResult, Uploader, upload};
