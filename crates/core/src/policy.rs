//! HTTP client for the policy endpoint and the storage submission.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Default policy endpoint.
pub const POLICY_URL: &str = "https://github.com/upload/policies/assets";

/// Base URL for permanent asset retrieval.
pub const ASSETS_BASE_URL: &str = "https://github.com/user-attachments/assets";

/// Multipart field name carrying the file bytes.
const FILE_FIELD: &str = "file";

/// Build the permanent CDN URL for an asset id.
pub fn asset_url(asset_id: &str) -> String {
    format!("{ASSETS_BASE_URL}/{asset_id}")
}

/// A server-issued upload grant.
///
/// `form` is opaque: fields are echoed back to the storage endpoint in the
/// order the server sent them, values unmodified.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    /// Storage endpoint to POST the file to.
    pub upload_url: String,
    /// Opaque form fields to echo verbatim, in server order.
    pub form: Vec<(String, String)>,
    /// Asset identifier assigned by the server, if present.
    pub asset_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PolicyResponse {
    upload_url: Option<String>,
    #[serde(default)]
    form: serde_json::Map<String, Value>,
    asset: Option<PolicyAsset>,
}

#[derive(Debug, Deserialize)]
struct PolicyAsset {
    id: Option<Value>,
}

/// Render an opaque JSON form value as the string the server expects back.
fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render the asset id, which the server may send as a string or a number.
fn asset_id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Client for the two HTTP calls of the upload flow.
#[derive(Clone, Debug)]
pub struct AssetClient {
    http: reqwest::Client,
    policy_url: String,
}

impl Default for AssetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetClient {
    /// Create a client against the default policy endpoint.
    pub fn new() -> Self {
        Self::with_policy_url(POLICY_URL)
    }

    /// Create a client against a custom policy endpoint.
    pub fn with_policy_url(policy_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            policy_url: policy_url.into(),
        }
    }

    /// Request a signed upload policy.
    ///
    /// A missing `upload_url` in the response is an error; a missing
    /// `asset.id` is tolerated here and left to the orchestrator.
    pub async fn request_policy(
        &self,
        token: &str,
        name: &str,
        size: u64,
        content_type: &str,
        repository_id: u64,
    ) -> crate::Result<UploadPolicy> {
        debug!(name, size, content_type, repository_id, "requesting upload policy");
        let fields = [
            ("name", name.to_string()),
            ("size", size.to_string()),
            ("content_type", content_type.to_string()),
            ("repository_id", repository_id.to_string()),
        ];

        let response = self
            .http
            .post(&self.policy_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::AUTHORIZATION, format!("token {token}"))
            .header(
                reqwest::header::USER_AGENT,
                concat!("ghup/", env!("CARGO_PKG_VERSION")),
            )
            .form(&fields)
            .send()
            .await
            .map_err(|e| crate::Error::PolicyRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(crate::Error::PolicyRequestFailed(format!(
                "({status}): {body}"
            )));
        }

        let parsed: PolicyResponse = serde_json::from_str(&body)
            .map_err(|e| crate::Error::PolicyRequestFailed(format!("malformed response: {e}")))?;

        let upload_url = parsed.upload_url.ok_or_else(|| {
            crate::Error::PolicyRequestFailed("response is missing upload_url".to_string())
        })?;
        let form = parsed
            .form
            .iter()
            .map(|(k, v)| (k.clone(), form_value(v)))
            .collect();
        let asset_id = parsed
            .asset
            .and_then(|a| a.id)
            .and_then(|id| asset_id_value(&id));

        Ok(UploadPolicy {
            upload_url,
            form,
            asset_id,
        })
    }

    /// Submit the file bytes to the policy's storage endpoint.
    ///
    /// The multipart body carries every policy form field first, in order,
    /// then the file content. No auth header: the grant is in the fields.
    pub async fn submit(
        &self,
        policy: &UploadPolicy,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> crate::Result<()> {
        debug!(url = %policy.upload_url, file_name, "submitting asset");
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in &policy.form {
            form = form.text(key.clone(), value.clone());
        }
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| crate::Error::UploadFailed(format!("invalid content type: {e}")))?;
        form = form.part(FILE_FIELD, part);

        let response = self
            .http
            .post(&policy.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| crate::Error::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::Error::UploadFailed(format!("({status}): {body}")));
        }
        Ok(())
    }
}
