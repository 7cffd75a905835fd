//! Markdown rendering for upload results.

use crate::upload::UploadResult;

/// Render an image-embed string for an uploaded asset.
///
/// Alt text precedence: explicit non-empty `alt`, else the result's file
/// name, else the literal `image`.
pub fn render_markdown(result: &UploadResult, alt: Option<&str>) -> String {
    let alt = match alt {
        Some(alt) if !alt.is_empty() => alt,
        _ if !result.file_name.is_empty() => &result.file_name,
        _ => "image",
    };
    format!("![{alt}]({})", result.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(file_name: &str) -> UploadResult {
        UploadResult {
            url: "U".to_string(),
            asset_id: Some("abc123".to_string()),
            file_name: file_name.to_string(),
            file_size: 10,
            mime_type: "image/png".to_string(),
            repository: "owner/repo".to_string(),
            dry_run: false,
        }
    }

    #[test]
    fn test_explicit_alt_wins() {
        assert_eq!(render_markdown(&sample_result("F"), Some("Alt")), "![Alt](U)");
    }

    #[test]
    fn test_falls_back_to_file_name() {
        assert_eq!(render_markdown(&sample_result("F"), None), "![F](U)");
        assert_eq!(render_markdown(&sample_result("F"), Some("")), "![F](U)");
    }

    #[test]
    fn test_falls_back_to_literal_image() {
        assert_eq!(render_markdown(&sample_result(""), None), "![image](U)");
    }
}
