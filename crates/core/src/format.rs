//! Human-readable file size formatting.

/// Format a byte count with base-1024 scaling.
///
/// The byte bucket deliberately carries no decimal places ("500 B", not
/// "500.00 B") while KB/MB/GB use two.
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < MB {
        format!("{:.2} KB", size / KB)
    } else if size < GB {
        format!("{:.2} MB", size / MB)
    } else {
        format!("{:.2} GB", size / GB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_bucket_has_no_decimals() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_kb_bucket() {
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1024 * 1024 - 1), "1024.00 KB");
    }

    #[test]
    fn test_mb_and_gb_buckets() {
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 / 2), "1.50 GB");
    }
}
