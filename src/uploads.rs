use std::path::PathBuf;

use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Maximum upload size (5 MiB). Oversized uploads are rejected outright,
/// never truncated.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Save an uploaded file under the uploads directory. The stored name gets a
/// millisecond-timestamp + random prefix ahead of the original filename so
/// concurrent uploads of the same file never collide.
/// Returns the public path (e.g. "/uploads/1718000000000-482915673-form.jpg").
pub async fn save_uploaded_file(uploads_dir: &str, filename: &str, data: &[u8]) -> Result<String> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::PayloadTooLarge(
            "File too large (max 5 MB)".to_string(),
        ));
    }

    let uploads_path = PathBuf::from(uploads_dir);
    fs::create_dir_all(&uploads_path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads directory: {}", e)))?;

    let unique_suffix = format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        rand::thread_rng().gen_range(0..1_000_000_000u32)
    );
    let stored_name = format!("{}-{}", unique_suffix, sanitize_filename(filename));
    let file_path = uploads_path.join(&stored_name);

    let mut file = fs::File::create(&file_path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create file: {}", e)))?;

    file.write_all(data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

    Ok(format!("/uploads/{}", stored_name))
}

/// Keeps the original name recognizable while stripping path separators and
/// anything else that doesn't belong in a stored filename.
fn sanitize_filename(filename: &str) -> String {
    let name: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        "upload".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("report card.pdf"), "report_card.pdf");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let result = save_uploaded_file("/tmp/schoolhouse-test-uploads", "big.bin", &data).await;
        assert!(matches!(result, Err(AppError::PayloadTooLarge(_))));
    }
}
