use std::path::Path;

use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

pub fn image_extension(filename: &str) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed, expected one of: {}",
            ext,
            ALLOWED_EXTS.join(", ")
        )));
    }
    Ok(ext)
}

/// Magic-byte check so a renamed non-image cannot slip through on its
/// extension alone.
pub fn check_image_content(ext: &str, data: &[u8]) -> Result<()> {
    let ok = match ext {
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8]),
        "gif" => data.starts_with(b"GIF8"),
        "webp" => data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WEBP",
        _ => false,
    };
    if !ok {
        return Err(Error::BadRequest(format!(
            "Invalid {} file content",
            ext.to_uppercase()
        )));
    }
    Ok(())
}

/// Stores an uploaded image under `<uploads_dir>/projects/` and returns the
/// server-relative path it will be served from.
pub async fn save_project_image(uploads_dir: &str, filename: &str, data: &Bytes) -> Result<String> {
    if data.len() > MAX_IMAGE_BYTES {
        return Err(Error::BadRequest(format!(
            "Image exceeds the maximum size of {} bytes",
            MAX_IMAGE_BYTES
        )));
    }
    let ext = image_extension(filename)?;
    check_image_content(&ext, data)?;

    let dir = format!("{}/projects", uploads_dir);
    fs::create_dir_all(&dir).await?;

    let safe_filename = format!("{}.{}", Uuid::new_v4(), ext);
    fs::write(format!("{}/{}", dir, safe_filename), data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write image file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

    Ok(format!("/uploads/projects/{}", safe_filename))
}

/// Stored paths are relative; clients need a directly loadable URL, so the
/// absolute form is built from the scheme and host the request came in on.
pub fn absolute_url(scheme: &str, host: &str, relative: &str) -> String {
    format!("{}://{}{}", scheme, host, relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gate_allows_raster_formats_only() {
        assert_eq!(image_extension("photo.PNG").unwrap(), "png");
        assert_eq!(image_extension("a.b.jpeg").unwrap(), "jpeg");
        assert!(image_extension("script.svg").is_err());
        assert!(image_extension("archive.pdf").is_err());
        assert!(image_extension("no_extension").is_err());
    }

    #[test]
    fn magic_bytes_must_match_the_extension() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(check_image_content("png", &png).is_ok());
        assert!(check_image_content("jpg", &png).is_err());

        let mut webp = Vec::from(*b"RIFF");
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert!(check_image_content("webp", &webp).is_ok());
        assert!(check_image_content("webp", b"RIFFxxxxWAVE").is_err());
    }

    #[tokio::test]
    async fn oversized_payloads_are_refused_before_hitting_disk() {
        let data = Bytes::from(vec![0u8; MAX_IMAGE_BYTES + 1]);
        let err = save_project_image("/tmp/does-not-matter", "big.png", &data)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("maximum size"));
    }

    #[test]
    fn absolute_url_joins_scheme_host_and_path() {
        assert_eq!(
            absolute_url("https", "example.com", "/uploads/projects/a.png"),
            "https://example.com/uploads/projects/a.png"
        );
    }
}
