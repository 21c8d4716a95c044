use bytes::Bytes;
use std::path::Path;

/// Fallback extension for files without one.
const DEFAULT_EXTENSION: &str = "bin";

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = content_type_for(&file_name).to_string();
        Ok(Self::new(file_name, content_type, Bytes::from(bytes)))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Extension used in the storage object name.
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
            _ => DEFAULT_EXTENSION,
        }
    }
}

/// Guess a MIME type from a file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("foto.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_extension() {
        let f = FileUpload::new("raid.final.png", "image/png", Bytes::new());
        assert_eq!(f.extension(), "png");
        let f = FileUpload::new("noext", "image/png", Bytes::new());
        assert_eq!(f.extension(), "bin");
        let f = FileUpload::new(".hidden", "image/png", Bytes::new());
        assert_eq!(f.extension(), "bin");
    }

    #[tokio::test]
    async fn test_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("captura.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let upload = FileUpload::read(&path).await.unwrap();
        assert_eq!(upload.file_name, "captura.png");
        assert!(upload.is_image());
        assert_eq!(upload.size(), 3);
    }
}
