//! Chat identifiers and uploadable chat exports.

use bytes::Bytes;
use mime::Mime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::{ChatExplorerError, ChatExplorerResult};

/// Opaque identifier naming a chat on the server.
///
/// Usually taken straight from the `/chat/:id` route. It is never parsed
/// or validated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Creates a chat identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for ChatId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<u64> for ChatId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for ChatId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ChatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A chat export to upload.
///
/// Owns the file bytes; [`crate::ChatExplorerClient::upload_chat`] consumes
/// it, so nothing is retained after the request.
#[derive(Debug, Clone)]
pub struct ChatFile {
    filename: String,
    content_type: Mime,
    data: Bytes,
}

impl ChatFile {
    /// Creates a file from in-memory bytes, guessing the content type from
    /// the filename extension.
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename);
        Self {
            filename,
            content_type,
            data: data.into(),
        }
    }

    /// Reads a file from disk.
    ///
    /// Fails with a validation error, before any request is made, when the
    /// path is missing, unreadable, or not a regular file.
    pub async fn from_path(path: impl AsRef<Path>) -> ChatExplorerResult<Self> {
        let path = path.as_ref();

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ChatExplorerError::validation_param(
                    format!("'{}' does not name a file", path.display()),
                    "file",
                )
            })?
            .to_string();

        let data = tokio::fs::read(path).await.map_err(|e| {
            ChatExplorerError::validation_param(
                format!("cannot read '{}': {}", path.display(), e),
                "file",
            )
        })?;

        tracing::debug!(filename = %filename, bytes = data.len(), "Read chat export");

        Ok(Self::new(filename, data))
    }

    /// Overrides the content type.
    pub fn with_content_type(mut self, content_type: &str) -> ChatExplorerResult<Self> {
        self.content_type = content_type.parse::<Mime>().map_err(|e| {
            ChatExplorerError::validation_param(
                format!("invalid content type '{}': {}", content_type, e),
                "content_type",
            )
        })?;
        Ok(self)
    }

    /// Returns the filename sent with the upload.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the content type sent with the upload.
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// Returns the file contents.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Mime, Bytes) {
        (self.filename, self.content_type, self.data)
    }
}

/// Chat exports are plain text or zip archives; anything else goes out as
/// an opaque byte stream.
fn guess_content_type(filename: &str) -> Mime {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => mime::TEXT_PLAIN,
        "csv" => mime::TEXT_CSV,
        "json" => mime::APPLICATION_JSON,
        "zip" => "application/zip"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_conversions() {
        assert_eq!(ChatId::from("abc123").as_str(), "abc123");
        assert_eq!(ChatId::from(42_u64).as_str(), "42");
        assert_eq!(ChatId::from(String::from("x")).to_string(), "x");
    }

    #[test]
    fn test_chat_id_serializes_as_string() {
        let json = serde_json::to_value(ChatId::from(7_u32)).unwrap();
        assert_eq!(json, serde_json::json!("7"));
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(guess_content_type("WhatsApp Chat.txt"), mime::TEXT_PLAIN);
        assert_eq!(guess_content_type("export.ZIP").essence_str(), "application/zip");
        assert_eq!(guess_content_type("noext"), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_chat_file_from_bytes() {
        let file = ChatFile::new("chat.txt", b"12/01/2024, 10:00 - A: hi".to_vec());

        assert_eq!(file.filename(), "chat.txt");
        assert_eq!(file.len(), 25);
        assert!(!file.is_empty());
    }

    #[test]
    fn test_with_content_type_rejects_garbage() {
        let file = ChatFile::new("chat.txt", Vec::new());
        assert!(file.with_content_type("not a mime").is_err());
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = ChatFile::from_path("/definitely/not/here/chat.txt").await;

        match result {
            Err(ChatExplorerError::Validation { param, .. }) => {
                assert_eq!(param.as_deref(), Some("file"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join("chat_explorer_types_test.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let file = ChatFile::from_path(&path).await.unwrap();
        assert_eq!(file.filename(), "chat_explorer_types_test.txt");
        assert_eq!(file.data().as_ref(), b"hello");
        assert_eq!(file.content_type(), &mime::TEXT_PLAIN);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
