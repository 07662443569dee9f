//! Client-side checks applied to a file before it is uploaded.

use store::config::{UploadConfig, DEFAULT_ACCEPT};

/// File picked by the user, read fully into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    /// MIME type reported by the browser, possibly empty.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("File size must be less than {max_size_mb}MB")]
    TooLarge { max_size_mb: u64 },
    #[error("File type not allowed. Accepted types: {accept}")]
    NotAllowed { accept: String },
}

/// Size limit plus accept list, in the syntax of an HTML `accept` attribute.
///
/// Each comma-separated entry is one of:
/// - `.ext`: the lowercased file extension equals it
/// - `type/*`: the MIME type starts with `type/`
/// - anything else: the MIME type equals it
///
/// An empty list or `*/*` accepts every type.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadPolicy {
    pub max_size_mb: u64,
    pub accept: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: 10,
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_size_mb: config.max_size_mb,
            accept: config.accept.clone(),
        }
    }
}

impl UploadPolicy {
    pub fn new(max_size_mb: u64, accept: impl Into<String>) -> Self {
        Self {
            max_size_mb,
            accept: accept.into(),
        }
    }

    /// Saturates at `u64::MAX`.
    pub fn max_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn accepts_all(&self) -> bool {
        let accept = self.accept.trim();
        accept.is_empty() || accept == "*/*"
    }

    /// Whether a file with this name and MIME type passes the accept list.
    pub fn accepts(&self, file_name: &str, content_type: &str) -> bool {
        if self.accepts_all() {
            return true;
        }
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => format!(".{}", ext.to_lowercase()),
            None => format!(".{}", file_name.to_lowercase()),
        };

        self.accept
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .any(|entry| {
                if entry.starts_with('.') {
                    extension == entry.to_lowercase()
                } else if let Some(prefix) = entry.strip_suffix("/*") {
                    content_type.starts_with(&format!("{prefix}/"))
                } else {
                    content_type == entry
                }
            })
    }

    /// Size first, then type.
    pub fn check(&self, file: &UploadFile) -> Result<(), UploadError> {
        self.check_metadata(&file.name, &file.content_type, file.size())
    }

    /// Same rules as [`UploadPolicy::check`], from what the browser reports
    /// about a file before its contents are read.
    pub fn check_metadata(
        &self,
        file_name: &str,
        content_type: &str,
        size: u64,
    ) -> Result<(), UploadError> {
        if size > self.max_bytes() {
            return Err(UploadError::TooLarge {
                max_size_mb: self.max_size_mb,
            });
        }
        if !self.accepts(file_name, content_type) {
            return Err(UploadError::NotAllowed {
                accept: self.accept.clone(),
            });
        }
        Ok(())
    }
}
