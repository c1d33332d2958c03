//! Parsed resource handles (`content://`, `file://`)

use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

pub const SCHEME_CONTENT: &str = "content";
pub const SCHEME_FILE: &str = "file";

const PATH_DOCUMENT: &str = "document";
const PATH_TREE: &str = "tree";

/// Errors produced while parsing a handle string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("Malformed resource handle {handle}: {reason}")]
    Malformed { handle: String, reason: String },
}

/// An opaque resource handle issued by the host content framework
///
/// Keeps the raw string next to the parsed form; the raw string is what marker
/// checks (e.g. the GIF provider marker) look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    raw: String,
    url: Url,
}

impl ResourceHandle {
    /// Parse a handle string
    pub fn parse(raw: &str) -> Result<Self, HandleError> {
        let url = Url::parse(raw).map_err(|e| HandleError::Malformed {
            handle: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// Build a `content://<authority><path>` handle
    pub fn content(authority: &str, path: &str) -> Result<Self, HandleError> {
        let path = path.trim_start_matches('/');
        Self::parse(&format!("{}://{}/{}", SCHEME_CONTENT, authority, path))
    }

    /// Append a numeric row id as a new trailing path segment
    pub fn with_appended_id(&self, id: i64) -> Result<Self, HandleError> {
        let base = self.raw.trim_end_matches('/');
        Self::parse(&format!("{}/{}", base, id))
    }

    /// The handle exactly as it was supplied
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-cased scheme (`content`, `file`, ...)
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn is_content(&self) -> bool {
        self.scheme().eq_ignore_ascii_case(SCHEME_CONTENT)
    }

    pub fn is_file(&self) -> bool {
        self.scheme().eq_ignore_ascii_case(SCHEME_FILE)
    }

    /// Provider authority, `None` for authority-less handles such as `file:///...`
    pub fn authority(&self) -> Option<&str> {
        self.url.host_str().filter(|host| !host.is_empty())
    }

    /// Percent-decoded path component
    pub fn path(&self) -> String {
        decode(self.url.path())
    }

    /// Percent-decoded, non-empty path segments
    pub fn path_segments(&self) -> Vec<String> {
        self.url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .map(decode)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Document id for provider document handles
    ///
    /// Recognises `/document/<id>` and `/tree/<tree>/document/<id>`.
    pub fn document_id(&self) -> Option<String> {
        if !self.is_content() {
            return None;
        }

        let mut segments = self.path_segments();
        match segments.len() {
            2 if segments[0] == PATH_DOCUMENT => Some(segments.swap_remove(1)),
            4 if segments[0] == PATH_TREE && segments[2] == PATH_DOCUMENT => {
                Some(segments.swap_remove(3))
            }
            _ => None,
        }
    }

    /// Whether this handle references a document inside a documents provider
    pub fn is_document(&self) -> bool {
        self.document_id().is_some()
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a `type:value` document id on the first `:`
///
/// A missing separator yields an empty value.
pub fn split_document_id(document_id: &str) -> (&str, &str) {
    document_id.split_once(':').unwrap_or((document_id, ""))
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}
