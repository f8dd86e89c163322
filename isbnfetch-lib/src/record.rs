//! The book record returned by a lookup and the downloaded cover image.

use serde_json::{Map, Value};

/// A single book as returned by the remote lookup, held as the raw mapping
/// from field name to value.
///
/// ISBNdb does not document a fixed field set per book, and which fields the
/// caller cares about is configuration, so the record stays schemaless and is
/// queried by name.
#[derive(Debug)]
pub struct BookRecord {
    fields: Map<String, Value>,
}

impl BookRecord {
    /// Wraps the field mapping of a single book.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The text a field contributes to a CSV cell.
    ///
    /// Strings are taken verbatim, numbers and booleans are displayed, and
    /// arrays join their elements with a comma (ISBNdb's `authors` and
    /// `subjects` are arrays of strings). Missing and null fields produce
    /// `None`.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(value_text)
    }

    /// The cover image URL, when the record has one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// A downloaded cover image: the raw bytes plus the `Content-Type` the server
/// reported, if any.
#[derive(Debug)]
pub struct CoverImage {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl CoverImage {
    /// Wraps a downloaded image body.
    #[must_use]
    pub const fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// The raw image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Picks a file extension for the image.
    ///
    /// The reported `Content-Type` wins; failing that the extension of the
    /// `url` path is used when it is a known image extension; `jpg` is the
    /// fallback.
    #[must_use]
    pub fn file_extension(&self, url: &str) -> &'static str {
        if let Some(content_type) = &self.content_type {
            let mime = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            match mime.as_str() {
                "image/jpeg" => return "jpg",
                "image/png" => return "png",
                "image/gif" => return "gif",
                "image/webp" => return "webp",
                _ => {}
            }
        }

        let path = url.split(['?', '#']).next().unwrap_or(url);
        if let Some((_, ext)) = path.rsplit_once('.') {
            match ext.to_ascii_lowercase().as_str() {
                "jpg" | "jpeg" => return "jpg",
                "png" => return "png",
                "gif" => return "gif",
                "webp" => return "webp",
                _ => {}
            }
        }

        "jpg"
    }
}
