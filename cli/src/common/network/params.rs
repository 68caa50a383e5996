//! # Request Payload Types
//!
//! File: cli/src/common/network/params.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Value types describing what a GET/POST carries:
//! - **`Params`**: ordered key/value pairs, sent as the query string (GET) or as
//!   the url-encoded / multipart form fields (POST). Values may be any `Display`
//!   scalar; they are stored as their string form.
//! - **`Files`**: named upload parts for a POST. Each entry is either raw
//!   content (text or bytes, wrapped in an in-memory stream when sent) or an
//!   already-open reader that is handed to the HTTP client as is.
//!
//! ```rust
//! use sessionkit::common::network::{FileContent, Files, Params};
//!
//! let data = Params::new().with("code", "print(2+3)").with("cell", 0);
//! let files = Files::new().with("notes.txt", "hello");
//! assert_eq!(data.get("cell"), Some("0"));
//! assert_eq!(files.names(), vec!["notes.txt"]);
//! ```
//!
use std::fmt;
use std::fs::File;
use std::io::Read;

/// Ordered key/value request data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends a pair. Repeated keys are kept, in insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (k, v)) in self.pairs.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}

/// Content of one upload part.
pub enum FileContent {
    /// Raw text, sent as UTF-8 bytes.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// An open file-like handle, streamed by the HTTP client unchanged.
    Reader(Box<dyn Read + Send>),
}

impl FileContent {
    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        FileContent::Reader(Box::new(reader))
    }
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContent::Text(s) => write!(f, "Text({} bytes)", s.len()),
            FileContent::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            FileContent::Reader(_) => write!(f, "Reader"),
        }
    }
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        FileContent::Text(s)
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        FileContent::Text(s.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(b: Vec<u8>) -> Self {
        FileContent::Bytes(b)
    }
}

impl From<File> for FileContent {
    fn from(f: File) -> Self {
        FileContent::reader(f)
    }
}

/// Named upload parts for a POST.
#[derive(Debug, Default)]
pub struct Files {
    entries: Vec<(String, FileContent)>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<FileContent>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<FileContent>) {
        self.entries.push((name.into(), content.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl IntoIterator for Files {
    type Item = (String, FileContent);
    type IntoIter = std::vec::IntoIter<(String, FileContent)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N, C> FromIterator<(N, C)> for Files
where
    N: Into<String>,
    C: Into<FileContent>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut files = Files::new();
        for (n, c) in iter {
            files.insert(n, c);
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_params_keep_order_and_stringify_scalars() {
        let params: Params = [("b", 2), ("a", 1)].into_iter().collect();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("b", "2"), ("a", "1")]);

        let mixed = Params::new().with("ratio", 0.5).with("flag", true);
        assert_eq!(mixed.get("ratio"), Some("0.5"));
        assert_eq!(mixed.get("flag"), Some("true"));
        assert_eq!(mixed.get("missing"), None);
    }

    #[test]
    fn test_params_display() {
        let params = Params::new().with("foo", 5).with("bar", "x");
        assert_eq!(params.to_string(), "{foo: 5, bar: x}");
        assert_eq!(Params::new().to_string(), "{}");
    }

    #[test]
    fn test_file_content_conversions() {
        assert!(matches!(FileContent::from("abc"), FileContent::Text(t) if t == "abc"));
        assert!(matches!(FileContent::from(vec![1u8, 2, 3]), FileContent::Bytes(b) if b.len() == 3));
        let reader = FileContent::reader(Cursor::new(b"xyz".to_vec()));
        assert!(matches!(reader, FileContent::Reader(_)));
        assert_eq!(format!("{:?}", reader), "Reader");
    }

    #[test]
    fn test_files_names_in_order() {
        let files = Files::new().with("b.txt", "1").with("a.txt", vec![0u8]);
        assert_eq!(files.len(), 2);
        assert_eq!(files.names(), vec!["b.txt", "a.txt"]);
        let names: Vec<String> = files.into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b.txt".to_string(), "a.txt".to_string()]);
    }
}
