//! The `RECORD` file listing every entry of a wheel with its digest.
//!
//! Each line is `path,sha256=<digest>,size`, where the digest is the
//! URL-safe base64 encoding of the SHA-256 hash without padding. The
//! `RECORD` file lists itself last with empty digest and size fields.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// One hashed entry of a wheel archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Path inside the archive, `/`-separated.
    pub path: String,
    /// `sha256=`-prefixed URL-safe base64 digest.
    pub hash: String,
    /// Size of the entry in bytes.
    pub size: u64,
}

impl RecordEntry {
    /// Hash `contents` stored at `path`.
    #[must_use]
    pub fn for_contents(path: impl Into<String>, contents: &[u8]) -> Self {
        Self {
            path: path.into(),
            hash: format!("sha256={}", URL_SAFE_NO_PAD.encode(Sha256::digest(contents))),
            size: contents.len() as u64,
        }
    }
}

/// The accumulated `RECORD` of a wheel under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<RecordEntry>,
}

impl Record {
    /// Hash and append an entry.
    pub fn push(&mut self, path: impl Into<String>, contents: &[u8]) {
        self.entries.push(RecordEntry::for_contents(path, contents));
    }

    /// Return the recorded entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Render the file contents, ending with the line for `record_path`
    /// itself.
    #[must_use]
    pub fn render(&self, record_path: &str) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&csv_field(&entry.path));
            out.push(',');
            out.push_str(&entry.hash);
            out.push(',');
            out.push_str(&entry.size.to_string());
            out.push('\n');
        }
        out.push_str(&csv_field(record_path));
        out.push_str(",,\n");
        out
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contents_hash_to_the_known_constant() {
        let entry = RecordEntry::for_contents("empty.txt", b"");
        assert_eq!(
            entry.hash,
            "sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU"
        );
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn render_lists_entries_then_itself() {
        let mut record = Record::default();
        record.push("mlir/__init__.py", b"");
        record.push("mlir/_mlir.so", b"\x7fELF");

        let rendered = record.render("pkg-1.0.dist-info/RECORD");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("mlir/__init__.py,sha256="));
        assert!(lines[1].ends_with(",4"));
        assert_eq!(lines[2], "pkg-1.0.dist-info/RECORD,,");
    }

    #[test]
    fn paths_with_commas_are_quoted() {
        let mut record = Record::default();
        record.push("mlir/a,b.txt", b"x");
        let rendered = record.render("RECORD");
        assert!(rendered.starts_with("\"mlir/a,b.txt\",sha256="));
    }
}
