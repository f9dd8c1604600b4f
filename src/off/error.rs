//! Error types for OFF parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an OFF file.
#[derive(Debug, Error)]
pub enum OffError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// First line is not exactly `OFF`.
    #[error("Bad header: {found}")]
    HeaderMismatch { found: String },

    /// Second line does not hold a vertex count and a triangle count.
    #[error("line {line}: malformed count line: {message}")]
    MalformedCounts { line: usize, message: String },

    /// Input ended before the declared number of vertices or triangles.
    #[error("truncated input: expected {expected} {section} lines, found {found}")]
    Truncated {
        section: Section,
        expected: usize,
        found: usize,
    },

    /// A vertex line is missing coordinates or holds a non-float token.
    #[error("line {line}: malformed vertex: {message}")]
    MalformedVertex { line: usize, message: String },

    /// A triangle line is missing indices or holds a non-integer token.
    #[error("line {line}: malformed triangle: {message}")]
    MalformedTriangle { line: usize, message: String },

    /// A triangle references a vertex that does not exist.
    #[error("line {line}: vertex index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Which block of the file a truncation happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Counts,
    Vertex,
    Triangle,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Counts => "count",
            Section::Vertex => "vertex",
            Section::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Result type for OFF parsing.
pub type OffResult<T> = std::result::Result<T, OffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OffError::HeaderMismatch {
            found: "off".to_string(),
        };
        assert_eq!(format!("{err}"), "Bad header: off");

        let err = OffError::Truncated {
            section: Section::Vertex,
            expected: 4,
            found: 2,
        };
        assert_eq!(
            format!("{err}"),
            "truncated input: expected 4 vertex lines, found 2"
        );

        let err = OffError::IndexOutOfRange {
            line: 7,
            index: 12,
            vertex_count: 4,
        };
        assert!(format!("{err}").contains("index 12"));
    }
}
