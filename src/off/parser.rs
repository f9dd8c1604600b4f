use super::error::{OffError, OffResult, Section};
use crate::mesh::{IndexTriangle, Mesh, Vertex};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

const HEADER: &str = "OFF";

/// Upper bound on capacity reserved from the declared counts
const MAX_PREALLOC: usize = 1 << 16;

/// Counts declared on the second line of an OFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredCounts {
    pub vertices: usize,
    pub triangles: usize,
}

/// An OFF file whose header and count line have been read
///
/// The declared counts are available before any geometry is parsed.
pub struct OffReader<R> {
    lines: LineReader<R>,
    counts: DeclaredCounts,
}

impl OffReader<BufReader<File>> {
    /// Open an OFF file and read its header and counts
    pub fn open(path: &Path) -> OffResult<Self> {
        let file = File::open(path).map_err(|source| OffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_path(BufReader::new(file), path.to_path_buf())
    }
}

impl<R: BufRead> OffReader<R> {
    pub fn new(reader: R) -> OffResult<Self> {
        Self::with_path(reader, PathBuf::new())
    }

    fn with_path(reader: R, path: PathBuf) -> OffResult<Self> {
        let mut lines = LineReader::new(reader, path);

        let header = lines.next_line()?.ok_or(OffError::Truncated {
            section: Section::Header,
            expected: 1,
            found: 0,
        })?;
        if header != HEADER {
            return Err(OffError::HeaderMismatch { found: header });
        }

        let counts = lines.next_line()?.ok_or(OffError::Truncated {
            section: Section::Counts,
            expected: 1,
            found: 0,
        })?;
        let (vertices, triangles) = parse_counts(&counts, lines.line)?;

        Ok(Self {
            lines,
            counts: DeclaredCounts {
                vertices,
                triangles,
            },
        })
    }

    pub fn counts(&self) -> DeclaredCounts {
        self.counts
    }

    /// Read the declared vertices and triangles
    ///
    /// Anything after the declared triangles is ignored.
    pub fn read_mesh(mut self) -> OffResult<Mesh> {
        let DeclaredCounts {
            vertices: vertex_count,
            triangles: triangle_count,
        } = self.counts;
        let lines = &mut self.lines;

        // Counts are untrusted until the lines are actually there
        let mut vertices = Vec::with_capacity(vertex_count.min(MAX_PREALLOC));
        for found in 0..vertex_count {
            let line = lines.next_line()?.ok_or(OffError::Truncated {
                section: Section::Vertex,
                expected: vertex_count,
                found,
            })?;
            vertices.push(parse_vertex(&line, lines.line)?);
        }

        let mut triangles = Vec::with_capacity(triangle_count.min(MAX_PREALLOC));
        for found in 0..triangle_count {
            let line = lines.next_line()?.ok_or(OffError::Truncated {
                section: Section::Triangle,
                expected: triangle_count,
                found,
            })?;
            triangles.push(parse_triangle(&line, lines.line, vertex_count)?);
        }

        Ok(Mesh::new(vertices, triangles))
    }
}

/// Load an OFF mesh from disk
pub fn load_off(path: &Path) -> OffResult<Mesh> {
    OffReader::open(path)?.read_mesh()
}

/// Parse an OFF mesh
///
/// # Format
/// 1. `OFF` header line (exact match)
/// 2. `<vertex count> <triangle count>`, extra tokens ignored
/// 3. One `<x> <y> <z>` line per vertex
/// 4. One `<n> <i0> <i1> <i2>` line per triangle, `n` is discarded
pub fn parse_off<R: BufRead>(reader: R) -> OffResult<Mesh> {
    OffReader::new(reader)?.read_mesh()
}

/// Line iterator that tracks the 1-based number of the last line read
struct LineReader<R> {
    lines: Lines<R>,
    line: usize,
    path: PathBuf,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R, path: PathBuf) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            path,
        }
    }

    fn next_line(&mut self) -> OffResult<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line += 1;
                Ok(Some(line))
            }
            Some(Err(source)) => Err(OffError::Io {
                path: self.path.clone(),
                source,
            }),
            None => Ok(None),
        }
    }
}

fn parse_counts(line: &str, line_no: usize) -> OffResult<(usize, usize)> {
    let malformed = |message: String| OffError::MalformedCounts {
        line: line_no,
        message,
    };

    let mut tokens = line.split_whitespace();
    let mut next_count = |name: &str| -> OffResult<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(format!("missing {} count", name)))?;
        token
            .parse()
            .map_err(|e| malformed(format!("invalid {} count {:?}: {}", name, token, e)))
    };

    let vertex_count = next_count("vertex")?;
    let triangle_count = next_count("triangle")?;
    Ok((vertex_count, triangle_count))
}

fn parse_vertex(line: &str, line_no: usize) -> OffResult<Vertex> {
    let malformed = |message: String| OffError::MalformedVertex {
        line: line_no,
        message,
    };

    let mut coords = [0.0f64; 3];
    let mut tokens = line.split_whitespace();
    for (axis, coord) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(format!("missing {} coordinate", axis)))?;
        *coord = token
            .parse()
            .map_err(|e| malformed(format!("invalid {} coordinate {:?}: {}", axis, token, e)))?;
    }

    let [x, y, z] = coords;
    Ok(Vertex::new(x, y, z))
}

fn parse_triangle(line: &str, line_no: usize, vertex_count: usize) -> OffResult<IndexTriangle> {
    let malformed = |message: String| OffError::MalformedTriangle {
        line: line_no,
        message,
    };

    // Leading face vertex count is not used
    let mut tokens = line.split_whitespace().skip(1);

    let mut indices = [0usize; 3];
    for (slot, index) in indices.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(format!("missing vertex index {}", slot)))?;
        *index = token
            .parse()
            .map_err(|e| malformed(format!("invalid vertex index {:?}: {}", token, e)))?;
        if *index >= vertex_count {
            return Err(OffError::IndexOutOfRange {
                line: line_no,
                index: *index,
                vertex_count,
            });
        }
    }

    let [a, b, c] = indices;
    Ok(IndexTriangle::new(a, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TETRAHEDRON: &str = "OFF\n\
        4 4 6\n\
        0.0 0.0 0.0\n\
        1.0 0.0 0.0\n\
        0.0 1.0 0.0\n\
        0.0 0.0 1.0\n\
        3 0 2 1\n\
        3 0 1 3\n\
        3 1 2 3\n\
        3 2 0 3\n";

    fn parse(input: &str) -> OffResult<Mesh> {
        parse_off(Cursor::new(input))
    }

    #[test]
    fn test_parse_declared_counts() {
        let mesh = parse(TETRAHEDRON).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertices[3], Vertex::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.triangles[0], IndexTriangle::new(0, 2, 1));
    }

    #[test]
    fn test_parse_crlf() {
        let input = TETRAHEDRON.replace('\n', "\r\n");
        let mesh = parse(&input).unwrap();

        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_trailing_lines_ignored() {
        let input = format!("{}3 0 1 2\ngarbage\n", TETRAHEDRON);
        let mesh = parse(&input).unwrap();

        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_extra_vertex_tokens_ignored() {
        let input = "OFF\n3 1\n0 0 0 255 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
        let mesh = parse(input).unwrap();

        assert_eq!(mesh.vertices[0], Vertex::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_face_count_token_discarded() {
        let input = "OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\nx 2 1 0\n";
        let mesh = parse(input).unwrap();

        assert_eq!(mesh.triangles[0], IndexTriangle::new(2, 1, 0));
    }

    #[test]
    fn test_header_wrong_case() {
        let err = parse("off\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap_err();

        match err {
            OffError::HeaderMismatch { found } => assert_eq!(found, "off"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_other_token() {
        let err = parse("COFF\n").unwrap_err();
        assert!(matches!(err, OffError::HeaderMismatch { .. }));

        let err = parse("OFF \n3 1\n").unwrap_err();
        assert!(matches!(err, OffError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(
            err,
            OffError::Truncated {
                section: Section::Header,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_counts() {
        let err = parse("OFF\n3\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedCounts { line: 2, .. }));

        let err = parse("OFF\nthree 1\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedCounts { line: 2, .. }));

        let err = parse("OFF\n-3 1\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedCounts { .. }));
    }

    #[test]
    fn test_truncated_vertices() {
        let err = parse("OFF\n3 1\n0 0 0\n1 0 0\n").unwrap_err();

        match err {
            OffError::Truncated {
                section,
                expected,
                found,
            } => {
                assert_eq!(section, Section::Vertex);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_triangles() {
        let err = parse("OFF\n3 2\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            OffError::Truncated {
                section: Section::Triangle,
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn test_malformed_vertex() {
        let err = parse("OFF\n3 1\n0 0 0\n1 abc 0\n0 1 0\n3 0 1 2\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedVertex { line: 4, .. }));

        let err = parse("OFF\n3 1\n0 0\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedVertex { line: 3, .. }));
    }

    #[test]
    fn test_malformed_triangle() {
        let err = parse("OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedTriangle { line: 6, .. }));

        let err = parse("OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1.5 2\n").unwrap_err();
        assert!(matches!(err, OffError::MalformedTriangle { line: 6, .. }));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = parse("OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n").unwrap_err();

        match err {
            OffError::IndexOutOfRange {
                line,
                index,
                vertex_count,
            } => {
                assert_eq!(line, 6);
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_huge_vertex_count_is_truncated() {
        let err = parse("OFF\n1000000000000000 0\n0 0 0\n").unwrap_err();

        match err {
            OffError::Truncated {
                section,
                expected,
                found,
            } => {
                assert_eq!(section, Section::Vertex);
                assert_eq!(expected, 1_000_000_000_000_000);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_max_counts_are_truncated() {
        let err = parse("OFF\n18446744073709551615 0\n").unwrap_err();
        assert!(matches!(
            err,
            OffError::Truncated {
                section: Section::Vertex,
                found: 0,
                ..
            }
        ));

        let err = parse("OFF\n0 18446744073709551615\n").unwrap_err();
        assert!(matches!(
            err,
            OffError::Truncated {
                section: Section::Triangle,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_counts_available_before_geometry() {
        let reader = OffReader::new(Cursor::new("OFF\n3 2 0\n0 0 0\n")).unwrap();

        assert_eq!(
            reader.counts(),
            DeclaredCounts {
                vertices: 3,
                triangles: 2,
            }
        );
        assert!(matches!(
            reader.read_mesh().unwrap_err(),
            OffError::Truncated {
                section: Section::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn test_load_off() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tetra.off");
        std::fs::write(&path, TETRAHEDRON).unwrap();

        let mesh = load_off(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.off");

        match load_off(&path).unwrap_err() {
            OffError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
