use std::fmt;

/// A mesh vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Hashable key with exact equality semantics
    ///
    /// `0.0` and `-0.0` map to the same key so that keys agree with `==`.
    pub fn key(&self) -> VertexKey {
        VertexKey([bits(self.x), bits(self.y), bits(self.z)])
    }
}

fn bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

/// Bit-exact identity of a vertex position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey([u64; 3]);

/// A triangle as three vertex indices in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTriangle {
    pub indices: [usize; 3],
}

impl IndexTriangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }

    /// Indices sorted ascending, identical for every winding
    pub fn sorted(&self) -> [usize; 3] {
        let mut key = self.indices;
        key.sort_unstable();
        key
    }

    /// Directed edges in winding order: v0->v1, v1->v2, v2->v0
    pub fn directed_edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }
}

impl fmt::Display for IndexTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.indices;
        write!(f, "({}, {}, {})", a, b, c)
    }
}

/// A triangle with its vertex positions resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltTriangle {
    /// Three vertices in the winding of the source triangle
    pub vertices: [Vertex; 3],
}

impl BuiltTriangle {
    /// All six vertex orderings of this triangle, as hashable keys
    pub fn orderings(&self) -> [[VertexKey; 3]; 6] {
        let [a, b, c] = self.vertices.map(|v| v.key());
        [
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ]
    }
}

impl fmt::Display for BuiltTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.vertices;
        write!(f, "({}, {}, {})", a, b, c)
    }
}

/// Undirected edge between two vertex indices, stored smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub lo: usize,
    pub hi: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }
}

/// A parsed OFF mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<IndexTriangle>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<IndexTriangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Resolve a triangle's indices to positions
    ///
    /// Indices are validated by the parser, so this only panics on meshes
    /// assembled by hand with out-of-range indices.
    pub fn build(&self, tri: &IndexTriangle) -> BuiltTriangle {
        BuiltTriangle {
            vertices: tri.indices.map(|i| self.vertices[i]),
        }
    }

    /// Built form of every triangle, in triangle order
    pub fn built_triangles(&self) -> Vec<BuiltTriangle> {
        self.triangles.iter().map(|t| self.build(t)).collect()
    }

    /// Triangle indices followed by their resolved positions
    pub fn describe(&self, tri: &IndexTriangle) -> String {
        format!("{}{{{}}}", tri, self.build(tri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_is_winding_independent() {
        let a = IndexTriangle::new(0, 1, 2);
        let b = IndexTriangle::new(2, 1, 0);
        let c = IndexTriangle::new(1, 2, 0);

        assert_eq!(a.sorted(), [0, 1, 2]);
        assert_eq!(a.sorted(), b.sorted());
        assert_eq!(a.sorted(), c.sorted());
    }

    #[test]
    fn test_directed_edges() {
        let tri = IndexTriangle::new(4, 7, 9);
        assert_eq!(tri.directed_edges(), [(4, 7), (7, 9), (9, 4)]);
    }

    #[test]
    fn test_edge_key_canonical() {
        assert_eq!(EdgeKey::new(3, 1), EdgeKey::new(1, 3));
        assert_eq!(EdgeKey::new(3, 1), EdgeKey { lo: 1, hi: 3 });
    }

    #[test]
    fn test_vertex_key_signed_zero() {
        let a = Vertex::new(0.0, 1.0, 2.0);
        let b = Vertex::new(-0.0, 1.0, 2.0);
        assert_eq!(a.key(), b.key());

        let c = Vertex::new(0.0, 1.0, 2.000001);
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_orderings_cover_all_windings() {
        let tri = BuiltTriangle {
            vertices: [
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ],
        };
        let reversed = BuiltTriangle {
            vertices: [tri.vertices[2], tri.vertices[1], tri.vertices[0]],
        };

        let orderings = tri.orderings();
        assert!(orderings.contains(&reversed.orderings()[0]));
        for i in 0..6 {
            for j in (i + 1)..6 {
                assert_ne!(orderings[i], orderings[j]);
            }
        }
    }

    #[test]
    fn test_describe() {
        let mesh = Mesh::new(
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.5, 0.0),
            ],
            vec![IndexTriangle::new(0, 1, 2)],
        );

        assert_eq!(
            mesh.describe(&mesh.triangles[0]),
            "(0, 1, 2){((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.5, 0.0))}"
        );
    }
}
