//! Edge adjacency and manifoldness checks
//!
//! Every triangle edge is keyed by its unordered vertex pair, so an edge
//! walked as (a, b) by one triangle and (b, a) by its neighbour is the same
//! edge. A well-formed closed surface has exactly two triangles on every edge.

use crate::mesh::{EdgeKey, IndexTriangle};
use std::collections::HashMap;

/// An undirected edge and the triangles that reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub key: EdgeKey,
    /// Vertex pair in the winding of the first triangle that used the edge
    pub first_seen: (usize, usize),
    /// Ordinals of referencing triangles, in triangle order
    pub triangles: Vec<usize>,
}

impl Edge {
    /// Edge bordering fewer than two triangles (a hole or boundary)
    pub fn is_open(&self) -> bool {
        self.triangles.len() < 2
    }

    /// Edge shared by more than two triangles
    pub fn is_non_manifold(&self) -> bool {
        self.triangles.len() > 2
    }
}

/// All edges of a triangle list, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    index: HashMap<EdgeKey, usize>,
    edges: Vec<Edge>,
}

impl EdgeMap {
    /// Build the edge list from triangles in index form
    pub fn build(triangles: &[IndexTriangle]) -> Self {
        let mut map = Self::default();

        for (i, tri) in triangles.iter().enumerate() {
            for (a, b) in tri.directed_edges() {
                map.add(a, b, i);
            }
        }

        map
    }

    fn add(&mut self, a: usize, b: usize, triangle: usize) {
        let key = EdgeKey::new(a, b);
        match self.index.get(&key) {
            Some(&slot) => self.edges[slot].triangles.push(triangle),
            None => {
                self.index.insert(key, self.edges.len());
                self.edges.push(Edge {
                    key,
                    first_seen: (a, b),
                    triangles: vec![triangle],
                });
            }
        }
    }

    /// Look up an edge by its endpoints, in either order
    pub fn get(&self, a: usize, b: usize) -> Option<&Edge> {
        self.index
            .get(&EdgeKey::new(a, b))
            .map(|&slot| &self.edges[slot])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn open_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_open())
    }

    pub fn non_manifold_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_non_manifold())
    }

    /// No edge borders a single triangle
    pub fn is_watertight(&self) -> bool {
        self.edges.iter().all(|e| !e.is_open())
    }

    /// No edge is shared by more than two triangles
    pub fn is_manifold(&self) -> bool {
        self.edges.iter().all(|e| !e.is_non_manifold())
    }
}
