//! Duplicate triangle detection
//!
//! Two detectors run independently:
//! - by index: triangles referencing the same three vertex indices in any winding
//! - by geometry: triangles whose resolved positions coincide in any winding,
//!   which also catches duplicates built from repeated vertices
//!
//! Positions compare with exact floating-point equality.

use crate::mesh::{BuiltTriangle, IndexTriangle, VertexKey};
use std::collections::HashMap;

/// A triangle that repeats an earlier one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePair {
    /// Ordinal of the first triangle registered with this key
    pub first: usize,
    /// Ordinal of the repeating triangle
    pub duplicate: usize,
}

/// Find triangles that share their sorted vertex indices with an earlier triangle
///
/// Every repeat is reported against the first triangle seen with that key.
pub fn find_index_duplicates(triangles: &[IndexTriangle]) -> Vec<DuplicatePair> {
    let mut first_by_key: HashMap<[usize; 3], usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (i, tri) in triangles.iter().enumerate() {
        match first_by_key.get(&tri.sorted()) {
            Some(&first) => duplicates.push(DuplicatePair {
                first,
                duplicate: i,
            }),
            None => {
                first_by_key.insert(tri.sorted(), i);
            }
        }
    }

    duplicates
}

/// Find triangles whose vertex positions match an earlier triangle in any order
///
/// A triangle that does not match registers all six of its vertex orderings,
/// so any later triangle over the same positions is found with a single lookup
/// per ordering. A matching triangle registers nothing.
pub fn find_geometry_duplicates(triangles: &[BuiltTriangle]) -> Vec<DuplicatePair> {
    let mut first_by_ordering: HashMap<[VertexKey; 3], usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (i, tri) in triangles.iter().enumerate() {
        let orderings = tri.orderings();

        let found = orderings
            .iter()
            .find_map(|ordering| first_by_ordering.get(ordering).copied());

        match found {
            Some(first) => duplicates.push(DuplicatePair {
                first,
                duplicate: i,
            }),
            None => {
                for ordering in orderings {
                    first_by_ordering.insert(ordering, i);
                }
            }
        }
    }

    duplicates
}
