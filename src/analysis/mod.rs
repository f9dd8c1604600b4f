pub mod checks;
pub mod duplicates;
pub mod edges;
pub mod report;

pub use checks::{Check, Checks};
pub use duplicates::{DuplicatePair, find_geometry_duplicates, find_index_duplicates};
pub use edges::{Edge, EdgeMap};
pub use report::Diagnostics;

use crate::mesh::Mesh;

/// Run every enabled pass over a mesh
pub fn analyze(mesh: &Mesh, checks: Checks) -> Diagnostics {
    let mut diagnostics = Diagnostics::new(checks);

    if checks.index_duplicates {
        diagnostics.index_duplicates = Some(find_index_duplicates(&mesh.triangles));
    }
    if checks.geometry_duplicates {
        diagnostics.geometry_duplicates =
            Some(find_geometry_duplicates(&mesh.built_triangles()));
    }
    if checks.needs_edges() {
        diagnostics.edges = Some(EdgeMap::build(&mesh.triangles));
    }

    diagnostics
}
