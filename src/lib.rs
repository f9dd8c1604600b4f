//! offcheck - Diagnose duplicate triangles and non-manifold edges in OFF meshes

pub mod analysis;
pub mod config;
pub mod mesh;
pub mod off;
