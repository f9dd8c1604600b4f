pub mod types;

pub use types::{BuiltTriangle, EdgeKey, IndexTriangle, Mesh, Vertex, VertexKey};
