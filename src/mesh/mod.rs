mod convex_hull;
mod convex_mesh;

pub use convex_hull::convex_hull;
pub use convex_mesh::ConvexMesh;
