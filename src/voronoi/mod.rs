mod builder;
mod cell;
mod d2;

pub use builder::{
    bisector_plane, vertex_hull, voronoi_cells, voronoi_cells_brute_force, voronoi_neighbors,
    DelaunayEngine, DelaunayTetrahedron,
};
pub use cell::VoronoiCell;
pub use d2::{voronoi_2d, VoronoiCell2D};
