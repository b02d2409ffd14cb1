//! Mesh subdivision algorithms.
//!
//! # Generalized Catmull-Clark
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme. Each iteration:
//!
//! 1. Quad-splits every face: one midpoint vertex per edge, one centroid
//!    vertex per face, each n-gon replaced by n quads
//! 2. Smooths vertex positions as a weighted average of neighbors and the
//!    pre-split face centers
//!
//! This implementation works on faces of arbitrary arity (after one pass
//! the mesh is all-quad), supports vertex labels as crease marks, and can
//! be restricted to a [`Selection`](crate::mesh::Selection) of faces: only
//! the selected region is refined, the rim is stitched to the untouched
//! neighborhood, and rim smoothing is constrained to the surrounding
//! surface.
//!
//! # Example
//!
//! ```
//! use whittle::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh: PolyMesh = build_from_faces(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
//!
//! let subdiv = CatmullClark::new();
//! subdiv.apply(&mut mesh);
//! assert_eq!(mesh.num_faces(), 4);
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;

pub use catmull_clark::CatmullClark;

use nalgebra::Point3;

use crate::mesh::{MeshIndex, PolyMesh, Selection};

/// A subdivision operator.
///
/// Implementors rewrite topology and positions in place; preconditions
/// (manifold input, fresh selection partitions) are caller contracts, so
/// these methods do not return errors.
pub trait Subdividor<I: MeshIndex> {
    /// Subdivide the whole mesh by one iteration.
    fn apply(&self, mesh: &mut PolyMesh<I>);

    /// Subdivide only the selected faces by one iteration.
    ///
    /// The selection is updated in place: faces created inside the region
    /// are added to it and its vertex partitions are re-collected, so the
    /// same selection can be fed back in for further iterations.
    fn apply_to_selection(&self, mesh: &mut PolyMesh<I>, selection: &mut Selection<I>);
}

/// How far each vertex moves toward its smoothed target.
///
/// The factor is clamped to `[0, 1]`; `0` keeps the refined topology with
/// unsmoothed positions, `1` applies the full smoothing rule.
pub enum Blend {
    /// One factor for every vertex.
    Constant(f64),
    /// A factor derived from the vertex position before smoothing.
    Spatial(Box<dyn Fn(&Point3<f64>) -> f64>),
}

impl Blend {
    /// Evaluate the blend factor at a position.
    pub fn value(&self, p: &Point3<f64>) -> f64 {
        let f = match self {
            Blend::Constant(f) => *f,
            Blend::Spatial(f) => f(p),
        };
        f.clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for Blend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Blend::Constant(v) => write!(f, "Blend::Constant({v})"),
            Blend::Spatial(_) => write!(f, "Blend::Spatial(..)"),
        }
    }
}
