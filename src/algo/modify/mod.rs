//! Vertex-position modifiers.
//!
//! Modifiers rewrite vertex positions and leave topology untouched, which
//! makes them freely composable with the subdivision operators: refine
//! first, deform after (or the other way around), on the whole mesh or on a
//! face selection.
//!
//! # Example
//!
//! ```
//! use whittle::prelude::*;
//! use nalgebra::{Point3, Vector3};
//!
//! let vertices = vec![
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//! ];
//! let mut mesh: PolyMesh = build_from_faces(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
//!
//! let twist = Twist::new()
//!     .with_axis(Point3::origin(), Vector3::z())
//!     .with_angle_factor(45.0);
//! twist.apply(&mut mesh);
//! ```

mod twist;

pub use twist::Twist;

use crate::mesh::{MeshIndex, PolyMesh, Selection};

/// A vertex-position modifier.
///
/// Implementors move vertices in place; topology is never changed, so every
/// half-edge, face, and selection stays valid across an application.
/// Preconditions are caller contracts, so these methods do not return
/// errors.
pub trait Modifier<I: MeshIndex> {
    /// Modify every vertex of the mesh.
    fn apply(&self, mesh: &mut PolyMesh<I>);

    /// Modify only the vertices of the selected faces.
    ///
    /// The selection's vertex partitions are re-collected first, so the
    /// face set alone determines which vertices move; inner, outer, and
    /// boundary vertices are all included.
    fn apply_to_selection(&self, mesh: &mut PolyMesh<I>, selection: &mut Selection<I>);
}
