//! Face selections: non-owning views over a subset of one mesh's faces.
//!
//! A selection stores face ids only; it never copies or owns mesh elements.
//! Vertex partitions (inner, outer, boundary) are derived on demand by
//! [`Selection::collect_vertices`] and are snapshots: any structural change
//! to the mesh invalidates them, and the caller must re-collect. Using a
//! stale selection after mutation is a caller contract violation, not a
//! detected error.

use std::collections::HashSet;

use log::debug;

use super::halfedge::PolyMesh;
use super::index::{FaceId, MeshIndex, VertexId};

/// A subset of the faces of one mesh, with derived vertex partitions.
///
/// Partition semantics after [`collect_vertices`](Self::collect_vertices):
/// - **boundary**: selection vertices on the mesh's open boundary, plus any
///   caller-declared frozen vertices;
/// - **outer**: rim vertices, incident to at least one selected and at least
///   one unselected face, minus boundary (the two sets are disjoint);
/// - **inner**: every other selection vertex (all incident faces selected).
#[derive(Debug, Clone)]
pub struct Selection<I: MeshIndex = u32> {
    faces: HashSet<FaceId<I>>,
    declared_boundary: HashSet<VertexId<I>>,
    inner: Vec<VertexId<I>>,
    outer: Vec<VertexId<I>>,
    boundary: Vec<VertexId<I>>,
}

impl<I: MeshIndex> Default for Selection<I> {
    fn default() -> Self {
        Self {
            faces: HashSet::new(),
            declared_boundary: HashSet::new(),
            inner: Vec::new(),
            outer: Vec::new(),
            boundary: Vec::new(),
        }
    }
}

impl<I: MeshIndex> Selection<I> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from a set of face ids.
    pub fn from_faces<It: IntoIterator<Item = FaceId<I>>>(faces: It) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Select every face of a mesh.
    pub fn all_faces(mesh: &PolyMesh<I>) -> Self {
        Self::from_faces(mesh.face_ids())
    }

    /// Add a face to the selection.
    pub fn add(&mut self, f: FaceId<I>) {
        self.faces.insert(f);
    }

    /// Add several faces to the selection.
    pub fn extend<It: IntoIterator<Item = FaceId<I>>>(&mut self, faces: It) {
        self.faces.extend(faces);
    }

    /// Remove a face from the selection.
    pub fn remove(&mut self, f: FaceId<I>) {
        self.faces.remove(&f);
    }

    /// Membership test for a face.
    #[inline]
    pub fn contains(&self, f: FaceId<I>) -> bool {
        self.faces.contains(&f)
    }

    /// Membership test for a vertex, against the last collected partitions.
    pub fn contains_vertex(&self, v: VertexId<I>) -> bool {
        self.inner.contains(&v) || self.outer.contains(&v) || self.boundary.contains(&v)
    }

    /// Iterate over the selected face ids.
    pub fn faces(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces.iter().copied()
    }

    /// Number of selected faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Declare vertices as frozen boundary regardless of mesh topology.
    ///
    /// Takes effect at the next [`collect_vertices`](Self::collect_vertices).
    pub fn declare_boundary<It: IntoIterator<Item = VertexId<I>>>(&mut self, vertices: It) {
        self.declared_boundary.extend(vertices);
    }

    /// Recompute the inner/outer/boundary vertex partitions from the current
    /// face set.
    ///
    /// Not auto-maintained: must be re-invoked after any topology change to
    /// the mesh or edit to the face set. Never mutates the mesh.
    pub fn collect_vertices(&mut self, mesh: &PolyMesh<I>) {
        self.inner.clear();
        self.outer.clear();
        self.boundary.clear();

        let mut vertices: Vec<VertexId<I>> = Vec::new();
        let mut seen: HashSet<VertexId<I>> = HashSet::new();
        for &f in &self.faces {
            for v in mesh.face_vertices(f) {
                if seen.insert(v) {
                    vertices.push(v);
                }
            }
        }

        for v in vertices {
            let on_open_boundary = mesh.is_boundary_vertex(v);
            if on_open_boundary || self.declared_boundary.contains(&v) {
                self.boundary.push(v);
                continue;
            }
            let has_unselected = mesh.face_star(v).iter().any(|f| !self.faces.contains(f));
            if has_unselected {
                self.outer.push(v);
            } else {
                self.inner.push(v);
            }
        }

        debug!(
            "selection partitions: {} inner, {} outer, {} boundary over {} faces",
            self.inner.len(),
            self.outer.len(),
            self.boundary.len(),
            self.faces.len()
        );
    }

    /// Vertices whose incident faces are all selected, per the last
    /// collection.
    pub fn inner_vertices(&self) -> &[VertexId<I>] {
        &self.inner
    }

    /// Rim vertices touching both selected and unselected faces, per the
    /// last collection. Disjoint from the boundary partition.
    pub fn outer_vertices(&self) -> &[VertexId<I>] {
        &self.outer
    }

    /// Open-boundary and caller-declared frozen vertices, per the last
    /// collection.
    pub fn boundary_vertices(&self) -> &[VertexId<I>] {
        &self.boundary
    }
}
