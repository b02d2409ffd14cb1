//! Half-edge mesh data structure for polygonal meshes.
//!
//! Each undirected edge is represented by two **half-edges** pointing in
//! opposite directions. A half-edge knows its **twin**, the **next**
//! half-edge around its face, its **origin vertex**, and its incident
//! **face**; faces may have any arity >= 3. Boundary half-edges carry an
//! invalid face id and are linked into boundary loops, so every traversal
//! orbit terminates.
//!
//! All cross-references are arena indices into one [`PolyMesh`]; the mesh is
//! the single owner of every vertex, half-edge, and face. Traversals are
//! point-in-time: mutating the mesh while holding a traversal iterator or a
//! materialized id list from before the mutation is a caller contract
//! violation, not a detected error.

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::Result;
use crate::geom::Plane;

/// Vertex label value meaning "smooth/default".
///
/// Any other label marks a crease/corner vertex that subdivision preserves
/// specially.
pub const SMOOTH_LABEL: i64 = -1;

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Crease label: [`SMOOTH_LABEL`] for an ordinary vertex, anything else
    /// marks a crease/corner vertex.
    pub label: i64,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is guaranteed to be a boundary half-edge.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new smooth vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            label: SMOOTH_LABEL,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The opposite half-edge (pointing in the reverse direction).
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face (clockwise).
    /// Redundant but speeds up local surgery.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to.
    /// Invalid for boundary half-edges.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new uninitialized half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh over polygonal faces of arbitrary arity.
///
/// The mesh exclusively owns its vertex, half-edge, and face arenas; all
/// topology operators mutate through it. It is a single mutable resource:
/// callers serialize access through `&mut` exclusivity.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            // Quad-dominant estimate plus slack for boundary half-edges.
            halfedges: Vec::with_capacity(num_faces * 4 + num_faces / 2),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by ID.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    /// Get the crease label of a vertex.
    #[inline]
    pub fn label(&self, v: VertexId<I>) -> i64 {
        self.vertex(v).label
    }

    /// Set the crease label of a vertex.
    #[inline]
    pub fn set_label(&mut self, v: VertexId<I>, label: i64) {
        self.vertex_mut(v).label = label;
    }

    /// Reset every vertex label to [`SMOOTH_LABEL`].
    pub fn reset_labels(&mut self) {
        for v in &mut self.vertices {
            v.label = SMOOTH_LABEL;
        }
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex is on the open boundary of the mesh.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return true; // Isolated vertex
        }
        let mut he = start;
        loop {
            if self.is_boundary_halfedge(he) {
                return true;
            }
            he = self.next(self.twin(he));
            if he == start {
                break;
            }
        }
        false
    }

    /// Check if an edge (represented by one of its half-edges) is on the
    /// boundary.
    #[inline]
    pub fn is_boundary_edge(&self, he: HalfEdgeId<I>) -> bool {
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.twin(he))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(|i| VertexId::new(i))
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(|i| HalfEdgeId::new(i))
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Canonical id of the undirected edge a half-edge belongs to.
    ///
    /// Both half-edges of a pair map to the same id (the lower of their two
    /// indices), so the id works as a set or map key for per-edge
    /// bookkeeping.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        EdgeId::new(he.index().min(self.twin(he).index()))
    }

    /// A representative half-edge of an undirected edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId<I>) -> HalfEdgeId<I> {
        HalfEdgeId::new(e.index())
    }

    /// Iterate over all undirected edge IDs, one per half-edge pair.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.halfedge_ids()
            .filter(move |&he| he.index() < self.twin(he).index())
            .map(|he| EdgeId::new(he.index()))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(|i| FaceId::new(i))
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over half-edges around a vertex (outgoing half-edges).
    ///
    /// The orbit is the fixed two-step composition twin-then-next.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over the one-ring neighbor vertices of a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Iterate over faces adjacent to a vertex (boundary arcs skipped).
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v).filter_map(|he| {
            let f = self.face_of(he);
            if f.is_valid() {
                Some(f)
            } else {
                None
            }
        })
    }

    /// The face star of a vertex: all incident faces, duplicates removed.
    pub fn face_star(&self, v: VertexId<I>) -> Vec<FaceId<I>> {
        let mut star = Vec::new();
        for f in self.vertex_faces(v) {
            if !star.contains(&f) {
                star.push(f);
            }
        }
        star
    }

    /// Faces containing both `u` and `v` as corners.
    ///
    /// For a manifold edge this yields 0, 1, or 2 faces.
    pub fn shared_faces(&self, u: VertexId<I>, v: VertexId<I>) -> Vec<FaceId<I>> {
        let mut shared = Vec::new();
        for f in self.face_star(u) {
            if self.face_vertices(f).any(|w| w == v) && !shared.contains(&f) {
                shared.push(f);
            }
        }
        shared
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the corner vertices of a face.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Number of corners of a face.
    pub fn face_vertex_count(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    // ==================== Geometry ====================

    /// Vertex centroid of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        let mut count = 0usize;
        for v in self.face_vertices(f) {
            sum += self.position(v).coords;
            count += 1;
        }
        Point3::from(sum / count.max(1) as f64)
    }

    /// Unnormalized Newell cross-sum of a face; its magnitude is twice the
    /// face area.
    fn face_newell(&self, f: FaceId<I>) -> Vector3<f64> {
        let positions: Vec<Point3<f64>> =
            self.face_vertices(f).map(|v| *self.position(v)).collect();
        let n = positions.len();
        let mut sum = Vector3::zeros();
        for i in 0..n {
            let a = &positions[i];
            let b = &positions[(i + 1) % n];
            sum += a.coords.cross(&b.coords);
        }
        sum
    }

    /// Newell normal of a face, normalized.
    ///
    /// Robust for non-convex and slightly non-planar faces.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.face_newell(f).normalize()
    }

    /// Area of a face (Newell cross-sum magnitude).
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.face_newell(f).norm()
    }

    /// The supporting plane of a face: through its centroid, oriented by its
    /// Newell normal.
    ///
    /// Fails for degenerate (zero-area) faces.
    pub fn face_plane(&self, f: FaceId<I>) -> Result<Plane> {
        Plane::new(self.face_centroid(f), self.face_newell(f))
    }

    /// Compute the length of an edge.
    pub fn edge_length(&self, he: HalfEdgeId<I>) -> f64 {
        let p0 = self.position(self.origin(he));
        let p1 = self.position(self.dest(he));
        (p1 - p0).norm()
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, he: HalfEdgeId<I>) -> Point3<f64> {
        let p0 = self.position(self.origin(he));
        let p1 = self.position(self.dest(he));
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    /// Compute the valence (degree) of a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;
        let mut min = first.position;
        let mut max = first.position;
        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }
        Some((min, max))
    }

    /// Euler characteristic V - E + F of the mesh.
    ///
    /// Equals 2 per closed, connected, genus-0 component.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    // ==================== Construction ====================

    /// Add a new smooth vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    pub(crate) fn add_halfedge(&mut self) -> HalfEdgeId<I> {
        let id = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(HalfEdge::new());
        id
    }

    pub(crate) fn add_face(&mut self, halfedge: HalfEdgeId<I>) -> FaceId<I> {
        let id = FaceId::new(self.faces.len());
        self.faces.push(Face::new(halfedge));
        id
    }

    // ==================== Validation ====================

    /// Check if the mesh connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).origin != vid {
                return false;
            }
        }

        for (heid, he) in self.halfedges() {
            if he.twin.is_valid() && self.halfedge(he.twin).twin != heid {
                return false;
            }
            if he.next.is_valid() && self.halfedge(he.next).prev != heid {
                return false;
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next != heid {
                return false;
            }
        }

        for (fid, f) in self.faces() {
            if !f.halfedge.is_valid() {
                return false;
            }
            if self.halfedge(f.halfedge).face != fid {
                return false;
            }
            // The next cycle must return to the start.
            let mut he = f.halfedge;
            let mut steps = 0usize;
            loop {
                he = self.next(he);
                steps += 1;
                if he == f.halfedge {
                    break;
                }
                if steps > self.halfedges.len() {
                    return false;
                }
            }
            if steps < 3 {
                return false;
            }
        }

        true
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a PolyMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a PolyMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current;
        // If he goes v -> w, twin(he) goes w -> v, and next(twin(he)) is the
        // next outgoing half-edge from v.
        self.current = self.mesh.next(self.mesh.twin(self.current));
        if self.current == self.start {
            self.done = true;
        }
        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a PolyMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a PolyMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.done = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::build_from_faces;
    use approx::assert_relative_eq;

    fn quad_mesh() -> PolyMesh<u32> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
        build_from_faces(&vertices, &faces).unwrap()
    }

    #[test]
    fn empty_mesh() {
        let mesh = PolyMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn vertex_labels_default_smooth() {
        let mut mesh = PolyMesh::<u32>::new();
        let v = mesh.add_vertex(Point3::origin());
        assert_eq!(mesh.label(v), SMOOTH_LABEL);
        mesh.set_label(v, 4);
        assert_eq!(mesh.label(v), 4);
        mesh.reset_labels();
        assert_eq!(mesh.label(v), SMOOTH_LABEL);
    }

    #[test]
    fn face_geometry() {
        let mesh = quad_mesh();
        let f = FaceId::<u32>::new(0);
        assert_eq!(mesh.face_vertex_count(f), 4);
        let c = mesh.face_centroid(f);
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(mesh.face_area(f), 1.0, epsilon = 1e-12);
        assert!(mesh.face_normal(f).z > 0.99);
        let plane = mesh.face_plane(f).unwrap();
        assert_relative_eq!(plane.signed_distance(&c), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn one_ring_and_valence() {
        let mesh = quad_mesh();
        // Vertex 1 touches both quads: neighbors 0, 2, 4.
        let v = VertexId::<u32>::new(1);
        let mut neighbors: Vec<usize> = mesh.vertex_neighbors(v).map(|n| n.index()).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![0, 2, 4]);
        assert_eq!(mesh.valence(v), 3);
    }

    #[test]
    fn face_star_and_shared_faces() {
        let mesh = quad_mesh();
        let v1 = VertexId::<u32>::new(1);
        let v2 = VertexId::<u32>::new(2);
        let v0 = VertexId::<u32>::new(0);

        assert_eq!(mesh.face_star(v1).len(), 2);
        assert_eq!(mesh.face_star(v0).len(), 1);

        // v1-v2 is the shared interior edge.
        assert_eq!(mesh.shared_faces(v1, v2).len(), 2);
        // v0-v1 bounds only the first quad.
        assert_eq!(mesh.shared_faces(v0, v1).len(), 1);
        // v0 and v4 share no face.
        assert!(mesh.shared_faces(v0, VertexId::new(4)).is_empty());
    }

    #[test]
    fn boundary_classification() {
        let mesh = quad_mesh();
        // Every vertex of an open two-quad strip is on the boundary.
        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
        }
        // The shared edge 1-2 is interior.
        let interior = mesh
            .halfedge_ids()
            .find(|&he| {
                let (o, d) = (mesh.origin(he).index(), mesh.dest(he).index());
                (o, d) == (1, 2) || (o, d) == (2, 1)
            })
            .unwrap();
        assert!(!mesh.is_boundary_edge(interior));
    }

    #[test]
    fn undirected_edge_ids() {
        let mesh = quad_mesh();
        assert_eq!(mesh.edge_ids().count(), mesh.num_edges());
        for he in mesh.halfedge_ids() {
            // A pair shares one canonical edge id.
            assert_eq!(mesh.edge_of(he), mesh.edge_of(mesh.twin(he)));
        }
        for e in mesh.edge_ids() {
            assert_eq!(mesh.edge_of(mesh.edge_halfedge(e)), e);
        }
    }

    #[test]
    fn euler_characteristic_of_open_strip() {
        let mesh = quad_mesh();
        // V=6, E=7, F=2 -> 1 for a disk.
        assert_eq!(mesh.euler_characteristic(), 1);
    }
}
