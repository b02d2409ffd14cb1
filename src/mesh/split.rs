//! Local topology rewrites: edge splitting and quad-splitting.
//!
//! Quad-splitting replaces every selected n-gon with n quads meeting at a
//! new centroid vertex, inserting one midpoint vertex per touched edge. The
//! rewiring reuses the face's boundary half-edges, so half-edges that do not
//! touch a split face stay valid, and an edge shared between a split face
//! and an unsplit face is subdivided once so both sides see matching vertex
//! counts (the unsplit n-gon simply becomes an (n+k)-gon).
//!
//! Non-manifold input (an edge incident to more than two faces) is a
//! precondition violation; the result is undefined, not an error.

use log::debug;
use nalgebra::Point3;

use super::halfedge::PolyMesh;
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// Label given to edge-midpoint vertices inserted by quad-splitting.
pub const MIDPOINT_LABEL: i64 = 1;

/// Label given to face-centroid vertices inserted by quad-splitting.
pub const CENTROID_LABEL: i64 = 2;

/// What a quad-split pass created.
#[derive(Debug, Clone)]
pub struct QuadSplitReport<I: MeshIndex = u32> {
    /// Vertex count before the split; every id below this is an original
    /// vertex.
    pub original_vertex_count: usize,
    /// Midpoint vertices inserted on split edges.
    pub midpoints: Vec<VertexId<I>>,
    /// Centroid vertices, one per split face.
    pub centroids: Vec<VertexId<I>>,
    /// Faces created by the rewiring (the split faces themselves are reused
    /// for one quad each and are not listed here).
    pub new_faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Split an undirected edge at its midpoint and return the new vertex.
    ///
    /// Both half-edges of the edge are split; twin, next, and prev symmetry
    /// is preserved, including when one side is a boundary arc. All existing
    /// half-edge ids stay valid: the original pair keeps the halves starting
    /// at the original origins.
    pub fn split_edge(&mut self, he: HalfEdgeId<I>) -> VertexId<I> {
        let t = self.twin(he);
        let m = self.add_vertex(self.edge_midpoint(he));

        let he2 = self.add_halfedge();
        let t2 = self.add_halfedge();

        let he_next = self.next(he);
        let t_next = self.next(t);
        let he_face = self.face_of(he);
        let t_face = self.face_of(t);
        let he_origin = self.origin(he);
        let t_origin = self.origin(t);

        {
            let rec = self.halfedge_mut(he2);
            rec.origin = m;
            rec.twin = t;
            rec.next = he_next;
            rec.prev = he;
            rec.face = he_face;
        }
        {
            let rec = self.halfedge_mut(t2);
            rec.origin = m;
            rec.twin = he;
            rec.next = t_next;
            rec.prev = t;
            rec.face = t_face;
        }
        self.halfedge_mut(he_next).prev = he2;
        self.halfedge_mut(t_next).prev = t2;
        self.halfedge_mut(he).next = he2;
        self.halfedge_mut(he).twin = t2;
        self.halfedge_mut(t).next = t2;
        self.halfedge_mut(t).twin = he2;

        // Anchor the midpoint to a boundary arc when the edge is open, so
        // vertex orbits keep covering the whole star.
        self.vertex_mut(m).halfedge = if !t_face.is_valid() {
            t2
        } else {
            he2
        };

        debug_assert_eq!(self.origin(he), he_origin);
        debug_assert_eq!(self.origin(t), t_origin);
        m
    }

    /// Quad-split every face of the mesh.
    ///
    /// Each n-gon is replaced by n quads around a new centroid vertex; each
    /// edge gains a midpoint vertex. See [`quad_split_selected`](Self::quad_split_selected).
    pub fn quad_split_faces(&mut self) -> QuadSplitReport<I> {
        let all: Vec<FaceId<I>> = self.face_ids().collect();
        self.quad_split_selected(&all)
    }

    /// Quad-split the given faces, leaving the rest of the mesh valid.
    ///
    /// Every edge incident to at least one listed face is split once, so an
    /// unlisted face sharing such an edge gains the midpoint as an extra
    /// corner. Listed faces are rewired into quads: one per original corner,
    /// all meeting at the face centroid. Midpoint vertices are labeled
    /// [`MIDPOINT_LABEL`], centroids [`CENTROID_LABEL`].
    pub fn quad_split_selected(&mut self, faces: &[FaceId<I>]) -> QuadSplitReport<I> {
        let mut report = QuadSplitReport {
            original_vertex_count: self.num_vertices(),
            midpoints: Vec::new(),
            centroids: Vec::with_capacity(faces.len()),
            new_faces: Vec::new(),
        };

        // Materialize the undirected edges of all listed faces before any
        // surgery, one representative half-edge each.
        let mut edges: Vec<HalfEdgeId<I>> = Vec::new();
        let mut seen: std::collections::HashSet<EdgeId<I>> = std::collections::HashSet::new();
        for &f in faces {
            for he in self.face_halfedges(f).collect::<Vec<_>>() {
                if seen.insert(self.edge_of(he)) {
                    edges.push(he);
                }
            }
        }

        for he in edges {
            let m = self.split_edge(he);
            self.set_label(m, MIDPOINT_LABEL);
            report.midpoints.push(m);
        }

        for &f in faces {
            let (centroid, new_faces) = self.rewire_face_into_quads(f);
            report.centroids.push(centroid);
            report.new_faces.extend(new_faces);
        }

        debug!(
            "quad split: {} faces -> +{} midpoints, +{} centroids, +{} faces",
            faces.len(),
            report.midpoints.len(),
            report.centroids.len(),
            report.new_faces.len()
        );
        report
    }

    /// Rewire one face whose edges have all been split into per-corner quads.
    ///
    /// The face loop alternates corner -> midpoint -> corner; the face's own
    /// id is reused for the first quad.
    fn rewire_face_into_quads(&mut self, f: FaceId<I>) -> (VertexId<I>, Vec<FaceId<I>>) {
        // f.halfedge still originates at an original corner: edge splitting
        // never changes origins of existing half-edges.
        let ring: Vec<HalfEdgeId<I>> = self.face_halfedges(f).collect();
        debug_assert!(ring.len() >= 6 && ring.len() % 2 == 0);
        let n = ring.len() / 2;

        // Centroid of the original corners (equivalently of the whole split
        // ring, since midpoints average out).
        let mut sum = nalgebra::Vector3::zeros();
        for i in 0..n {
            sum += self.position(self.origin(ring[2 * i])).coords;
        }
        let centroid = self.add_vertex(Point3::from(sum / n as f64));
        self.set_label(centroid, CENTROID_LABEL);

        // Spokes: in[i] runs from the midpoint after corner i+1 to the
        // centroid, out[i] runs from the centroid back to the midpoint
        // before it.
        let spokes_in: Vec<HalfEdgeId<I>> = (0..n).map(|_| self.add_halfedge()).collect();
        let spokes_out: Vec<HalfEdgeId<I>> = (0..n).map(|_| self.add_halfedge()).collect();

        let mut new_faces = Vec::with_capacity(n - 1);
        for i in 0..n {
            let a = ring[2 * i + 1]; // midpoint m_i -> corner c_{i+1}
            let b = ring[(2 * i + 2) % ring.len()]; // corner c_{i+1} -> midpoint m_{i+1}
            let m_next = self.origin(ring[(2 * i + 3) % ring.len()]);

            let quad = if i == 0 {
                self.face_mut(f).halfedge = a;
                f
            } else {
                let id = self.add_face(a);
                new_faces.push(id);
                id
            };

            {
                let rec = self.halfedge_mut(spokes_in[i]);
                rec.origin = m_next;
                rec.twin = spokes_out[(i + 1) % n];
                rec.next = spokes_out[i];
                rec.prev = b;
                rec.face = quad;
            }
            {
                let rec = self.halfedge_mut(spokes_out[i]);
                rec.origin = centroid;
                rec.twin = spokes_in[(i + n - 1) % n];
                rec.next = a;
                rec.prev = spokes_in[i];
                rec.face = quad;
            }
            {
                let rec = self.halfedge_mut(a);
                rec.next = b;
                rec.prev = spokes_out[i];
                rec.face = quad;
            }
            {
                let rec = self.halfedge_mut(b);
                rec.next = spokes_in[i];
                rec.prev = a;
                rec.face = quad;
            }
        }
        // Spoke twins are forward references within the loop above, so the
        // invariants are only checkable once every spoke is wired.
        for i in 0..n {
            debug_assert_eq!(self.origin(spokes_out[i]), centroid);
            debug_assert_eq!(self.dest(spokes_out[i]), self.origin(ring[2 * i + 1]));
        }
        self.vertex_mut(centroid).halfedge = spokes_out[0];

        (centroid, new_faces)
    }
}
