//! Generalized Catmull-Clark subdivision for polygonal meshes.
//!
//! One iteration quad-splits the target faces and then smooths vertex
//! positions. The smoothing rule a vertex gets depends on which partition
//! it falls into after the split:
//!
//! - **inner, smooth label**: the classic Catmull-Clark average of the
//!   pre-split face centers, the one-ring, and the old position;
//! - **inner, creased label**: the plain one-ring average, and only if at
//!   least one neighbor is smooth. Quad-splitting labels the vertices it
//!   inserts, so edge midpoints pick up the standard edge-point rule from
//!   this branch for free, face centroids stay pinned, and caller-placed
//!   crease marks whose whole ring is creased stay rigid.
//! - **open boundary**: averaged with its boundary neighbors only, so the
//!   boundary curve refines without pulling toward the interior;
//! - **outer rim** (selection only): averaged along the rim, then projected
//!   back onto the surrounding unselected surface when that surface is a
//!   single plane. A rim bordering more than one distinct plane is a sharp
//!   feature and is left unmoved.
//!
//! Vertex labels are never reset here; marks survive any number of
//! iterations, and so do the labels the splits insert.
//!
//! All target positions are computed against the pre-smoothing mesh and
//! committed in a second pass, so the result does not depend on vertex
//! order.

use std::collections::HashSet;

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::geom::Plane;
use crate::mesh::{FaceId, MeshIndex, PolyMesh, Selection, VertexId, SMOOTH_LABEL};

use super::{Blend, Subdividor};

/// The Catmull-Clark subdivision operator.
///
/// One call to [`apply`](Subdividor::apply) or
/// [`apply_to_selection`](Subdividor::apply_to_selection) performs one
/// iteration; call it repeatedly to refine further. Faces of any arity are
/// accepted; after one iteration the refined region is all quads.
///
/// ```
/// use whittle::algo::subdivide::CatmullClark;
///
/// let subdiv = CatmullClark::new().with_keep_boundary(true).with_blend(0.5);
/// ```
#[derive(Debug)]
pub struct CatmullClark {
    keep_edges: bool,
    keep_boundary: bool,
    blend: Blend,
}

impl CatmullClark {
    /// Default operator: full blend, nothing frozen.
    pub fn new() -> Self {
        Self {
            keep_edges: false,
            keep_boundary: false,
            blend: Blend::Constant(1.0),
        }
    }

    /// Freeze the rim of a selection (no effect on whole-mesh application).
    pub fn with_keep_edges(mut self, keep: bool) -> Self {
        self.keep_edges = keep;
        self
    }

    /// Freeze vertices on the mesh's open boundary.
    pub fn with_keep_boundary(mut self, keep: bool) -> Self {
        self.keep_boundary = keep;
        self
    }

    /// Blend smoothed positions with the originals by a constant factor
    /// in `[0, 1]`; `0` refines topology without moving anything.
    pub fn with_blend(mut self, factor: f64) -> Self {
        self.blend = Blend::Constant(factor);
        self
    }

    /// Blend with a factor that varies over space, evaluated at each
    /// vertex's pre-smoothing position.
    pub fn with_blend_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> f64 + 'static,
    {
        self.blend = Blend::Spatial(Box::new(f));
        self
    }

    fn blended<I: MeshIndex>(
        &self,
        mesh: &PolyMesh<I>,
        v: VertexId<I>,
        target: Point3<f64>,
    ) -> Option<(VertexId<I>, Point3<f64>)> {
        let orig = mesh.position(v);
        let t = self.blend.value(orig);
        if t <= 0.0 {
            return None;
        }
        Some((v, orig + t * (target - orig)))
    }
}

impl Default for CatmullClark {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> Subdividor<I> for CatmullClark {
    fn apply(&self, mesh: &mut PolyMesh<I>) {
        if mesh.num_faces() == 0 {
            return;
        }
        let avg_fc = average_face_centers(mesh, |_| true);
        mesh.quad_split_faces();

        let mut selection = Selection::all_faces(mesh);
        selection.collect_vertices(mesh);
        let moves = self.smooth(mesh, &selection, &avg_fc);
        debug!(
            "catmull-clark: {} faces, {} vertices moved",
            mesh.num_faces(),
            moves.len()
        );
        for (v, p) in moves {
            mesh.set_position(v, p);
        }
    }

    fn apply_to_selection(&self, mesh: &mut PolyMesh<I>, selection: &mut Selection<I>) {
        if selection.is_empty() {
            return;
        }
        let avg_fc = average_face_centers(mesh, |f| selection.contains(f));
        let faces: Vec<FaceId<I>> = selection.faces().collect();
        let report = mesh.quad_split_selected(&faces);

        // The quads created inside the region belong to the region.
        selection.extend(report.new_faces.iter().copied());
        selection.collect_vertices(mesh);

        let moves = self.smooth(mesh, selection, &avg_fc);
        debug!(
            "catmull-clark (selection): {} faces selected, {} vertices moved",
            selection.len(),
            moves.len()
        );
        for (v, p) in moves {
            mesh.set_position(v, p);
        }
    }
}

impl CatmullClark {
    /// Compute blended target positions for every vertex the rules move.
    /// Reads only; the caller commits the moves afterwards.
    fn smooth<I: MeshIndex>(
        &self,
        mesh: &PolyMesh<I>,
        selection: &Selection<I>,
        avg_fc: &[Option<Point3<f64>>],
    ) -> Vec<(VertexId<I>, Point3<f64>)> {
        let mut moves = Vec::new();

        for &v in selection.inner_vertices() {
            if let Some(target) = inner_target(mesh, v, avg_fc) {
                moves.extend(self.blended(mesh, v, target));
            }
        }

        if !self.keep_boundary {
            let on_boundary: HashSet<VertexId<I>> =
                selection.boundary_vertices().iter().copied().collect();
            for &v in selection.boundary_vertices() {
                if let Some(target) = boundary_target(mesh, v, &on_boundary) {
                    moves.extend(self.blended(mesh, v, target));
                }
            }
        }

        if !self.keep_edges {
            let on_rim: HashSet<VertexId<I>> =
                selection.outer_vertices().iter().copied().collect();
            for &v in selection.outer_vertices() {
                if let Some(target) = outer_target(mesh, v, selection, &on_rim) {
                    moves.extend(self.blended(mesh, v, target));
                }
            }
        }

        moves
    }
}

/// Average center of the kept faces around each vertex, captured before
/// the split so the smoothing rule sees the coarse face centers.
fn average_face_centers<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    mut keep: impl FnMut(FaceId<I>) -> bool,
) -> Vec<Option<Point3<f64>>> {
    mesh.vertex_ids()
        .map(|v| {
            let mut sum = Vector3::zeros();
            let mut n = 0usize;
            for f in mesh.face_star(v) {
                if keep(f) {
                    sum += mesh.face_centroid(f).coords;
                    n += 1;
                }
            }
            (n > 0).then(|| Point3::from(sum / n as f64))
        })
        .collect()
}

/// Smoothing rule for vertices whose faces are all in the refined region.
fn inner_target<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
    avg_fc: &[Option<Point3<f64>>],
) -> Option<Point3<f64>> {
    if mesh.label(v) == SMOOTH_LABEL {
        // avg_fc covers every pre-split vertex, and only pre-split vertices
        // can carry the smooth label here.
        let q = (*avg_fc.get(v.index())?)?;
        let mut ring = Vector3::zeros();
        let mut order = 0usize;
        for n in mesh.vertex_neighbors(v) {
            ring += mesh.position(n).coords;
            order += 1;
        }
        if order == 0 {
            return None;
        }
        let order_f = order as f64;
        let p = (q.coords + 2.0 * ring / order_f + (order_f - 3.0) * mesh.position(v).coords)
            / order_f;
        Some(Point3::from(p))
    } else {
        // Creased vertex: relax toward the plain ring average, but only if
        // some neighbor is smooth. A ring of creased vertices is rigid.
        let mut ring = Vector3::zeros();
        let mut order = 0usize;
        let mut any_smooth = false;
        for n in mesh.vertex_neighbors(v) {
            ring += mesh.position(n).coords;
            order += 1;
            any_smooth |= mesh.label(n) == SMOOTH_LABEL;
        }
        (any_smooth && order > 0).then(|| Point3::from(ring / order as f64))
    }
}

/// Smoothing rule for open-boundary (and declared frozen-ring) vertices:
/// average with the boundary neighbors only. A vertex with fewer than two
/// boundary neighbors is a dangling feature and stays put.
fn boundary_target<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
    on_boundary: &HashSet<VertexId<I>>,
) -> Option<Point3<f64>> {
    let mut p = mesh.position(v).coords;
    let mut c = 1.0;
    let mut nc = 0usize;
    for n in mesh.vertex_neighbors(v) {
        if on_boundary.contains(&n) {
            p += mesh.position(n).coords;
            c += 1.0;
            nc += 1;
        }
    }
    (nc > 1).then(|| Point3::from(p / c))
}

/// Smoothing rule for rim vertices of a selection: average along the rim,
/// then pull back onto the surrounding unselected surface. If the
/// unselected faces around the vertex do not agree on one plane, the rim
/// sits on a sharp feature and the vertex is left unmoved.
fn outer_target<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
    selection: &Selection<I>,
    on_rim: &HashSet<VertexId<I>>,
) -> Option<Point3<f64>> {
    let mut planes: Vec<Plane> = Vec::new();
    for f in mesh.face_star(v) {
        if selection.contains(f) {
            continue;
        }
        if let Ok(plane) = mesh.face_plane(f) {
            if !planes.iter().any(|p| p.approx_eq(&plane)) {
                planes.push(plane);
            }
        }
    }

    let mut p = mesh.position(v).coords;
    let mut c = 1.0;
    let mut nc = 0usize;
    for n in mesh.vertex_neighbors(v) {
        if !on_rim.contains(&n) {
            continue;
        }
        // Only rim neighbors reached through the refined region count;
        // a rim edge lying entirely outside the selection does not.
        if mesh.shared_faces(v, n).iter().any(|f| selection.contains(*f)) {
            p += mesh.position(n).coords;
            c += 1.0;
            nc += 1;
        }
    }
    if nc <= 1 {
        return None;
    }
    let q = Point3::from(p / c);
    (planes.len() == 1).then(|| planes[0].closest_point(&q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_faces;
    use approx::assert_relative_eq;

    fn unit_quad() -> PolyMesh<u32> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_faces(&vertices, &[vec![0, 1, 2, 3]]).unwrap()
    }

    /// Unit cube; face 1 is the top (z = 1), face 2 is the front (y = 0).
    fn cube() -> PolyMesh<u32> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ];
        build_from_faces(&vertices, &faces).unwrap()
    }

    fn find_vertex(mesh: &PolyMesh<u32>, p: Point3<f64>) -> VertexId<u32> {
        mesh.vertex_ids()
            .find(|&v| (mesh.position(v) - p).norm() < 1e-9)
            .unwrap_or_else(|| panic!("no vertex at {p:?}"))
    }

    #[test]
    fn zero_blend_refines_without_moving() {
        let mut mesh = unit_quad();
        CatmullClark::new().with_blend(0.0).apply(&mut mesh);

        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_vertices(), 9);
        // Corners, midpoints, and the centroid all sit at their inserted
        // positions.
        find_vertex(&mesh, Point3::new(0.0, 0.0, 0.0));
        find_vertex(&mesh, Point3::new(0.5, 0.0, 0.0));
        find_vertex(&mesh, Point3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn open_quad_pulls_corners_inward() {
        let mut mesh = unit_quad();
        CatmullClark::new().apply(&mut mesh);

        assert!(mesh.is_valid());
        // Corner rule on the open boundary: average with the two adjacent
        // boundary midpoints.
        let corner = find_vertex(&mesh, Point3::new(1.0 / 6.0, 1.0 / 6.0, 0.0));
        assert_eq!(mesh.label(corner), SMOOTH_LABEL);
        // Boundary midpoints average back to themselves, and the centroid
        // has no smooth neighbor.
        find_vertex(&mesh, Point3::new(0.5, 0.0, 0.0));
        find_vertex(&mesh, Point3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn keep_boundary_freezes_the_open_quad() {
        let mut mesh = unit_quad();
        CatmullClark::new().with_keep_boundary(true).apply(&mut mesh);

        assert_eq!(mesh.num_faces(), 4);
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
        ] {
            find_vertex(&mesh, p);
        }
    }

    #[test]
    fn cube_matches_the_reference_stencils() {
        let mut mesh = cube();
        CatmullClark::new().apply(&mut mesh);

        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 24);
        assert_eq!(mesh.num_vertices(), 26);
        assert_eq!(mesh.euler_characteristic(), 2);

        // Corner stencil at valence 3: (Q + 2R) / 3.
        let corner = find_vertex(&mesh, Point3::new(2.0 / 9.0, 2.0 / 9.0, 2.0 / 9.0));
        assert_eq!(mesh.label(corner), SMOOTH_LABEL);
        // Edge-point stencil: average of the two endpoints and the two
        // adjacent face centers.
        find_vertex(&mesh, Point3::new(0.5, 0.125, 0.125));
        // Face points stay at the coarse centroids.
        find_vertex(&mesh, Point3::new(0.5, 0.5, 0.0));
        find_vertex(&mesh, Point3::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn repeated_application_stays_manifold() {
        let mut mesh = cube();
        let subdiv = CatmullClark::new();
        for _ in 0..2 {
            subdiv.apply(&mut mesh);
        }
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 96);
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn partial_blend_interpolates() {
        let mut mesh = cube();
        CatmullClark::new().with_blend(0.5).apply(&mut mesh);

        // Halfway between the original corner and the full stencil result.
        find_vertex(&mesh, Point3::new(1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0));
    }

    #[test]
    fn spatial_blend_moves_only_where_it_is_positive() {
        let mut mesh = cube();
        CatmullClark::new()
            .with_blend_fn(|p| if p.z < 0.5 { 0.0 } else { 1.0 })
            .apply(&mut mesh);

        // Bottom corners keep their positions, top corners take the full
        // stencil.
        find_vertex(&mesh, Point3::new(0.0, 0.0, 0.0));
        find_vertex(&mesh, Point3::new(2.0 / 9.0, 2.0 / 9.0, 7.0 / 9.0));
    }

    #[test]
    fn crease_marks_survive_and_stay_rigid() {
        let mut mesh = cube();
        mesh.set_label(VertexId::new(0), 7);
        CatmullClark::new().apply(&mut mesh);

        // The marked corner's ring is all midpoints, none smooth, so the
        // corner holds its position while everything around it relaxes.
        let corner = find_vertex(&mesh, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(corner, VertexId::new(0));
        assert_eq!(mesh.label(corner), 7);
        // The unmarked corners still take the smooth stencil.
        find_vertex(&mesh, Point3::new(7.0 / 9.0, 7.0 / 9.0, 7.0 / 9.0));
    }

    #[test]
    fn selection_with_kept_edges_only_changes_topology() {
        let mut mesh = cube();
        let mut sel = Selection::from_faces([FaceId::new(1)]);
        CatmullClark::new()
            .with_keep_edges(true)
            .apply_to_selection(&mut mesh, &mut sel);

        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(mesh.num_vertices(), 13);
        assert_eq!(sel.len(), 4);

        // Rim frozen, centroid creased: every position is a refinement
        // position.
        for p in [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(0.5, 0.5, 1.0),
            Point3::new(0.0, 0.0, 0.0),
        ] {
            find_vertex(&mesh, p);
        }
    }

    #[test]
    fn selection_rim_projects_onto_a_single_surrounding_plane() {
        let mut mesh = cube();
        // Top and front faces: their shared edge becomes interior to the
        // refined region.
        let mut sel = Selection::from_faces([FaceId::new(1), FaceId::new(2)]);
        CatmullClark::new().apply_to_selection(&mut mesh, &mut sel);

        assert!(mesh.is_valid());
        assert_eq!(sel.len(), 8);

        // The midpoint of the shared edge is inner and takes the edge-point
        // stencil.
        find_vertex(&mesh, Point3::new(0.5, 0.125, 0.875));
        // A rim corner bordered by exactly one unselected plane (x = 0)
        // relaxes along the rim and stays on that plane.
        find_vertex(&mesh, Point3::new(0.0, 1.0 / 6.0, 5.0 / 6.0));
        // A rim corner bordered by two unselected planes is a sharp feature
        // and does not move.
        find_vertex(&mesh, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn selection_feeds_back_into_further_iterations() {
        let mut mesh = cube();
        let mut sel = Selection::from_faces([FaceId::new(1)]);
        let subdiv = CatmullClark::new().with_keep_edges(true);
        subdiv.apply_to_selection(&mut mesh, &mut sel);
        subdiv.apply_to_selection(&mut mesh, &mut sel);

        assert!(mesh.is_valid());
        assert_eq!(sel.len(), 16);
        assert_eq!(mesh.num_faces(), 21);
    }

    /// Mean one-ring displacement normalized by mean edge length; shrinks
    /// as the surface smooths out.
    fn roughness(mesh: &PolyMesh<u32>) -> f64 {
        let mut edge_sum = 0.0;
        let mut edges = 0usize;
        for he in mesh.halfedge_ids() {
            edge_sum += mesh.edge_length(he);
            edges += 1;
        }
        let h = edge_sum / edges as f64;

        let mut sum = 0.0;
        let mut n = 0usize;
        for v in mesh.vertex_ids() {
            if mesh.is_boundary_vertex(v) {
                continue;
            }
            let mut ring = Vector3::zeros();
            let mut k = 0usize;
            for nb in mesh.vertex_neighbors(v) {
                ring += mesh.position(nb).coords;
                k += 1;
            }
            let lap = ring / k as f64 - mesh.position(v).coords;
            sum += lap.norm() / h;
            n += 1;
        }
        sum / n as f64
    }

    #[test]
    fn iterating_flattens_the_limit_surface() {
        let mut once = cube();
        let subdiv = CatmullClark::new();
        subdiv.apply(&mut once);

        let mut thrice = cube();
        for _ in 0..3 {
            subdiv.apply(&mut thrice);
        }
        assert_eq!(thrice.num_faces(), 384);
        assert!(roughness(&thrice) < roughness(&once));
    }

    #[test]
    fn works_through_the_trait_object() {
        let subdiv: Box<dyn Subdividor<u32>> = Box::new(CatmullClark::new());
        let mut mesh = unit_quad();
        subdiv.apply(&mut mesh);
        assert_eq!(mesh.num_faces(), 4);
    }

    #[test]
    fn empty_inputs_are_no_ops() {
        let mut mesh = PolyMesh::<u32>::new();
        CatmullClark::new().apply(&mut mesh);
        assert_eq!(mesh.num_vertices(), 0);

        let mut mesh = cube();
        let mut sel = Selection::new();
        CatmullClark::new().apply_to_selection(&mut mesh, &mut sel);
        assert_eq!(mesh.num_faces(), 6);
    }

    #[test]
    fn planar_grid_stays_planar() {
        let mut vertices = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let faces = vec![
            vec![0, 1, 4, 3],
            vec![1, 2, 5, 4],
            vec![3, 4, 7, 6],
            vec![4, 5, 8, 7],
        ];
        let mut mesh: PolyMesh<u32> = build_from_faces(&vertices, &faces).unwrap();
        CatmullClark::new().apply(&mut mesh);

        assert!(mesh.is_valid());
        for v in mesh.vertex_ids() {
            assert_relative_eq!(mesh.position(v).z, 0.0);
        }
        // The interior vertex is a fixed point of the smooth stencil on a
        // uniform planar grid.
        find_vertex(&mesh, Point3::new(1.0, 1.0, 0.0));
    }
}
