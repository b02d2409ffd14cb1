//! Mesh construction from face-vertex lists.
//!
//! This is the sole ingestion path from external generators: a flat vertex
//! position slice plus one index loop per face, with arbitrary face arity.
//! Primitive creators (cones, grids, ...) are expected to produce exactly
//! this representation and hand it over.

use std::collections::HashMap;

use log::debug;
use nalgebra::Point3;

use super::halfedge::PolyMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and polygonal faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - One counter-clockwise vertex index loop per face, arity >= 3
///
/// # Errors
/// * [`MeshError::EmptyMesh`] for an empty face list
/// * [`MeshError::InvalidVertexIndex`] for an out-of-range corner
/// * [`MeshError::DegenerateFace`] for a face with fewer than three corners
///   or a repeated corner
/// * [`MeshError::NonManifoldEdge`] when a directed edge is used by more than
///   one face (inconsistent winding or more than two faces per edge)
///
/// # Example
/// ```
/// use whittle::mesh::{build_from_faces, PolyMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(2.0, 0.5, 0.0),
/// ];
/// // One quad and one triangle sharing an edge.
/// let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
///
/// let mesh: PolyMesh = build_from_faces(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 5);
/// assert_eq!(mesh.num_faces(), 2);
/// ```
pub fn build_from_faces<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<PolyMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        for (ci, &vi) in face.iter().enumerate() {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if face[ci + 1..].contains(&vi) {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }
    }

    let mut mesh = PolyMesh::with_capacity(vertices.len(), faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&pos| mesh.add_vertex(pos)).collect();

    // Map from directed edge (v0, v1) to half-edge ID.
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::new();

    // First pass: create the interior half-edge loop of every face.
    for face in faces {
        let arity = face.len();
        let first = mesh.num_halfedges();
        let ids: Vec<HalfEdgeId<I>> = (0..arity).map(|_| mesh.add_halfedge()).collect();
        let face_id = mesh.add_face(ids[0]);

        for (i, &he_id) in ids.iter().enumerate() {
            let v0 = face[i];
            let v1 = face[(i + 1) % arity];
            {
                let he = mesh.halfedge_mut(he_id);
                he.origin = vertex_ids[v0];
                he.next = ids[(i + 1) % arity];
                he.prev = ids[(i + arity - 1) % arity];
                he.face = face_id;
            }
            mesh.vertex_mut(vertex_ids[v0]).halfedge = he_id;
            if edge_map.insert((v0, v1), he_id).is_some() {
                return Err(MeshError::NonManifoldEdge { v0, v1 });
            }
        }
        debug_assert_eq!(mesh.num_halfedges(), first + arity);
    }

    // Second pass: link twins, creating boundary half-edges for unmatched
    // directed edges.
    let directed: Vec<((usize, usize), HalfEdgeId<I>)> =
        edge_map.iter().map(|(&k, &v)| (k, v)).collect();
    for ((v0, v1), he) in directed {
        if let Some(&twin) = edge_map.get(&(v1, v0)) {
            mesh.halfedge_mut(he).twin = twin;
        } else {
            let boundary_he = mesh.add_halfedge();
            mesh.halfedge_mut(he).twin = boundary_he;
            let bhe = mesh.halfedge_mut(boundary_he);
            bhe.origin = vertex_ids[v1];
            bhe.twin = he;
            // Face stays invalid: this is an outer arc.
        }
    }

    // Third pass: link boundary half-edges into loops.
    link_boundary_loops(&mut mesh);

    // Fourth pass: ensure boundary vertices point to boundary half-edges so
    // vertex orbits cover the full star.
    fix_boundary_vertex_halfedges(&mut mesh);

    debug!(
        "built mesh: {} vertices, {} half-edges, {} faces",
        mesh.num_vertices(),
        mesh.num_halfedges(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Build a half-edge mesh from vertices and quad faces.
///
/// Convenience wrapper over [`build_from_faces`] for fixed-arity input.
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<PolyMesh<I>> {
    let loops: Vec<Vec<usize>> = faces.iter().map(|f| f.to_vec()).collect();
    build_from_faces(vertices, &loops)
}

/// Link boundary half-edges into proper loops.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    let boundary_hes: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    // Group by origin vertex; each boundary vertex of a manifold mesh has
    // exactly one outgoing boundary half-edge.
    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::new();
    for he in &boundary_hes {
        outgoing.insert(mesh.origin(*he).index(), *he);
    }

    for &he in &boundary_hes {
        let dest = mesh.dest(he).index();
        if let Some(&next_he) = outgoing.get(&dest) {
            mesh.halfedge_mut(he).next = next_he;
            mesh.halfedge_mut(next_he).prev = he;
        }
    }
}

/// Ensure boundary vertices point to a boundary half-edge.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    for vid in mesh.vertex_ids().collect::<Vec<_>>() {
        let start_he = mesh.vertex(vid).halfedge;
        if !start_he.is_valid() {
            continue;
        }
        let mut he = start_he;
        loop {
            if mesh.is_boundary_halfedge(he) {
                mesh.vertex_mut(vid).halfedge = he;
                break;
            }
            he = mesh.next(mesh.twin(he));
            if he == start_he {
                break;
            }
        }
    }
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Returns a `(vertices, faces)` tuple with one index loop per face. This is
/// the read-only export surface for external serializers.
pub fn to_face_vertex<I: MeshIndex>(mesh: &PolyMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();
    let faces: Vec<Vec<usize>> = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();
    (vertices, faces)
}
