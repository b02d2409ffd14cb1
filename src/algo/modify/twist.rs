//! Twist deformation about an axis.

use log::debug;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::geom::EPSILON;
use crate::mesh::{MeshIndex, PolyMesh, Selection, VertexId};

use super::Modifier;

/// The twist modifier: every vertex rotates about an axis line by an angle
/// proportional to its distance from that axis.
///
/// The angle factor is given in degrees of rotation per unit of distance.
/// A zero factor or a degenerate axis direction makes the modifier a no-op;
/// vertices on the axis never move. Distance to the axis and position along
/// it are both preserved, so the deformation is a pure twist.
///
/// ```
/// use whittle::algo::modify::Twist;
/// use nalgebra::{Point3, Vector3};
///
/// let twist = Twist::new()
///     .with_axis(Point3::origin(), Vector3::z())
///     .with_angle_factor(45.0);
/// ```
#[derive(Debug, Clone)]
pub struct Twist {
    origin: Point3<f64>,
    direction: Vector3<f64>,
    angle_factor: f64,
}

impl Twist {
    /// Default modifier: z-axis through the origin, zero angle factor.
    pub fn new() -> Self {
        Self {
            origin: Point3::origin(),
            direction: Vector3::z(),
            angle_factor: 0.0,
        }
    }

    /// Set the twist axis as a line through `origin` along `direction`.
    pub fn with_axis(mut self, origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        self.origin = origin;
        self.direction = direction;
        self
    }

    /// Set the angle factor, in degrees of rotation per unit of distance
    /// from the axis.
    pub fn with_angle_factor(mut self, degrees_per_unit: f64) -> Self {
        self.angle_factor = degrees_per_unit.to_radians();
        self
    }

    /// The twist axis as a unit direction, or `None` when degenerate.
    fn axis(&self) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(self.direction, EPSILON)
    }

    fn rotated(&self, axis: &Unit<Vector3<f64>>, p: &Point3<f64>) -> Point3<f64> {
        let arm = p - self.origin;
        let distance = arm.cross(axis).norm();
        let rot = Rotation3::from_axis_angle(axis, distance * self.angle_factor);
        self.origin + rot * arm
    }

    /// Compute all new positions against the current mesh, then commit.
    fn twist_vertices<I: MeshIndex>(&self, mesh: &mut PolyMesh<I>, vertices: &[VertexId<I>]) {
        let Some(axis) = self.axis() else {
            return;
        };
        if self.angle_factor == 0.0 {
            return;
        }
        let moves: Vec<(VertexId<I>, Point3<f64>)> = vertices
            .iter()
            .map(|&v| (v, self.rotated(&axis, mesh.position(v))))
            .collect();
        debug!("twist: {} vertices moved", moves.len());
        for (v, p) in moves {
            mesh.set_position(v, p);
        }
    }
}

impl Default for Twist {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> Modifier<I> for Twist {
    fn apply(&self, mesh: &mut PolyMesh<I>) {
        let vertices: Vec<VertexId<I>> = mesh.vertex_ids().collect();
        self.twist_vertices(mesh, &vertices);
    }

    fn apply_to_selection(&self, mesh: &mut PolyMesh<I>, selection: &mut Selection<I>) {
        selection.collect_vertices(mesh);
        let vertices: Vec<VertexId<I>> = selection
            .inner_vertices()
            .iter()
            .chain(selection.outer_vertices())
            .chain(selection.boundary_vertices())
            .copied()
            .collect();
        self.twist_vertices(mesh, &vertices);
    }
}
