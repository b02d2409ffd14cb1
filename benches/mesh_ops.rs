//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Point3, Vector3};
use whittle::geom::{Plane, Polygon};
use whittle::prelude::*;

fn grid_quads(n: usize) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    (vertices, faces)
}

fn create_grid_mesh(n: usize) -> PolyMesh {
    let (vertices, faces) = grid_quads(n);
    build_from_faces(&vertices, &faces).unwrap()
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (vertices, faces) = grid_quads(10);
    c.bench_function("build_grid_10x10", |b| {
        b.iter(|| {
            let mesh: PolyMesh = build_from_faces(&vertices, &faces).unwrap();
            mesh
        });
    });
}

fn bench_mesh_traversal(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);

    c.bench_function("vertex_neighbors_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in mesh.vertex_ids() {
                count += mesh.vertex_neighbors(v).count();
            }
            count
        });
    });

    c.bench_function("face_normals_all", |b| {
        b.iter(|| {
            let mut sum = nalgebra::Vector3::zeros();
            for f in mesh.face_ids() {
                sum += mesh.face_normal(f);
            }
            sum
        });
    });
}

fn bench_quad_split(c: &mut Criterion) {
    c.bench_function("quad_split_grid_20x20", |b| {
        b.iter_with_setup(
            || create_grid_mesh(20),
            |mut mesh| {
                mesh.quad_split_faces();
                mesh
            },
        );
    });
}

fn bench_subdivision(c: &mut Criterion) {
    let subdiv = CatmullClark::new();

    c.bench_function("catmull_clark_grid_20x20", |b| {
        b.iter_with_setup(
            || create_grid_mesh(20),
            |mut mesh| {
                subdiv.apply(&mut mesh);
                mesh
            },
        );
    });

    c.bench_function("catmull_clark_selection_grid_20x20", |b| {
        b.iter_with_setup(
            || {
                let mesh = create_grid_mesh(20);
                // Select the left half of the grid.
                let sel = Selection::from_faces(
                    mesh.face_ids().filter(|&f| f.index() % 20 < 10),
                );
                (mesh, sel)
            },
            |(mut mesh, mut sel)| {
                subdiv.apply_to_selection(&mut mesh, &mut sel);
                mesh
            },
        );
    });
}

fn bench_polygon_clipping(c: &mut Criterion) {
    // A 64-gon in the z = 0 plane.
    let n = 64;
    let points: Vec<Point3<f64>> = (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            Point3::new(a.cos(), a.sin(), 0.0)
        })
        .collect();
    let polygon = Polygon::from_points(points);
    let knife = Plane::new(Point3::origin(), Vector3::x()).unwrap();

    c.bench_function("split_64gon", |b| {
        b.iter(|| polygon.split(&knife));
    });

    c.bench_function("trim_64gon", |b| {
        b.iter_with_setup(
            || polygon.clone(),
            |mut poly| {
                poly.trim_convex(0.1).unwrap();
                poly
            },
        );
    });
}

criterion_group!(
    benches,
    bench_mesh_construction,
    bench_mesh_traversal,
    bench_quad_split,
    bench_subdivision,
    bench_polygon_clipping
);
criterion_main!(benches);
