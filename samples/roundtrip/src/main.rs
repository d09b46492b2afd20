use clap::Parser;
use nalgebra::point;

use polyfold::{
    flatten_mesh, poly_data_to_mesh, CellType, ComponentBuffer, Mesh, MeshType, NonPolygonal,
};

mod cli;
use cli::{Cli, Shape};

fn cube() -> Mesh {
    let corners = [
        point![0.0f32, 0.0, 0.0],
        point![1.0, 0.0, 0.0],
        point![1.0, 1.0, 0.0],
        point![0.0, 1.0, 0.0],
        point![0.0, 0.0, 1.0],
        point![1.0, 0.0, 1.0],
        point![1.0, 1.0, 1.0],
        point![0.0, 1.0, 1.0],
    ];
    let faces: [[u32; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    let points: Vec<f32> = corners.iter().flat_map(|p| p.coords.iter().copied()).collect();
    let mut cells: Vec<u32> = Vec::new();
    for face in faces {
        cells.push(CellType::Quadrilateral.tag() as u32);
        cells.push(4);
        cells.extend_from_slice(&face);
    }
    Mesh {
        mesh_type: MeshType::canonical(),
        number_of_points: 8,
        points: ComponentBuffer::Float32(points),
        number_of_cells: 6,
        cell_buffer_size: cells.len(),
        cells: ComponentBuffer::UInt32(cells),
        point_data: None,
        cell_data: None,
    }
}

/// A 2-D triangulated grid of `size` cells per side; exercises the
/// zero-padding of planar meshes to 3-D polydata.
fn grid(size: usize) -> Mesh {
    let side = size + 1;
    let mut points: Vec<f32> = Vec::with_capacity(side * side * 2);
    for y in 0..side {
        for x in 0..side {
            points.push(x as f32);
            points.push(y as f32);
        }
    }
    let at = |x: usize, y: usize| (y * side + x) as u32;
    let mut cells: Vec<u32> = Vec::new();
    for y in 0..size {
        for x in 0..size {
            for triangle in [
                [at(x, y), at(x + 1, y), at(x + 1, y + 1)],
                [at(x, y), at(x + 1, y + 1), at(x, y + 1)],
            ] {
                cells.push(CellType::Triangle.tag() as u32);
                cells.push(3);
                cells.extend_from_slice(&triangle);
            }
        }
    }
    Mesh {
        mesh_type: MeshType {
            dimension: 2,
            ..MeshType::canonical()
        },
        number_of_points: side * side,
        points: ComponentBuffer::Float32(points),
        number_of_cells: size * size * 2,
        cell_buffer_size: cells.len(),
        cells: ComponentBuffer::UInt32(cells),
        point_data: None,
        cell_data: None,
    }
}

pub fn main() {
    let args = Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);

    let mesh = match args.shape {
        Shape::Cube => cube(),
        Shape::Grid => grid(args.grid_size),
    };
    tracing::info!(
        shape = %args.shape,
        points = mesh.number_of_points,
        cells = mesh.number_of_cells,
        "built fixture mesh"
    );

    let flattened = match flatten_mesh(&mesh, NonPolygonal::Drop) {
        Ok(flattened) => flattened,
        Err(e) => {
            tracing::error!("flattening failed: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        polygons = flattened.poly_data.number_of_polygons,
        buffer_size = flattened.poly_data.polygons_buffer_size,
        dropped = flattened.dropped_cells,
        "mesh -> polydata"
    );

    match poly_data_to_mesh(&flattened.poly_data) {
        Ok(round) => tracing::info!(
            points = round.number_of_points,
            cells = round.number_of_cells,
            mesh_type = ?round.mesh_type,
            "polydata -> mesh"
        ),
        Err(e) => {
            tracing::error!("reconstruction failed: {e}");
            std::process::exit(1);
        }
    }
}
