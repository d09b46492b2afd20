use crate::{
    error::Error, AttributeData, CellType, ComponentBuffer, Mesh, MeshType, PixelType, PolyData,
    PolygonRecords,
};

/// Reconstruct an indexed cell mesh from flat polygon buffers.
///
/// The output [MeshType] is inferred, not recalled: polygon buffers retain
/// neither point precision nor index width, so reconstruction always reports
/// [MeshType::canonical] metadata (pixel types aside, which are derived from
/// any attribute buffers present). Round-tripping a mesh whose types differed
/// from the defaults is lossy in the metadata by design.
///
/// # Errors
/// * structurally invalid polygon/vertex/line/strip buffers fail with a
///   MalformedInput-class [Error]
pub fn poly_data_to_mesh(poly_data: &PolyData) -> Result<Mesh, Error> {
    if poly_data.points.len() != poly_data.number_of_points * 3 {
        return Err(Error::PointBufferSize {
            points: poly_data.number_of_points,
            dimension: 3,
            actual: poly_data.points.len(),
        });
    }

    let mut cells: Vec<u32> = Vec::new();
    let mut number_of_cells = 0usize;

    if let Some(vertices) = &poly_data.vertices {
        for record in PolygonRecords::over(vertices) {
            let record = record?;
            record.expect_arity(1)?;
            push_cell(&mut cells, CellType::Vertex, record.indices, poly_data)?;
            number_of_cells += 1;
        }
    }

    if let Some(lines) = &poly_data.lines {
        for record in PolygonRecords::over(lines) {
            let record = record?;
            record.expect_arity(2)?;
            push_cell(&mut cells, CellType::Line, record.indices, poly_data)?;
            number_of_cells += 1;
        }
    }

    if let Some(strips) = &poly_data.triangle_strips {
        for record in PolygonRecords::over(strips) {
            let record = record?;
            if record.vertex_count() < 3 {
                return Err(Error::StripTooShort {
                    offset: record.offset,
                    actual: record.vertex_count(),
                });
            }
            // a strip of n points is a fan of n - 2 consecutive triangles
            for window in record.indices.windows(3) {
                push_cell(&mut cells, CellType::Triangle, window, poly_data)?;
                number_of_cells += 1;
            }
        }
    }

    let mut walked = 0usize;
    for record in poly_data.polygon_records()? {
        let record = record?;
        let cell_type = CellType::from_polygon_arity(record.vertex_count());
        push_cell(&mut cells, cell_type, record.indices, poly_data)?;
        number_of_cells += 1;
        walked += 1;
    }
    if walked != poly_data.number_of_polygons {
        return Err(Error::PolygonCountMismatch {
            declared: poly_data.number_of_polygons,
            walked,
        });
    }

    let point_data = copy_attribute(&poly_data.point_data)?;
    let cell_data = copy_attribute(&poly_data.cell_data)?;
    let mesh_type = MeshType {
        point_pixel_type: pixel_of(&point_data),
        cell_pixel_type: pixel_of(&cell_data),
        ..MeshType::canonical()
    };

    let cell_buffer_size = cells.len();
    tracing::debug!(
        number_of_points = poly_data.number_of_points,
        number_of_cells,
        cell_buffer_size,
        "reconstructed mesh"
    );
    Ok(Mesh {
        mesh_type,
        number_of_points: poly_data.number_of_points,
        points: ComponentBuffer::Float32(poly_data.points.clone()),
        number_of_cells,
        cell_buffer_size,
        cells: ComponentBuffer::UInt32(cells),
        point_data,
        cell_data,
    })
}

/// Append one `[tag, count, index...]` cell record, bounds-checking every
/// index against the shared point array.
fn push_cell(
    cells: &mut Vec<u32>,
    cell_type: CellType,
    indices: &[u32],
    poly_data: &PolyData,
) -> Result<(), Error> {
    for &index in indices {
        if index as usize >= poly_data.number_of_points {
            return Err(Error::VertexOutOfRange {
                index: index as u64,
                points: poly_data.number_of_points,
            });
        }
    }
    cells.push(cell_type.tag() as u32);
    cells.push(indices.len() as u32);
    cells.extend_from_slice(indices);
    Ok(())
}

fn copy_attribute(data: &Option<AttributeData>) -> Result<Option<AttributeData>, Error> {
    match data {
        Some(data) => {
            data.check()?;
            Ok(Some(data.clone()))
        }
        None => Ok(None),
    }
}

fn pixel_of(data: &Option<AttributeData>) -> PixelType {
    data.as_ref()
        .map_or(PixelType::Scalar, AttributeData::pixel_type)
}
