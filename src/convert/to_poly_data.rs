use crate::{error::Error, AttributeData, Mesh, PolyData};

/// What to do with mesh cells that have no polygonal flattening (vertices,
/// lines, volumetric and quadratic cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NonPolygonal {
    /// Skip the cell and count it; the count is reported on the output.
    #[default]
    Drop,
    /// Fail the conversion with [Error::UnsupportedCellType].
    Reject,
}

/// A flattened mesh, plus how many cells the [Drop](NonPolygonal::Drop)
/// policy discarded on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub poly_data: PolyData,
    pub dropped_cells: usize,
}

/// Flatten a mesh's polygonal cells into a polygon buffer, dropping any
/// non-polygonal cells.
///
/// # Errors
/// * structurally invalid mesh buffers fail with a MalformedInput-class
///   [Error]; output is never silently truncated
pub fn mesh_to_poly_data(mesh: &Mesh) -> Result<PolyData, Error> {
    flatten_mesh(mesh, NonPolygonal::Drop).map(|flattened| flattened.poly_data)
}

/// Flatten a mesh's polygonal cells into a polygon buffer under an explicit
/// non-polygonal-cell policy.
///
/// Points are re-emitted as 3-D Float32 tuples whatever the input stored:
/// meshes of lower dimension gain zero coordinates, higher dimensions are
/// truncated. Polygon indices are re-emitted as the canonical UInt32.
pub fn flatten_mesh(mesh: &Mesh, policy: NonPolygonal) -> Result<Flattened, Error> {
    let dimension = mesh.mesh_type.dimension;
    if dimension == 0 {
        return Err(Error::ZeroDimension);
    }
    if mesh.points.len() != mesh.number_of_points * dimension {
        return Err(Error::PointBufferSize {
            points: mesh.number_of_points,
            dimension,
            actual: mesh.points.len(),
        });
    }

    let mut points = Vec::with_capacity(mesh.number_of_points * 3);
    for point in 0..mesh.number_of_points {
        for component in 0..3 {
            points.push(if component < dimension {
                mesh.points.coordinate_at(point * dimension + component) as f32
            } else {
                0.0
            });
        }
    }

    let mut polygons: Vec<u32> = Vec::new();
    let mut number_of_polygons = 0usize;
    let mut dropped_cells = 0usize;
    let mut walked = 0usize;
    for record in mesh.cell_records()? {
        let record = record?;
        walked += 1;
        if !record.cell_type.is_polygonal() {
            match policy {
                NonPolygonal::Drop => {
                    tracing::trace!(cell_type = ?record.cell_type, "dropping non-polygonal cell");
                    dropped_cells += 1;
                    continue;
                }
                NonPolygonal::Reject => return Err(Error::UnsupportedCellType(record.cell_type)),
            }
        }
        polygons.push(narrow(record.vertex_count as u64)?);
        for index in record.indices() {
            let index = index?;
            if index >= mesh.number_of_points as u64 {
                return Err(Error::VertexOutOfRange {
                    index,
                    points: mesh.number_of_points,
                });
            }
            polygons.push(narrow(index)?);
        }
        number_of_polygons += 1;
    }
    if walked != mesh.number_of_cells {
        return Err(Error::CellCountMismatch {
            declared: mesh.number_of_cells,
            walked,
        });
    }

    let point_data = carry(&mesh.point_data, mesh.number_of_points, "point")?;
    let cell_data = carry(&mesh.cell_data, number_of_polygons, "cell")?;

    let polygons_buffer_size = polygons.len();
    tracing::debug!(
        number_of_points = mesh.number_of_points,
        number_of_polygons,
        polygons_buffer_size,
        dropped_cells,
        "flattened mesh"
    );
    Ok(Flattened {
        poly_data: PolyData {
            number_of_points: mesh.number_of_points,
            points,
            vertices: None,
            lines: None,
            number_of_polygons,
            polygons_buffer_size,
            polygons,
            triangle_strips: None,
            point_data,
            cell_data,
        },
        dropped_cells,
    })
}

/// Indices leave the mesh width-erased; the polygon buffer stores them at
/// the canonical UInt32 width.
fn narrow(value: u64) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| Error::IndexOverflow(value))
}

/// Attribute buffers survive only while their cardinality still matches the
/// output; anything else is discarded, not resized.
fn carry(
    data: &Option<AttributeData>,
    tuples: usize,
    kind: &str,
) -> Result<Option<AttributeData>, Error> {
    let Some(data) = data else { return Ok(None) };
    data.check()?;
    if data.tuple_count() != tuples {
        tracing::warn!(
            kind,
            expected = tuples,
            actual = data.tuple_count(),
            "discarding attribute data with mismatched cardinality"
        );
        return Ok(None);
    }
    Ok(Some(data.clone()))
}
