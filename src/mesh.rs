//! Indexed cell meshes and the cursor over their flat cell buffers.

use crate::{buffer::ComponentBuffer, error::Error, AttributeData, MeshType};

/// Topology tag of one mesh cell, with its flat-buffer encoding value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellType {
    Vertex = 0,
    Line = 1,
    Triangle = 2,
    Quadrilateral = 3,
    Polygon = 4,
    Tetrahedron = 5,
    Hexahedron = 6,
    QuadraticEdge = 7,
    QuadraticTriangle = 8,
}

impl CellType {
    /// The tag stored in the cell buffer for this topology.
    #[inline]
    pub const fn tag(self) -> u64 {
        self as u64
    }

    pub fn from_tag(tag: u64) -> Result<Self, Error> {
        match tag {
            0 => Ok(CellType::Vertex),
            1 => Ok(CellType::Line),
            2 => Ok(CellType::Triangle),
            3 => Ok(CellType::Quadrilateral),
            4 => Ok(CellType::Polygon),
            5 => Ok(CellType::Tetrahedron),
            6 => Ok(CellType::Hexahedron),
            7 => Ok(CellType::QuadraticEdge),
            8 => Ok(CellType::QuadraticTriangle),
            _ => Err(Error::UnknownCellType(tag)),
        }
    }

    /// Whether this topology is a simple polygon, i.e. can be written into a
    /// flat polygon buffer unchanged.
    pub const fn is_polygonal(self) -> bool {
        matches!(
            self,
            CellType::Triangle | CellType::Quadrilateral | CellType::Polygon
        )
    }

    /// Vertex count for topologies of fixed arity; `None` for [Polygon](CellType::Polygon).
    pub const fn fixed_vertex_count(self) -> Option<usize> {
        match self {
            CellType::Vertex => Some(1),
            CellType::Line => Some(2),
            CellType::Triangle => Some(3),
            CellType::Quadrilateral => Some(4),
            CellType::Polygon => None,
            CellType::Tetrahedron => Some(4),
            CellType::Hexahedron => Some(8),
            CellType::QuadraticEdge => Some(3),
            CellType::QuadraticTriangle => Some(6),
        }
    }

    /// The cell topology reconstructed for a polygon record of `arity`
    /// points. Low arities collapse to the degenerate topologies rather than
    /// a one- or two-sided "polygon".
    pub const fn from_polygon_arity(arity: usize) -> Self {
        match arity {
            1 => CellType::Vertex,
            2 => CellType::Line,
            3 => CellType::Triangle,
            4 => CellType::Quadrilateral,
            _ => CellType::Polygon,
        }
    }
}

/// Points plus typed cells, with optional attribute data.
///
/// The cell buffer is a flat sequence of `[tag, count, index...]` records:
/// exactly [number_of_cells](Self::number_of_cells) of them, occupying
/// exactly [cell_buffer_size](Self::cell_buffer_size) elements. Walk it with
/// [cell_records](Self::cell_records); nothing here trusts the declared sizes
/// without checking them against the storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub mesh_type: MeshType,
    pub number_of_points: usize,
    /// `number_of_points * mesh_type.dimension` coordinates, interleaved.
    pub points: ComponentBuffer,
    pub number_of_cells: usize,
    /// Declared element count of `cells`.
    pub cell_buffer_size: usize,
    pub cells: ComponentBuffer,
    pub point_data: Option<AttributeData>,
    pub cell_data: Option<AttributeData>,
}

impl Mesh {
    /// Walk the cell buffer record-by-record.
    ///
    /// # Errors
    /// * [Error::CellBufferSize] if the declared buffer size does not match
    ///   the storage length. Per-record failures surface as iterator items.
    pub fn cell_records(&self) -> Result<CellRecords<'_>, Error> {
        if self.cells.len() != self.cell_buffer_size {
            return Err(Error::CellBufferSize {
                declared: self.cell_buffer_size,
                actual: self.cells.len(),
            });
        }
        Ok(CellRecords {
            cells: &self.cells,
            offset: 0,
            end: self.cell_buffer_size,
        })
    }

    /// Check every structural invariant: point buffer cardinality, the full
    /// cell-record walk (record count, arities, index bounds) and attribute
    /// shapes.
    pub fn validate(&self) -> Result<(), Error> {
        if self.mesh_type.dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        if self.points.len() != self.number_of_points * self.mesh_type.dimension {
            return Err(Error::PointBufferSize {
                points: self.number_of_points,
                dimension: self.mesh_type.dimension,
                actual: self.points.len(),
            });
        }
        let mut walked = 0usize;
        for record in self.cell_records()? {
            let record = record?;
            for index in record.indices() {
                let index = index?;
                if index >= self.number_of_points as u64 {
                    return Err(Error::VertexOutOfRange {
                        index,
                        points: self.number_of_points,
                    });
                }
            }
            walked += 1;
        }
        if walked != self.number_of_cells {
            return Err(Error::CellCountMismatch {
                declared: self.number_of_cells,
                walked,
            });
        }
        if let Some(data) = &self.point_data {
            data.check()?;
        }
        if let Some(data) = &self.cell_data {
            data.check()?;
        }
        Ok(())
    }
}

/// One parsed cell record; indices are read back through the mesh's typed
/// cell buffer.
#[derive(Debug, Clone, Copy)]
pub struct CellRecord<'mesh> {
    pub cell_type: CellType,
    pub vertex_count: usize,
    cells: &'mesh ComponentBuffer,
    base: usize,
}

impl CellRecord<'_> {
    /// Read one vertex index of this cell.
    ///
    /// # Panics
    /// * `nth` ∉ `0..self.vertex_count`
    pub fn index(&self, nth: usize) -> Result<u64, Error> {
        debug_assert!(nth < self.vertex_count);
        self.cells.index_at(self.base + nth)
    }

    pub fn indices(&self) -> impl Iterator<Item = Result<u64, Error>> + '_ {
        (0..self.vertex_count).map(move |nth| self.index(nth))
    }
}

/// Cursor over a mesh cell buffer. Yields one [CellRecord] per well-formed
/// record; fuses after the first error.
pub struct CellRecords<'mesh> {
    cells: &'mesh ComponentBuffer,
    offset: usize,
    end: usize,
}

impl<'mesh> CellRecords<'mesh> {
    fn fail(&mut self, error: Error) -> Option<Result<CellRecord<'mesh>, Error>> {
        self.offset = self.end;
        Some(Err(error))
    }
}

impl<'mesh> Iterator for CellRecords<'mesh> {
    type Item = Result<CellRecord<'mesh>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.end {
            return None;
        }
        let head = self.offset;
        if self.end - head < 2 {
            return self.fail(Error::TruncatedCellRecord { offset: head });
        }
        let cell_type = match self.cells.index_at(head).and_then(CellType::from_tag) {
            Ok(ty) => ty,
            Err(e) => return self.fail(e),
        };
        let vertex_count = match self.cells.index_at(head + 1) {
            // an inexpressible count cannot fit in the remaining region either
            Ok(count) => usize::try_from(count).unwrap_or(usize::MAX),
            Err(e) => return self.fail(e),
        };
        if let Some(fixed) = cell_type.fixed_vertex_count() {
            if vertex_count != fixed {
                return self.fail(Error::RecordArity {
                    offset: head,
                    expected: fixed,
                    actual: vertex_count,
                });
            }
        }
        if vertex_count > self.end - (head + 2) {
            return self.fail(Error::TruncatedCellRecord { offset: head });
        }
        let base = head + 2;
        self.offset = base + vertex_count;
        Some(Ok(CellRecord {
            cell_type,
            vertex_count,
            cells: self.cells,
            base,
        }))
    }
}
