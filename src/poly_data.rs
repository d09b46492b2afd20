//! Flat polygon-buffer surface data and the cursor over its cell arrays.

use nalgebra::Point3;

use crate::{error::Error, AttributeData};

/// A point within a polydata surface. Polydata coordinates are always 3-D
/// and canonically Float32.
pub type SurfacePoint = Point3<f32>;

/// Points plus flat polygon topology, always 3-D.
///
/// Each cell array is a flat sequence of `[count, index...]` records. Only
/// the polygon array carries declared record/size counts; the auxiliary
/// arrays (`vertices`, `lines`, `triangle_strips`) are walked to the end of
/// their storage. A round trip through a mesh never produces the auxiliary
/// arrays — flattening keeps polygonal cells only.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyData {
    pub number_of_points: usize,
    /// `number_of_points * 3` coordinates, interleaved x y z.
    pub points: Vec<f32>,
    /// Records of arity 1: isolated points.
    pub vertices: Option<Vec<u32>>,
    /// Records of arity 2: line segments.
    pub lines: Option<Vec<u32>>,
    pub number_of_polygons: usize,
    /// Declared element count of `polygons`; equal to the sum of
    /// `1 + vertex_count` over all polygon records when well-formed.
    pub polygons_buffer_size: usize,
    pub polygons: Vec<u32>,
    /// Records of arity ≥ 3: each strip of `n` points encodes `n - 2`
    /// triangles over consecutive index windows.
    pub triangle_strips: Option<Vec<u32>>,
    pub point_data: Option<AttributeData>,
    pub cell_data: Option<AttributeData>,
}

impl PolyData {
    /// Walk the polygon buffer record-by-record.
    ///
    /// # Errors
    /// * [Error::PolygonBufferSize] if the declared buffer size does not
    ///   match the storage length. Per-record failures surface as iterator
    ///   items.
    pub fn polygon_records(&self) -> Result<PolygonRecords<'_>, Error> {
        if self.polygons.len() != self.polygons_buffer_size {
            return Err(Error::PolygonBufferSize {
                declared: self.polygons_buffer_size,
                actual: self.polygons.len(),
            });
        }
        Ok(PolygonRecords::over(&self.polygons))
    }

    /// The `nth` point of the surface.
    ///
    /// # Panics
    /// * `nth` ∉ `0..self.number_of_points`
    pub fn point(&self, nth: usize) -> SurfacePoint {
        SurfacePoint::new(
            self.points[nth * 3],
            self.points[nth * 3 + 1],
            self.points[nth * 3 + 2],
        )
    }

    /// Check every structural invariant: point buffer cardinality, all four
    /// cell-array walks (record counts, arities, index bounds) and attribute
    /// shapes.
    pub fn validate(&self) -> Result<(), Error> {
        if self.points.len() != self.number_of_points * 3 {
            return Err(Error::PointBufferSize {
                points: self.number_of_points,
                dimension: 3,
                actual: self.points.len(),
            });
        }
        let mut walked = 0usize;
        for record in self.polygon_records()? {
            self.check_indices(&record?)?;
            walked += 1;
        }
        if walked != self.number_of_polygons {
            return Err(Error::PolygonCountMismatch {
                declared: self.number_of_polygons,
                walked,
            });
        }
        if let Some(vertices) = &self.vertices {
            for record in PolygonRecords::over(vertices) {
                let record = record?;
                record.expect_arity(1)?;
                self.check_indices(&record)?;
            }
        }
        if let Some(lines) = &self.lines {
            for record in PolygonRecords::over(lines) {
                let record = record?;
                record.expect_arity(2)?;
                self.check_indices(&record)?;
            }
        }
        if let Some(strips) = &self.triangle_strips {
            for record in PolygonRecords::over(strips) {
                let record = record?;
                if record.vertex_count() < 3 {
                    return Err(Error::StripTooShort {
                        offset: record.offset,
                        actual: record.vertex_count(),
                    });
                }
                self.check_indices(&record)?;
            }
        }
        if let Some(data) = &self.point_data {
            data.check()?;
        }
        if let Some(data) = &self.cell_data {
            data.check()?;
        }
        Ok(())
    }

    fn check_indices(&self, record: &PolygonRecord<'_>) -> Result<(), Error> {
        for &index in record.indices {
            if index as usize >= self.number_of_points {
                return Err(Error::VertexOutOfRange {
                    index: index as u64,
                    points: self.number_of_points,
                });
            }
        }
        Ok(())
    }
}

/// One parsed `[count, index...]` record of a flat cell array.
#[derive(Debug, Clone, Copy)]
pub struct PolygonRecord<'buf> {
    /// Element offset of the record within its array.
    pub offset: usize,
    pub indices: &'buf [u32],
}

impl PolygonRecord<'_> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn expect_arity(&self, expected: usize) -> Result<(), Error> {
        if self.indices.len() != expected {
            return Err(Error::RecordArity {
                offset: self.offset,
                expected,
                actual: self.indices.len(),
            });
        }
        Ok(())
    }
}

/// Cursor over a flat `[count, index...]` cell array. Yields one
/// [PolygonRecord] per well-formed record; fuses after the first error.
pub struct PolygonRecords<'buf> {
    buffer: &'buf [u32],
    offset: usize,
}

impl<'buf> PolygonRecords<'buf> {
    pub fn over(buffer: &'buf [u32]) -> Self {
        Self { buffer, offset: 0 }
    }
}

impl<'buf> Iterator for PolygonRecords<'buf> {
    type Item = Result<PolygonRecord<'buf>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buffer.len() {
            return None;
        }
        let head = self.offset;
        let vertex_count = self.buffer[head] as usize;
        if vertex_count > self.buffer.len() - (head + 1) {
            self.offset = self.buffer.len();
            return Some(Err(Error::TruncatedPolygonRecord { offset: head }));
        }
        let base = head + 1;
        self.offset = base + vertex_count;
        Some(Ok(PolygonRecord {
            offset: head,
            indices: &self.buffer[base..base + vertex_count],
        }))
    }
}
