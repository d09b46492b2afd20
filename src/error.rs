use crate::{CellType, ComponentType};

/// Failures produced while walking or converting mesh and polygon buffers.
///
/// Every variant except [UnsupportedCellType](Error::UnsupportedCellType)
/// describes malformed input; see [is_malformed_input](Error::is_malformed_input).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("mesh dimension must be nonzero")]
    ZeroDimension,
    #[error("point buffer holds {actual} coordinate(s); expected {points} points x {dimension}")]
    PointBufferSize {
        points: usize,
        dimension: usize,
        actual: usize,
    },
    #[error("declared cell buffer size {declared} does not match cell storage length {actual}")]
    CellBufferSize { declared: usize, actual: usize },
    #[error("cell buffer ended inside the record starting at element {offset}")]
    TruncatedCellRecord { offset: usize },
    #[error("cell buffer holds {walked} record(s); {declared} declared")]
    CellCountMismatch { declared: usize, walked: usize },
    #[error("unknown cell type tag: {0}")]
    UnknownCellType(u64),
    #[error("cell type {0:?} cannot be flattened to a polygon")]
    UnsupportedCellType(CellType),
    #[error("declared polygon buffer size {declared} does not match polygon storage length {actual}")]
    PolygonBufferSize { declared: usize, actual: usize },
    #[error("flat cell array ended inside the record starting at element {offset}")]
    TruncatedPolygonRecord { offset: usize },
    #[error("polygon buffer holds {walked} record(s); {declared} declared")]
    PolygonCountMismatch { declared: usize, walked: usize },
    #[error("record starting at element {offset} lists {actual} point(s); expected {expected}")]
    RecordArity {
        offset: usize,
        expected: usize,
        actual: usize,
    },
    #[error("triangle strip starting at element {offset} lists {actual} point(s); a strip needs at least 3")]
    StripTooShort { offset: usize, actual: usize },
    #[error("cell index data stored in non-integral buffer of type {0:?}")]
    NonIntegralIndex(ComponentType),
    #[error("negative value {value} at element {offset} of an index buffer")]
    NegativeValue { offset: usize, value: i64 },
    #[error("vertex index out of range: 0..{points} ∌ {index}")]
    VertexOutOfRange { index: u64, points: usize },
    #[error("value {0} is not representable in the canonical index width")]
    IndexOverflow(u64),
    #[error("attribute buffer of length {len} cannot be split into tuples of {components} component(s)")]
    AttributeShape { components: usize, len: usize },
}

impl Error {
    /// Whether this error describes structurally invalid input, as opposed to
    /// input the active conversion policy refuses.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Error::ZeroDimension
            | Error::PointBufferSize { .. }
            | Error::CellBufferSize { .. }
            | Error::TruncatedCellRecord { .. }
            | Error::CellCountMismatch { .. }
            | Error::UnknownCellType(_)
            | Error::PolygonBufferSize { .. }
            | Error::TruncatedPolygonRecord { .. }
            | Error::PolygonCountMismatch { .. }
            | Error::RecordArity { .. }
            | Error::StripTooShort { .. }
            | Error::NonIntegralIndex(_)
            | Error::NegativeValue { .. }
            | Error::VertexOutOfRange { .. }
            | Error::IndexOverflow(_)
            | Error::AttributeShape { .. } => true,
            Error::UnsupportedCellType(_) => false,
        }
    }
}
