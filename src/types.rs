//! Type tags describing how raw buffers are interpreted.

use static_assertions::const_assert_eq;

/// Numeric storage type of a buffer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl ComponentType {
    /// Canonical coordinate type, emitted whenever an output format cannot
    /// express the input's point precision.
    pub const DEFAULT_COORDINATE: Self = Self::Float32;

    /// Canonical index type, assumed whenever indices are width-erased by a
    /// flat buffer encoding.
    pub const DEFAULT_INDEX: Self = Self::UInt32;

    pub const fn size(self) -> usize {
        use std::mem::size_of;
        match self {
            ComponentType::Int8 => size_of::<i8>(),
            ComponentType::UInt8 => size_of::<u8>(),
            ComponentType::Int16 => size_of::<i16>(),
            ComponentType::UInt16 => size_of::<u16>(),
            ComponentType::Int32 => size_of::<i32>(),
            ComponentType::UInt32 => size_of::<u32>(),
            ComponentType::Int64 => size_of::<i64>(),
            ComponentType::UInt64 => size_of::<u64>(),
            ComponentType::Float32 => size_of::<f32>(),
            ComponentType::Float64 => size_of::<f64>(),
        }
    }

    pub const fn alignment(self) -> usize {
        use std::mem::align_of;
        match self {
            ComponentType::Int8 => align_of::<i8>(),
            ComponentType::UInt8 => align_of::<u8>(),
            ComponentType::Int16 => align_of::<i16>(),
            ComponentType::UInt16 => align_of::<u16>(),
            ComponentType::Int32 => align_of::<i32>(),
            ComponentType::UInt32 => align_of::<u32>(),
            ComponentType::Int64 => align_of::<i64>(),
            ComponentType::UInt64 => align_of::<u64>(),
            ComponentType::Float32 => align_of::<f32>(),
            ComponentType::Float64 => align_of::<f64>(),
        }
    }

    /// Whether elements of this type can carry cell indices.
    pub const fn is_integral(self) -> bool {
        !matches!(self, ComponentType::Float32 | ComponentType::Float64)
    }

    /// Storage required for `elements` elements of this type, in bytes.
    pub const fn storage_bytes(self, elements: usize) -> usize {
        self.size() * elements
    }
}

const_assert_eq!(ComponentType::UInt32.size(), 4);
const_assert_eq!(ComponentType::Float64.size(), 8);
const_assert_eq!(
    ComponentType::DEFAULT_INDEX.size(),
    std::mem::size_of::<u32>()
);

/// Semantic shape of a per-point or per-cell attribute value, independent of
/// its [ComponentType] (a Scalar may be stored as Float32 or UInt32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    Scalar,
    Complex,
    Rgb,
    Rgba,
    Offset,
    Point,
    Vector,
    CovariantVector,
    FixedArray,
    VariableLengthVector,
}

impl PixelType {
    /// Components per value for shapes of fixed arity, given the spatial
    /// `dimension`. `None` for shapes whose arity is carried by the data
    /// buffer itself.
    pub const fn fixed_components(self, dimension: usize) -> Option<usize> {
        match self {
            PixelType::Scalar => Some(1),
            PixelType::Complex => Some(2),
            PixelType::Rgb => Some(3),
            PixelType::Rgba => Some(4),
            PixelType::Offset
            | PixelType::Point
            | PixelType::Vector
            | PixelType::CovariantVector => Some(dimension),
            PixelType::FixedArray | PixelType::VariableLengthVector => None,
        }
    }

    /// The shape inferred for an attribute buffer of `components` components
    /// per tuple. Flat attribute storage keeps no shape metadata, so only the
    /// component count survives reconstruction.
    pub const fn from_components(components: usize) -> Self {
        match components {
            1 => PixelType::Scalar,
            _ => PixelType::Vector,
        }
    }
}

/// Everything needed to interpret a [Mesh](crate::Mesh)'s raw buffers without
/// inspecting the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshType {
    /// Spatial dimension; must be nonzero.
    pub dimension: usize,
    pub point_component_type: ComponentType,
    pub cell_component_type: ComponentType,
    pub point_pixel_type: PixelType,
    pub cell_pixel_type: PixelType,
}

impl MeshType {
    /// The metadata of every mesh reconstructed from a polygon buffer: flat
    /// polygon encodings retain neither point precision nor index width, so
    /// reconstruction substitutes these defaults.
    pub const fn canonical() -> Self {
        Self {
            dimension: 3,
            point_component_type: ComponentType::DEFAULT_COORDINATE,
            cell_component_type: ComponentType::DEFAULT_INDEX,
            point_pixel_type: PixelType::Scalar,
            cell_pixel_type: PixelType::Scalar,
        }
    }
}

impl Default for MeshType {
    fn default() -> Self {
        Self::canonical()
    }
}
