//! Element types and storage layouts carried by data-value nodes.

use std::fmt;

/// The element type of a tensor-like value.
///
/// Fusion code generation only handles floating-point kernels, so
/// [`DType::is_float`] doubles as the "supported for fusion" predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F16,
    F32,
    F64,
    I32,
    I64,
    Bool,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            DType::Bool => 1,
            DType::F16 => 2,
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
        }
    }

    /// Whether this is one of the floating-point types a fused kernel
    /// can be generated for (f16, f32, f64).
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DType::F16 => write!(f, "float16"),
            DType::F32 => write!(f, "float"),
            DType::F64 => write!(f, "double"),
            DType::I32 => write!(f, "int"),
            DType::I64 => write!(f, "long"),
            DType::Bool => write!(f, "bool"),
        }
    }
}

/// How a value's elements are stored in memory.
///
/// Fused kernels index their operands directly, which requires the
/// dense row-major [`Layout::Strided`] form; anything else disqualifies
/// the value's subgraph from fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Dense contiguous storage addressable through strides.
    Strided,
    /// Sparse storage (coordinate or row-compressed); opaque here.
    Sparse,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Layout::Strided => write!(f, "strided"),
            Layout::Sparse => write!(f, "sparse"),
        }
    }
}
