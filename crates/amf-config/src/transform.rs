//! Transform definitions for color space conversions.
//!
//! Transforms describe operations applied to pixel values:
//! - Matrix transforms
//! - LUT files referenced from disk
//! - ASC CDL grades (slope/offset/power/saturation)
//! - References to named color spaces, looks, and display/view pairs
//!
//! Transforms can be chained via [`GroupTransform`].

use std::path::PathBuf;

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
}

impl TransformDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}

/// Interpolation method for LUTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbor.
    Nearest,
    /// Linear interpolation (default for 1D).
    #[default]
    Linear,
    /// Tetrahedral interpolation (default for 3D).
    Tetrahedral,
    /// Best available (context-dependent).
    Best,
}

/// Color transform definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// 4x4 matrix transform.
    Matrix(MatrixTransform),

    /// Builtin transform by name.
    Builtin(BuiltinTransform),

    /// LUT or CDL loaded from a file.
    File(FileTransform),

    /// CDL (slope/offset/power/sat).
    Cdl(CdlTransform),

    /// Conversion between two named color spaces.
    ColorSpace(ColorSpaceTransform),

    /// Reference to a named look.
    Look(LookTransform),

    /// Reference to a display/view pair.
    DisplayView(DisplayViewTransform),

    /// Group of chained transforms.
    Group(GroupTransform),
}

impl Transform {
    /// Creates an identity matrix transform.
    pub fn identity() -> Self {
        Self::Matrix(MatrixTransform::default())
    }

    /// Creates a group transform.
    pub fn group(transforms: Vec<Transform>) -> Self {
        Self::Group(GroupTransform {
            transforms,
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a file transform (LUT reference).
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(FileTransform {
            src: path.into(),
            ccc_id: None,
            interpolation: Interpolation::default(),
            direction: TransformDirection::Forward,
        })
    }

    /// Returns the inverse of this transform.
    pub fn inverse(self) -> Self {
        match self {
            Self::Matrix(mut t) => {
                t.direction = t.direction.inverse();
                Self::Matrix(t)
            }
            Self::Builtin(mut t) => {
                t.direction = t.direction.inverse();
                Self::Builtin(t)
            }
            Self::File(mut t) => {
                t.direction = t.direction.inverse();
                Self::File(t)
            }
            Self::Cdl(mut t) => {
                t.direction = t.direction.inverse();
                Self::Cdl(t)
            }
            Self::ColorSpace(mut t) => {
                t.direction = t.direction.inverse();
                Self::ColorSpace(t)
            }
            Self::Look(mut t) => {
                t.direction = t.direction.inverse();
                Self::Look(t)
            }
            Self::DisplayView(mut t) => {
                t.direction = t.direction.inverse();
                Self::DisplayView(t)
            }
            Self::Group(mut t) => {
                t.direction = t.direction.inverse();
                t.transforms.reverse();
                Self::Group(t)
            }
        }
    }

    /// Returns the direction of this transform.
    pub fn direction(&self) -> TransformDirection {
        match self {
            Self::Matrix(t) => t.direction,
            Self::Builtin(t) => t.direction,
            Self::File(t) => t.direction,
            Self::Cdl(t) => t.direction,
            Self::ColorSpace(t) => t.direction,
            Self::Look(t) => t.direction,
            Self::DisplayView(t) => t.direction,
            Self::Group(t) => t.direction,
        }
    }
}

/// 4x4 matrix + offset transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    /// 4x4 matrix in row-major order.
    pub matrix: [f64; 16],
    /// RGBA offset.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

impl MatrixTransform {
    /// Identity matrix.
    pub const IDENTITY: [f64; 16] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];
}

impl Default for MatrixTransform {
    fn default() -> Self {
        Self {
            matrix: Self::IDENTITY,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        }
    }
}

/// Builtin transform by name.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTransform {
    /// Builtin style name (e.g., "ACEScct_to_ACES2065-1").
    pub style: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// File-based transform (LUT, CDL collection, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct FileTransform {
    /// Source file path.
    pub src: PathBuf,
    /// CDL correction ID (for .ccc/.cdl files).
    pub ccc_id: Option<String>,
    /// Interpolation method.
    pub interpolation: Interpolation,
    /// Direction.
    pub direction: TransformDirection,
}

/// CDL (ASC Color Decision List) transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CdlTransform {
    /// Per-channel slope [R, G, B].
    pub slope: [f64; 3],
    /// Per-channel offset [R, G, B].
    pub offset: [f64; 3],
    /// Per-channel power [R, G, B].
    pub power: [f64; 3],
    /// Saturation (1.0 = no change).
    pub saturation: f64,
    /// Direction.
    pub direction: TransformDirection,
}

impl Default for CdlTransform {
    fn default() -> Self {
        Self {
            slope: [1.0, 1.0, 1.0],
            offset: [0.0, 0.0, 0.0],
            power: [1.0, 1.0, 1.0],
            saturation: 1.0,
            direction: TransformDirection::Forward,
        }
    }
}

impl CdlTransform {
    /// Checks whether this CDL leaves pixel values untouched.
    pub fn is_noop(&self) -> bool {
        self.slope == [1.0, 1.0, 1.0]
            && self.offset == [0.0, 0.0, 0.0]
            && self.power == [1.0, 1.0, 1.0]
            && self.saturation == 1.0
    }
}

/// Conversion between two named color spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceTransform {
    /// Source color space name.
    pub src: String,
    /// Destination color space name.
    pub dst: String,
    /// Treat values as data: relabel without photometric conversion.
    pub data_bypass: bool,
    /// Direction.
    pub direction: TransformDirection,
}

impl ColorSpaceTransform {
    /// Creates a forward conversion between two spaces.
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            data_bypass: false,
            direction: TransformDirection::Forward,
        }
    }
}

/// Reference to a named look.
#[derive(Debug, Clone, PartialEq)]
pub struct LookTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
    /// Look names (comma-separated for multiple).
    pub looks: String,
    /// Skip the src/dst color space conversion, applying only the look.
    pub skip_colorspace_conversion: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// Display/view transform reference.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayViewTransform {
    /// Source color space.
    pub src: String,
    /// Display name.
    pub display: String,
    /// View name.
    pub view: String,
    /// Skip any looks referenced by the view.
    pub looks_bypass: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// Group of chained transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTransform {
    /// Ordered list of transforms.
    pub transforms: Vec<Transform>,
    /// Direction (affects iteration order).
    pub direction: TransformDirection,
}
