//! Color space definition and properties.
//!
//! A color space defines:
//! - How to convert to/from the reference space
//! - Categorization (family, encoding, categories)
//! - Metadata (description, aliases)
//!
//! # Example
//!
//! ```
//! use amf_config::{ColorSpace, Encoding};
//!
//! let cs = ColorSpace::builder("ACEScct")
//!     .family("ACES")
//!     .encoding(Encoding::Log)
//!     .description("ACES color timing space")
//!     .build();
//!
//! assert_eq!(cs.name(), "ACEScct");
//! assert_eq!(cs.encoding(), Encoding::Log);
//! ```

use crate::transform::Transform;

/// Color encoding type.
///
/// Indicates the data encoding/interpretation of pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Scene-referred linear.
    SceneLinear,
    /// Display-referred linear.
    DisplayLinear,
    /// Logarithmic encoding.
    Log,
    /// OETF-encoded (sRGB, Rec.709, etc.).
    Sdr,
    /// HDR display encoding (PQ, HLG).
    Hdr,
    /// Non-color data (normals, masks).
    Data,
    /// Unknown/unspecified encoding.
    #[default]
    Unknown,
}

impl Encoding {
    /// Parses encoding from a config string.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "scene-linear" | "scene_linear" | "linear" => Self::SceneLinear,
            "display-linear" | "display_linear" => Self::DisplayLinear,
            "log" => Self::Log,
            "sdr-video" | "sdr_video" | "sdr" => Self::Sdr,
            "hdr-video" | "hdr_video" | "hdr" => Self::Hdr,
            "data" => Self::Data,
            _ => Self::Unknown,
        }
    }

    /// Returns the config string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SceneLinear => "scene-linear",
            Self::DisplayLinear => "display-linear",
            Self::Log => "log",
            Self::Sdr => "sdr-video",
            Self::Hdr => "hdr-video",
            Self::Data => "data",
            Self::Unknown => "",
        }
    }

    /// Checks if this is a linear encoding.
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::SceneLinear | Self::DisplayLinear)
    }
}

/// Color space definition.
///
/// Represents a named color space with transforms to/from the reference space.
#[derive(Debug, Clone)]
pub struct ColorSpace {
    /// Unique name.
    name: String,
    /// Alternative names.
    aliases: Vec<String>,
    /// Human-readable description. Transform identifiers embedded here are
    /// what reference resolution matches against.
    description: String,
    /// Family path (e.g., "ACES" or "AMF/ClipName").
    family: String,
    /// Encoding type.
    encoding: Encoding,
    /// Categories (e.g., "file-io", "working-space").
    categories: Vec<String>,
    /// Whether this is for non-color data.
    is_data: bool,
    /// Transform from this space to reference.
    to_reference: Option<Transform>,
    /// Transform from reference to this space.
    from_reference: Option<Transform>,
}

impl ColorSpace {
    /// Creates a new color space with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            family: String::new(),
            encoding: Encoding::default(),
            categories: Vec::new(),
            is_data: false,
            to_reference: None,
            from_reference: None,
        }
    }

    /// Creates a builder for constructing color spaces.
    #[inline]
    pub fn builder(name: impl Into<String>) -> ColorSpaceBuilder {
        ColorSpaceBuilder::new(name)
    }

    /// Returns the color space name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all aliases.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the family path.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the encoding type.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns the categories.
    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Checks whether a category is present.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Checks if this is a data (non-color) space.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_data
    }

    /// Returns the transform to reference space.
    #[inline]
    pub fn to_reference(&self) -> Option<&Transform> {
        self.to_reference.as_ref()
    }

    /// Returns the transform from reference space.
    #[inline]
    pub fn from_reference(&self) -> Option<&Transform> {
        self.from_reference.as_ref()
    }

    /// Checks if a name or alias matches.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for constructing color spaces.
#[derive(Debug)]
pub struct ColorSpaceBuilder {
    inner: ColorSpace,
}

impl ColorSpaceBuilder {
    /// Creates a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: ColorSpace::new(name),
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.aliases.push(alias.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = desc.into();
        self
    }

    /// Sets the family path.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.inner.family = family.into();
        self
    }

    /// Sets the encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.inner.encoding = encoding;
        if encoding == Encoding::Data {
            self.inner.is_data = true;
        }
        self
    }

    /// Adds a category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.inner.categories.push(category.into());
        self
    }

    /// Marks as data (non-color) space.
    pub fn is_data(mut self, is_data: bool) -> Self {
        self.inner.is_data = is_data;
        self
    }

    /// Sets the transform to reference space.
    pub fn to_reference(mut self, transform: Transform) -> Self {
        self.inner.to_reference = Some(transform);
        self
    }

    /// Sets the transform from reference space.
    pub fn from_reference(mut self, transform: Transform) -> Self {
        self.inner.from_reference = Some(transform);
        self
    }

    /// Builds the color space.
    pub fn build(self) -> ColorSpace {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_colorspace() {
        let cs = ColorSpace::builder("S-Log3 S-Gamut3")
            .family("Input/Sony")
            .encoding(Encoding::Log)
            .description("Convert Sony S-Log3 S-Gamut3 to ACES2065-1")
            .category("file-io")
            .build();

        assert_eq!(cs.name(), "S-Log3 S-Gamut3");
        assert_eq!(cs.family(), "Input/Sony");
        assert!(cs.has_category("file-io"));
        assert!(cs.matches_name("s-log3 s-gamut3"));
    }

    #[test]
    fn encoding_parse() {
        assert_eq!(Encoding::parse("scene-linear"), Encoding::SceneLinear);
        assert_eq!(Encoding::parse("log"), Encoding::Log);
        assert_eq!(Encoding::parse("data"), Encoding::Data);
    }

    #[test]
    fn data_colorspace() {
        let cs = ColorSpace::builder("Raw").encoding(Encoding::Data).build();
        assert!(cs.is_data());
    }
}
