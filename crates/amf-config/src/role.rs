//! Standard color space roles.
//!
//! Roles provide a consistent way to reference color spaces by purpose
//! rather than by name, which keeps configs portable.

use std::collections::BTreeMap;

/// Standard role names.
pub mod names {
    /// Scene-referred linear reference (required).
    pub const REFERENCE: &str = "reference";
    /// Default input color space.
    pub const DEFAULT: &str = "default";
    /// Non-color data (normals, masks).
    pub const DATA: &str = "data";
    /// Scene-referred linear working space.
    pub const SCENE_LINEAR: &str = "scene_linear";
    /// Compositing log space.
    pub const COMPOSITING_LOG: &str = "compositing_log";
    /// Color grading space.
    pub const COLOR_TIMING: &str = "color_timing";
    /// ACES interchange scene-referred.
    pub const ACES_INTERCHANGE: &str = "aces_interchange";
    /// CIE XYZ interchange (D65).
    pub const CIE_XYZ_D65_INTERCHANGE: &str = "cie_xyz_d65_interchange";
}

/// Prefix of the per-clip role derived from an AMF document's clip name.
pub const AMF_CLIP_ROLE_PREFIX: &str = "amf_clip_";

/// Reduces an arbitrary clip name to an identifier-safe role suffix.
///
/// Every character outside `[0-9a-zA-Z_]` becomes an underscore, so the
/// result is always usable as a role name component.
///
/// # Example
///
/// ```
/// use amf_config::role::sanitize_role_name;
///
/// assert_eq!(sanitize_role_name("A001 C002_210318 R1"), "A001_C002_210318_R1");
/// ```
pub fn sanitize_role_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Role to color space mapping.
///
/// Stored as an ordered map so that role enumeration is deterministic across
/// compilations of the same document.
#[derive(Debug, Clone, Default)]
pub struct Roles {
    /// Role name -> color space name mapping.
    mapping: BTreeMap<String, String>,
}

impl Roles {
    /// Creates an empty roles mapping.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a role mapping.
    #[inline]
    pub fn define(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.mapping.insert(role.into(), colorspace.into());
    }

    /// Gets the color space name for a role.
    #[inline]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.mapping.get(role).map(String::as_str)
    }

    /// Checks if a role is defined.
    #[inline]
    pub fn contains(&self, role: &str) -> bool {
        self.mapping.contains_key(role)
    }

    /// Returns all defined roles in name order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defined roles.
    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Checks if no roles are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Gets the ACES interchange color space name.
    #[inline]
    pub fn aces_interchange(&self) -> Option<&str> {
        self.get(names::ACES_INTERCHANGE)
    }
}
