//! Color configuration object model for AMF compilation.
//!
//! This crate provides the configuration substrate the AMF compiler builds
//! on: color spaces, transforms, looks, displays/views, named transforms,
//! roles, and environment context, plus the built-in studio reference
//! configuration that transform identifiers resolve against.
//!
//! # Quick Start
//!
//! ```
//! use amf_config::{builtin, Config, ColorSpace, Encoding};
//!
//! // The canonical reference configuration.
//! let reference = builtin::studio_config();
//! assert!(reference.colorspace("ACES2065-1").is_some());
//!
//! // A fresh config under construction.
//! let mut config = Config::raw();
//! config.add_colorspace(
//!     ColorSpace::builder("S-Log3 S-Gamut3")
//!         .encoding(Encoding::Log)
//!         .build(),
//! );
//! config.set_role("aces_interchange", "ACES2065-1");
//! ```
//!
//! # Validation
//!
//! ```
//! use amf_config::{builtin, validate};
//!
//! let issues = validate::check(&builtin::studio_config());
//! assert!(!validate::has_errors(&issues));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod config;
mod colorspace;
mod transform;
mod display;
mod look;

pub mod builtin;
pub mod context;
pub mod role;
pub mod validate;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use config::{Config, ConfigVersion, NamedTransform};
pub use colorspace::{ColorSpace, ColorSpaceBuilder, Encoding};
pub use transform::{
    Transform, TransformDirection, Interpolation,
    MatrixTransform, BuiltinTransform, FileTransform, CdlTransform,
    ColorSpaceTransform, LookTransform, DisplayViewTransform, GroupTransform,
};
pub use display::{Display, DisplayManager, SharedView, View, ViewTransform, USE_DISPLAY_NAME};
pub use look::{Look, LookManager};
pub use role::{Roles, names as role_names, sanitize_role_name, AMF_CLIP_ROLE_PREFIX};
pub use context::Context;
pub use validate::{check as validate_config, has_errors, has_warnings, Issue, IssueCategory, Severity};
