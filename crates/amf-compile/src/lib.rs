//! ACES Metadata File (AMF) to color configuration compiler.
//!
//! An AMF document describes how a clip was color-transformed on set and in
//! post: its input camera encoding, zero or more look/grade operations, and
//! an optional output/display rendering. This crate compiles such a
//! document into a complete, self-consistent configuration (color spaces,
//! looks, display/views, named transforms, roles) that a color management
//! engine can use to reproduce or invert those transforms.
//!
//! Compilation is single-threaded and single-pass: a streaming XML state
//! machine captures the document's structural sections, each transform
//! reference is resolved against a reference configuration by its embedded
//! ACES transform identifier, and one deterministic post-parse pass
//! assembles the output configuration.
//!
//! # Quick Start
//!
//! ```no_run
//! use amf_compile::compile;
//!
//! let (config, info) = compile("A001_C002.amf")?;
//!
//! println!("clip: {}", info.clip_identifier);
//! println!("input color space: {}", info.input_colorspace);
//! println!("looks applied: {}", info.looks_applied);
//!
//! for cs in config.colorspaces() {
//!     println!("  {}", cs.name());
//! }
//! # Ok::<(), amf_compile::AmfError>(())
//! ```
//!
//! # Custom reference configurations
//!
//! ```no_run
//! use amf_compile::compile_with_reference;
//! use amf_config::Config;
//!
//! let reference = Config::from_file("studio/config.ocio")?;
//! let (config, info) = compile_with_reference("clip.amf", &reference)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assemble;
mod capture;
mod error;
mod resolve;
mod router;
mod tags;
mod working;

use std::path::Path;

use amf_config::{Config, builtin};

pub use assemble::{ACES, ACES_LOOK_NAME, CONTEXT_VAR};
pub use error::{AmfError, AmfResult};
pub use resolve::Resolver;
pub use working::CLIP_TO_WORKING_TRANSFORM;

/// Summary metadata produced alongside the compiled configuration.
#[derive(Debug, Clone, Default)]
pub struct AmfInfo {
    /// Clip identifier: clip name, else uuid, else the document file stem.
    pub clip_identifier: String,
    /// Resolved input color space name.
    pub input_colorspace: String,
    /// Resolved clip color space name: the display color space when the
    /// output was applied, the input color space while the input still
    /// needs applying, else the interchange space.
    pub clip_colorspace: String,
    /// Active display name.
    pub display_name: String,
    /// Active view name.
    pub view_name: String,
    /// Number of looks the document marked as already applied.
    pub looks_applied: usize,
}

/// Compiles an AMF document against the built-in studio reference
/// configuration.
pub fn compile(path: impl AsRef<Path>) -> AmfResult<(Config, AmfInfo)> {
    compile_with_reference(path, &builtin::studio_config())
}

/// Compiles an AMF document against the given reference configuration.
///
/// The reference configuration must be version 2.3 or newer and must
/// contain the canonical interchange space.
pub fn compile_with_reference(
    path: impl AsRef<Path>,
    reference: &Config,
) -> AmfResult<(Config, AmfInfo)> {
    let path = path.as_ref();

    if !reference.version().at_least(2, 3) {
        return Err(AmfError::UnsupportedReferenceVersion {
            version: reference.version().to_string(),
        });
    }

    let text = std::fs::read_to_string(path)?;

    let mut ctx = router::ParseContext::new();
    let last_line = router::parse_document(&text, &mut ctx)?;

    let mut assembler = assemble::Assembler::new(reference, path, last_line);
    assembler.init_config()?;
    assembler.process_clip_id(&ctx);
    assembler.process_input(&ctx)?;
    assembler.process_looks(&ctx)?;
    assembler.process_output(&ctx)?;
    assembler.ensure_neutral_display();

    working::resolve_working_location(
        &mut assembler.config,
        &ctx,
        &assembler.look_results,
        assembler.info.looks_applied,
        &assembler.info.input_colorspace,
        &assembler.clip_name,
    );

    assembler.finalize(&ctx);

    Ok((assembler.config, assembler.info))
}
