//! Error types for AMF compilation.
//!
//! Every fatal condition carries the 1-based source line number that was
//! active when it was detected (0 when the failure precedes parsing, e.g.
//! a reference configuration problem).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for AMF compilation.
pub type AmfResult<T> = Result<T, AmfError>;

/// Errors that abort an AMF compilation.
#[derive(Debug, Error)]
pub enum AmfError {
    /// I/O error reading the AMF document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tokenizer-reported XML syntax error.
    #[error("XML parsing error: {message} (line {line})")]
    MalformedXml {
        /// Tokenizer diagnostic.
        message: String,
        /// 1-based source line.
        line: u32,
    },

    /// Null or empty content where text was expected.
    #[error("invalid character data (line {line})")]
    InvalidCharacterData {
        /// 1-based source line.
        line: u32,
    },

    /// The reference configuration predates the minimum supported version.
    #[error("reference configuration version {version} is too old (requires 2.3 or higher)")]
    UnsupportedReferenceVersion {
        /// Version of the rejected reference configuration.
        version: String,
    },

    /// The canonical interchange space is absent from the reference config.
    #[error("reference configuration is missing the {name} color space")]
    MissingReferenceColorSpace {
        /// Name of the missing color space.
        name: String,
    },

    /// A referenced LUT/CDL file does not exist at its given or
    /// document-relative path.
    #[error("invalid LUT path: {path} (line {line})")]
    MissingFile {
        /// Path as the document specified it.
        path: PathBuf,
        /// 1-based source line.
        line: u32,
    },

    /// No usable color space could be determined for the input section.
    #[error("input transform not found (line {line})")]
    UnresolvedInput {
        /// 1-based source line.
        line: u32,
    },

    /// Reference configuration loading failed.
    #[error("reference configuration error: {0}")]
    Reference(#[from] amf_config::ConfigError),
}
