//! Reference resolution.
//!
//! AMF documents reference transforms by ACES transform identifier (a URN
//! such as `urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3.a1.v1`).
//! The reference configuration embeds those identifiers in the descriptions
//! of its color spaces, view transforms, and looks; resolution is a linear
//! scan returning the first entry whose description contains the identifier
//! as a (case-sensitive) substring.
//!
//! Misses return `None`: callers decide whether an unresolved reference is
//! skippable or a fatal input error.

use amf_config::{ColorSpace, Config, Look, ViewTransform};

/// Resolves transform identifiers against a reference configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    reference: &'a Config,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over a reference configuration.
    pub fn new(reference: &'a Config) -> Self {
        Self { reference }
    }

    /// Finds the first color space whose description contains the id.
    pub fn colorspace(&self, aces_id: &str) -> Option<&'a ColorSpace> {
        self.reference
            .colorspaces()
            .iter()
            .find(|cs| cs.description().contains(aces_id))
    }

    /// Finds the first view transform whose description contains the id.
    pub fn view_transform(&self, aces_id: &str) -> Option<&'a ViewTransform> {
        self.reference
            .displays()
            .view_transforms()
            .iter()
            .find(|vt| vt.description().contains(aces_id))
    }

    /// Finds the first look whose description contains the id.
    pub fn look(&self, aces_id: &str) -> Option<&'a Look> {
        self.reference
            .looks()
            .all()
            .iter()
            .find(|lk| lk.get_description().contains(aces_id))
    }
}
