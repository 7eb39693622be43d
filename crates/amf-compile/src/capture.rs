//! Section capture records.
//!
//! During parsing, each structural section of an AMF document (clip id,
//! input transform, output transform, every look transform) accumulates an
//! ordered, append-only record of its attributes and character-data-bearing
//! sub-elements. Records are populated incrementally by the router, read
//! only during assembly, and discarded at the end of one compilation.
//!
//! Sub-element order is semantically load-bearing: association of a
//! transform identifier or file reference with its enclosing block is done
//! purely by position (and, for input/output sections, by the nested root
//! active when the element was captured).

use crate::tags::{tag_eq, ATTR_APPLIED};

/// Nested transform roots that can occur inside input/output sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NestedRoot {
    /// `aces:inverseOutputDeviceTransform` (input section).
    InverseOutputDevice,
    /// `aces:inverseReferenceRenderingTransform` (input section).
    InverseReferenceRendering,
    /// `aces:outputDeviceTransform` (output section).
    OutputDevice,
    /// `aces:referenceRenderingTransform` (output section).
    ReferenceRendering,
}

/// A sub-element captured inside a nested transform root.
#[derive(Debug, Clone)]
pub(crate) struct NestedElement {
    /// The nested root that was open when this element was captured.
    pub root: NestedRoot,
    /// Element name.
    pub name: String,
    /// Character data.
    pub value: String,
}

/// Capture record for one structural section.
#[derive(Debug, Clone, Default)]
pub(crate) struct Section {
    /// Attribute pairs in document order; keys may repeat.
    attributes: Vec<(String, String)>,
    /// Sub-element pairs in document order. Container tags are recorded as
    /// empty-valued markers.
    sub_elements: Vec<(String, String)>,
}

impl Section {
    /// Creates a section capturing the given root attributes.
    pub fn with_attributes(attrs: &[(String, String)]) -> Self {
        Self {
            attributes: attrs.to_vec(),
            sub_elements: Vec::new(),
        }
    }

    /// Appends a sub-element.
    pub fn push_sub_element(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.sub_elements.push((name.into(), value.into()));
    }

    /// Returns the sub-elements in document order.
    pub fn sub_elements(&self) -> &[(String, String)] {
        &self.sub_elements
    }

    /// Returns the first value recorded for a sub-element name.
    pub fn first_sub_element(&self, name: &str) -> Option<&str> {
        self.sub_elements
            .iter()
            .find(|(n, _)| tag_eq(n, name))
            .map(|(_, v)| v.as_str())
    }

    /// Derives the applied state from this section's own attributes:
    /// `applied="true"` (value case-insensitive) and nothing else.
    pub fn applied(&self) -> bool {
        self.attributes
            .iter()
            .any(|(n, v)| tag_eq(n, ATTR_APPLIED) && v.eq_ignore_ascii_case("true"))
    }

}

/// Capture record for the input/output sections, which additionally
/// distinguish direct children of the section root from elements nested
/// inside a device/rendering transform block.
#[derive(Debug, Clone, Default)]
pub(crate) struct IoSection {
    /// Root attributes and (unused here) flat sub-elements.
    pub base: Section,
    /// Direct children of the section root, in document order.
    direct: Vec<(String, String)>,
    /// Elements captured inside nested transform roots, in document order.
    nested: Vec<NestedElement>,
}

impl IoSection {
    /// Creates a section capturing the given root attributes.
    pub fn with_attributes(attrs: &[(String, String)]) -> Self {
        Self {
            base: Section::with_attributes(attrs),
            direct: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Appends a direct child of the section root.
    pub fn push_direct(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.direct.push((name.into(), value.into()));
    }

    /// Appends an element captured under a nested root.
    pub fn push_nested(
        &mut self,
        root: NestedRoot,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.nested.push(NestedElement {
            root,
            name: name.into(),
            value: value.into(),
        });
    }

    /// Returns the direct children in document order.
    pub fn direct_elements(&self) -> &[(String, String)] {
        &self.direct
    }

    /// Returns the nested elements in document order.
    pub fn nested_elements(&self) -> &[NestedElement] {
        &self.nested
    }

    /// Returns the first nested value for an element name under a root.
    pub fn first_nested(&self, root: NestedRoot, name: &str) -> Option<&str> {
        self.nested
            .iter()
            .find(|e| e.root == root && tag_eq(&e.name, name))
            .map(|e| e.value.as_str())
    }

    /// Derives the applied state from the section root's attributes.
    pub fn applied(&self) -> bool {
        self.base.applied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn applied_requires_exact_true() {
        assert!(Section::with_attributes(&attrs(&[("applied", "true")])).applied());
        assert!(Section::with_attributes(&attrs(&[("APPLIED", "True")])).applied());
        assert!(!Section::with_attributes(&attrs(&[("applied", "yes")])).applied());
        assert!(!Section::with_attributes(&attrs(&[("applied", "false")])).applied());
        assert!(!Section::default().applied());
    }

    #[test]
    fn sub_elements_preserve_order_and_repeats() {
        let mut s = Section::default();
        s.push_sub_element("aces:transformId", "first");
        s.push_sub_element("aces:transformId", "second");

        assert_eq!(s.first_sub_element("ACES:TRANSFORMID"), Some("first"));
        assert_eq!(s.sub_elements().len(), 2);
        assert_eq!(s.sub_elements()[1].1, "second");
    }

    #[test]
    fn nested_lookup_by_root() {
        let mut s = IoSection::default();
        s.push_nested(NestedRoot::InverseReferenceRendering, "aces:file", "rrt.cube");
        s.push_nested(NestedRoot::InverseOutputDevice, "aces:file", "odt.cube");

        assert_eq!(
            s.first_nested(NestedRoot::InverseOutputDevice, "aces:file"),
            Some("odt.cube")
        );
        assert_eq!(
            s.first_nested(NestedRoot::InverseReferenceRendering, "aces:file"),
            Some("rrt.cube")
        );
        assert_eq!(s.first_nested(NestedRoot::OutputDevice, "aces:file"), None);
    }
}
