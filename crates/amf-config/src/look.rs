//! Look definitions for creative color transforms.
//!
//! Looks are named creative transforms applied on top of the display
//! pipeline: show/shot grades, creative LUTs, on-set CDLs.

use crate::transform::Transform;

/// A named creative look/grade.
#[derive(Debug, Clone)]
pub struct Look {
    /// Look name.
    name: String,
    /// Process space (color space where the transform is applied).
    process_space: Option<String>,
    /// Description. Transform identifiers embedded here are what reference
    /// resolution matches against.
    description: String,
    /// Forward transform.
    transform: Option<Transform>,
    /// Inverse transform (optional, for reversibility).
    inverse_transform: Option<Transform>,
}

impl Look {
    /// Creates a new look with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            process_space: None,
            description: String::new(),
            transform: None,
            inverse_transform: None,
        }
    }

    /// Sets the process space.
    pub fn process_space(mut self, space: impl Into<String>) -> Self {
        self.process_space = Some(space.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the forward transform.
    pub fn transform(mut self, t: Transform) -> Self {
        self.transform = Some(t);
        self
    }

    /// Sets the inverse transform.
    pub fn inverse_transform(mut self, t: Transform) -> Self {
        self.inverse_transform = Some(t);
        self
    }

    /// Returns the look name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the look.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the process space name.
    #[inline]
    pub fn get_process_space(&self) -> Option<&str> {
        self.process_space.as_deref()
    }

    /// Returns the description.
    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Returns the forward transform.
    #[inline]
    pub fn get_transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Returns the inverse transform.
    #[inline]
    pub fn get_inverse_transform(&self) -> Option<&Transform> {
        self.inverse_transform.as_ref()
    }
}

/// Collection of looks.
#[derive(Debug, Clone, Default)]
pub struct LookManager {
    /// All looks, in registration order.
    looks: Vec<Look>,
}

impl LookManager {
    /// Creates an empty look manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a look, replacing any existing look with the same name.
    pub fn add(&mut self, look: Look) {
        if let Some(existing) = self.looks.iter_mut().find(|l| l.name.eq_ignore_ascii_case(&look.name)) {
            *existing = look;
        } else {
            self.looks.push(look);
        }
    }

    /// Gets a look by name.
    pub fn get(&self, name: &str) -> Option<&Look> {
        self.looks.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Returns all looks.
    #[inline]
    pub fn all(&self) -> &[Look] {
        &self.looks
    }

    /// Returns look names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.looks.iter().map(|l| l.name.as_str())
    }

    /// Number of looks.
    #[inline]
    pub fn len(&self) -> usize {
        self.looks.len()
    }

    /// Checks if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.looks.is_empty()
    }
}
