//! Display and View management.
//!
//! Output transforms are organized through displays and views:
//! - **Display**: a physical or virtual display device
//! - **View**: a viewing condition for that display (SDR, HDR, Raw, ...)
//! - **View transform**: a shared scene-to-display rendering, reusable
//!   across displays
//! - **Shared view**: a view defined once and attached to displays by name
//!
//! # Example
//!
//! ```
//! use amf_config::{Display, View};
//!
//! let mut display = Display::new("sRGB - Display");
//! display.add_view(View::new("ACES 1.0 - SDR Video", "sRGB - Display"));
//! display.add_view(View::new("Raw", "Raw"));
//!
//! assert_eq!(display.views().len(), 2);
//! ```

use crate::transform::Transform;

/// Placeholder color space name in shared views, substituted with the
/// display's own color space when the shared view is instantiated.
pub const USE_DISPLAY_NAME: &str = "<USE_DISPLAY_NAME>";

/// A view within a display.
#[derive(Debug, Clone)]
pub struct View {
    /// View name.
    name: String,
    /// Target color space name.
    colorspace: String,
    /// Optional look(s) to apply.
    looks: Option<String>,
    /// Optional view transform name.
    view_transform: Option<String>,
    /// Description.
    description: String,
}

impl View {
    /// Creates a new view targeting a color space.
    pub fn new(name: impl Into<String>, colorspace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colorspace: colorspace.into(),
            looks: None,
            view_transform: None,
            description: String::new(),
        }
    }

    /// Adds look(s) to apply.
    pub fn with_looks(mut self, looks: impl Into<String>) -> Self {
        self.looks = Some(looks.into());
        self
    }

    /// Sets the view transform.
    pub fn with_view_transform(mut self, vt: impl Into<String>) -> Self {
        self.view_transform = Some(vt.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Returns the view name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the target color space.
    #[inline]
    pub fn colorspace(&self) -> &str {
        &self.colorspace
    }

    /// Returns the look(s) to apply.
    #[inline]
    pub fn looks(&self) -> Option<&str> {
        self.looks.as_deref()
    }

    /// Returns the view transform name.
    #[inline]
    pub fn view_transform(&self) -> Option<&str> {
        self.view_transform.as_deref()
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A view defined once at config level and referenced from displays by name.
#[derive(Debug, Clone)]
pub struct SharedView {
    /// Shared view name.
    pub name: String,
    /// View transform name.
    pub view_transform: String,
    /// Target color space; [`USE_DISPLAY_NAME`] substitutes the display's own.
    pub colorspace: String,
    /// Look(s) to apply.
    pub looks: String,
    /// Rule name (unused by the AMF pipeline, carried for completeness).
    pub rule: String,
    /// Description.
    pub description: String,
}

/// A display device configuration.
#[derive(Debug, Clone)]
pub struct Display {
    /// Display name. For AMF output this is the display color space name.
    name: String,
    /// Views defined directly on this display.
    views: Vec<View>,
    /// Names of shared views attached to this display.
    shared_views: Vec<String>,
    /// Default view name.
    default_view: Option<String>,
}

impl Display {
    /// Creates a new display.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            views: Vec::new(),
            shared_views: Vec::new(),
            default_view: None,
        }
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a view to this display.
    pub fn add_view(&mut self, view: View) {
        if self.default_view.is_none() {
            self.default_view = Some(view.name.clone());
        }
        self.views.push(view);
    }

    /// Attaches a shared view by name.
    pub fn add_shared_view(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.default_view.is_none() {
            self.default_view = Some(name.clone());
        }
        if !self.shared_views.iter().any(|v| v.eq_ignore_ascii_case(&name)) {
            self.shared_views.push(name);
        }
    }

    /// Returns all directly defined views.
    #[inline]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Returns the names of attached shared views.
    #[inline]
    pub fn shared_views(&self) -> &[String] {
        &self.shared_views
    }

    /// Gets a view by name.
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Checks whether a view of this name exists, directly or shared.
    pub fn has_view(&self, name: &str) -> bool {
        self.view(name).is_some()
            || self.shared_views.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    /// Returns the default view name.
    #[inline]
    pub fn default_view(&self) -> Option<&str> {
        self.default_view.as_deref()
    }
}

/// View transform definition.
///
/// View transforms are shared scene-to-display renderings that can be reused
/// across views.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    /// Name.
    name: String,
    /// Family (for categorization).
    family: String,
    /// Description. Transform identifiers embedded here are what reference
    /// resolution matches against.
    description: String,
    /// Transform from scene reference.
    from_scene_reference: Option<Transform>,
    /// Transform to scene reference.
    to_scene_reference: Option<Transform>,
}

impl ViewTransform {
    /// Creates a new view transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: String::new(),
            description: String::new(),
            from_scene_reference: None,
            to_scene_reference: None,
        }
    }

    /// Returns the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Sets the family.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the transform from scene reference.
    pub fn with_from_scene_reference(mut self, t: Transform) -> Self {
        self.from_scene_reference = Some(t);
        self
    }

    /// Sets the transform to scene reference.
    pub fn with_to_scene_reference(mut self, t: Transform) -> Self {
        self.to_scene_reference = Some(t);
        self
    }

    /// Gets the transform from scene reference.
    #[inline]
    pub fn from_scene_reference(&self) -> Option<&Transform> {
        self.from_scene_reference.as_ref()
    }

    /// Gets the transform to scene reference.
    #[inline]
    pub fn to_scene_reference(&self) -> Option<&Transform> {
        self.to_scene_reference.as_ref()
    }
}

/// Collection of displays, shared views, and view transforms.
#[derive(Debug, Clone, Default)]
pub struct DisplayManager {
    /// All displays.
    displays: Vec<Display>,
    /// Default display name.
    default_display: Option<String>,
    /// Config-level shared views.
    shared_views: Vec<SharedView>,
    /// View transforms.
    view_transforms: Vec<ViewTransform>,
}

impl DisplayManager {
    /// Creates an empty display manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display.
    pub fn add_display(&mut self, display: Display) {
        if self.default_display.is_none() {
            self.default_display = Some(display.name.clone());
        }
        self.displays.push(display);
    }

    /// Returns all displays.
    #[inline]
    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    /// Gets a display by name.
    pub fn display(&self, name: &str) -> Option<&Display> {
        self.displays.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Gets a mutable display by name, creating it if missing.
    pub fn display_mut_or_create(&mut self, name: &str) -> &mut Display {
        let idx = match self
            .displays
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))
        {
            Some(idx) => idx,
            None => {
                self.add_display(Display::new(name));
                self.displays.len() - 1
            }
        };
        &mut self.displays[idx]
    }

    /// Returns the default display name.
    #[inline]
    pub fn default_display(&self) -> Option<&str> {
        self.default_display.as_deref()
    }

    /// Registers a config-level shared view, replacing any same-named one.
    pub fn add_shared_view(&mut self, view: SharedView) {
        if let Some(existing) = self
            .shared_views
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(&view.name))
        {
            *existing = view;
        } else {
            self.shared_views.push(view);
        }
    }

    /// Gets a shared view by name.
    pub fn shared_view(&self, name: &str) -> Option<&SharedView> {
        self.shared_views
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Returns all shared views.
    #[inline]
    pub fn shared_views(&self) -> &[SharedView] {
        &self.shared_views
    }

    /// Adds a view transform, replacing any same-named one.
    pub fn add_view_transform(&mut self, vt: ViewTransform) {
        if let Some(existing) = self
            .view_transforms
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(&vt.name))
        {
            *existing = vt;
        } else {
            self.view_transforms.push(vt);
        }
    }

    /// Gets a view transform by name.
    pub fn view_transform(&self, name: &str) -> Option<&ViewTransform> {
        self.view_transforms
            .iter()
            .find(|vt| vt.name.eq_ignore_ascii_case(name))
    }

    /// Returns all view transforms.
    #[inline]
    pub fn view_transforms(&self) -> &[ViewTransform] {
        &self.view_transforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_display() {
        let mut display = Display::new("Rec.709 - Display");
        display.add_view(View::new("ACES 1.0 - SDR Video", "Rec.709 - Display"));
        display.add_view(View::new("Raw", "Raw"));

        assert_eq!(display.views().len(), 2);
        assert_eq!(display.default_view(), Some("ACES 1.0 - SDR Video"));
    }

    #[test]
    fn shared_view_attach() {
        let mut mgr = DisplayManager::new();
        mgr.add_shared_view(SharedView {
            name: "ACES 1.0 - SDR Video".into(),
            view_transform: "ACES 1.0 - SDR Video".into(),
            colorspace: USE_DISPLAY_NAME.into(),
            looks: String::new(),
            rule: String::new(),
            description: String::new(),
        });

        let display = mgr.display_mut_or_create("sRGB - Display");
        display.add_shared_view("ACES 1.0 - SDR Video");

        assert!(mgr.display("sRGB - Display").unwrap().has_view("ACES 1.0 - SDR Video"));
        assert!(mgr.shared_view("ACES 1.0 - SDR Video").is_some());
    }

    #[test]
    fn view_transform_lookup() {
        let mut mgr = DisplayManager::new();
        mgr.add_view_transform(
            ViewTransform::new("ACES 1.0 - SDR Video")
                .with_description("SDR video rendering"),
        );

        assert!(mgr.view_transform("aces 1.0 - sdr video").is_some());
    }
}
