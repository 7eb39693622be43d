//! Configuration container and reference-config loading.
//!
//! A [`Config`] is the unit of color management: it defines color spaces,
//! roles, displays/views, looks, named transforms, and environment
//! variables. The AMF compiler builds one from scratch per document and
//! queries a second, read-only one (the reference configuration) loaded
//! either from the built-in studio config or from an OCIO-style YAML file.
//!
//! # Example
//!
//! ```
//! use amf_config::{builtin, Config};
//!
//! let reference = builtin::studio_config();
//! assert!(reference.colorspace("ACES2065-1").is_some());
//!
//! let mut config = Config::raw();
//! config.set_role("aces_interchange", "ACES2065-1");
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::colorspace::{ColorSpace, Encoding};
use crate::context::Context;
use crate::display::{Display, DisplayManager, SharedView, View, ViewTransform};
use crate::error::{ConfigError, ConfigResult};
use crate::look::{Look, LookManager};
use crate::role::Roles;
use crate::transform::Transform;

/// Config format version (major.minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl ConfigVersion {
    /// Version written by this library.
    pub const CURRENT: Self = Self { major: 2, minor: 3 };

    /// Parses a version string such as `"2.3"` or `"2"`.
    pub fn parse(s: &str) -> ConfigResult<Self> {
        let mut parts = s.trim().splitn(2, '.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| ConfigError::UnsupportedVersion { version: s.into() })?;
        let minor = match parts.next() {
            Some(p) => p
                .parse()
                .map_err(|_| ConfigError::UnsupportedVersion { version: s.into() })?,
            None => 0,
        };
        Ok(Self { major, minor })
    }

    /// Checks whether this version is at least `major.minor`.
    #[inline]
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl std::fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A named transform: a reusable transform registered under a name,
/// independent of any color space.
#[derive(Debug, Clone)]
pub struct NamedTransform {
    /// Unique name.
    pub name: String,
    /// Family path (e.g., "AMF/ClipName").
    pub family: String,
    /// Description.
    pub description: String,
    /// Forward transform.
    pub forward: Option<Transform>,
    /// Inverse transform.
    pub inverse: Option<Transform>,
}

impl NamedTransform {
    /// Creates a named transform with a forward direction.
    pub fn new(name: impl Into<String>, forward: Transform) -> Self {
        Self {
            name: name.into(),
            family: String::new(),
            description: String::new(),
            forward: Some(forward),
            inverse: None,
        }
    }

    /// Sets the family path.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// Color management configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config name/description.
    name: String,
    /// Format version.
    version: ConfigVersion,
    /// Search paths for LUTs.
    search_paths: Vec<PathBuf>,
    /// Working directory (config file location).
    working_dir: PathBuf,
    /// All color spaces, in registration order.
    colorspaces: Vec<ColorSpace>,
    /// Names of color spaces hidden from selection UIs.
    inactive_colorspaces: Vec<String>,
    /// Role mappings.
    roles: Roles,
    /// Display/view configuration.
    displays: DisplayManager,
    /// Looks.
    looks: LookManager,
    /// Named transforms, in registration order.
    named_transforms: Vec<NamedTransform>,
    /// Active displays (subset to show, first entry is the selection).
    active_displays: Vec<String>,
    /// Active views.
    active_views: Vec<String>,
    /// Default color space assigned by file rules.
    file_rule_default: Option<String>,
    /// Environment/context variables.
    context: Context,
}

impl Default for Config {
    fn default() -> Self {
        Self::raw()
    }
}

impl Config {
    /// Creates a minimal empty editable configuration.
    pub fn raw() -> Self {
        Self {
            name: String::new(),
            version: ConfigVersion::CURRENT,
            search_paths: Vec::new(),
            working_dir: PathBuf::from("."),
            colorspaces: Vec::new(),
            inactive_colorspaces: Vec::new(),
            roles: Roles::new(),
            displays: DisplayManager::new(),
            looks: LookManager::new(),
            named_transforms: Vec::new(),
            active_displays: Vec::new(),
            active_views: Vec::new(),
            file_rule_default: None,
            context: Context::new(),
        }
    }

    /// Loads a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_yaml_str(&content, working_dir)
    }

    /// Loads a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str, working_dir: PathBuf) -> ConfigResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw, working_dir)
    }

    /// Constructs a config from parsed raw data.
    fn from_raw(raw: RawConfig, working_dir: PathBuf) -> ConfigResult<Self> {
        let version = ConfigVersion::parse(&raw.ocio_profile_version)?;

        let mut config = Self::raw();
        config.name = raw.name.unwrap_or_default();
        config.version = version;
        config.working_dir = working_dir.clone();
        config.search_paths = raw
            .search_path
            .map(|s| {
                s.split(':')
                    .filter(|p| !p.is_empty())
                    .map(|p| working_dir.join(p))
                    .collect()
            })
            .unwrap_or_default();
        config.active_displays = raw.active_displays.unwrap_or_default();
        config.active_views = raw.active_views.unwrap_or_default();
        config.inactive_colorspaces = raw.inactive_colorspaces.unwrap_or_default();

        if let Some(roles) = raw.roles {
            for (role, cs) in roles {
                config.roles.define(role, cs);
            }
        }

        if let Some(colorspaces) = raw.colorspaces {
            for raw_cs in colorspaces {
                let mut builder = ColorSpace::builder(&raw_cs.name);
                if let Some(desc) = raw_cs.description {
                    builder = builder.description(desc);
                }
                if let Some(family) = raw_cs.family {
                    builder = builder.family(family);
                }
                if let Some(encoding) = raw_cs.encoding {
                    builder = builder.encoding(Encoding::parse(&encoding));
                }
                if raw_cs.isdata == Some(true) {
                    builder = builder.is_data(true);
                }
                for alias in raw_cs.aliases.unwrap_or_default() {
                    builder = builder.alias(alias);
                }
                for category in raw_cs.categories.unwrap_or_default() {
                    builder = builder.category(category);
                }
                config.add_colorspace(builder.build());
            }
        }

        if let Some(displays) = raw.displays {
            for (name, views) in displays {
                let mut display = Display::new(&name);
                for raw_view in views {
                    let mut view = View::new(&raw_view.name, &raw_view.colorspace);
                    if let Some(looks) = raw_view.looks {
                        view = view.with_looks(looks);
                    }
                    if let Some(vt) = raw_view.view_transform {
                        view = view.with_view_transform(vt);
                    }
                    display.add_view(view);
                }
                config.displays.add_display(display);
            }
        }

        if let Some(looks) = raw.looks {
            for raw_look in looks {
                let look = Look::new(&raw_look.name)
                    .process_space(raw_look.process_space.unwrap_or_default())
                    .description(raw_look.description.unwrap_or_default());
                config.looks.add(look);
            }
        }

        if let Some(view_transforms) = raw.view_transforms {
            for raw_vt in view_transforms {
                let vt = ViewTransform::new(&raw_vt.name)
                    .with_family(raw_vt.family.unwrap_or_default())
                    .with_description(raw_vt.description.unwrap_or_default());
                config.displays.add_view_transform(vt);
            }
        }

        if let Some(env) = raw.environment {
            for (name, value) in env {
                config.context.set(name, value);
            }
        }

        Ok(config)
    }

    /// Returns the config name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the config name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the config version.
    #[inline]
    pub fn version(&self) -> ConfigVersion {
        self.version
    }

    /// Sets the config version.
    pub fn set_version(&mut self, major: u32, minor: u32) {
        self.version = ConfigVersion { major, minor };
    }

    /// Returns the working directory.
    #[inline]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns all search paths.
    #[inline]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Replaces the search path list with a single entry.
    pub fn set_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths = vec![path.into()];
    }

    /// Returns all color spaces in registration order.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Gets a color space by name, alias, or role.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        if let Some(cs_name) = self.roles.get(name) {
            return self.colorspaces.iter().find(|cs| cs.matches_name(cs_name));
        }
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    /// Returns color space names in registration order.
    pub fn colorspace_names(&self) -> impl Iterator<Item = &str> {
        self.colorspaces.iter().map(|cs| cs.name())
    }

    /// Adds a color space, replacing any existing one with the same name.
    pub fn add_colorspace(&mut self, cs: ColorSpace) {
        if let Some(existing) = self
            .colorspaces
            .iter_mut()
            .find(|c| c.name().eq_ignore_ascii_case(cs.name()))
        {
            *existing = cs;
        } else {
            self.colorspaces.push(cs);
        }
    }

    /// Marks a color space as hidden from selection UIs.
    pub fn add_inactive_colorspace(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self
            .inactive_colorspaces
            .iter()
            .any(|n| n.eq_ignore_ascii_case(&name))
        {
            self.inactive_colorspaces.push(name);
        }
    }

    /// Returns the inactive color space names.
    #[inline]
    pub fn inactive_colorspaces(&self) -> &[String] {
        &self.inactive_colorspaces
    }

    /// Returns the roles mapping.
    #[inline]
    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Sets a role mapping.
    pub fn set_role(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.roles.define(role, colorspace);
    }

    /// Returns the display manager.
    #[inline]
    pub fn displays(&self) -> &DisplayManager {
        &self.displays
    }

    /// Returns the mutable display manager.
    #[inline]
    pub fn displays_mut(&mut self) -> &mut DisplayManager {
        &mut self.displays
    }

    /// Registers a view on a display, creating the display if missing.
    pub fn add_display_view(
        &mut self,
        display: &str,
        view: &str,
        colorspace: &str,
        looks: &str,
    ) {
        let mut v = View::new(view, colorspace);
        if !looks.is_empty() {
            v = v.with_looks(looks);
        }
        self.displays.display_mut_or_create(display).add_view(v);
    }

    /// Registers a config-level shared view.
    pub fn add_shared_view(
        &mut self,
        name: &str,
        view_transform: &str,
        colorspace: &str,
        looks: &str,
        rule: &str,
        description: &str,
    ) {
        self.displays.add_shared_view(SharedView {
            name: name.into(),
            view_transform: view_transform.into(),
            colorspace: colorspace.into(),
            looks: looks.into(),
            rule: rule.into(),
            description: description.into(),
        });
    }

    /// Attaches a shared view to a display, creating the display if missing.
    pub fn add_display_shared_view(&mut self, display: &str, shared_view: &str) {
        self.displays
            .display_mut_or_create(display)
            .add_shared_view(shared_view);
    }

    /// Adds a view transform.
    pub fn add_view_transform(&mut self, vt: ViewTransform) {
        self.displays.add_view_transform(vt);
    }

    /// Returns the look manager.
    #[inline]
    pub fn looks(&self) -> &LookManager {
        &self.looks
    }

    /// Adds a look to the config.
    pub fn add_look(&mut self, look: Look) {
        self.looks.add(look);
    }

    /// Returns all named transforms in registration order.
    #[inline]
    pub fn named_transforms(&self) -> &[NamedTransform] {
        &self.named_transforms
    }

    /// Gets a named transform by name.
    pub fn named_transform(&self, name: &str) -> Option<&NamedTransform> {
        self.named_transforms
            .iter()
            .find(|nt| nt.name.eq_ignore_ascii_case(name))
    }

    /// Adds a named transform, replacing any existing one with the same name.
    pub fn add_named_transform(&mut self, nt: NamedTransform) {
        if let Some(existing) = self
            .named_transforms
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&nt.name))
        {
            *existing = nt;
        } else {
            self.named_transforms.push(nt);
        }
    }

    /// Sets the active display selection to a single name.
    pub fn set_active_displays(&mut self, display: &str) {
        self.active_displays = vec![display.to_string()];
    }

    /// Sets the active view selection to a single name.
    pub fn set_active_views(&mut self, view: &str) {
        self.active_views = vec![view.to_string()];
    }

    /// Returns the active display name, if one was selected.
    pub fn active_display(&self) -> Option<&str> {
        self.active_displays.first().map(String::as_str)
    }

    /// Returns the active view name, if one was selected.
    pub fn active_view(&self) -> Option<&str> {
        self.active_views.first().map(String::as_str)
    }

    /// Sets the color space assigned by the default file rule.
    pub fn set_file_rule_default(&mut self, colorspace: impl Into<String>) {
        self.file_rule_default = Some(colorspace.into());
    }

    /// Returns the default file rule color space.
    #[inline]
    pub fn file_rule_default(&self) -> Option<&str> {
        self.file_rule_default.as_deref()
    }

    /// Declares an environment/context variable.
    pub fn add_environment_var(&mut self, name: &str, value: &str) {
        self.context.set(name, value);
    }

    /// Gets the context.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }
}

// ============================================================================
// Raw YAML structures for serde
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    ocio_profile_version: String,
    name: Option<String>,
    #[allow(dead_code)]
    description: Option<String>,
    search_path: Option<String>,
    roles: Option<BTreeMap<String, String>>,
    environment: Option<BTreeMap<String, String>>,
    colorspaces: Option<Vec<RawColorSpace>>,
    displays: Option<BTreeMap<String, Vec<RawView>>>,
    active_displays: Option<Vec<String>>,
    active_views: Option<Vec<String>>,
    inactive_colorspaces: Option<Vec<String>>,
    looks: Option<Vec<RawLook>>,
    view_transforms: Option<Vec<RawViewTransform>>,
}

#[derive(Debug, Deserialize)]
struct RawColorSpace {
    name: String,
    description: Option<String>,
    family: Option<String>,
    encoding: Option<String>,
    isdata: Option<bool>,
    aliases: Option<Vec<String>>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawView {
    name: String,
    colorspace: String,
    looks: Option<String>,
    view_transform: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLook {
    name: String,
    process_space: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawViewTransform {
    name: String,
    description: Option<String>,
    family: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CONFIG: &str = r#"
ocio_profile_version: 2.3

roles:
  aces_interchange: ACES2065-1
  scene_linear: ACEScg

colorspaces:
  - name: ACES2065-1
    family: ACES
    encoding: scene-linear
    description: The Academy Color Encoding System reference color space

  - name: ACEScg
    family: ACES
    encoding: scene-linear
    description: ACES CG working space

view_transforms:
  - name: ACES 1.0 - SDR Video
    description: SDR video rendering

looks:
  - name: Reference Gamut Compression
    process_space: ACES2065-1
    description: LMT for gamut mapping
"#;

    #[test]
    fn parse_minimal_config() {
        let config = Config::from_yaml_str(MINIMAL_CONFIG, PathBuf::from(".")).unwrap();

        assert_eq!(config.version(), ConfigVersion { major: 2, minor: 3 });
        assert_eq!(config.colorspaces().len(), 2);
        assert!(config.colorspace("ACES2065-1").is_some());
        assert!(config.displays().view_transform("ACES 1.0 - SDR Video").is_some());
        assert!(config.looks().get("Reference Gamut Compression").is_some());
    }

    #[test]
    fn roles_lookup() {
        let config = Config::from_yaml_str(MINIMAL_CONFIG, PathBuf::from(".")).unwrap();

        let cs = config.colorspace("scene_linear").unwrap();
        assert_eq!(cs.name(), "ACEScg");
    }

    #[test]
    fn version_parse() {
        assert_eq!(
            ConfigVersion::parse("2.3").unwrap(),
            ConfigVersion { major: 2, minor: 3 }
        );
        assert_eq!(
            ConfigVersion::parse("2").unwrap(),
            ConfigVersion { major: 2, minor: 0 }
        );
        assert!(ConfigVersion::parse("two").is_err());
        assert!(ConfigVersion { major: 2, minor: 3 }.at_least(2, 3));
        assert!(!ConfigVersion { major: 2, minor: 2 }.at_least(2, 3));
    }

    #[test]
    fn add_colorspace_replaces_same_name() {
        let mut config = Config::raw();
        config.add_colorspace(ColorSpace::builder("A").description("one").build());
        config.add_colorspace(ColorSpace::builder("A").description("two").build());

        assert_eq!(config.colorspaces().len(), 1);
        assert_eq!(config.colorspace("A").unwrap().description(), "two");
    }

    #[test]
    fn named_transform_registry() {
        let mut config = Config::raw();
        config.add_named_transform(NamedTransform::new(
            "Clip to Working Space Transform",
            Transform::identity(),
        ));

        assert!(config.named_transform("clip to working space transform").is_some());
        assert_eq!(config.named_transforms().len(), 1);
    }
}
