//! Transform graph assembly.
//!
//! Consumes the completed section captures and the reference resolver to
//! build the output configuration: concrete color spaces, looks,
//! display/views and, for CDL grades, group transforms with optional
//! working-space conversions. Runs post-parse, in fixed order: clip id,
//! input, looks, output.

use std::path::{Path, PathBuf};

use amf_config::{
    AMF_CLIP_ROLE_PREFIX, CdlTransform, ColorSpace, ColorSpaceTransform, Config,
    DisplayViewTransform, FileTransform, Interpolation, Look, LookTransform, NamedTransform,
    Transform, TransformDirection, USE_DISPLAY_NAME, role_names, sanitize_role_name,
};

use crate::AmfInfo;
use crate::capture::{IoSection, NestedRoot, Section};
use crate::error::{AmfError, AmfResult};
use crate::resolve::Resolver;
use crate::router::ParseContext;
use crate::tags::*;

/// The canonical scene-referred interchange space.
pub const ACES: &str = "ACES2065-1";

/// Placeholder look through which shot looks are substituted contextually.
pub const ACES_LOOK_NAME: &str = "ACES Look Transform";

/// Environment variable the shot-look substitution resolves through.
pub const CONTEXT_VAR: &str = "SHOT_LOOKS";

const FILE_IO_CATEGORY: &str = "file-io";

/// Log camera color spaces mapped to their linearized counterparts, per the
/// studio reference configuration.
const CAMERA_MAPPING: [(&str, &str); 11] = [
    ("ARRI LogC3 (EI800)", "Linear ARRI Wide Gamut 3"),
    ("ARRI LogC4", "Linear ARRI Wide Gamut 4"),
    ("BMDFilm WideGamut Gen5", "Linear BMD WideGamut Gen5"),
    ("CanonLog2 CinemaGamut D55", "Linear CinemaGamut D55"),
    ("CanonLog3 CinemaGamut D55", "Linear CinemaGamut D55"),
    ("V-Log V-Gamut", "Linear V-Gamut"),
    ("Log3G10 REDWideGamutRGB", "Linear REDWideGamutRGB"),
    ("S-Log3 S-Gamut3", "Linear S-Gamut3"),
    ("S-Log3 S-Gamut3.Cine", "Linear S-Gamut3.Cine"),
    ("S-Log3 Venice S-Gamut3", "Linear Venice S-Gamut3"),
    ("S-Log3 Venice S-Gamut3.Cine", "Linear Venice S-Gamut3.Cine"),
];

fn camera_linear(name: &str) -> Option<&'static str> {
    CAMERA_MAPPING
        .iter()
        .find(|(log, _)| *log == name)
        .map(|(_, linear)| *linear)
}

fn file_transform(src: PathBuf, ccc_id: Option<String>, direction: TransformDirection) -> Transform {
    Transform::File(FileTransform {
        src,
        ccc_id,
        interpolation: Interpolation::Best,
        direction,
    })
}

fn parse_three_floats(s: &str) -> Option<[f64; 3]> {
    let mut parts = s.split_whitespace();
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    Some([r, g, b])
}

/// Builds the output configuration from completed section captures.
pub(crate) struct Assembler<'a> {
    reference: &'a Config,
    resolver: Resolver<'a>,
    /// The configuration under construction.
    pub config: Config,
    /// Summary metadata under construction.
    pub info: AmfInfo,
    /// Per-look outcome in document order: registered name and applied
    /// state, or `None` when the look was skipped.
    pub look_results: Vec<Option<(String, bool)>>,
    /// Clip identifier derived from the clip-id section.
    pub clip_name: String,
    amf_path: PathBuf,
    amf_dir: PathBuf,
    /// Line number reported by post-parse diagnostics.
    line: u32,
}

impl<'a> Assembler<'a> {
    pub fn new(reference: &'a Config, amf_path: &Path, line: u32) -> Self {
        let amf_dir = amf_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            reference,
            resolver: Resolver::new(reference),
            config: Config::raw(),
            info: AmfInfo::default(),
            look_results: Vec::new(),
            clip_name: String::new(),
            amf_path: amf_path.to_path_buf(),
            amf_dir,
            line,
        }
    }

    fn family(&self) -> String {
        format!("AMF/{}", self.clip_name)
    }

    /// Seeds the output configuration: interchange and working spaces,
    /// standard roles, the shot-look placeholder, and the context variable.
    pub fn init_config(&mut self) -> AmfResult<()> {
        let mut config = Config::raw();
        config.set_version(2, 3);

        let Some(aces) = self.reference.colorspace(ACES) else {
            return Err(AmfError::MissingReferenceColorSpace { name: ACES.into() });
        };
        config.add_colorspace(aces.clone());
        for name in ["ACEScg", "ACEScct", "CIE-XYZ-D65", "Raw"] {
            if let Some(cs) = self.reference.colorspace(name) {
                config.add_colorspace(cs.clone());
            }
        }

        config.set_role(role_names::ACES_INTERCHANGE, ACES);
        if config.colorspace("ACEScg").is_some() {
            config.set_role(role_names::SCENE_LINEAR, "ACEScg");
        }
        if config.colorspace("ACEScct").is_some() {
            config.set_role(role_names::COLOR_TIMING, "ACEScct");
            config.set_role(role_names::COMPOSITING_LOG, "ACEScct");
        }
        if config.colorspace("CIE-XYZ-D65").is_some() {
            config.set_role(role_names::CIE_XYZ_D65_INTERCHANGE, "CIE-XYZ-D65");
        }
        config.set_file_rule_default(ACES);

        // The shot-look placeholder: a data relabel into whatever the
        // context variable names, substituted at resolution time.
        let cst = Transform::ColorSpace(ColorSpaceTransform {
            src: ACES.into(),
            dst: format!("${CONTEXT_VAR}"),
            data_bypass: true,
            direction: TransformDirection::Forward,
        });
        config.add_look(Look::new(ACES_LOOK_NAME).process_space(ACES).transform(cst));
        config.add_environment_var(CONTEXT_VAR, ACES);
        config.set_search_path(".");

        self.config = config;
        Ok(())
    }

    /// Derives the clip identifier: clip name, else uuid, else the AMF
    /// file's stem, else a fixed fallback.
    pub fn process_clip_id(&mut self, ctx: &ParseContext) {
        if let Some(clip) = &ctx.clip_id {
            if let Some(name) = clip
                .first_sub_element(TAG_CLIP_NAME)
                .or_else(|| clip.first_sub_element(TAG_UUID))
            {
                self.clip_name = name.to_string();
            }
        }
        if self.clip_name.is_empty() {
            if let Some(stem) = self.amf_path.file_stem() {
                self.clip_name = stem.to_string_lossy().into_owned();
            }
        }
        if self.clip_name.is_empty() {
            self.clip_name = "AMF Clip Name".into();
        }
    }

    /// Processes the input section. An absent section resolves to the
    /// interchange space itself.
    pub fn process_input(&mut self, ctx: &ParseContext) -> AmfResult<()> {
        let Some(section) = &ctx.input else {
            self.info.input_colorspace = ACES.into();
            return Ok(());
        };

        for (name, value) in section.direct_elements() {
            if tag_eq(name, TAG_TRANSFORM_ID) {
                if let Some(cs) = self.resolver.colorspace(value) {
                    self.config.add_colorspace(cs.clone());
                    self.info.input_colorspace = cs.name().to_string();

                    if let Some(linear) = camera_linear(cs.name()) {
                        if let Some(linear_cs) = self.reference.colorspace(linear) {
                            self.config.add_colorspace(linear_cs.clone());
                        }
                    }
                }
            } else if tag_eq(name, TAG_FILE) {
                let path = self.check_lut_path(value)?;
                let cs_name = format!("AMF Input Transform -- {}", self.clip_name);
                let cs = ColorSpace::builder(&cs_name)
                    .family(self.family())
                    .category(FILE_IO_CATEGORY)
                    .to_reference(file_transform(path, None, TransformDirection::Forward))
                    .build();
                self.config.add_colorspace(cs);
                self.info.input_colorspace = cs_name;
            }
        }

        self.process_input_device_block(section)?;

        if self.info.input_colorspace.is_empty() {
            return Err(AmfError::UnresolvedInput { line: self.line });
        }
        Ok(())
    }

    /// The inverse output-device block nested in the input section: an
    /// on-set display rendering to be undone.
    fn process_input_device_block(&mut self, section: &IoSection) -> AmfResult<()> {
        for elem in section.nested_elements() {
            if elem.root != NestedRoot::InverseOutputDevice {
                continue;
            }
            if tag_eq(&elem.name, TAG_TRANSFORM_ID) {
                self.register_output_transform_id(&elem.value, TransformDirection::Inverse);
            } else if tag_eq(&elem.name, TAG_FILE) {
                let device = self.check_lut_path(&elem.value)?;

                let mut transforms = Vec::new();
                if let Some(rrt) =
                    section.first_nested(NestedRoot::InverseReferenceRendering, TAG_FILE)
                {
                    let rrt_path = self.check_lut_path(rrt)?;
                    transforms.push(file_transform(rrt_path, None, TransformDirection::Inverse));
                }
                transforms.push(file_transform(device, None, TransformDirection::Inverse));

                let cs_name = format!("AMF Input Transform LUT -- {}", self.clip_name);
                let display = self.io_description(section);
                let cs = ColorSpace::builder(&cs_name)
                    .family(self.family())
                    .category(FILE_IO_CATEGORY)
                    .from_reference(Transform::group(transforms))
                    .build();

                self.config
                    .add_display_view(&display, &cs_name, &cs_name, ACES_LOOK_NAME);
                self.config.add_inactive_colorspace(&cs_name);
                self.config.set_active_displays(&display);
                self.config.set_active_views(&cs_name);
                self.config.add_colorspace(cs);
                self.info.input_colorspace = cs_name;
            }
        }
        Ok(())
    }

    /// Processes the output section. Precedence: direct transform id, then
    /// direct file, then the nested output-device block.
    pub fn process_output(&mut self, ctx: &ParseContext) -> AmfResult<()> {
        let Some(section) = &ctx.output else {
            return Ok(());
        };

        for (name, value) in section.direct_elements() {
            if tag_eq(name, TAG_TRANSFORM_ID) {
                self.register_output_transform_id(value, TransformDirection::Forward);
                return Ok(());
            } else if tag_eq(name, TAG_FILE) {
                let path = self.check_lut_path(value)?;
                self.register_output_lut(section, file_transform(path, None, TransformDirection::Forward));
                return Ok(());
            }
        }

        for elem in section.nested_elements() {
            if elem.root != NestedRoot::OutputDevice {
                continue;
            }
            if tag_eq(&elem.name, TAG_TRANSFORM_ID) {
                self.register_output_transform_id(&elem.value, TransformDirection::Forward);
            } else if tag_eq(&elem.name, TAG_FILE) {
                let device = self.check_lut_path(&elem.value)?;

                let mut transforms = Vec::new();
                if let Some(rrt) = section.first_nested(NestedRoot::ReferenceRendering, TAG_FILE) {
                    let rrt_path = self.check_lut_path(rrt)?;
                    transforms.push(file_transform(rrt_path, None, TransformDirection::Forward));
                }
                transforms.push(file_transform(device, None, TransformDirection::Forward));

                self.register_output_lut(section, Transform::group(transforms));
            }
        }
        Ok(())
    }

    /// Registers a file-based output rendering as a display/view over a
    /// synthesized display color space.
    fn register_output_lut(&mut self, section: &IoSection, transform: Transform) {
        let cs_name = format!("AMF Output Transform LUT -- {}", self.clip_name);
        let display = self.io_description(section);
        let cs = ColorSpace::builder(&cs_name)
            .family(self.family())
            .category(FILE_IO_CATEGORY)
            .from_reference(transform)
            .build();

        self.config
            .add_display_view(&display, &cs_name, &cs_name, ACES_LOOK_NAME);
        self.config.add_inactive_colorspace(&cs_name);
        self.config.set_active_displays(&display);
        self.config.set_active_views(&cs_name);
        self.config.add_colorspace(cs);
    }

    /// Resolves an output transform identifier to a display color space and
    /// view transform pair, registering both plus the shared view linking
    /// them. Inverse direction additionally wraps the pair as the clip's
    /// input color space; forward direction activates the display/view.
    /// Misses are non-fatal: the stanza is skipped.
    fn register_output_transform_id(&mut self, aces_id: &str, direction: TransformDirection) {
        let Some(display_cs) = self.resolver.colorspace(aces_id) else {
            return;
        };
        let Some(view_transform) = self.resolver.view_transform(aces_id) else {
            return;
        };
        let display_cs = display_cs.clone();
        let view_transform = view_transform.clone();

        self.config.add_colorspace(display_cs.clone());
        self.config.add_view_transform(view_transform.clone());
        self.config.add_shared_view(
            view_transform.name(),
            view_transform.name(),
            USE_DISPLAY_NAME,
            ACES_LOOK_NAME,
            "",
            "",
        );
        self.config
            .add_display_shared_view(display_cs.name(), view_transform.name());

        if direction == TransformDirection::Inverse {
            let dvt = Transform::DisplayView(DisplayViewTransform {
                src: ACES.into(),
                display: display_cs.name().into(),
                view: view_transform.name().into(),
                looks_bypass: true,
                direction,
            });
            let cs_name = format!("AMF Input Transform -- {}", self.clip_name);
            let cs = ColorSpace::builder(&cs_name)
                .family(self.family())
                .category(FILE_IO_CATEGORY)
                .to_reference(dvt)
                .build();
            self.config.add_colorspace(cs);
            self.info.input_colorspace = cs_name;
        } else {
            self.config.set_active_displays(display_cs.name());
            self.config.set_active_views(view_transform.name());
        }
    }

    /// A display color space without any view is invalid; when output
    /// processing produced no display at all, expose the untone-mapped Raw
    /// view instead.
    pub fn ensure_neutral_display(&mut self) {
        if self.config.displays().displays().is_empty() {
            self.config.add_display_view("Raw", "Raw", "Raw", "");
            if self.config.active_display().is_none() {
                self.config.set_active_displays("Raw");
                self.config.set_active_views("Raw");
            }
        }
    }

    /// Processes every look record in document order, then registers the
    /// combined named transform over the unapplied remainder.
    pub fn process_looks(&mut self, ctx: &ParseContext) -> AmfResult<()> {
        self.info.looks_applied = 0;
        for (idx, look) in ctx.looks.iter().enumerate() {
            let result = self.process_look(look, idx + 1)?;
            if matches!(&result, Some((_, true))) {
                self.info.looks_applied += 1;
            }
            self.look_results.push(result);
        }
        self.register_unapplied_looks();
        Ok(())
    }

    /// Resolves one look. Precedence: reference look by transform id, LUT
    /// file, CDL nodes. Returns the registered name and applied state, or
    /// `None` when nothing was resolvable and the look is skipped.
    fn process_look(&mut self, section: &Section, index: usize) -> AmfResult<Option<(String, bool)>> {
        let applied = section.applied();

        let mut look_name = format!("AMF Look {index}");
        if applied {
            look_name.push_str(" (Applied)");
        }
        look_name.push_str(" -- ");
        look_name.push_str(&self.clip_name);

        // Entries past a cdlWorkingSpace marker belong to the wrapper
        // blocks, not to the look itself.
        let own_len = section
            .sub_elements()
            .iter()
            .position(|(n, _)| tag_eq(n, TAG_CDL_WORKING_SPACE))
            .unwrap_or(section.sub_elements().len());
        let own = &section.sub_elements()[..own_len];

        for (name, value) in own {
            if tag_eq(name, TAG_TRANSFORM_ID) {
                if let Some(reference_look) = self.resolver.look(value) {
                    let mut look = reference_look.clone();
                    look.set_name(&look_name);
                    self.config.add_look(look);
                    return Ok(Some((look_name, applied)));
                }
            } else if tag_eq(name, TAG_FILE) {
                let mut description = section
                    .first_sub_element(TAG_DESCRIPTION)
                    .unwrap_or_default()
                    .to_string();
                let ccc_id = section
                    .first_sub_element(TAG_CDL_CORRECTION_REF)
                    .map(str::to_string)
                    .filter(|id| !id.is_empty());
                if let Some(id) = &ccc_id {
                    description.push_str(&format!(" ({id})"));
                }

                let path = self.check_lut_path(value)?;
                let look = Look::new(&look_name)
                    .process_space(ACES)
                    .transform(file_transform(path, ccc_id, TransformDirection::Forward))
                    .description(description);
                self.config.add_look(look);
                return Ok(Some((look_name, applied)));
            }
        }

        let has_cdl = own.iter().any(|(n, _)| {
            tag_eq(n, TAG_SOP_NODE)
                || tag_eq(n, TAG_ASC_SOP)
                || tag_eq(n, TAG_SAT_NODE)
                || tag_eq(n, TAG_ASC_SAT)
        });
        if !has_cdl {
            return Ok(None);
        }

        let mut cdl = CdlTransform::default();
        let fields: [(&str, &mut [f64; 3]); 3] = [
            (TAG_SLOPE, &mut cdl.slope),
            (TAG_OFFSET, &mut cdl.offset),
            (TAG_POWER, &mut cdl.power),
        ];
        for (tag, target) in fields {
            if let Some(text) = last_value(own, tag) {
                match parse_three_floats(text) {
                    Some(values) => *target = values,
                    None => return Ok(None),
                }
            }
        }
        if let Some(text) = last_value(own, TAG_SATURATION) {
            match text.trim().parse() {
                Ok(value) => cdl.saturation = value,
                Err(_) => return Ok(None),
            }
        }

        let to_ws = self.load_cdl_ws_transform(section, true)?;
        let from_ws = self.load_cdl_ws_transform(section, false)?;

        let cdl = Transform::Cdl(cdl);
        let transforms = match (to_ws, from_ws) {
            (None, None) => vec![cdl],
            (Some(to), Some(from)) => vec![to, cdl, from],
            // One-sided wrappers mirror themselves so the net color space
            // effect outside the CDL is null.
            (Some(to), None) => vec![to.clone(), cdl, to.inverse()],
            (None, Some(from)) => vec![from.clone().inverse(), cdl, from],
        };

        let look = Look::new(&look_name)
            .process_space(ACES)
            .transform(Transform::group(transforms))
            .description("ASC CDL");
        self.config.add_look(look);
        Ok(Some((look_name, applied)))
    }

    /// Extracts a to/from working-space conversion from the look's
    /// cdlWorkingSpace block: a named color space conversion or a LUT file.
    fn load_cdl_ws_transform(
        &mut self,
        section: &Section,
        is_to: bool,
    ) -> AmfResult<Option<Transform>> {
        let subs = section.sub_elements();
        let Some(ws_start) = subs
            .iter()
            .position(|(n, _)| tag_eq(n, TAG_CDL_WORKING_SPACE))
        else {
            return Ok(None);
        };

        let marker = if is_to {
            TAG_TO_CDL_WORKING_SPACE
        } else {
            TAG_FROM_CDL_WORKING_SPACE
        };
        let Some(side_offset) = subs[ws_start..]
            .iter()
            .position(|(n, _)| tag_eq(n, marker))
        else {
            return Ok(None);
        };

        for (name, value) in subs[ws_start + side_offset + 1..].iter() {
            if tag_eq(name, TAG_TO_CDL_WORKING_SPACE) || tag_eq(name, TAG_FROM_CDL_WORKING_SPACE) {
                break;
            }
            if tag_eq(name, TAG_TRANSFORM_ID) {
                let Some(ws_cs) = self.resolver.colorspace(value) else {
                    return Ok(None);
                };
                let ws_cs = ws_cs.clone();
                self.config.add_colorspace(ws_cs.clone());
                let (src, dst) = if is_to {
                    (ACES, ws_cs.name())
                } else {
                    (ws_cs.name(), ACES)
                };
                return Ok(Some(Transform::ColorSpace(ColorSpaceTransform::new(src, dst))));
            }
            if tag_eq(name, TAG_FILE) {
                let path = self.check_lut_path(value)?;
                return Ok(Some(file_transform(path, None, TransformDirection::Forward)));
            }
        }
        Ok(None)
    }

    /// Synthesizes one named transform chaining every unapplied look, for
    /// consumers that preview the full remaining grade in one step, and
    /// points the context variable at it.
    fn register_unapplied_looks(&mut self) {
        let names: Vec<String> = self
            .config
            .looks()
            .names()
            .filter(|n| !n.contains("(Applied)") && !tag_eq(n, ACES_LOOK_NAME))
            .map(String::from)
            .collect();

        let transforms: Vec<Transform> = names
            .into_iter()
            .map(|look| {
                Transform::Look(LookTransform {
                    src: ACES.into(),
                    dst: ACES.into(),
                    looks: look,
                    skip_colorspace_conversion: false,
                    direction: TransformDirection::Forward,
                })
            })
            .collect();
        if transforms.is_empty() {
            return;
        }

        let name = format!("AMF Unapplied Look Transforms -- {}", self.clip_name);
        self.config.add_named_transform(
            NamedTransform::new(&name, Transform::group(transforms)).with_family(self.family()),
        );
        self.config.add_environment_var(CONTEXT_VAR, &name);
    }

    /// Resolves a LUT path: absolute paths as-is, relative paths as given
    /// and then relative to the AMF document's directory.
    pub fn check_lut_path(&self, given: &str) -> AmfResult<PathBuf> {
        let path = Path::new(given);
        if path.is_absolute() {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(AmfError::MissingFile {
                path: path.to_path_buf(),
                line: self.line,
            });
        }

        if path.exists() {
            return Ok(path.to_path_buf());
        }
        let relative = self.amf_dir.join(path);
        if relative.exists() {
            return Ok(relative);
        }
        Err(AmfError::MissingFile {
            path: path.to_path_buf(),
            line: self.line,
        })
    }

    fn io_description(&self, section: &IoSection) -> String {
        section
            .nested_elements()
            .iter()
            .find(|e| tag_eq(&e.name, TAG_DESCRIPTION))
            .map(|e| e.value.clone())
            .or_else(|| {
                section
                    .direct_elements()
                    .iter()
                    .find(|(n, _)| tag_eq(n, TAG_DESCRIPTION))
                    .map(|(_, v)| v.clone())
            })
            .unwrap_or_else(|| format!("AMF Display -- {}", self.clip_name))
    }

    /// Derives the summary metadata and registers the per-clip role.
    pub fn finalize(&mut self, ctx: &ParseContext) {
        let input_applied = ctx.input.as_ref().is_some_and(|s| s.applied());
        let output_applied = ctx.output.as_ref().is_some_and(|s| s.applied());

        self.info.clip_identifier = self.clip_name.clone();
        self.info.display_name = self.config.active_display().unwrap_or_default().to_string();
        self.info.view_name = self.config.active_view().unwrap_or_default().to_string();

        self.info.clip_colorspace = if output_applied {
            self.info.display_name.clone()
        } else if !input_applied {
            self.info.input_colorspace.clone()
        } else {
            ACES.to_string()
        };

        // The role must target a registered color space; a display name
        // that is not itself a color space falls back to the interchange.
        let role_target = if self.config.colorspace(&self.info.clip_colorspace).is_some() {
            self.info.clip_colorspace.clone()
        } else {
            ACES.to_string()
        };
        let role = format!(
            "{AMF_CLIP_ROLE_PREFIX}{}",
            sanitize_role_name(&self.clip_name)
        );
        self.config.set_role(role, role_target);
    }
}

fn last_value<'v>(entries: &'v [(String, String)], tag: &str) -> Option<&'v str> {
    entries
        .iter()
        .rev()
        .find(|(n, _)| tag_eq(n, tag))
        .map(|(_, v)| v.as_str())
}
