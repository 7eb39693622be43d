//! Built-in reference configurations.
//!
//! Provides the canonical studio reference configuration that AMF
//! compilation resolves transform identifiers against, without loading
//! external files. Color space, view transform, and look descriptions carry
//! their `ACEStransformID` URNs; reference resolution matches identifiers
//! as substrings of those descriptions.
//!
//! # Example
//!
//! ```
//! use amf_config::builtin;
//!
//! let config = builtin::studio_config();
//! assert!(config.colorspace("S-Log3 Venice S-Gamut3").is_some());
//! assert!(config
//!     .colorspace("S-Log3 Venice S-Gamut3")
//!     .unwrap()
//!     .description()
//!     .contains("urn:ampas:aces:transformId"));
//! ```

use crate::colorspace::{ColorSpace, Encoding};
use crate::config::Config;
use crate::display::{View, ViewTransform};
use crate::look::Look;
use crate::role::names;
use crate::transform::{BuiltinTransform, Transform, TransformDirection};

/// ACEStransformID carried by the reference color space's description.
pub const ACES_REFERENCE_ID: &str =
    "urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACES_to_ACES.a1.1.0";

/// Log camera color spaces registered by the studio config:
/// (name, ACEStransformID, builtin style, linearized counterpart).
const CAMERA_SPACES: [(&str, &str, &str, &str); 11] = [
    (
        "ARRI LogC3 (EI800)",
        "urn:ampas:aces:transformId:v1.5:IDT.ARRI.Alexa-v3-logC-EI800.a1.v2",
        "ARRI_LOGC3_EI800_to_ACES2065-1",
        "Linear ARRI Wide Gamut 3",
    ),
    (
        "ARRI LogC4",
        "urn:ampas:aces:transformId:v1.5:CSC.Arri.LogC4_to_ACES.a1.v1",
        "ARRI_LOGC4_to_ACES2065-1",
        "Linear ARRI Wide Gamut 4",
    ),
    (
        "BMDFilm WideGamut Gen5",
        "urn:ampas:aces:transformId:v1.5:IDT.BlackmagicDesign.BMDFilm_WideGamut_Gen5.a1.v1",
        "BMDFILM_WIDEGAMUT_GEN5_to_ACES2065-1",
        "Linear BMD WideGamut Gen5",
    ),
    (
        "CanonLog2 CinemaGamut D55",
        "urn:ampas:aces:transformId:v1.5:IDT.Canon.CanonLog2_CinemaGamut-D55.a1.v1",
        "CANON_CLOG2_CGAMUT_to_ACES2065-1",
        "Linear CinemaGamut D55",
    ),
    (
        "CanonLog3 CinemaGamut D55",
        "urn:ampas:aces:transformId:v1.5:IDT.Canon.CanonLog3_CinemaGamut-D55.a1.v1",
        "CANON_CLOG3_CGAMUT_to_ACES2065-1",
        "Linear CinemaGamut D55",
    ),
    (
        "V-Log V-Gamut",
        "urn:ampas:aces:transformId:v1.5:IDT.Panasonic.VLog_VGamut.a1.v1",
        "PANASONIC_VLOG_VGAMUT_to_ACES2065-1",
        "Linear V-Gamut",
    ),
    (
        "Log3G10 REDWideGamutRGB",
        "urn:ampas:aces:transformId:v1.5:IDT.RED.Log3G10_REDWideGamutRGB.a1.v1",
        "RED_LOG3G10_RWG_to_ACES2065-1",
        "Linear REDWideGamutRGB",
    ),
    (
        "S-Log3 S-Gamut3",
        "urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3.a1.v1",
        "SONY_SLOG3_SGAMUT3_to_ACES2065-1",
        "Linear S-Gamut3",
    ),
    (
        "S-Log3 S-Gamut3.Cine",
        "urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3Cine.a1.v1",
        "SONY_SLOG3_SGAMUT3CINE_to_ACES2065-1",
        "Linear S-Gamut3.Cine",
    ),
    (
        "S-Log3 Venice S-Gamut3",
        "urn:ampas:aces:transformId:v1.5:IDT.Sony.Venice_SLog3_SGamut3.a1.v1",
        "SONY_SLOG3_VENICE_SGAMUT3_to_ACES2065-1",
        "Linear Venice S-Gamut3",
    ),
    (
        "S-Log3 Venice S-Gamut3.Cine",
        "urn:ampas:aces:transformId:v1.5:IDT.Sony.Venice_SLog3_SGamut3Cine.a1.v1",
        "SONY_SLOG3_VENICE_SGAMUT3CINE_to_ACES2065-1",
        "Linear Venice S-Gamut3.Cine",
    ),
];

/// Display color spaces: (name, ACEStransformID of the realizing output
/// transform, builtin style, encoding).
const DISPLAY_SPACES: [(&str, &str, &str, Encoding); 4] = [
    (
        "sRGB - Display",
        "urn:ampas:aces:transformId:v1.5:ODT.Academy.RGBmonitor_100nits_dim.a1.0.3",
        "DISPLAY - CIE-XYZ-D65_to_sRGB",
        Encoding::Sdr,
    ),
    (
        "Rec.709 - Display",
        "urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3",
        "DISPLAY - CIE-XYZ-D65_to_REC.709",
        Encoding::Sdr,
    ),
    (
        "P3-D65 - Display",
        "urn:ampas:aces:transformId:v1.5:ODT.Academy.P3D65_48nits.a1.0.3",
        "DISPLAY - CIE-XYZ-D65_to_G2.6-P3-D65",
        Encoding::Sdr,
    ),
    (
        "Rec.2100-PQ - Display",
        "urn:ampas:aces:transformId:v1.5:RRTODT.Academy.Rec2020_1000nits_15nits_ST2084.a1.1.0",
        "DISPLAY - CIE-XYZ-D65_to_REC.2100-PQ",
        Encoding::Hdr,
    ),
];

/// Creates the canonical studio reference configuration.
///
/// Contents mirror the ACES studio config: the interchange and working
/// spaces, the log camera encodings with their linearized counterparts,
/// display color spaces, the standard view transforms, and the reference
/// gamut compression look.
pub fn studio_config() -> Config {
    let mut config = Config::raw();
    config.set_name("studio-config-v2.1.0_aces-v1.3");
    config.set_version(2, 3);

    config.add_colorspace(aces2065_1());
    config.add_colorspace(acescg());
    config.add_colorspace(acescct());
    config.add_colorspace(cie_xyz_d65());
    config.add_colorspace(raw());

    for (name, aces_id, style, _) in CAMERA_SPACES {
        config.add_colorspace(camera_space(name, aces_id, style));
    }
    // Registered after the log spaces so identifier scans hit the log
    // encodings first.
    let mut linear_names: Vec<&str> = CAMERA_SPACES.iter().map(|c| c.3).collect();
    linear_names.dedup();
    for name in linear_names {
        config.add_colorspace(linear_camera_space(name));
    }

    for (name, aces_id, style, encoding) in DISPLAY_SPACES {
        config.add_colorspace(display_space(name, aces_id, style, encoding));
    }

    config.add_view_transform(
        ViewTransform::new("ACES 1.0 - SDR Video")
            .with_family("ACES")
            .with_description(
                "Component of ACES Output Transforms for SDR D65 video\n\n\
                 ACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.RGBmonitor_100nits_dim.a1.0.3\n\
                 ACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3",
            )
            .with_from_scene_reference(builtin("ACES-OUTPUT - ACES2065-1_to_CIE-XYZ-D65 - SDR-VIDEO_1.0")),
    );
    config.add_view_transform(
        ViewTransform::new("ACES 1.0 - SDR Cinema")
            .with_family("ACES")
            .with_description(
                "Component of ACES Output Transforms for SDR cinema\n\n\
                 ACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.P3D65_48nits.a1.0.3",
            )
            .with_from_scene_reference(builtin("ACES-OUTPUT - ACES2065-1_to_CIE-XYZ-D65 - SDR-CINEMA_1.0")),
    );
    config.add_view_transform(
        ViewTransform::new("ACES 1.1 - HDR Video (1000 nits & Rec.2020 lim)")
            .with_family("ACES")
            .with_description(
                "Component of ACES Output Transforms for 1000 nit HDR D65 video\n\n\
                 ACEStransformID: urn:ampas:aces:transformId:v1.5:RRTODT.Academy.Rec2020_1000nits_15nits_ST2084.a1.1.0",
            )
            .with_from_scene_reference(builtin(
                "ACES-OUTPUT - ACES2065-1_to_CIE-XYZ-D65 - HDR-VIDEO-1000nit-15nit-REC2020lim_1.1",
            )),
    );

    config.add_look(
        Look::new("ACES 1.3 Reference Gamut Compression")
            .process_space("ACES2065-1")
            .description(
                "LMT (applied in ACES2065-1) to compress scene-referred values from \
                 common cameras into the AP1 gamut\n\n\
                 ACEStransformID: urn:ampas:aces:transformId:v1.5:LMT.Academy.GamutCompress.a1.3.0",
            )
            .transform(builtin("ACES-LMT - ACES 1.3 Reference Gamut Compression")),
    );

    config.set_role(names::ACES_INTERCHANGE, "ACES2065-1");
    config.set_role(names::CIE_XYZ_D65_INTERCHANGE, "CIE-XYZ-D65");
    config.set_role(names::SCENE_LINEAR, "ACEScg");
    config.set_role(names::COLOR_TIMING, "ACEScct");
    config.set_role(names::COMPOSITING_LOG, "ACEScct");
    config.set_role(names::DATA, "Raw");

    let mut srgb = crate::display::Display::new("sRGB - Display");
    srgb.add_view(
        View::new("ACES 1.0 - SDR Video", "sRGB - Display")
            .with_view_transform("ACES 1.0 - SDR Video"),
    );
    srgb.add_view(View::new("Raw", "Raw"));
    config.displays_mut().add_display(srgb);

    config
}

fn builtin(style: &str) -> Transform {
    Transform::Builtin(BuiltinTransform {
        style: style.into(),
        direction: TransformDirection::Forward,
    })
}

fn aces2065_1() -> ColorSpace {
    ColorSpace::builder("ACES2065-1")
        .alias("aces")
        .alias("ACES - ACES2065-1")
        .family("ACES")
        .encoding(Encoding::SceneLinear)
        .description(format!(
            "The Academy Color Encoding System reference color space\n\n\
             ACEStransformID: {ACES_REFERENCE_ID}"
        ))
        .build()
}

fn acescg() -> ColorSpace {
    ColorSpace::builder("ACEScg")
        .alias("lin_ap1")
        .family("ACES")
        .encoding(Encoding::SceneLinear)
        .description(
            "Convert ACEScg to ACES2065-1\n\n\
             ACEStransformID: urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScg_to_ACES.a1.0.3",
        )
        .to_reference(builtin("ACEScg_to_ACES2065-1"))
        .build()
}

fn acescct() -> ColorSpace {
    ColorSpace::builder("ACEScct")
        .alias("acescct_ap1")
        .family("ACES")
        .encoding(Encoding::Log)
        .description(
            "Convert ACEScct to ACES2065-1\n\n\
             ACEStransformID: urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScct_to_ACES.a1.0.3",
        )
        .to_reference(builtin("ACEScct_to_ACES2065-1"))
        .build()
}

fn cie_xyz_d65() -> ColorSpace {
    ColorSpace::builder("CIE-XYZ-D65")
        .alias("cie_xyz_d65")
        .family("Utility")
        .encoding(Encoding::DisplayLinear)
        .description("The CIE XYZ (D65) display connection space")
        .build()
}

fn raw() -> ColorSpace {
    ColorSpace::builder("Raw")
        .alias("Utility - Raw")
        .family("Utility")
        .encoding(Encoding::Data)
        .description("The utility \"Raw\" color space")
        .build()
}

fn camera_space(name: &str, aces_id: &str, style: &str) -> ColorSpace {
    ColorSpace::builder(name)
        .family("Input")
        .encoding(Encoding::Log)
        .description(format!(
            "Convert {name} to ACES2065-1\n\nACEStransformID: {aces_id}"
        ))
        .to_reference(builtin(style))
        .build()
}

fn linear_camera_space(name: &str) -> ColorSpace {
    ColorSpace::builder(name)
        .family("Input")
        .encoding(Encoding::SceneLinear)
        .description(format!("Convert {name} to ACES2065-1"))
        .to_reference(builtin(&format!("{name} to ACES2065-1")))
        .build()
}

fn display_space(name: &str, aces_id: &str, style: &str, encoding: Encoding) -> ColorSpace {
    ColorSpace::builder(name)
        .family("Display")
        .encoding(encoding)
        .description(format!(
            "Convert CIE XYZ (D65 white) to {name}\n\nACEStransformID: {aces_id}"
        ))
        .from_reference(builtin(style))
        .build()
}
