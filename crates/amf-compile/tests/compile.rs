//! End-to-end compilation tests over AMF documents.

use std::fs;
use std::path::PathBuf;

use amf_compile::{
    ACES, AmfError, CLIP_TO_WORKING_TRANSFORM, CONTEXT_VAR, compile, compile_with_reference,
};
use amf_config::{Config, Transform, TransformDirection, validate};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Writes an AMF document wrapping `body` in the usual root element.
fn write_amf(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let doc = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:acesMetadataFile xmlns:aces="urn:ampas:aces:amf:v1.0"
                       xmlns:cdl="urn:ASC:CDL:v1.01"
                       version="1.0">
{body}
</aces:acesMetadataFile>
"#
    );
    let path = dir.path().join(name);
    fs::write(&path, doc).expect("write amf");
    path
}

const NEUTRAL_CDL: &str = r#"
            <cdl:SOPNode>
                <cdl:Slope>1 1 1</cdl:Slope>
                <cdl:Offset>0 0 0</cdl:Offset>
                <cdl:Power>1 1 1</cdl:Power>
            </cdl:SOPNode>
            <cdl:SatNode>
                <cdl:Saturation>1</cdl:Saturation>
            </cdl:SatNode>"#;

#[test]
fn example_amf_compiles() {
    let (config, info) = compile(fixture("example.amf")).expect("compile example.amf");

    assert_eq!(info.clip_identifier, "A001_C002_210318");
    assert_eq!(info.input_colorspace, "S-Log3 Venice S-Gamut3");
    assert_eq!(info.display_name, "Rec.709 - Display");
    assert_eq!(info.view_name, "ACES 1.0 - SDR Video");
    assert_eq!(info.looks_applied, 1);

    // The output was not marked applied, so the clip still carries its
    // camera encoding.
    assert_eq!(info.clip_colorspace, "S-Log3 Venice S-Gamut3");

    // The camera encoding registers its linearized counterpart too.
    assert!(config.colorspace("Linear Venice S-Gamut3").is_some());

    // The looks got deterministic clip-derived names.
    assert!(config.looks().get("AMF Look 1 (Applied) -- A001_C002_210318").is_some());
    assert!(config.looks().get("AMF Look 2 -- A001_C002_210318").is_some());

    // No working-location marker: no clip-to-working-space transform.
    assert!(config.named_transform(CLIP_TO_WORKING_TRANSFORM).is_none());

    let issues = validate::check(&config);
    assert!(!validate::has_errors(&issues), "{issues:?}");
}

#[test]
fn example_amf_unapplied_look_transform() {
    let (config, _) = compile(fixture("example.amf")).expect("compile example.amf");

    let nt = config
        .named_transform("AMF Unapplied Look Transforms -- A001_C002_210318")
        .expect("combined unapplied transform");

    // Only the unapplied CDL look is chained; the applied reference look
    // is excluded.
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group transform");
    };
    assert_eq!(group.transforms.len(), 1);
    let Transform::Look(look) = &group.transforms[0] else {
        panic!("expected look transform");
    };
    assert_eq!(look.looks, "AMF Look 2 -- A001_C002_210318");
    assert!(!look.looks.contains("(Applied)"));

    // The context variable points at the combined transform.
    assert_eq!(
        config.context().get(CONTEXT_VAR),
        Some("AMF Unapplied Look Transforms -- A001_C002_210318")
    );
}

#[test]
fn example_amf_idempotent() {
    let path = fixture("example.amf");
    let (a, _) = compile(&path).expect("first compile");
    let (b, _) = compile(&path).expect("second compile");

    let names = |c: &Config| -> Vec<String> {
        c.colorspace_names().map(String::from).collect()
    };
    assert_eq!(names(&a), names(&b));

    let looks = |c: &Config| -> Vec<String> { c.looks().names().map(String::from).collect() };
    assert_eq!(looks(&a), looks(&b));

    let nts = |c: &Config| -> Vec<String> {
        c.named_transforms().iter().map(|nt| nt.name.clone()).collect()
    };
    assert_eq!(nts(&a), nts(&b));

    let roles = |c: &Config| -> Vec<(String, String)> {
        c.roles().iter().map(|(r, cs)| (r.into(), cs.into())).collect()
    };
    assert_eq!(roles(&a), roles(&b));
}

#[test]
fn wlook_amf_tie_resolves_forward() {
    let (config, info) = compile(fixture("slogtopq_wlook.amf")).expect("compile wlook");

    // One look applied, marker after one look: a tie, which composes
    // forward.
    assert_eq!(info.looks_applied, 1);

    let nt = config
        .named_transform(CLIP_TO_WORKING_TRANSFORM)
        .expect("clip-to-working-space transform");
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group transform");
    };
    assert!(!group.transforms.is_empty());

    // Forward starts from the input encoding relabelled into the
    // interchange space; the pre-marker look was already applied, so
    // nothing else is chained.
    assert_eq!(group.transforms.len(), 1);
    let Transform::ColorSpace(cst) = &group.transforms[0] else {
        panic!("expected color space transform");
    };
    assert_eq!(cst.src, "S-Log3 S-Gamut3");
    assert_eq!(cst.dst, ACES);
    assert!(cst.data_bypass);

    let issues = validate::check(&config);
    assert!(!validate::has_errors(&issues), "{issues:?}");
}

#[test]
fn working_location_forward_chains_unapplied_looks() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "forward.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:inputTransform>
            <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3.a1.v1</aces:transformId>
        </aces:inputTransform>
        <aces:lookTransform>{NEUTRAL_CDL}
        </aces:lookTransform>
        <aces:workingLocation/>
    </aces:pipeline>"#
        ),
    );

    let (config, info) = compile(&path).expect("compile");
    assert_eq!(info.looks_applied, 0);

    let nt = config.named_transform(CLIP_TO_WORKING_TRANSFORM).expect("named transform");
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group");
    };
    assert_eq!(group.transforms.len(), 2);
    assert!(matches!(&group.transforms[0], Transform::ColorSpace(c) if c.data_bypass));
    let Transform::Look(look) = &group.transforms[1] else {
        panic!("expected look transform");
    };
    assert_eq!(look.looks, "AMF Look 1 -- forward");
    assert_eq!(look.direction, TransformDirection::Forward);
}

#[test]
fn working_location_backward_after_applied_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "backward.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:inputTransform>
            <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3.a1.v1</aces:transformId>
        </aces:inputTransform>
        <aces:lookTransform applied="true">{NEUTRAL_CDL}
        </aces:lookTransform>
        <aces:workingLocation/>
        <aces:outputTransform applied="true">
            <aces:transformId>urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3</aces:transformId>
        </aces:outputTransform>
    </aces:pipeline>"#
        ),
    );

    let (config, info) = compile(&path).expect("compile");

    // Output applied: the clip lives in the display space.
    assert_eq!(info.clip_colorspace, "Rec.709 - Display");

    let nt = config.named_transform(CLIP_TO_WORKING_TRANSFORM).expect("named transform");
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group");
    };
    assert_eq!(group.transforms.len(), 2);

    let Transform::DisplayView(dvt) = &group.transforms[0] else {
        panic!("expected inverse display/view transform");
    };
    assert_eq!(dvt.display, "Rec.709 - Display");
    assert_eq!(dvt.view, "ACES 1.0 - SDR Video");
    assert_eq!(dvt.direction, TransformDirection::Inverse);

    let Transform::Look(look) = &group.transforms[1] else {
        panic!("expected look transform");
    };
    assert_eq!(look.looks, "AMF Look 1 (Applied) -- backward");
    assert_eq!(look.direction, TransformDirection::Inverse);
}

#[test]
fn working_location_empty_chain_substitutes_identity() {
    let dir = tempfile::tempdir().unwrap();
    // Marker before any look, one applied look after it: more looks
    // applied than the marker count composes backward, but there is no
    // applied output and no pre-marker look to invert.
    let path = write_amf(
        &dir,
        "identity.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:workingLocation/>
        <aces:lookTransform applied="true">{NEUTRAL_CDL}
        </aces:lookTransform>
    </aces:pipeline>"#
        ),
    );

    let (config, _) = compile(&path).expect("compile");

    let nt = config.named_transform(CLIP_TO_WORKING_TRANSFORM).expect("named transform");
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group");
    };
    assert_eq!(group.transforms.len(), 1);
    assert!(matches!(&group.transforms[0], Transform::Matrix(_)));
}

#[test]
fn input_without_output_registers_raw_display() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "input_only.amf",
        r#"    <aces:pipeline>
        <aces:inputTransform>
            <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.ARRI.Alexa-v3-logC-EI800.a1.v2</aces:transformId>
        </aces:inputTransform>
    </aces:pipeline>"#,
    );

    let (config, info) = compile(&path).expect("compile");

    assert_eq!(info.input_colorspace, "ARRI LogC3 (EI800)");
    assert!(config.colorspace("Linear ARRI Wide Gamut 3").is_some());

    let display = config.displays().display("Raw").expect("raw display");
    assert!(display.has_view("Raw"));
    assert_eq!(info.display_name, "Raw");

    let issues = validate::check(&config);
    assert!(!validate::has_errors(&issues), "{issues:?}");
}

#[test]
fn absent_input_falls_back_to_interchange() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(&dir, "no_input.amf", "    <aces:pipeline>\n    </aces:pipeline>");

    let (config, info) = compile(&path).expect("compile");
    assert_eq!(info.input_colorspace, ACES);
    assert_eq!(info.clip_colorspace, ACES);

    let issues = validate::check(&config);
    assert!(!validate::has_errors(&issues), "{issues:?}");
}

#[test]
fn unresolved_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "bad_input.amf",
        r#"    <aces:pipeline>
        <aces:inputTransform>
            <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.Nobody.Unknown.a1.v1</aces:transformId>
        </aces:inputTransform>
    </aces:pipeline>"#,
    );

    match compile(&path) {
        Err(AmfError::UnresolvedInput { .. }) => {}
        other => panic!("expected UnresolvedInput, got {other:?}"),
    }
}

#[test]
fn inverse_device_transform_becomes_input_space() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "ondisplay.amf",
        r#"    <aces:pipeline>
        <aces:inputTransform>
            <aces:inverseOutputDeviceTransform>
                <aces:transformId>urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3</aces:transformId>
            </aces:inverseOutputDeviceTransform>
        </aces:inputTransform>
    </aces:pipeline>"#,
    );

    let (config, info) = compile(&path).expect("compile");

    assert_eq!(info.input_colorspace, "AMF Input Transform -- ondisplay");
    let cs = config.colorspace("AMF Input Transform -- ondisplay").expect("input space");
    assert!(cs.has_category("file-io"));

    let Some(Transform::DisplayView(dvt)) = cs.to_reference() else {
        panic!("expected display/view transform");
    };
    assert_eq!(dvt.display, "Rec.709 - Display");
    assert_eq!(dvt.direction, TransformDirection::Inverse);
    assert!(dvt.looks_bypass);

    // The display/view pair itself was registered through a shared view.
    let display = config.displays().display("Rec.709 - Display").expect("display");
    assert!(display.has_view("ACES 1.0 - SDR Video"));
    assert!(config.displays().shared_view("ACES 1.0 - SDR Video").is_some());
}

#[test]
fn output_lut_file_becomes_display_view() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("odt.cube"), "LUT_3D_SIZE 2\n").unwrap();
    let path = write_amf(
        &dir,
        "lutout.amf",
        r#"    <aces:pipeline>
        <aces:outputTransform>
            <aces:description>Calibrated Theater</aces:description>
            <aces:file>odt.cube</aces:file>
        </aces:outputTransform>
    </aces:pipeline>"#,
    );

    let (config, info) = compile(&path).expect("compile");

    assert_eq!(info.display_name, "Calibrated Theater");
    assert_eq!(info.view_name, "AMF Output Transform LUT -- lutout");

    let cs = config
        .colorspace("AMF Output Transform LUT -- lutout")
        .expect("lut display space");
    let Some(Transform::File(ft)) = cs.from_reference() else {
        panic!("expected file transform");
    };
    assert_eq!(ft.src, dir.path().join("odt.cube"));
    assert_eq!(ft.direction, TransformDirection::Forward);

    assert!(config
        .inactive_colorspaces()
        .iter()
        .any(|n| n == "AMF Output Transform LUT -- lutout"));
}

#[test]
fn nested_device_block_chains_rrt_and_odt() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("odt.cube"), "LUT_3D_SIZE 2\n").unwrap();
    fs::write(dir.path().join("rrt.cube"), "LUT_3D_SIZE 2\n").unwrap();
    let path = write_amf(
        &dir,
        "device.amf",
        r#"    <aces:pipeline>
        <aces:outputTransform>
            <aces:outputDeviceTransform>
                <aces:description>Theater P3</aces:description>
                <aces:file>odt.cube</aces:file>
            </aces:outputDeviceTransform>
            <aces:referenceRenderingTransform>
                <aces:file>rrt.cube</aces:file>
            </aces:referenceRenderingTransform>
        </aces:outputTransform>
    </aces:pipeline>"#,
    );

    let (config, info) = compile(&path).expect("compile");
    assert_eq!(info.display_name, "Theater P3");

    let cs = config
        .colorspace("AMF Output Transform LUT -- device")
        .expect("lut display space");
    let Some(Transform::Group(group)) = cs.from_reference() else {
        panic!("expected group transform");
    };
    assert_eq!(group.transforms.len(), 2);
    let Transform::File(rrt) = &group.transforms[0] else {
        panic!("expected rrt file transform");
    };
    assert_eq!(rrt.src, dir.path().join("rrt.cube"));
    let Transform::File(odt) = &group.transforms[1] else {
        panic!("expected odt file transform");
    };
    assert_eq!(odt.src, dir.path().join("odt.cube"));
}

#[test]
fn look_lut_resolves_relative_to_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("look.cube"), "LUT_3D_SIZE 2\n").unwrap();
    let path = write_amf(
        &dir,
        "lutlook.amf",
        r#"    <aces:pipeline>
        <aces:lookTransform>
            <aces:description>Shot grade</aces:description>
            <aces:file>look.cube</aces:file>
            <cdl:ColorCorrectionRef>cc01</cdl:ColorCorrectionRef>
        </aces:lookTransform>
    </aces:pipeline>"#,
    );

    let (config, _) = compile(&path).expect("compile");

    let look = config.looks().get("AMF Look 1 -- lutlook").expect("lut look");
    assert_eq!(look.get_description(), "Shot grade (cc01)");

    let Some(Transform::File(ft)) = look.get_transform() else {
        panic!("expected file transform");
    };
    // The document said only "look.cube"; resolution accepted the
    // document-relative path.
    assert_eq!(ft.src, dir.path().join("look.cube"));
    assert_eq!(ft.ccc_id.as_deref(), Some("cc01"));
}

#[test]
fn missing_look_lut_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "missing.amf",
        r#"    <aces:pipeline>
        <aces:lookTransform>
            <aces:file>nowhere.cube</aces:file>
        </aces:lookTransform>
    </aces:pipeline>"#,
    );

    match compile(&path) {
        Err(AmfError::MissingFile { path, .. }) => {
            assert_eq!(path, PathBuf::from("nowhere.cube"));
        }
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn neutral_cdl_is_captured_as_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "neutral.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:lookTransform>{NEUTRAL_CDL}
        </aces:lookTransform>
    </aces:pipeline>"#
        ),
    );

    let (config, _) = compile(&path).expect("compile");

    let look = config.looks().get("AMF Look 1 -- neutral").expect("cdl look");
    assert_eq!(look.get_description(), "ASC CDL");
    let Some(Transform::Group(group)) = look.get_transform() else {
        panic!("expected group transform");
    };
    assert_eq!(group.transforms.len(), 1);
    let Transform::Cdl(cdl) = &group.transforms[0] else {
        panic!("expected cdl transform");
    };
    assert!(cdl.is_noop());
}

#[test]
fn cdl_working_space_wraps_symmetrically() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "cdlws.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:lookTransform>{NEUTRAL_CDL}
            <aces:cdlWorkingSpace>
                <aces:toCdlWorkingSpace>
                    <aces:transformId>urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScct_to_ACES.a1.0.3</aces:transformId>
                </aces:toCdlWorkingSpace>
            </aces:cdlWorkingSpace>
        </aces:lookTransform>
    </aces:pipeline>"#
        ),
    );

    let (config, _) = compile(&path).expect("compile");

    let look = config.looks().get("AMF Look 1 -- cdlws").expect("cdl look");
    let Some(Transform::Group(group)) = look.get_transform() else {
        panic!("expected group transform");
    };
    // Only the "to" side was given: it is mirrored in inverse after the
    // CDL, leaving no net color space change.
    assert_eq!(group.transforms.len(), 3);
    let Transform::ColorSpace(to) = &group.transforms[0] else {
        panic!("expected to-working-space conversion");
    };
    assert_eq!(to.src, ACES);
    assert_eq!(to.dst, "ACEScct");
    assert_eq!(to.direction, TransformDirection::Forward);
    assert!(matches!(&group.transforms[1], Transform::Cdl(_)));
    let Transform::ColorSpace(back) = &group.transforms[2] else {
        panic!("expected mirrored conversion");
    };
    assert_eq!(back.direction, TransformDirection::Inverse);
}

#[test]
fn applied_marker_in_names_and_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "markers.amf",
        &format!(
            r#"    <aces:pipeline>
        <aces:lookTransform applied="true">{NEUTRAL_CDL}
        </aces:lookTransform>
        <aces:lookTransform applied="not-even-close">{NEUTRAL_CDL}
        </aces:lookTransform>
    </aces:pipeline>"#
        ),
    );

    let (config, info) = compile(&path).expect("compile");
    assert_eq!(info.looks_applied, 1);

    assert!(config.looks().get("AMF Look 1 (Applied) -- markers").is_some());
    // Anything but "true" means the look still must be applied.
    assert!(config.looks().get("AMF Look 2 -- markers").is_some());

    let nt = config
        .named_transform("AMF Unapplied Look Transforms -- markers")
        .expect("combined transform");
    let Some(Transform::Group(group)) = &nt.forward else {
        panic!("expected group");
    };
    assert_eq!(group.transforms.len(), 1);
    assert!(matches!(&group.transforms[0], Transform::Look(l) if l.looks.contains("AMF Look 2")));
}

#[test]
fn skipped_look_not_counted_or_registered() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "skipped.amf",
        r#"    <aces:pipeline>
        <aces:lookTransform applied="true">
            <aces:transformId>urn:ampas:aces:transformId:v1.5:LMT.Nobody.Unknown.a1.v1</aces:transformId>
        </aces:lookTransform>
    </aces:pipeline>"#,
    );

    let (config, info) = compile(&path).expect("compile");
    assert_eq!(info.looks_applied, 0);
    assert!(config.looks().get("AMF Look 1 (Applied) -- skipped").is_none());
    assert!(config
        .named_transform("AMF Unapplied Look Transforms -- skipped")
        .is_none());
}

#[test]
fn clip_role_is_sanitized_and_resolvable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(
        &dir,
        "roles.amf",
        r#"    <aces:clipId>
        <aces:clipName>A001 C002.mxf (graded)</aces:clipName>
    </aces:clipId>
    <aces:pipeline>
        <aces:inputTransform>
            <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.Sony.SLog3_SGamut3.a1.v1</aces:transformId>
        </aces:inputTransform>
    </aces:pipeline>"#,
    );

    let (config, _) = compile(&path).expect("compile");

    let role = "amf_clip_A001_C002_mxf__graded_";
    let target = config.roles().get(role).expect("clip role");
    assert!(role.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    assert!(config.colorspace(target).is_some());
}

#[test]
fn clip_identifier_falls_back_to_uuid_then_stem() {
    let dir = tempfile::tempdir().unwrap();

    let path = write_amf(
        &dir,
        "uuid_only.amf",
        r#"    <aces:clipId>
        <aces:uuid>urn:uuid:deadbeef</aces:uuid>
    </aces:clipId>
    <aces:pipeline>
    </aces:pipeline>"#,
    );
    let (_, info) = compile(&path).expect("compile");
    assert_eq!(info.clip_identifier, "urn:uuid:deadbeef");

    let path = write_amf(&dir, "bare.amf", "    <aces:pipeline>\n    </aces:pipeline>");
    let (_, info) = compile(&path).expect("compile");
    assert_eq!(info.clip_identifier, "bare");
}

#[test]
fn outdated_reference_config_is_rejected() {
    let mut reference = Config::raw();
    reference.set_version(2, 2);

    match compile_with_reference("does-not-matter.amf", &reference) {
        Err(AmfError::UnsupportedReferenceVersion { version }) => {
            assert_eq!(version, "2.2");
        }
        other => panic!("expected UnsupportedReferenceVersion, got {other:?}"),
    }
}

#[test]
fn reference_without_interchange_space_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_amf(&dir, "any.amf", "    <aces:pipeline>\n    </aces:pipeline>");

    let reference = Config::raw();
    match compile_with_reference(&path, &reference) {
        Err(AmfError::MissingReferenceColorSpace { name }) => {
            assert_eq!(name, ACES);
        }
        other => panic!("expected MissingReferenceColorSpace, got {other:?}"),
    }
}

#[test]
fn malformed_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.amf");
    fs::write(&path, "<aces:acesMetadataFile>\n<aces:pipeline>\n</wrong>\n").unwrap();

    match compile(&path) {
        Err(AmfError::MalformedXml { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected MalformedXml, got {other:?}"),
    }
}
