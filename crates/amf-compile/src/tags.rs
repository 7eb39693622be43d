//! AMF element and attribute vocabulary.
//!
//! Tag comparison is ASCII case-insensitive throughout; the constants keep
//! the canonical spelling from the AMF schema.

pub(crate) const TAG_CLIP_ID: &str = "aces:clipId";
pub(crate) const TAG_CLIP_NAME: &str = "aces:clipName";
pub(crate) const TAG_UUID: &str = "aces:uuid";
pub(crate) const TAG_DESCRIPTION: &str = "aces:description";

pub(crate) const TAG_PIPELINE: &str = "aces:pipeline";
pub(crate) const TAG_WORKING_LOCATION: &str = "aces:workingLocation";

pub(crate) const TAG_INPUT_TRANSFORM: &str = "aces:inputTransform";
pub(crate) const TAG_OUTPUT_TRANSFORM: &str = "aces:outputTransform";
pub(crate) const TAG_LOOK_TRANSFORM: &str = "aces:lookTransform";

pub(crate) const TAG_TRANSFORM_ID: &str = "aces:transformId";
pub(crate) const TAG_FILE: &str = "aces:file";
pub(crate) const TAG_CDL_CORRECTION_REF: &str = "cdl:ColorCorrectionRef";

pub(crate) const TAG_INVERSE_ODT: &str = "aces:inverseOutputDeviceTransform";
pub(crate) const TAG_INVERSE_RRT: &str = "aces:inverseReferenceRenderingTransform";
pub(crate) const TAG_ODT: &str = "aces:outputDeviceTransform";
pub(crate) const TAG_RRT: &str = "aces:referenceRenderingTransform";

pub(crate) const TAG_CDL_WORKING_SPACE: &str = "aces:cdlWorkingSpace";
pub(crate) const TAG_TO_CDL_WORKING_SPACE: &str = "aces:toCdlWorkingSpace";
pub(crate) const TAG_FROM_CDL_WORKING_SPACE: &str = "aces:fromCdlWorkingSpace";

pub(crate) const TAG_SOP_NODE: &str = "cdl:SOPNode";
pub(crate) const TAG_ASC_SOP: &str = "cdl:ASC_SOP";
pub(crate) const TAG_SLOPE: &str = "cdl:Slope";
pub(crate) const TAG_OFFSET: &str = "cdl:Offset";
pub(crate) const TAG_POWER: &str = "cdl:Power";
pub(crate) const TAG_SAT_NODE: &str = "cdl:SatNode";
pub(crate) const TAG_ASC_SAT: &str = "cdl:ASC_SAT";
pub(crate) const TAG_SATURATION: &str = "cdl:Saturation";

pub(crate) const ATTR_APPLIED: &str = "applied";

/// Case-insensitive tag/attribute name comparison.
#[inline]
pub(crate) fn tag_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Container elements inside a look section that carry no text of their
/// own; their occurrence is recorded as an empty-valued marker so that
/// later association stays purely positional.
pub(crate) fn is_look_container(tag: &str) -> bool {
    [
        TAG_SOP_NODE,
        TAG_ASC_SOP,
        TAG_SAT_NODE,
        TAG_ASC_SAT,
        TAG_CDL_WORKING_SPACE,
        TAG_TO_CDL_WORKING_SPACE,
        TAG_FROM_CDL_WORKING_SPACE,
    ]
    .iter()
    .any(|t| tag_eq(tag, t))
}
