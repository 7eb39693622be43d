//! Working-location resolution.
//!
//! An AMF pipeline may carry a marker stating where, between its looks, the
//! clip currently "lives". From where looks were marked applied and where
//! the marker fell, this pass determines the direction (forward or
//! backward) and the transforms that compose a single clip-to-working-space
//! named transform, so consumers can bring the clip to the marked pipeline
//! stage in one step.

use amf_config::{
    ColorSpaceTransform, Config, DisplayViewTransform, LookTransform, NamedTransform, Transform,
    TransformDirection,
};

use crate::assemble::ACES;
use crate::router::ParseContext;

/// Name of the synthesized clip-to-working-space named transform.
pub const CLIP_TO_WORKING_TRANSFORM: &str = "Clip to Working Space Transform";

/// Synthesizes the clip-to-working-space named transform. Runs only when
/// the document carried a working-location marker.
///
/// Direction rule: if the output was applied, backward; else fewer looks
/// applied than the marker's count means forward, more means backward, and
/// a tie resolves forward.
pub(crate) fn resolve_working_location(
    config: &mut Config,
    ctx: &ParseContext,
    look_results: &[Option<(String, bool)>],
    looks_applied: usize,
    input_colorspace: &str,
    clip_name: &str,
) {
    let Some(before) = ctx.looks_before_marker else {
        return;
    };
    let output_applied = ctx.output.as_ref().is_some_and(|s| s.applied());
    let backward = output_applied || looks_applied > before;

    let mut transforms = Vec::new();
    if backward {
        if output_applied {
            if let (Some(display), Some(view)) = (config.active_display(), config.active_view()) {
                transforms.push(Transform::DisplayView(DisplayViewTransform {
                    src: ACES.into(),
                    display: display.into(),
                    view: view.into(),
                    looks_bypass: true,
                    direction: TransformDirection::Inverse,
                }));
            }
        }
        for result in look_results.iter().take(before).rev() {
            if let Some((name, true)) = result.as_ref().map(|(n, a)| (n, *a)) {
                transforms.push(Transform::Look(LookTransform {
                    src: ACES.into(),
                    dst: ACES.into(),
                    looks: name.clone(),
                    skip_colorspace_conversion: false,
                    direction: TransformDirection::Inverse,
                }));
            }
        }
    } else {
        // A data relabel, not a photometric conversion: the clip is taken
        // into the interchange space as-is before the remaining looks.
        transforms.push(Transform::ColorSpace(ColorSpaceTransform {
            src: input_colorspace.into(),
            dst: ACES.into(),
            data_bypass: true,
            direction: TransformDirection::Forward,
        }));
        for result in look_results.iter().take(before) {
            if let Some((name, false)) = result.as_ref().map(|(n, a)| (n, *a)) {
                transforms.push(Transform::Look(LookTransform {
                    src: ACES.into(),
                    dst: ACES.into(),
                    looks: name.clone(),
                    skip_colorspace_conversion: false,
                    direction: TransformDirection::Forward,
                }));
            }
        }
    }

    if transforms.is_empty() {
        transforms.push(Transform::identity());
    }

    config.add_named_transform(
        NamedTransform::new(CLIP_TO_WORKING_TRANSFORM, Transform::group(transforms))
            .with_family(format!("AMF/{clip_name}")),
    );
}
