//! XML element router.
//!
//! A push-based state machine that classifies every start/end tag of an AMF
//! document into exactly one active structural section, with no lookahead,
//! and forwards character data to the correct capture record. The router is
//! fed by a thin adapter around the streaming XML tokenizer.
//!
//! Section nesting is enforced here, not by the tokenizer: at most one of
//! clip-id/input/output/look is active at any point, plus an outer
//! "pipeline" region flag. Elements outside the pipeline region (besides
//! the clip id) are ignored.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::capture::{IoSection, NestedRoot, Section};
use crate::error::{AmfError, AmfResult};
use crate::tags::*;

/// Transient per-compilation parse state plus the capture records it owns.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    /// Clip identity section, if the document had one.
    pub clip_id: Option<Section>,
    /// Input transform section, if the document had one.
    pub input: Option<IoSection>,
    /// Output transform section, if the document had one.
    pub output: Option<IoSection>,
    /// Look transform sections in document order.
    pub looks: Vec<Section>,
    /// Number of look records seen before the working-location marker.
    pub looks_before_marker: Option<usize>,

    in_clip_id: bool,
    in_pipeline: bool,
    in_input: bool,
    in_output: bool,
    in_look: bool,
    /// Element currently accepting character data.
    current_element: Option<String>,
    /// Open transform roots inside the input/output section; the bottom
    /// entry is the section root itself.
    nesting: Vec<String>,
}

fn nested_root(tag: &str) -> Option<NestedRoot> {
    if tag_eq(tag, TAG_INVERSE_ODT) {
        Some(NestedRoot::InverseOutputDevice)
    } else if tag_eq(tag, TAG_INVERSE_RRT) {
        Some(NestedRoot::InverseReferenceRendering)
    } else if tag_eq(tag, TAG_ODT) {
        Some(NestedRoot::OutputDevice)
    } else if tag_eq(tag, TAG_RRT) {
        Some(NestedRoot::ReferenceRendering)
    } else {
        None
    }
}

impl ParseContext {
    /// Creates an empty context for one compilation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a start tag with its attributes.
    pub fn on_start(
        &mut self,
        tag: &str,
        attrs: &[(String, String)],
        line: u32,
    ) -> AmfResult<()> {
        if tag.is_empty() {
            return Err(AmfError::MalformedXml {
                message: "empty element name".into(),
                line,
            });
        }

        if tag_eq(tag, TAG_CLIP_ID) {
            self.in_clip_id = true;
            self.clip_id = Some(Section::with_attributes(attrs));
            return Ok(());
        }
        if self.in_clip_id {
            self.current_element = Some(tag.to_string());
            return Ok(());
        }

        if tag_eq(tag, TAG_PIPELINE) {
            self.in_pipeline = true;
            return Ok(());
        }
        if !self.in_pipeline {
            return Ok(());
        }

        if tag_eq(tag, TAG_INPUT_TRANSFORM) {
            self.in_input = true;
            self.input = Some(IoSection::with_attributes(attrs));
            self.nesting = vec![tag.to_string()];
            return Ok(());
        }
        if self.in_input {
            self.current_element = Some(tag.to_string());
            if tag_eq(tag, TAG_INVERSE_ODT) || tag_eq(tag, TAG_INVERSE_RRT) {
                self.nesting.push(tag.to_string());
            }
            return Ok(());
        }

        if tag_eq(tag, TAG_OUTPUT_TRANSFORM) {
            self.in_output = true;
            self.output = Some(IoSection::with_attributes(attrs));
            self.nesting = vec![tag.to_string()];
            return Ok(());
        }
        if self.in_output {
            self.current_element = Some(tag.to_string());
            if tag_eq(tag, TAG_ODT) || tag_eq(tag, TAG_RRT) {
                self.nesting.push(tag.to_string());
            }
            return Ok(());
        }

        if tag_eq(tag, TAG_LOOK_TRANSFORM) {
            self.in_look = true;
            self.looks.push(Section::with_attributes(attrs));
            return Ok(());
        }
        if self.in_look {
            self.current_element = Some(tag.to_string());
            if is_look_container(tag) {
                if let Some(look) = self.looks.last_mut() {
                    look.push_sub_element(tag, "");
                }
            }
            return Ok(());
        }

        // Directly inside the pipeline region, between sections.
        if tag_eq(tag, TAG_WORKING_LOCATION) && self.looks_before_marker.is_none() {
            self.looks_before_marker = Some(self.looks.len());
        }

        Ok(())
    }

    /// Handles an end tag.
    pub fn on_end(&mut self, tag: &str, line: u32) -> AmfResult<()> {
        if tag.is_empty() {
            return Err(AmfError::MalformedXml {
                message: "empty element name".into(),
                line,
            });
        }

        if tag_eq(tag, TAG_CLIP_ID) {
            self.in_clip_id = false;
            return Ok(());
        }
        if self.in_clip_id {
            self.current_element = None;
            return Ok(());
        }

        if self.in_input {
            if tag_eq(tag, TAG_INPUT_TRANSFORM) {
                self.in_input = false;
                self.nesting.clear();
            } else {
                self.current_element = None;
                if tag_eq(tag, TAG_INVERSE_ODT) || tag_eq(tag, TAG_INVERSE_RRT) {
                    self.nesting.pop();
                }
            }
            return Ok(());
        }

        if self.in_output {
            if tag_eq(tag, TAG_OUTPUT_TRANSFORM) {
                self.in_output = false;
                self.nesting.clear();
            } else {
                self.current_element = None;
                if tag_eq(tag, TAG_ODT) || tag_eq(tag, TAG_RRT) {
                    self.nesting.pop();
                }
            }
            return Ok(());
        }

        if self.in_look {
            if tag_eq(tag, TAG_LOOK_TRANSFORM) {
                self.in_look = false;
            } else {
                self.current_element = None;
            }
            return Ok(());
        }

        if tag_eq(tag, TAG_PIPELINE) {
            self.in_pipeline = false;
        }

        Ok(())
    }

    /// Handles character data.
    ///
    /// Empty content is a fatal parse error; whitespace-only runs are
    /// artifacts of line-oriented feeding and are silently ignored.
    pub fn on_text(&mut self, text: &str, line: u32) -> AmfResult<()> {
        if text.is_empty() {
            return Err(AmfError::InvalidCharacterData { line });
        }
        if text.chars().all(char::is_whitespace) {
            return Ok(());
        }

        let Some(current) = self.current_element.clone() else {
            return Ok(());
        };

        if self.in_input {
            if let Some(section) = self.input.as_mut() {
                match self.nesting.last() {
                    Some(top) if tag_eq(top, TAG_INPUT_TRANSFORM) => {
                        section.push_direct(current, text);
                    }
                    Some(top) => {
                        if let Some(root) = nested_root(top) {
                            section.push_nested(root, current, text);
                        }
                    }
                    None => {}
                }
            }
        } else if self.in_output {
            if let Some(section) = self.output.as_mut() {
                match self.nesting.last() {
                    Some(top) if tag_eq(top, TAG_OUTPUT_TRANSFORM) => {
                        section.push_direct(current, text);
                    }
                    Some(top) => {
                        if let Some(root) = nested_root(top) {
                            section.push_nested(root, current, text);
                        }
                    }
                    None => {}
                }
            }
        } else if self.in_look {
            if let Some(look) = self.looks.last_mut() {
                look.push_sub_element(current, text);
            }
        } else if self.in_clip_id {
            if let Some(clip) = self.clip_id.as_mut() {
                clip.push_sub_element(current, text);
            }
        }

        Ok(())
    }
}

/// Drives the XML tokenizer over a whole document, feeding the router.
///
/// Returns the final 1-based line number (used for post-parse diagnostics).
/// Line numbers are derived from the tokenizer's byte position over the
/// in-memory document.
pub(crate) fn parse_document(text: &str, ctx: &mut ParseContext) -> AmfResult<u32> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let bytes = text.as_bytes();
    let mut line: u32 = 1;
    let mut last_pos: usize = 0;

    loop {
        let event = reader.read_event();

        let pos = (reader.buffer_position() as usize).min(bytes.len());
        line += bytes[last_pos..pos].iter().filter(|&&b| b == b'\n').count() as u32;
        last_pos = pos;

        match event {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let attrs = collect_attributes(&e);
                ctx.on_start(&name, &attrs, line)?;
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let attrs = collect_attributes(&e);
                ctx.on_start(&name, &attrs, line)?;
                ctx.on_end(&name, line)?;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                ctx.on_end(&name, line)?;
            }
            Ok(Event::Text(e)) => {
                let data = e
                    .decode()
                    .map_err(|_| AmfError::InvalidCharacterData { line })?;
                ctx.on_text(&data, line)?;
            }
            Ok(Event::CData(e)) => {
                let data = String::from_utf8_lossy(&e).to_string();
                ctx.on_text(&data, line)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AmfError::MalformedXml {
                    message: e.to_string(),
                    line,
                });
            }
        }
    }

    Ok(line)
}

fn collect_attributes(e: &quick_xml::events::BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).to_string(),
                String::from_utf8_lossy(&a.value).to_string(),
            )
        })
        .collect()
}
