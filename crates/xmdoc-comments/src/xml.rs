//! XML documentation file reader.
//!
//! Parses the `<doc><members><member name="...">` format emitted by
//! compilers into [`NarrativeBundle`]s keyed by documentation identifier.
//! Narrative whitespace is collapsed deterministically; inline markers
//! (`<see cref>`, `<paramref>`, `<c>`) survive as structured nodes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::narrative::{Inline, NarrativeBundle, Text, collapse_whitespace};
use crate::source::CommentSource;

/// Error reading or parsing documentation comment inputs.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// XML is malformed.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// XML attribute is malformed.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
    /// XML text could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    /// Source symbol map is not valid JSON.
    #[error("Malformed source symbols in {}: {source}", .path.display())]
    SymbolsParse {
        /// Symbols file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Comment source backed by a compiler-emitted XML documentation file.
pub struct XmlCommentSource {
    bundles: HashMap<String, NarrativeBundle>,
}

impl XmlCommentSource {
    /// Read and parse an XML documentation file.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CommentError> {
        let content = fs::read_to_string(path).map_err(|source| CommentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            member_count = source.len(),
            "Loaded XML documentation"
        );
        Ok(source)
    }

    /// Parse XML documentation from a string.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError`] if the XML is malformed.
    pub fn parse(xml: &str) -> Result<Self, CommentError> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.config_mut().trim_text(false);

        let mut bundles = HashMap::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"member" => {
                    let id = attr(&e, "name")?;
                    let bundle = parse_member(&mut reader)?;
                    if let Some(id) = id {
                        bundles.insert(id, bundle);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { bundles })
    }

    /// Number of members with comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// True when the file declared no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl CommentSource for XmlCommentSource {
    fn lookup(&self, id: &str) -> Option<NarrativeBundle> {
        self.bundles.get(id).cloned()
    }
}

/// Parse the sections of one `<member>` element.
fn parse_member(reader: &mut Reader<&[u8]>) -> Result<NarrativeBundle, CommentError> {
    let mut bundle = NarrativeBundle::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"summary" => bundle.summary = Some(parse_text(reader, "summary")?),
                b"remarks" => bundle.remarks = Some(parse_text(reader, "remarks")?),
                b"returns" => bundle.returns = Some(parse_text(reader, "returns")?),
                b"value" => bundle.returns = Some(parse_text(reader, "value")?),
                b"example" => bundle.example = Some(parse_text(reader, "example")?),
                b"param" => {
                    let name = attr(&e, "name")?.unwrap_or_default();
                    let text = parse_text(reader, "param")?;
                    bundle.params.push((name, text));
                }
                b"exception" => {
                    let cref = attr(&e, "cref")?.unwrap_or_default();
                    let text = parse_text(reader, "exception")?;
                    bundle.exceptions.push((strip_id_prefix(&cref), text));
                }
                other => {
                    // Unknown section (typeparam, seealso, ...): consume and drop.
                    let tag = String::from_utf8_lossy(other).into_owned();
                    let _ = parse_text(reader, &tag)?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"member" => return Ok(bundle),
            Event::Eof => return Ok(bundle),
            _ => {}
        }
        buf.clear();
    }
}

/// Parse mixed narrative content until the closing tag of `end_tag`.
fn parse_text(reader: &mut Reader<&[u8]>, end_tag: &str) -> Result<Text, CommentError> {
    let mut out: Text = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                push_text(&mut out, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                push_text(&mut out, &decode_entity(&entity));
            }
            Event::CData(e) => {
                push_text(&mut out, &String::from_utf8_lossy(&e));
            }
            Event::Start(e) => match e.local_name().as_ref() {
                b"c" | b"code" => {
                    let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    let code = read_verbatim(reader, &tag)?;
                    out.push(Inline::Code(collapse_whitespace(&code)));
                }
                b"see" => {
                    if let Some(cref) = attr(&e, "cref")? {
                        out.push(Inline::See { cref });
                    }
                    // Inner label text, if any, flows through as plain text.
                }
                // <para> and other formatting elements are transparent.
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"see" => {
                    if let Some(cref) = attr(&e, "cref")? {
                        out.push(Inline::See { cref });
                    }
                }
                b"paramref" => {
                    if let Some(name) = attr(&e, "name")? {
                        out.push(Inline::ParamRef(name));
                    }
                }
                _ => {}
            },
            Event::End(e) => {
                if e.local_name().as_ref() == end_tag.as_bytes() {
                    break;
                }
                // Closing a transparent element: paragraph boundary.
                if e.local_name().as_ref() == b"para" {
                    push_text(&mut out, " ");
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    finalize_text(&mut out);
    Ok(out)
}

/// Read raw character content until the closing tag, no inline parsing.
fn read_verbatim(reader: &mut Reader<&[u8]>, end_tag: &str) -> Result<String, CommentError> {
    let mut raw = String::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => raw.push_str(&reader.decoder().decode(&e)?),
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                raw.push_str(&decode_entity(&entity));
            }
            Event::CData(e) => raw.push_str(&String::from_utf8_lossy(&e)),
            Event::End(e) if e.local_name().as_ref() == end_tag.as_bytes() => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(raw)
}

/// Append raw text, collapsing whitespace runs and merging adjacent nodes.
fn push_text(out: &mut Text, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let mut collapsed = String::with_capacity(raw.len());
    let mut prev_ws = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !prev_ws {
                collapsed.push(' ');
            }
            prev_ws = true;
        } else {
            collapsed.push(ch);
            prev_ws = false;
        }
    }

    if let Some(Inline::Text(last)) = out.last_mut() {
        if last.ends_with(' ') && collapsed.starts_with(' ') {
            last.push_str(collapsed.trim_start());
        } else {
            last.push_str(&collapsed);
        }
    } else {
        out.push(Inline::Text(collapsed));
    }
}

/// Trim the section edges and drop empty text nodes.
fn finalize_text(out: &mut Text) {
    if let Some(Inline::Text(first)) = out.first_mut() {
        *first = first.trim_start().to_owned();
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        *last = last.trim_end().to_owned();
    }
    out.retain(|node| !matches!(node, Inline::Text(t) if t.is_empty()));
}

/// Strip a single-letter documentation identifier prefix (`T:`, `M:`, ...).
fn strip_id_prefix(cref: &str) -> String {
    match cref.split_once(':') {
        Some((prefix, rest)) if prefix.len() == 1 => rest.to_owned(),
        _ => cref.to_owned(),
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}

/// Extract an attribute value by local name.
fn attr(e: &BytesStart, name: &str) -> Result<Option<String>, CommentError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            return Ok(Some(value));
        }
    }
    Ok(None)
}
