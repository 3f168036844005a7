//! Pull reader over a response body.
//!
//! ## Summary
//! Wraps `quick_xml::NsReader` and exposes the element-at-a-time view that
//! complex property dispatch consumes: the current element's resolved name,
//! its attributes, text values, and sub-tree skipping. Empty elements are
//! expanded so `<a/>` reads exactly like `<a></a>`.

mod element;
mod error;

use std::str::FromStr;

use base64::Engine;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

pub use element::{ElementName, XmlAttribute, XmlElement};
pub use error::{ParseError, ParseErrorKind, ParseResult};

enum Node {
    Start(XmlElement),
    End,
    Text(String),
    Eof,
}

/// Element-at-a-time reader over an in-memory XML document.
pub struct XmlReader<'a> {
    inner: NsReader<&'a [u8]>,
    buf: Vec<u8>,
    depth: usize,
}

impl<'a> XmlReader<'a> {
    /// Creates a reader positioned before the document's first node.
    #[must_use]
    pub fn new(xml: &'a [u8]) -> Self {
        let mut inner = NsReader::from_reader(xml);
        let config = inner.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(false);

        Self {
            inner,
            buf: Vec::new(),
            depth: 0,
        }
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Advances to the document element, which must have the given local name.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed, empty, or starts with a
    /// different element.
    pub fn read_start_element(&mut self, local_name: &str) -> ParseResult<XmlElement> {
        loop {
            match self.next_node()? {
                Node::Start(element) if element.local_name() == local_name => return Ok(element),
                Node::Start(element) => {
                    return Err(ParseError::unexpected_element(
                        local_name,
                        element.local_name(),
                    ));
                }
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) => {
                    return Err(ParseError::xml("text content before the document element"));
                }
                Node::End => return Err(ParseError::xml("unbalanced end tag")),
                Node::Eof => return Err(ParseError::missing_element(local_name)),
            }
        }
    }

    /// Advances to the next element with the given local name at any depth.
    ///
    /// Returns `None` once the document is exhausted. Enclosing elements are
    /// entered rather than skipped, so this finds a payload element inside
    /// whatever wrapper the server put around it.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed.
    pub fn read_to_descendant(&mut self, local_name: &str) -> ParseResult<Option<XmlElement>> {
        loop {
            match self.next_node()? {
                Node::Start(element) if element.local_name() == local_name => {
                    return Ok(Some(element));
                }
                Node::Start(_) | Node::End | Node::Text(_) => {}
                Node::Eof => return Ok(None),
            }
        }
    }

    /// Returns the next child element of the element most recently opened.
    ///
    /// Returns `None` after consuming the parent's end tag. Stray text
    /// between child elements is ignored.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or ends early.
    pub fn next_child(&mut self) -> ParseResult<Option<XmlElement>> {
        loop {
            match self.next_node()? {
                Node::Start(element) => return Ok(Some(element)),
                Node::End => return Ok(None),
                Node::Text(text) => {
                    if !text.trim().is_empty() {
                        tracing::trace!(text = %text, "Ignoring text between child elements");
                    }
                }
                Node::Eof => return Err(ParseError::unexpected_eof("element content")),
            }
        }
    }

    /// Reads the text content of `element` and consumes its end tag.
    ///
    /// ## Errors
    /// Returns an error if the element contains child elements or the
    /// document ends before it closes.
    pub fn read_element_value(&mut self, element: &XmlElement) -> ParseResult<String> {
        let mut value = String::new();
        loop {
            match self.next_node()? {
                Node::Text(text) => value.push_str(&text),
                Node::End => return Ok(value),
                Node::Start(child) => {
                    return Err(ParseError::invalid_value(format!(
                        "unexpected child element {} in a text value",
                        child.local_name()
                    ))
                    .in_element(element.local_name()));
                }
                Node::Eof => {
                    return Err(
                        ParseError::unexpected_eof("a text value").in_element(element.local_name())
                    );
                }
            }
        }
    }

    /// Reads the text content of `element` and converts it with `FromStr`.
    ///
    /// Surrounding whitespace is ignored, as for any XML Schema simple type
    /// other than string.
    ///
    /// ## Errors
    /// Returns an invalid value error naming the element if conversion fails.
    pub fn read_value<T>(&mut self, element: &XmlElement) -> ParseResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let text = self.read_element_value(element)?;
        let trimmed = text.trim();
        trimmed.parse::<T>().map_err(|err| {
            ParseError::invalid_value(format!(
                "cannot convert {trimmed:?} to {}: {err}",
                std::any::type_name::<T>()
            ))
            .in_element(element.local_name())
        })
    }

    /// Reads an `xs:boolean` value (`true`, `false`, `1`, `0`).
    ///
    /// ## Errors
    /// Returns an invalid value error for any other lexical form.
    pub fn read_bool(&mut self, element: &XmlElement) -> ParseResult<bool> {
        let text = self.read_element_value(element)?;
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ParseError::invalid_value(format!("not a boolean: {other:?}"))
                .in_element(element.local_name())),
        }
    }

    /// Reads an `xs:base64Binary` value.
    ///
    /// ## Errors
    /// Returns an invalid value error if the content is not valid base64.
    pub fn read_base64(&mut self, element: &XmlElement) -> ParseResult<Vec<u8>> {
        let text = self.read_element_value(element)?;
        let compact: String = text.split_whitespace().collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|err| {
                ParseError::invalid_value(format!("invalid base64: {err}"))
                    .in_element(element.local_name())
            })
    }

    /// Consumes the rest of the element most recently opened, including its
    /// end tag and everything nested inside it.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or ends early.
    pub fn skip_element(&mut self) -> ParseResult<()> {
        let mut open = 1_usize;
        loop {
            match self.next_node()? {
                Node::Start(_) => open += 1,
                Node::End => {
                    open -= 1;
                    if open == 0 {
                        return Ok(());
                    }
                }
                Node::Text(_) => {}
                Node::Eof => return Err(ParseError::unexpected_eof("a skipped element")),
            }
        }
    }

    fn next_node(&mut self) -> ParseResult<Node> {
        loop {
            self.buf.clear();
            let (namespace, event) = {
                let (resolved, event) = self.inner.read_resolved_event_into(&mut self.buf)?;
                (namespace_uri(&resolved)?, event)
            };

            match event {
                Event::Start(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = std::str::from_utf8(local_name_bytes.as_ref())?.to_owned();
                    let attributes = read_attributes(&self.inner, e)?;
                    self.depth += 1;
                    return Ok(Node::Start(XmlElement::new(
                        ElementName::new(namespace, local_name),
                        attributes,
                    )));
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Node::End);
                }
                Event::Text(ref e) => {
                    let text = self.inner.decoder().decode(e.as_ref())?;
                    return Ok(Node::Text(text.into_owned()));
                }
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e.as_ref())?;
                    return Ok(Node::Text(text.to_owned()));
                }
                Event::GeneralRef(ref e) => {
                    if let Some(ch) = e.resolve_char_ref()? {
                        return Ok(Node::Text(ch.to_string()));
                    }
                    let name = e.decode()?;
                    return match quick_xml::escape::resolve_predefined_entity(&name) {
                        Some(value) => Ok(Node::Text(value.to_owned())),
                        None => Err(ParseError::xml(format!("unknown entity: &{name};"))),
                    };
                }
                Event::Eof => return Ok(Node::Eof),
                _ => {}
            }
        }
    }
}

fn namespace_uri(resolved: &ResolveResult<'_>) -> ParseResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::xml(format!(
            "undeclared namespace prefix: {}",
            String::from_utf8_lossy(prefix)
        ))),
    }
}

fn read_attributes(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> ParseResult<Vec<XmlAttribute>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }

        let (resolved, local) = reader.resolver().resolve_attribute(attr.key);
        let namespace = match resolved {
            ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_owned()),
            ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
        };
        let local_name = std::str::from_utf8(local.as_ref())?.to_owned();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();

        attributes.push(XmlAttribute {
            namespace,
            local_name,
            value,
        });
    }
    Ok(attributes)
}
