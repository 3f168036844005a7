//! Complex property dispatch.
//!
//! ## Summary
//! A complex property is decoded by offering each child element of its XML
//! element to a builder, one element at a time. Every builder handles the
//! element names it owns and hands anything else to the builder of the layer
//! it extends, ending at [`ComplexPropertyBase`], which claims nothing.
//! Elements no layer claims are skipped by [`load_elements`], so fields the
//! client does not know about never fail a parse, while a recognized field
//! with a malformed value always does.
//!
//! The finished value only comes into existence in [`ComplexProperty::build`],
//! after the element's end tag has been consumed.

mod collection;
mod values;

pub use collection::{CollectionBuilder, CollectionItem, ComplexPropertyCollection};
pub use values::ticks_to_utc;

use crate::reader::{ParseError, ParseResult, XmlElement, XmlReader};

/// One layer of a dispatch chain.
pub trait ElementHandler {
    /// Offers a child element whose start tag has just been read.
    ///
    /// Returns `true` when this layer, or a layer it delegates to, consumed
    /// the element through its end tag. Returns `false` without touching the
    /// reader when no layer owns the element.
    ///
    /// ## Errors
    /// Returns an error if an owned element's value cannot be decoded.
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool>;
}

/// A structured value decoded from an element sub-tree.
pub trait ComplexProperty: Sized {
    /// Accumulates fields while the element's children are read.
    type Builder: ElementHandler + Default;

    /// Converts a builder that has seen every child element into the value.
    ///
    /// ## Errors
    /// Returns an error if a required element never arrived.
    fn build(builder: Self::Builder) -> ParseResult<Self>;

    /// Loads the value from the element whose start tag was just read,
    /// consuming everything through its end tag.
    ///
    /// ## Errors
    /// Returns an error if the sub-tree is malformed or a recognized element
    /// carries an invalid value.
    fn load_from_xml(reader: &mut XmlReader<'_>, element: &XmlElement) -> ParseResult<Self> {
        let mut builder = Self::Builder::default();
        load_elements(&mut builder, element, reader)?;
        Self::build(builder)
    }
}

/// Root of every dispatch chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComplexPropertyBase;

impl ElementHandler for ComplexPropertyBase {
    fn try_read_element(
        &mut self,
        _element: &XmlElement,
        _reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        Ok(false)
    }
}

/// Offers every child of `parent` to `handler`, skipping unclaimed ones.
///
/// ## Errors
/// Returns the first error raised by the reader or the handler.
pub fn load_elements<H>(
    handler: &mut H,
    parent: &XmlElement,
    reader: &mut XmlReader<'_>,
) -> ParseResult<()>
where
    H: ElementHandler + ?Sized,
{
    while let Some(child) = reader.next_child()? {
        if !handler.try_read_element(&child, reader)? {
            tracing::trace!(
                parent = parent.local_name(),
                element = %child.name(),
                "Skipping unrecognized element"
            );
            reader.skip_element()?;
        }
    }
    Ok(())
}

/// Decodes a document whose root element is `local_name` as `P`.
///
/// ## Errors
/// Returns an error if the document is malformed, has a different root, or
/// fails to decode as `P`.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_complex_property<P: ComplexProperty>(xml: &[u8], local_name: &str) -> ParseResult<P> {
    let mut reader = XmlReader::new(xml);
    let element = reader.read_start_element(local_name)?;
    P::load_from_xml(&mut reader, &element)
}

/// Decodes the first element named `local_name` anywhere in the document,
/// whatever envelope surrounds it.
///
/// ## Errors
/// Returns an error if the document is malformed, has no such element, or
/// the element fails to decode as `P`.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn find_complex_property<P: ComplexProperty>(xml: &[u8], local_name: &str) -> ParseResult<P> {
    let mut reader = XmlReader::new(xml);
    let element = reader
        .read_to_descendant(local_name)?
        .ok_or_else(|| ParseError::missing_element(local_name))?;
    P::load_from_xml(&mut reader, &element)
}
