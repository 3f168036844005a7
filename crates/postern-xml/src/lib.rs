//! XML decoding for service responses.
//!
//! ## Summary
//! `reader` provides the pull reader; `property` provides the complex
//! property dispatch that turns an element sub-tree into a typed value;
//! `people` holds the person and insight property types built on it.

pub mod names;
pub mod people;
pub mod property;
pub mod reader;

pub use property::{
    ComplexProperty, ComplexPropertyBase, ComplexPropertyCollection, CollectionItem,
    ElementHandler, find_complex_property, load_elements, parse_complex_property,
};
pub use reader::{ElementName, ParseError, ParseErrorKind, ParseResult, XmlElement, XmlReader};
