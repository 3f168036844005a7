//! Ordered collections of complex properties.

use super::{ComplexProperty, ElementHandler};
use crate::reader::{ParseResult, XmlElement, XmlReader};

/// A complex property that appears as the repeated item of a collection.
pub trait CollectionItem: ComplexProperty {
    /// Local name of each item element inside the collection's wrapper.
    const ITEM_ELEMENT_NAME: &'static str;
}

/// Items decoded from a wrapping element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexPropertyCollection<T> {
    items: Vec<T>,
}

impl<T> ComplexPropertyCollection<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<'c, T> IntoIterator for &'c ComplexPropertyCollection<T> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug)]
pub struct CollectionBuilder<T> {
    items: Vec<T>,
}

impl<T> Default for CollectionBuilder<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: CollectionItem> ElementHandler for CollectionBuilder<T> {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        if element.local_name() != T::ITEM_ELEMENT_NAME {
            return Ok(false);
        }
        self.items.push(T::load_from_xml(reader, element)?);
        Ok(true)
    }
}

impl<T: CollectionItem> ComplexProperty for ComplexPropertyCollection<T> {
    type Builder = CollectionBuilder<T>;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            items: builder.items,
        })
    }
}
