//! Owned element and attribute views handed to dispatch handlers.

use std::fmt;

/// A namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementName {
    /// Resolved namespace URI, `None` when the element is unqualified.
    pub namespace: Option<String>,
    /// The local name.
    pub local_name: String,
}

impl ElementName {
    /// Creates a new element name.
    #[must_use]
    pub fn new(namespace: Option<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// An attribute of a start tag, with its value already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// A start tag the reader has just consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: ElementName,
    attributes: Vec<XmlAttribute>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: ElementName, attributes: Vec<XmlAttribute>) -> Self {
        Self { name, attributes }
    }

    #[must_use]
    pub fn name(&self) -> &ElementName {
        &self.name
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.name.namespace.as_deref()
    }

    /// Returns true if the element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace() == Some(namespace) && self.local_name() == local_name
    }

    #[must_use]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Looks up an attribute by local name, ignoring its namespace.
    #[must_use]
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Looks up an attribute by namespace URI and local name.
    #[must_use]
    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| {
                attr.namespace.as_deref() == Some(namespace) && attr.local_name == local_name
            })
            .map(|attr| attr.value.as_str())
    }
}
