use super::PersonInsightCollection;
use crate::names;
use crate::property::{ComplexProperty, ComplexPropertyBase, ElementHandler};
use crate::reader::{ParseResult, XmlElement, XmlReader};

/// A person record returned by people insight operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    email_address: Option<String>,
    display_name: Option<String>,
    insights: Option<PersonInsightCollection>,
}

impl Person {
    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The person's insights, or `None` when the response carried no
    /// `Insights` element at all.
    #[must_use]
    pub fn insights(&self) -> Option<&PersonInsightCollection> {
        self.insights.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct PersonBuilder {
    base: ComplexPropertyBase,
    email_address: Option<String>,
    display_name: Option<String>,
    insights: Option<PersonInsightCollection>,
}

impl ElementHandler for PersonBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::EMAIL_ADDRESS => {
                self.email_address = Some(reader.read_element_value(element)?);
            }
            names::DISPLAY_NAME => {
                self.display_name = Some(reader.read_element_value(element)?);
            }
            names::INSIGHTS => {
                self.insights = Some(PersonInsightCollection::load_from_xml(reader, element)?);
            }
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for Person {
    type Builder = PersonBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            email_address: builder.email_address,
            display_name: builder.display_name,
            insights: builder.insights,
        })
    }
}
