use super::InsightContent;
use crate::names;
use crate::property::{
    CollectionItem, ComplexProperty, ComplexPropertyBase, ComplexPropertyCollection,
    ElementHandler,
};
use crate::reader::{ParseResult, XmlElement, XmlReader};

/// Insights attached to a person, in the order the server listed them.
pub type PersonInsightCollection = ComplexPropertyCollection<PersonInsight>;

/// One insight about a person, such as a job title or a shared skill.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonInsight {
    insight_type: Option<String>,
    rank: Option<f64>,
    content: Option<InsightContent>,
}

impl PersonInsight {
    #[must_use]
    pub fn insight_type(&self) -> Option<&str> {
        self.insight_type.as_deref()
    }

    #[must_use]
    pub fn rank(&self) -> Option<f64> {
        self.rank
    }

    /// Decoded content. `None` when absent or of a type this client does not
    /// know.
    #[must_use]
    pub fn content(&self) -> Option<&InsightContent> {
        self.content.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct PersonInsightBuilder {
    base: ComplexPropertyBase,
    insight_type: Option<String>,
    rank: Option<f64>,
    content: Option<InsightContent>,
}

impl ElementHandler for PersonInsightBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::INSIGHT_TYPE => {
                self.insight_type = Some(reader.read_element_value(element)?);
            }
            names::RANK => {
                self.rank = Some(reader.read_value(element)?);
            }
            names::CONTENT => {
                self.content = InsightContent::load_from_xml(reader, element)?;
            }
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for PersonInsight {
    type Builder = PersonInsightBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            insight_type: builder.insight_type,
            rank: builder.rank,
            content: builder.content,
        })
    }
}

impl CollectionItem for PersonInsight {
    const ITEM_ELEMENT_NAME: &'static str = names::INSIGHT;
}
