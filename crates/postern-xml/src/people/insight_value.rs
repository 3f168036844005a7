//! Insight content variants.
//!
//! Every variant's builder wraps [`InsightValueBaseBuilder`] and falls back
//! to it for names it does not own, so `InsightSource` and `UpdatedUtcTicks`
//! are decoded once for all of them.

use chrono::{DateTime, Utc};
use postern_core::constants::XSI_NS;

use super::UserProfilePicture;
use crate::names::{self, insight_types};
use crate::property::{
    CollectionItem, ComplexProperty, ComplexPropertyBase, ComplexPropertyCollection,
    ElementHandler, ticks_to_utc,
};
use crate::reader::{ParseError, ParseResult, XmlElement, XmlReader};

/// Fields shared by every insight content variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightValueBase {
    insight_source: Option<String>,
    updated_utc_ticks: Option<i64>,
}

impl InsightValueBase {
    #[must_use]
    pub fn insight_source(&self) -> Option<&str> {
        self.insight_source.as_deref()
    }

    #[must_use]
    pub fn updated_utc_ticks(&self) -> Option<i64> {
        self.updated_utc_ticks
    }

    #[must_use]
    pub fn updated_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_utc_ticks.and_then(ticks_to_utc)
    }
}

#[derive(Debug, Default)]
pub struct InsightValueBaseBuilder {
    base: ComplexPropertyBase,
    insight_source: Option<String>,
    updated_utc_ticks: Option<i64>,
}

impl InsightValueBaseBuilder {
    fn finish(self) -> InsightValueBase {
        InsightValueBase {
            insight_source: self.insight_source,
            updated_utc_ticks: self.updated_utc_ticks,
        }
    }
}

impl ElementHandler for InsightValueBaseBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::INSIGHT_SOURCE => {
                self.insight_source = Some(reader.read_element_value(element)?);
            }
            names::UPDATED_UTC_TICKS => {
                self.updated_utc_ticks = Some(reader.read_value(element)?);
            }
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

/// Content of a person insight, selected by the `xsi:type` of `Content`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightContent {
    String(StringInsightValue),
    Profile(ProfileInsightValue),
    Job(JobInsightValue),
    Education(EducationInsightValue),
    Skill(SkillInsightValue),
    Computed(ComputedInsightValue),
}

impl InsightContent {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        match self {
            Self::String(value) => &value.base,
            Self::Profile(value) => &value.base,
            Self::Job(value) => &value.base,
            Self::Education(value) => &value.base,
            Self::Skill(value) => &value.base,
            Self::Computed(value) => &value.base,
        }
    }

    /// Loads the variant named by the element's `xsi:type`.
    ///
    /// Content without a type, or with a type this client does not know, is
    /// skipped and yields `None`.
    pub(crate) fn load_from_xml(
        reader: &mut XmlReader<'_>,
        element: &XmlElement,
    ) -> ParseResult<Option<Self>> {
        let Some(declared) = element
            .attribute_ns(XSI_NS, "type")
            .or_else(|| element.attribute("type"))
        else {
            tracing::warn!("Insight content has no xsi:type, skipping");
            reader.skip_element()?;
            return Ok(None);
        };
        // Drop any prefix, as in "t:JobInsightValue".
        let type_name = declared.rsplit(':').next().unwrap_or(declared);

        let content = match type_name {
            insight_types::STRING => Self::String(StringInsightValue::load_from_xml(reader, element)?),
            insight_types::PROFILE => {
                Self::Profile(ProfileInsightValue::load_from_xml(reader, element)?)
            }
            insight_types::JOB => Self::Job(JobInsightValue::load_from_xml(reader, element)?),
            insight_types::EDUCATION => {
                Self::Education(EducationInsightValue::load_from_xml(reader, element)?)
            }
            insight_types::SKILL => Self::Skill(SkillInsightValue::load_from_xml(reader, element)?),
            insight_types::COMPUTED => {
                Self::Computed(ComputedInsightValue::load_from_xml(reader, element)?)
            }
            other => {
                tracing::warn!(insight_type = other, "Unknown insight content type, skipping");
                reader.skip_element()?;
                return Ok(None);
            }
        };
        Ok(Some(content))
    }
}

/// Free-text insight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringInsightValue {
    base: InsightValueBase,
    data: Option<String>,
}

impl StringInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct StringInsightValueBuilder {
    base: InsightValueBaseBuilder,
    data: Option<String>,
}

impl ElementHandler for StringInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        if element.local_name() == names::DATA {
            self.data = Some(reader.read_element_value(element)?);
            return Ok(true);
        }
        self.base.try_read_element(element, reader)
    }
}

impl ComplexProperty for StringInsightValue {
    type Builder = StringInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            data: builder.data,
        })
    }
}

/// Directory profile of the person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInsightValue {
    base: InsightValueBase,
    full_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email_address: Option<String>,
    avatar: Option<String>,
    joined_utc_ticks: Option<i64>,
    profile_picture: Option<UserProfilePicture>,
    title: Option<String>,
}

impl ProfileInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub fn joined_utc(&self) -> Option<DateTime<Utc>> {
        self.joined_utc_ticks.and_then(ticks_to_utc)
    }

    #[must_use]
    pub fn profile_picture(&self) -> Option<&UserProfilePicture> {
        self.profile_picture.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ProfileInsightValueBuilder {
    base: InsightValueBaseBuilder,
    full_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email_address: Option<String>,
    avatar: Option<String>,
    joined_utc_ticks: Option<i64>,
    profile_picture: Option<UserProfilePicture>,
    title: Option<String>,
}

impl ElementHandler for ProfileInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::FULL_NAME => self.full_name = Some(reader.read_element_value(element)?),
            names::FIRST_NAME => self.first_name = Some(reader.read_element_value(element)?),
            names::LAST_NAME => self.last_name = Some(reader.read_element_value(element)?),
            names::EMAIL_ADDRESS => self.email_address = Some(reader.read_element_value(element)?),
            names::AVATAR => self.avatar = Some(reader.read_element_value(element)?),
            names::JOINED_UTC_TICKS => self.joined_utc_ticks = Some(reader.read_value(element)?),
            names::PROFILE_PICTURE => {
                self.profile_picture = Some(UserProfilePicture::load_from_xml(reader, element)?);
            }
            names::TITLE => self.title = Some(reader.read_element_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for ProfileInsightValue {
    type Builder = ProfileInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            full_name: builder.full_name,
            first_name: builder.first_name,
            last_name: builder.last_name,
            email_address: builder.email_address,
            avatar: builder.avatar,
            joined_utc_ticks: builder.joined_utc_ticks,
            profile_picture: builder.profile_picture,
            title: builder.title,
        })
    }
}

/// A position the person holds or held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobInsightValue {
    base: InsightValueBase,
    company: Option<String>,
    company_description: Option<String>,
    company_ticker: Option<String>,
    company_logo_url: Option<String>,
    company_website_url: Option<String>,
    company_linked_in_url: Option<String>,
    title: Option<String>,
    start_utc_ticks: Option<i64>,
    end_utc_ticks: Option<i64>,
}

impl JobInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    #[must_use]
    pub fn company_description(&self) -> Option<&str> {
        self.company_description.as_deref()
    }

    #[must_use]
    pub fn company_ticker(&self) -> Option<&str> {
        self.company_ticker.as_deref()
    }

    #[must_use]
    pub fn company_logo_url(&self) -> Option<&str> {
        self.company_logo_url.as_deref()
    }

    #[must_use]
    pub fn company_website_url(&self) -> Option<&str> {
        self.company_website_url.as_deref()
    }

    #[must_use]
    pub fn company_linked_in_url(&self) -> Option<&str> {
        self.company_linked_in_url.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start_utc_ticks.and_then(ticks_to_utc)
    }

    #[must_use]
    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        self.end_utc_ticks.and_then(ticks_to_utc)
    }
}

#[derive(Debug, Default)]
pub struct JobInsightValueBuilder {
    base: InsightValueBaseBuilder,
    company: Option<String>,
    company_description: Option<String>,
    company_ticker: Option<String>,
    company_logo_url: Option<String>,
    company_website_url: Option<String>,
    company_linked_in_url: Option<String>,
    title: Option<String>,
    start_utc_ticks: Option<i64>,
    end_utc_ticks: Option<i64>,
}

impl ElementHandler for JobInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::COMPANY => self.company = Some(reader.read_element_value(element)?),
            names::COMPANY_DESCRIPTION => {
                self.company_description = Some(reader.read_element_value(element)?);
            }
            names::COMPANY_TICKER => self.company_ticker = Some(reader.read_element_value(element)?),
            names::COMPANY_LOGO_URL => {
                self.company_logo_url = Some(reader.read_element_value(element)?);
            }
            names::COMPANY_WEBSITE_URL => {
                self.company_website_url = Some(reader.read_element_value(element)?);
            }
            names::COMPANY_LINKED_IN_URL => {
                self.company_linked_in_url = Some(reader.read_element_value(element)?);
            }
            names::TITLE => self.title = Some(reader.read_element_value(element)?),
            names::START_UTC_TICKS => self.start_utc_ticks = Some(reader.read_value(element)?),
            names::END_UTC_TICKS => self.end_utc_ticks = Some(reader.read_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for JobInsightValue {
    type Builder = JobInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            company: builder.company,
            company_description: builder.company_description,
            company_ticker: builder.company_ticker,
            company_logo_url: builder.company_logo_url,
            company_website_url: builder.company_website_url,
            company_linked_in_url: builder.company_linked_in_url,
            title: builder.title,
            start_utc_ticks: builder.start_utc_ticks,
            end_utc_ticks: builder.end_utc_ticks,
        })
    }
}

/// A school or degree on the person's record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationInsightValue {
    base: InsightValueBase,
    institute: Option<String>,
    degree: Option<String>,
    start_utc_ticks: Option<i64>,
    end_utc_ticks: Option<i64>,
}

impl EducationInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn institute(&self) -> Option<&str> {
        self.institute.as_deref()
    }

    #[must_use]
    pub fn degree(&self) -> Option<&str> {
        self.degree.as_deref()
    }

    #[must_use]
    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start_utc_ticks.and_then(ticks_to_utc)
    }

    #[must_use]
    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        self.end_utc_ticks.and_then(ticks_to_utc)
    }
}

#[derive(Debug, Default)]
pub struct EducationInsightValueBuilder {
    base: InsightValueBaseBuilder,
    institute: Option<String>,
    degree: Option<String>,
    start_utc_ticks: Option<i64>,
    end_utc_ticks: Option<i64>,
}

impl ElementHandler for EducationInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::INSTITUTE => self.institute = Some(reader.read_element_value(element)?),
            names::DEGREE => self.degree = Some(reader.read_element_value(element)?),
            names::START_UTC_TICKS => self.start_utc_ticks = Some(reader.read_value(element)?),
            names::END_UTC_TICKS => self.end_utc_ticks = Some(reader.read_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for EducationInsightValue {
    type Builder = EducationInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            institute: builder.institute,
            degree: builder.degree,
            start_utc_ticks: builder.start_utc_ticks,
            end_utc_ticks: builder.end_utc_ticks,
        })
    }
}

/// A skill attributed to the person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillInsightValue {
    base: InsightValueBase,
    name: Option<String>,
    strength: Option<String>,
}

impl SkillInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn strength(&self) -> Option<&str> {
        self.strength.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct SkillInsightValueBuilder {
    base: InsightValueBaseBuilder,
    name: Option<String>,
    strength: Option<String>,
}

impl ElementHandler for SkillInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::NAME => self.name = Some(reader.read_element_value(element)?),
            names::STRENGTH => self.strength = Some(reader.read_element_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for SkillInsightValue {
    type Builder = SkillInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            name: builder.name,
            strength: builder.strength,
        })
    }
}

/// Key/value pairs computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedInsightValue {
    base: InsightValueBase,
    properties: Option<ComplexPropertyCollection<ComputedInsightValueProperty>>,
}

impl ComputedInsightValue {
    #[must_use]
    pub fn base(&self) -> &InsightValueBase {
        &self.base
    }

    #[must_use]
    pub fn properties(&self) -> Option<&ComplexPropertyCollection<ComputedInsightValueProperty>> {
        self.properties.as_ref()
    }

    /// Value of the first property with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .as_ref()?
            .iter()
            .find(|property| property.key == key)
            .and_then(|property| property.value.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct ComputedInsightValueBuilder {
    base: InsightValueBaseBuilder,
    properties: Option<ComplexPropertyCollection<ComputedInsightValueProperty>>,
}

impl ElementHandler for ComputedInsightValueBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        if element.local_name() == names::PROPERTIES {
            self.properties = Some(ComplexPropertyCollection::load_from_xml(reader, element)?);
            return Ok(true);
        }
        self.base.try_read_element(element, reader)
    }
}

impl ComplexProperty for ComputedInsightValue {
    type Builder = ComputedInsightValueBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            base: builder.base.finish(),
            properties: builder.properties,
        })
    }
}

/// One entry of a computed insight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedInsightValueProperty {
    key: String,
    value: Option<String>,
}

impl ComputedInsightValueProperty {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ComputedInsightValuePropertyBuilder {
    base: ComplexPropertyBase,
    key: Option<String>,
    value: Option<String>,
}

impl ElementHandler for ComputedInsightValuePropertyBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::KEY => self.key = Some(reader.read_element_value(element)?),
            names::VALUE => self.value = Some(reader.read_element_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for ComputedInsightValueProperty {
    type Builder = ComputedInsightValuePropertyBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            key: builder
                .key
                .ok_or_else(|| ParseError::missing_element(names::KEY).in_element(names::PROPERTY))?,
            value: builder.value,
        })
    }
}

impl CollectionItem for ComputedInsightValueProperty {
    const ITEM_ELEMENT_NAME: &'static str = names::PROPERTY;
}
