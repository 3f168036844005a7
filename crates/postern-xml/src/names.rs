//! Element names recognized by the people insight property types.

pub const PERSON: &str = "Person";
pub const EMAIL_ADDRESS: &str = "EmailAddress";
pub const DISPLAY_NAME: &str = "DisplayName";
pub const INSIGHTS: &str = "Insights";

pub const INSIGHT: &str = "Insight";
pub const INSIGHT_TYPE: &str = "InsightType";
pub const RANK: &str = "Rank";
pub const CONTENT: &str = "Content";

pub const INSIGHT_SOURCE: &str = "InsightSource";
pub const UPDATED_UTC_TICKS: &str = "UpdatedUtcTicks";

pub const DATA: &str = "Data";

pub const FULL_NAME: &str = "FullName";
pub const FIRST_NAME: &str = "FirstName";
pub const LAST_NAME: &str = "LastName";
pub const AVATAR: &str = "Avatar";
pub const JOINED_UTC_TICKS: &str = "JoinedUtcTicks";
pub const PROFILE_PICTURE: &str = "ProfilePicture";
pub const TITLE: &str = "Title";

pub const BLOB: &str = "Blob";
pub const PHOTO_SIZE: &str = "PhotoSize";
pub const URL: &str = "Url";
pub const IMAGE_TYPE: &str = "ImageType";

pub const COMPANY: &str = "Company";
pub const COMPANY_DESCRIPTION: &str = "CompanyDescription";
pub const COMPANY_TICKER: &str = "CompanyTicker";
pub const COMPANY_LOGO_URL: &str = "CompanyLogoUrl";
pub const COMPANY_WEBSITE_URL: &str = "CompanyWebsiteUrl";
pub const COMPANY_LINKED_IN_URL: &str = "CompanyLinkedInUrl";
pub const START_UTC_TICKS: &str = "StartUtcTicks";
pub const END_UTC_TICKS: &str = "EndUtcTicks";

pub const INSTITUTE: &str = "Institute";
pub const DEGREE: &str = "Degree";

pub const NAME: &str = "Name";
pub const STRENGTH: &str = "Strength";

pub const PROPERTIES: &str = "Properties";
pub const PROPERTY: &str = "Property";
pub const KEY: &str = "Key";
pub const VALUE: &str = "Value";

/// `xsi:type` values selecting an insight content variant.
pub mod insight_types {
    pub const STRING: &str = "StringInsightValue";
    pub const PROFILE: &str = "ProfileInsightValue";
    pub const JOB: &str = "JobInsightValue";
    pub const EDUCATION: &str = "EducationInsightValue";
    pub const SKILL: &str = "SkillInsightValue";
    pub const COMPUTED: &str = "ComputedInsightValue";
}
