//! People insight property types.
//!
//! ## Summary
//! A [`Person`] carries an email address, a display name, and an optional
//! collection of [`PersonInsight`]s. Each insight's content is one of several
//! insight value variants chosen by the `xsi:type` of its `Content` element;
//! all variants extend the shared [`InsightValueBase`] layer.

mod insight;
mod insight_value;
mod person;
mod profile_picture;


pub use insight::{PersonInsight, PersonInsightBuilder, PersonInsightCollection};
pub use insight_value::{
    ComputedInsightValue, ComputedInsightValueBuilder, ComputedInsightValueProperty,
    ComputedInsightValuePropertyBuilder, EducationInsightValue, EducationInsightValueBuilder,
    InsightContent, InsightValueBase, InsightValueBaseBuilder, JobInsightValue,
    JobInsightValueBuilder, ProfileInsightValue, ProfileInsightValueBuilder,
    SkillInsightValue, SkillInsightValueBuilder, StringInsightValue, StringInsightValueBuilder,
};
pub use person::{Person, PersonBuilder};
pub use profile_picture::{UserProfilePicture, UserProfilePictureBuilder};
