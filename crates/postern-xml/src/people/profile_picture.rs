use crate::names;
use crate::property::{ComplexProperty, ComplexPropertyBase, ElementHandler};
use crate::reader::{ParseResult, XmlElement, XmlReader};

/// A profile photo embedded in a profile insight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfilePicture {
    blob: Option<Vec<u8>>,
    photo_size: Option<String>,
    url: Option<String>,
    image_type: Option<String>,
}

impl UserProfilePicture {
    /// Decoded image bytes.
    #[must_use]
    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }

    #[must_use]
    pub fn photo_size(&self) -> Option<&str> {
        self.photo_size.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn image_type(&self) -> Option<&str> {
        self.image_type.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct UserProfilePictureBuilder {
    base: ComplexPropertyBase,
    blob: Option<Vec<u8>>,
    photo_size: Option<String>,
    url: Option<String>,
    image_type: Option<String>,
}

impl ElementHandler for UserProfilePictureBuilder {
    fn try_read_element(
        &mut self,
        element: &XmlElement,
        reader: &mut XmlReader<'_>,
    ) -> ParseResult<bool> {
        match element.local_name() {
            names::BLOB => self.blob = Some(reader.read_base64(element)?),
            names::PHOTO_SIZE => self.photo_size = Some(reader.read_element_value(element)?),
            names::URL => self.url = Some(reader.read_element_value(element)?),
            names::IMAGE_TYPE => self.image_type = Some(reader.read_element_value(element)?),
            _ => return self.base.try_read_element(element, reader),
        }
        Ok(true)
    }
}

impl ComplexProperty for UserProfilePicture {
    type Builder = UserProfilePictureBuilder;

    fn build(builder: Self::Builder) -> ParseResult<Self> {
        Ok(Self {
            blob: builder.blob,
            photo_size: builder.photo_size,
            url: builder.url,
            image_type: builder.image_type,
        })
    }
}
