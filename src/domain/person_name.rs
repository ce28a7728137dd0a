use std::fmt;

use tracing::instrument;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

#[derive(Debug, Clone)]
pub struct PersonName(String);

impl PersonName {
    #[instrument(name = "Parsing person name", skip(s), err(level = "error"))]
    pub fn parse(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(Error::InvalidName(String::from("cannot be empty")))
        } else if trimmed.graphemes(true).count() > 256 {
            Err(Error::InvalidName(String::from("too long")))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// File stem used for the sampled clip, e.g. `Barack_Obama_voice`.
    pub fn voice_file_stem(&self) -> String {
        format!("{}_voice", self.0.replace(' ', "_"))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
