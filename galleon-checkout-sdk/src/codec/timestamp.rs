//! RFC 3339 timestamps that keep the text they were read from.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A point in time plus its wire text.
///
/// A decoded timestamp is written back exactly as received, so
/// `2024-05-01T10:00:00.000Z` does not turn into `2024-05-01T10:00:00Z`.
/// Equality compares the instant only.
#[derive(Debug, Clone)]
pub struct Timestamp {
    at: OffsetDateTime,
    text: String,
}

impl Timestamp {
    pub fn new(at: OffsetDateTime) -> Result<Self, time::error::Format> {
        Ok(Self {
            text: at.format(&Rfc3339)?,
            at,
        })
    }

    pub fn parse(text: &str) -> Result<Self, time::error::Parse> {
        Ok(Self {
            at: OffsetDateTime::parse(text, &Rfc3339)?,
            text: text.to_owned(),
        })
    }

    pub fn at(&self) -> OffsetDateTime {
        self.at
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Timestamp {}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_text_is_kept() {
        let millis = Timestamp::parse("2024-05-01T10:00:00.000Z").unwrap();
        let plain = Timestamp::parse("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(millis, plain);
        assert_eq!(millis.as_str(), "2024-05-01T10:00:00.000Z");
        assert_eq!(
            serde_json::to_string(&millis).unwrap(),
            r#""2024-05-01T10:00:00.000Z""#
        );
    }

    #[test]
    fn test_new_formats_rfc3339() {
        let timestamp = Timestamp::new(datetime!(2024-05-01 10:00:00 UTC)).unwrap();
        assert_eq!(timestamp.to_string(), "2024-05-01T10:00:00Z");
        assert_eq!(timestamp.at(), datetime!(2024-05-01 10:00:00 UTC));
        assert!(Timestamp::parse("yesterday").is_err());
    }
}
