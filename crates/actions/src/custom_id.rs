//! `namespace:kind:discriminator` identifiers attached to interactive UI
//! elements. Only the first two delimiters are significant, so the
//! discriminator may itself contain `:`.

use std::{fmt, str::FromStr};

use thiserror::Error;

pub const DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomId {
    pub namespace: String,
    pub kind: String,
    pub discriminator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCustomId {
    #[error("custom id segment `{segment}` must not contain `:`")]
    DelimiterInSegment { segment: String },
    #[error("custom id `{raw}` needs three `:`-separated parts")]
    TooFewParts { raw: String },
}

impl CustomId {
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        discriminator: impl fmt::Display,
    ) -> Result<Self, InvalidCustomId> {
        let namespace = namespace.into();
        let kind = kind.into();
        for segment in [&namespace, &kind] {
            if segment.contains(DELIMITER) {
                return Err(InvalidCustomId::DelimiterInSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(Self {
            namespace,
            kind,
            discriminator: discriminator.to_string(),
        })
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{namespace}{d}{kind}{d}{discriminator}",
            namespace = self.namespace,
            kind = self.kind,
            discriminator = self.discriminator,
            d = DELIMITER,
        )
    }
}

impl FromStr for CustomId {
    type Err = InvalidCustomId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(kind), Some(discriminator)) => Ok(Self {
                namespace: namespace.to_string(),
                kind: kind.to_string(),
                discriminator: discriminator.to_string(),
            }),
            _ => Err(InvalidCustomId::TooFewParts {
                raw: raw.to_string(),
            }),
        }
    }
}

pub fn encode(
    namespace: &str,
    kind: &str,
    discriminator: impl fmt::Display,
) -> Result<String, InvalidCustomId> {
    CustomId::new(namespace, kind, discriminator).map(|id| id.to_string())
}

pub fn decode(raw: &str) -> Result<CustomId, InvalidCustomId> {
    raw.parse()
}

#[cfg(test)]
#[path = "tests/custom_id_tests.rs"]
mod tests;
