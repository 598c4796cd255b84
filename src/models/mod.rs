mod content;
mod key;
mod outcome;
mod provider;
mod request;

pub use content::{ContentItem, PostStatus, SubmissionAction};
pub use key::{VerificationKey, MAX_KEY_LEN, MIN_KEY_LEN};
pub use outcome::{OutcomeStatus, SubmissionOutcome};
pub use provider::Provider;
pub use request::SubmissionPayload;

use serde::Deserializer;

/// Deserialize a content id sent either as a JSON integer or a numeric string.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<u64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<u64, E>
        where
            E: de::Error,
        {
            u64::try_from(value).map_err(|_| E::custom(format!("negative id {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<u64, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id '{}'", value)))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
