use std::fmt;
use std::str::FromStr;

use mti::prelude::{MagicTypeId, MagicTypeIdExt, V7};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SchemaError;

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(MagicTypeId);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generates a new time-ordered id (UUIDv7 suffix).
            pub fn new() -> Self {
                Self(Self::PREFIX.create_type_id::<V7>())
            }

            /// Parses an id, rejecting any other prefix.
            pub fn parse(s: &str) -> Result<Self, SchemaError> {
                let id = MagicTypeId::from_str(s).map_err(|e| SchemaError::InvalidId {
                    expected_prefix: Self::PREFIX.to_string(),
                    reason: e.to_string(),
                })?;
                if id.prefix().as_str() != Self::PREFIX {
                    return Err(SchemaError::InvalidId {
                        expected_prefix: Self::PREFIX.to_string(),
                        reason: format!("unexpected prefix '{}'", id.prefix().as_str()),
                    });
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.0.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

typed_id!(
    /// Identifier of a stored form definition, e.g. `form_01h455vb4pex5vsknk084sn02q`.
    FormId,
    "form"
);

typed_id!(
    /// Identifier of an accepted submission.
    SubmissionId,
    "submission"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_correct_prefix() {
        let id = FormId::new();
        assert!(
            id.as_str().starts_with("form_"),
            "expected 'form_' prefix, got: {id}"
        );
        assert!(SubmissionId::new().as_str().starts_with("submission_"));
    }

    #[test]
    fn parse_valid() {
        let id = SubmissionId::new();
        let parsed = SubmissionId::parse(id.as_str()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_wrong_prefix() {
        let form = FormId::new();
        let err = SubmissionId::parse(form.as_str()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidId { ref expected_prefix, .. } if expected_prefix == "submission"
        ));
    }

    #[test]
    fn parse_garbage() {
        assert!(FormId::parse("not an id").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let id = FormId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: FormId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn serde_rejects_wrong_prefix() {
        let json = serde_json::to_string(&SubmissionId::new()).unwrap();
        assert!(serde_json::from_str::<FormId>(&json).is_err());
    }
}
