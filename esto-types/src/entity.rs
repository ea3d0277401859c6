//! Identity, labels and payload of an event.

use nutype::nutype;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque key grouping the events that belong to one logical object.
///
/// Parsing accepts any textual UUID form, so upper-case ids such as
/// `95C6D7EF-58E1-4C32-A1C6-7A11CB63C759` are accepted and compare equal to
/// their lower-case spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Wraps an existing UUID.
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Creates a fresh random entity id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self::new(uuid)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label naming the kind of entity an event belongs to, e.g. `MyThing`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        TryFrom,
        Serialize,
        Deserialize
    )
)]
pub struct EntityType(String);

/// Label naming what happened, e.g. `ThingDoneToMyThing`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        TryFrom,
        Serialize,
        Deserialize
    )
)]
pub struct EventName(String);

/// Event payload, carried as JSON text.
///
/// The store never looks inside the payload; it is serialized by the writer
/// and handed back verbatim to readers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventData(String);

impl EventData {
    /// Serializes `value` to JSON text.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(Self)
    }

    /// Wraps text that is already serialized.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parses the payload back into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.0)
    }

    /// Returns the payload text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the payload and returns its text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EventData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn entity_id_parses_upper_case_uuid() {
        let upper: EntityId = "95C6D7EF-58E1-4C32-A1C6-7A11CB63C759".parse().unwrap();
        let lower: EntityId = "95c6d7ef-58e1-4c32-a1c6-7a11cb63c759".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), "95c6d7ef-58e1-4c32-a1c6-7a11cb63c759");
    }

    #[test]
    fn entity_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<EntityId>().is_err());
        assert!("".parse::<EntityId>().is_err());
    }

    #[test]
    fn entity_id_serializes_as_string() {
        let id: EntityId = "95C6D7EF-58E1-4C32-A1C6-7A11CB63C759".parse().unwrap();
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            json!("95c6d7ef-58e1-4c32-a1c6-7a11cb63c759")
        );
    }

    #[test]
    fn event_data_is_json_text() {
        let data = EventData::from_value(&json!({ "a": 1, "b": 2 })).unwrap();
        assert_eq!(data.as_str(), r#"{"a":1,"b":2}"#);

        let parsed: serde_json::Value = data.parse().unwrap();
        assert_eq!(parsed, json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn event_data_travels_as_plain_string() {
        let data = EventData::from_text(r#"{"a":1}"#);
        assert_eq!(serde_json::to_value(&data).unwrap(), json!(r#"{"a":1}"#));
    }

    #[test]
    fn labels_deserialize_with_validation() {
        let ok: Result<EntityType, _> = serde_json::from_value(json!("  MyThing "));
        assert_eq!(ok.unwrap().as_ref(), "MyThing");

        let empty: Result<EventName, _> = serde_json::from_value(json!("   "));
        assert!(empty.is_err());
    }

    proptest! {
        #[test]
        fn entity_type_accepts_valid_labels(s in "[a-zA-Z0-9_-]{1,255}") {
            let label = EntityType::try_new(s.clone());
            prop_assert!(label.is_ok());
            let label = label.unwrap();
            prop_assert_eq!(label.as_ref(), s.as_str());
        }

        #[test]
        fn event_name_trims_whitespace(s in " {0,10}[a-zA-Z0-9_]{1,200} {0,10}") {
            let name = EventName::try_new(s.clone()).unwrap();
            prop_assert_eq!(name.as_ref(), s.trim());
        }

        #[test]
        fn labels_reject_blank_input(s in " {0,50}") {
            prop_assert!(EntityType::try_new(s.clone()).is_err());
            prop_assert!(EventName::try_new(s).is_err());
        }

        #[test]
        fn labels_reject_over_long_input(s in "[a-z]{256,400}") {
            prop_assert!(EntityType::try_new(s).is_err());
        }

        #[test]
        fn entity_id_display_parses_back(bytes in any::<[u8; 16]>()) {
            let id = EntityId::new(Uuid::from_bytes(bytes));
            prop_assert_eq!(id.to_string().parse::<EntityId>().unwrap(), id);
        }
    }
}
