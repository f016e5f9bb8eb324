//! The dynamic-schema record model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key pointing at the attributes structure common to all records.
const ATTRIBUTES_KEY: &str = "attributes";
/// Key holding the record identifier.
const ID_KEY: &str = "Id";
/// Key naming the field that carries the external ID.
const EXTERNAL_ID_FIELD_NAME_KEY: &str = "ExternalIDField";

/// A generic Salesforce record: an open key/value document whose shape
/// varies per object type.
///
/// Typed accessors degrade rather than fail: an absent or mis-typed field
/// yields an empty string (or `None` for [`field`]), never an error or a
/// panic.
///
/// [`field`]: SObject::field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SObject(Map<String, Value>);

impl SObject {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The object type name from the attributes structure, or `""`.
    pub fn object_type(&self) -> String {
        self.attributes()
            .map(|attributes| attributes.sobject_type)
            .unwrap_or_default()
    }

    /// The record identifier, or `""`.
    pub fn id(&self) -> &str {
        self.string_field(ID_KEY)
    }

    /// The name of the field carrying the external ID, or `""`.
    pub fn external_id_field_name(&self) -> &str {
        self.string_field(EXTERNAL_ID_FIELD_NAME_KEY)
    }

    /// The external ID, resolved through [`external_id_field_name`], or `""`.
    ///
    /// [`external_id_field_name`]: SObject::external_id_field_name
    pub fn external_id(&self) -> &str {
        self.string_field(self.external_id_field_name())
    }

    /// Access a field as a string. Non-string values, including absence,
    /// yield `""`.
    pub fn string_field(&self, key: &str) -> &str {
        self.field(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Access a field as a raw JSON value.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A copy of the attributes structure, or `None` when it is absent or
    /// not an object.
    ///
    /// The result is always an owned copy: callers cannot mutate the record
    /// through it. Well-formed payloads take the typed decode; payloads with
    /// a missing or mis-typed member fall back to field-by-field extraction,
    /// defaulting each member rather than rejecting the whole structure.
    pub fn attributes(&self) -> Option<SObjectAttributes> {
        let value = self.field(ATTRIBUTES_KEY)?;

        if let Ok(attributes) = serde_json::from_value::<SObjectAttributes>(value.clone()) {
            return Some(attributes);
        }

        let map = value.as_object()?;
        Some(SObjectAttributes {
            sobject_type: map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            url: map
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        })
    }
}

impl From<Map<String, Value>> for SObject {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The basic attributes (type and url) of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SObjectAttributes {
    /// Object type name, e.g. `Account`.
    #[serde(rename = "type")]
    pub sobject_type: String,
    /// REST resource URL of the record.
    pub url: String,
}
