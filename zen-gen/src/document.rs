//! Serde model of the interface description document.
//!
//! The document is AsyncAPI-shaped: channels and operations referencing
//! request/response messages, plus component schemas. All mappings are
//! [`IndexMap`]s because iteration order is insertion order and is part of
//! the output contract. Every optional key defaults on deserialization so
//! both the rich shape and the schemas-only subset are accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Primitive;

/// Prefix of every component schema reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Document version literal written by the assembler.
pub const SPEC_VERSION: &str = "3.0.0";

/// Info version literal written by the assembler.
pub const INFO_VERSION: &str = "0.0.1";

/// A single document property.
///
/// Covers all the shapes a property can take: `{type}`, `{$ref}`,
/// `{type: "array", items}`, `{oneOf}`, the empty `{}`, and the
/// object-shaped payload with `required`/`properties`. Unused keys stay
/// `None` and are skipped on serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    /// `type` keyword (`string`, `array`, `object`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// `$ref` into `#/components/schemas/`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Array element property, present iff `type` is `array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    /// Union alternatives, in original annotation order.
    #[serde(rename = "oneOf", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Property>>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `format: "required"` marker on object-shaped response payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Required property names of an object-shaped payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Named properties of an object-shaped payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Property>>,
}

impl Property {
    /// A `{type: <name>}` property.
    pub fn typed(name: impl Into<String>) -> Self {
        Property {
            type_name: Some(name.into()),
            ..Property::default()
        }
    }

    /// A `{type: <primitive>}` property from the table.
    pub fn primitive(primitive: Primitive) -> Self {
        Property::typed(primitive.document_name())
    }

    /// A `{$ref: "#/components/schemas/<name>"}` property.
    pub fn reference(name: &str) -> Self {
        Property {
            reference: Some(format!("{SCHEMA_REF_PREFIX}{name}")),
            ..Property::default()
        }
    }

    /// An `{type: "array", items: <element>}` property.
    pub fn array(element: Property) -> Self {
        Property {
            type_name: Some("array".to_string()),
            items: Some(Box::new(element)),
            ..Property::default()
        }
    }

    /// A `{oneOf: [...]}` property.
    pub fn one_of(alternatives: Vec<Property>) -> Self {
        Property {
            one_of: Some(alternatives),
            ..Property::default()
        }
    }

    /// An empty object-shaped payload: `{type: "object", required: [],
    /// properties: {}}`.
    pub fn empty_object_payload() -> Self {
        Property {
            type_name: Some("object".to_string()),
            required: Some(Vec::new()),
            properties: Some(IndexMap::new()),
            ..Property::default()
        }
    }

    /// Whether the property is the empty `{}` shape (markers aside).
    pub fn is_empty_shape(&self) -> bool {
        self.type_name.is_none()
            && self.reference.is_none()
            && self.items.is_none()
            && self.one_of.is_none()
            && self.properties.is_none()
    }

    /// Whether the property is an array.
    pub fn is_array(&self) -> bool {
        self.type_name.as_deref() == Some("array")
    }

    /// Whether the `format: "required"` marker is present.
    pub fn is_marked_required(&self) -> bool {
        self.format.as_deref() == Some("required")
    }

    /// Required names of an object-shaped payload, empty when absent.
    pub fn required_names(&self) -> &[String] {
        self.required.as_deref().unwrap_or(&[])
    }
}

/// A `{$ref: ...}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefObject {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl RefObject {
    pub fn new(reference: impl Into<String>) -> Self {
        RefObject {
            reference: reference.into(),
        }
    }
}

/// A component channel: request/response message references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub messages: ChannelMessages,
}

/// The two message references of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessages {
    pub request: RefObject,
    pub response: RefObject,
}

/// A component operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub action: String,

    #[serde(default)]
    pub description: String,

    pub channel: RefObject,

    pub messages: Vec<RefObject>,

    pub reply: Reply,
}

/// The reply block of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub channel: RefObject,
    pub messages: Vec<RefObject>,
}

/// A request or response message schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub payload: Property,
}

/// An object-shaped component schema extracted from a class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSchema {
    #[serde(rename = "type", default = "object_literal")]
    pub type_name: String,

    #[serde(default = "object_literal")]
    pub base_class: String,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub properties: IndexMap<String, Property>,
}

fn object_literal() -> String {
    "object".to_string()
}

impl Default for ComponentSchema {
    fn default() -> Self {
        ComponentSchema {
            type_name: object_literal(),
            base_class: object_literal(),
            required: Vec::new(),
            properties: IndexMap::new(),
        }
    }
}

/// The `info` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `components` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub channels: IndexMap<String, Channel>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub operations: IndexMap<String, Operation>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub messages: IndexMap<String, Message>,

    #[serde(default)]
    pub schemas: IndexMap<String, ComponentSchema>,
}

/// The whole interface description document.
///
/// The schemas-only subset profile leaves every mapping except
/// `components.schemas` empty; empty mappings are omitted on serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub asyncapi: String,

    #[serde(default)]
    pub info: Info,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub channels: IndexMap<String, RefObject>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub operations: IndexMap<String, RefObject>,

    #[serde(default)]
    pub components: Components,
}

impl Document {
    /// Look up the request message of an operation, if present.
    pub fn request_message(&self, operation: &str) -> Option<&Message> {
        self.components.messages.get(&format!("{operation}_request"))
    }

    /// Look up the response message of an operation, if present.
    pub fn response_message(&self, operation: &str) -> Option<&Message> {
        self.components
            .messages
            .get(&format!("{operation}_response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_serializes_minimal_keys() {
        let prop = Property::typed("integer");
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json, serde_json::json!({"type": "integer"}));
    }

    #[test]
    fn test_reference_property_shape() {
        let prop = Property::reference("FooBar");
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"$ref": "#/components/schemas/FooBar"})
        );
    }

    #[test]
    fn test_array_property_shape() {
        let prop = Property::array(Property::typed("string"));
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[test]
    fn test_empty_property_is_empty_shape() {
        assert!(Property::default().is_empty_shape());
        assert!(!Property::typed("string").is_empty_shape());
        assert!(!Property::empty_object_payload().is_empty_shape());
    }

    #[test]
    fn test_document_tolerates_missing_top_level_keys() {
        let yaml = r#"
components:
  schemas:
    Foo:
      type: object
      base_class: object
      required: []
      properties: {}
"#;
        let document: Document = serde_yaml::from_str(yaml).unwrap();
        assert!(document.channels.is_empty());
        assert!(document.operations.is_empty());
        assert!(document.components.messages.is_empty());
        assert_eq!(document.components.schemas.len(), 1);
    }

    #[test]
    fn test_schema_defaults_base_class_to_object() {
        let yaml = "type: object\nrequired: []\nproperties: {}\n";
        let schema: ComponentSchema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.base_class, "object");
    }

    #[test]
    fn test_properties_preserve_insertion_order() {
        let yaml = r#"
type: object
base_class: object
required: [zulu, alpha]
properties:
  zulu: {type: string}
  alpha: {type: integer}
  mike: {type: boolean}
"#;
        let schema: ComponentSchema = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<_> = schema.properties.keys().cloned().collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }
}
