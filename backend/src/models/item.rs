//! Item resource and response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::validation::{ObjectFields, Validate, ValidationErrors};
use crate::define_id_type;

define_id_type!(i64, ItemId);

/// A stored item.
///
/// Only the store builds these: `id` and `created_at` are assigned on creation and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identity
    #[schema(value_type = i64, example = 1)]
    pub id: ItemId,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 9.99)]
    pub price: f64,
    /// Creation time, preserved across updates
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Build a stored item from a payload and the store-assigned fields.
    pub fn from_payload(id: ItemId, created_at: DateTime<Utc>, payload: ItemPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            created_at,
        }
    }

    /// The client-controlled part of this item.
    pub fn payload(&self) -> ItemPayload {
        ItemPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
        }
    }
}

/// Client-supplied fields of an item, as accepted by create and update.
///
/// Bodies may also carry `id` and `created_at`; both are type-checked and then
/// discarded, since the store owns those fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemPayload {
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = 9.99)]
    pub price: f64,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Validate for ItemPayload {
    fn validate(value: &Value) -> Result<Self, ValidationErrors> {
        let fields = ObjectFields::new(Self::ROOT, value)?;

        // Reported in declaration order: id, name, description, price, created_at.
        match (
            fields.optional_int("id"),
            fields.required_str("name"),
            fields.optional_str("description"),
            fields.required_f64("price"),
            fields.optional_datetime("created_at"),
        ) {
            (Ok(_), Ok(name), Ok(description), Ok(price), Ok(_)) => Ok(Self {
                name,
                description,
                price,
            }),
            (id, name, description, price, created_at) => Err([
                id.err(),
                name.err(),
                description.err(),
                price.err(),
                created_at.err(),
            ]
            .into_iter()
            .flatten()
            .collect::<ValidationErrors>()),
        }
    }
}

/// Generic confirmation envelope for responses that carry no resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    #[schema(example = "Item deleted successfully")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Envelope stamped with the current time.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_serializes_as_integer() {
        assert_eq!(serde_json::to_value(ItemId::new(7)).unwrap(), json!(7));
        assert_eq!(ItemId::new(7).next(), ItemId::new(8));
        assert_eq!(ItemId::new(7).to_string(), "7");
    }

    #[test]
    fn test_valid_payload() {
        let payload = ItemPayload::validate(&json!({
            "name": "A",
            "description": "first",
            "price": 1.0
        }))
        .unwrap();
        assert_eq!(payload, ItemPayload::new("A", 1.0).with_description("first"));
    }

    #[test]
    fn test_client_identity_fields_are_discarded() {
        let payload = ItemPayload::validate(&json!({
            "id": 99,
            "name": "A",
            "price": 1,
            "created_at": "2020-01-01T00:00:00Z",
            "extra": true
        }))
        .unwrap();
        assert_eq!(payload, ItemPayload::new("A", 1.0));
    }

    #[test]
    fn test_missing_required_fields_reported_together() {
        let errors = ItemPayload::validate(&json!({"description": "x"})).unwrap_err();
        let locs: Vec<_> = errors.errors().iter().map(|e| e.loc.join(".")).collect();
        assert_eq!(locs, vec!["body.name", "body.price"]);
        assert!(errors.errors().iter().all(|e| e.kind == "missing"));
    }

    #[test]
    fn test_wrong_types() {
        let errors = ItemPayload::validate(&json!({
            "id": "abc",
            "name": 5,
            "price": "cheap",
            "created_at": "not a date"
        }))
        .unwrap_err();
        let kinds: Vec<_> = errors.errors().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["int_parsing", "string_type", "float_parsing", "datetime_parsing"]
        );
    }

    #[test]
    fn test_null_name_is_a_type_error() {
        let errors = ItemPayload::validate(&json!({"name": null, "price": 1})).unwrap_err();
        assert_eq!(errors.errors()[0].kind, "string_type");
    }

    #[test]
    fn test_item_serialization_shape() {
        let created_at = Utc::now();
        let item = Item::from_payload(ItemId::new(1), created_at, ItemPayload::new("A", 1.0));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["name"], json!("A"));
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["price"], json!(1.0));
        assert!(value["created_at"].is_string());
        assert_eq!(item.payload(), ItemPayload::new("A", 1.0));
    }
}
