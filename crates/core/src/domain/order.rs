use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted order-log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    /// Opaque line items; no per-item shape is enforced.
    pub pizzas: Vec<Value>,
}

/// A validated order submission that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderDraft {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
    pub pizzas: Vec<Value>,
}

impl OrderDraft {
    /// Validates an inbound order payload.
    ///
    /// Presence checks only: the four text fields must be non-empty strings
    /// and `pizzas` must be an array. Line items are kept as submitted.
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        let name = required_text(payload, "name")?;
        let phone = required_text(payload, "phone")?;
        let address = required_text(payload, "address")?;
        let payment_method = required_text(payload, "paymentMethod")?;

        let pizzas = match payload.get("pizzas") {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => return Err(DomainError::MissingField("pizzas")),
            Some(_) => {
                return Err(DomainError::InvalidField { field: "pizzas", expected: "an array" })
            }
        };

        Ok(Self { name, phone, address, payment_method, pizzas })
    }

    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            payment_method: self.payment_method,
            pizzas: self.pizzas,
        }
    }
}

fn required_text(payload: &Value, field: &'static str) -> Result<String, DomainError> {
    match payload.get(field) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(Value::Null) | None => Err(DomainError::MissingField(field)),
        Some(_) => Err(DomainError::InvalidField { field, expected: "a non-empty string" }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::errors::DomainError;

    use super::{OrderDraft, OrderId};

    fn payload() -> serde_json::Value {
        json!({
            "name": "Ada",
            "phone": "+3170000000",
            "address": "1 Canal Street",
            "paymentMethod": "cash",
            "pizzas": [{ "id": 1, "quantity": 2 }]
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let draft = OrderDraft::from_payload(&payload()).expect("payload should validate");
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.payment_method, "cash");
        assert_eq!(draft.pizzas.len(), 1);
    }

    #[test]
    fn rejects_each_missing_text_field() {
        for field in ["name", "phone", "address", "paymentMethod"] {
            let mut payload = payload();
            payload.as_object_mut().expect("payload is an object").remove(field);

            let error = OrderDraft::from_payload(&payload).expect_err("field must be required");
            assert_eq!(error, DomainError::MissingField(field));
        }
    }

    #[test]
    fn rejects_empty_and_non_string_text_fields() {
        let mut payload = payload();
        payload["phone"] = json!("");
        let error = OrderDraft::from_payload(&payload).expect_err("empty phone must fail");
        assert!(matches!(error, DomainError::InvalidField { field: "phone", .. }));

        let mut payload = self::payload();
        payload["name"] = json!(42);
        let error = OrderDraft::from_payload(&payload).expect_err("numeric name must fail");
        assert!(matches!(error, DomainError::InvalidField { field: "name", .. }));
    }

    #[test]
    fn rejects_missing_or_non_array_pizzas() {
        let mut payload = payload();
        payload.as_object_mut().expect("payload is an object").remove("pizzas");
        let error = OrderDraft::from_payload(&payload).expect_err("pizzas must be required");
        assert_eq!(error, DomainError::MissingField("pizzas"));

        let mut payload = self::payload();
        payload["pizzas"] = json!("margherita");
        let error = OrderDraft::from_payload(&payload).expect_err("string pizzas must fail");
        assert!(matches!(error, DomainError::InvalidField { field: "pizzas", .. }));
    }

    #[test]
    fn rejects_a_non_object_payload() {
        let error =
            OrderDraft::from_payload(&json!(["not", "an", "object"])).expect_err("must fail");
        assert_eq!(error, DomainError::MissingField("name"));
    }

    #[test]
    fn assembled_order_serializes_with_camel_case_payment_method() {
        let order = OrderDraft::from_payload(&payload())
            .expect("payload should validate")
            .into_order(OrderId(1700000000000));

        let encoded = serde_json::to_value(&order).expect("order should serialize");
        assert_eq!(encoded["id"], 1700000000000i64);
        assert_eq!(encoded["paymentMethod"], "cash");
        assert!(encoded.get("payment_method").is_none());
    }
}
