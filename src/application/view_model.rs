use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::{Item, Order};

/// Transport-facing representation of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderViewModel {
    pub id: i64,
    pub customer_name: String,
    /// `YYYY-MM-DDTHH:MM:SS±HH:MM`
    #[serde(with = "crate::timestamp")]
    #[schema(value_type = String, example = "2006-01-02T15:04:05-07:00")]
    pub ordered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<ItemViewModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemViewModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub order_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderViewModel {
    /// Every item is stamped with this order's id as its foreign key.
    pub fn into_entity(self) -> Order {
        let order_id = self.id;
        Order {
            id: self.id,
            customer_name: self.customer_name,
            ordered_at: self.ordered_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: self
                .items
                .into_iter()
                .map(|item| item.into_entity(order_id))
                .collect(),
        }
    }
}

impl ItemViewModel {
    fn into_entity(self, order_id: i64) -> Item {
        Item {
            id: self.id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            order_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Order> for OrderViewModel {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_name: order.customer_name,
            ordered_at: order.ordered_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items: order.items.into_iter().map(ItemViewModel::from).collect(),
        }
    }
}

impl From<Item> for ItemViewModel {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            order_id: item.order_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn persisted_order() -> Order {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        Order {
            id: 7,
            customer_name: "Alice".to_string(),
            ordered_at: at,
            created_at: Some(at),
            updated_at: Some(at),
            items: vec![Item {
                id: 11,
                name: "Widget".to_string(),
                description: "d1".to_string(),
                quantity: 2,
                order_id: 7,
                created_at: Some(at),
                updated_at: Some(at),
            }],
        }
    }

    #[test]
    fn entity_survives_a_trip_through_the_view_model() {
        let order = persisted_order();

        let back = OrderViewModel::from(order.clone()).into_entity();

        assert_eq!(back, order);
    }

    #[test]
    fn into_entity_stamps_parent_id_on_items() {
        let mut vm = OrderViewModel::from(persisted_order());
        vm.id = 42;
        vm.items[0].order_id = 0;

        let entity = vm.into_entity();

        assert_eq!(entity.id, 42);
        assert!(entity.items.iter().all(|item| item.order_id == 42));
    }

    #[test]
    fn serializes_ordered_at_in_wire_layout() {
        let vm = OrderViewModel::from(persisted_order());

        let value = serde_json::to_value(&vm).expect("serializable");

        assert_eq!(value["ordered_at"], json!("2024-05-01T09:30:00+00:00"));
        assert_eq!(value["customer_name"], json!("Alice"));
        assert_eq!(value["items"][0]["description"], json!("d1"));
        assert_eq!(value["items"][0]["quantity"], json!(2));
    }

    #[test]
    fn unsaved_timestamps_are_omitted() {
        let mut vm = OrderViewModel::from(persisted_order());
        vm.created_at = None;
        vm.updated_at = None;

        let value = serde_json::to_value(&vm).expect("serializable");

        assert!(value.get("created_at").is_none());
        assert!(value.get("updated_at").is_none());
    }
}
