use chrono::{DateTime, Utc};

/// A customer purchase record. Owns its items exclusively.
///
/// `id` is zero until the order has been persisted; the server managed
/// timestamps are `None` until then.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub ordered_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<Item>,
}

/// A line entry of an order. `description` is unique across the whole store.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub order_id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
